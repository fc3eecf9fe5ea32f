//! Bracketed category label with an optional inline icon, right-aligned so
//! the closing bracket lands at a fixed column.

use crate::error::Result;
use crate::image::{Color, Origin};
use crate::layer::RenderContext;
use crate::logs;
use crate::text::FontSlot;

use libvips::VipsImage;

const PADDING: i32 = 2;
const ICON_SIZE: f64 = 25.0;

#[derive(Debug, Clone, PartialEq)]
pub struct IconLabelLayer {
    pub text: String,
    pub icon: Option<String>,
    pub end_x: i32,
    pub y: i32,
    pub size: f64,
    pub font: FontSlot,
    pub color: Color,
}

impl IconLabelLayer {
    pub fn new(
        text: impl Into<String>,
        icon: Option<String>,
        end_x: i32,
        y: i32,
        size: f64,
        font: FontSlot,
    ) -> Self {
        Self {
            text: text.into(),
            icon,
            end_x,
            y,
            size,
            font,
            color: Color::BLACK,
        }
    }

    pub(super) fn render(&self, img: VipsImage, ctx: &mut RenderContext) -> Result<VipsImage> {
        let desc = ctx.font_map.get_desc(self.font, self.size, false, false);
        let open = ctx.backend.print("[", &desc, self.color)?;
        let label = ctx.backend.print(&self.text, &desc, self.color)?;
        let close = ctx.backend.print("]", &desc, self.color)?;

        let icon = match &self.icon {
            Some(icon) => {
                let fp = ctx.img_map.asset_path(icon);
                let fp = fp.to_string_lossy();
                match ctx.backend.cache(&fp) {
                    Ok(()) => {
                        let asset = ctx.backend.get_cached(&fp)?;
                        let (iw, ih) = (asset.get_width() as f64, asset.get_height() as f64);
                        Some(ctx.backend.scale(asset, ICON_SIZE / iw, ICON_SIZE / ih)?)
                    }
                    Err(e) => {
                        logs::warn(format!("skipping `{icon}`: {e}"));
                        None
                    }
                }
            }
            None => None,
        };

        // space for the icon is reserved from the field alone, so a failed
        // load leaves a gap instead of shifting the brackets
        let slots = if self.icon.is_some() { 3 } else { 2 };
        let total = open.get_width()
            + label.get_width()
            + if self.icon.is_some() { ICON_SIZE as i32 } else { 0 }
            + close.get_width()
            + PADDING * slots;
        let mut x = self.end_x - total;
        let oy = Origin::Relative(0.5);

        let mut img = ctx.backend.overlay(&img, &open, x, self.y, Origin::Absolute(0.0), oy)?;
        x += open.get_width() + PADDING;
        img = ctx.backend.overlay(&img, &label, x, self.y, Origin::Absolute(0.0), oy)?;
        x += label.get_width() + PADDING;
        if self.icon.is_some() {
            if let Some(icon) = &icon {
                img = ctx.backend.overlay(
                    &img,
                    icon,
                    x,
                    self.y - (ICON_SIZE / 2.0) as i32,
                    Origin::Absolute(0.0),
                    Origin::Absolute(0.0),
                )?;
            }
            x += ICON_SIZE as i32 + PADDING;
        }
        ctx.backend.overlay(&img, &close, x, self.y, Origin::Absolute(0.0), oy)
    }
}
