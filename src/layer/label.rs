//! Single line of text at a fixed anchor.

use crate::error::Result;
use crate::image::{Color, ImgBackend, Origin};
use crate::layer::RenderContext;
use crate::text::FontSlot;

use libvips::VipsImage;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayer {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: f64,
    pub font: FontSlot,
    pub bold: bool,
    pub color: Color,
    pub max_width: Option<f64>,
    pub ox: Origin,
    pub oy: Origin,
}

impl LabelLayer {
    pub fn new(text: impl Into<String>, x: i32, y: i32, size: f64, font: FontSlot) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            font,
            bold: false,
            color: Color::BLACK,
            max_width: None,
            ox: Origin::Absolute(0.0),
            oy: Origin::Absolute(0.0),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn max_width(mut self, w: f64) -> Self {
        self.max_width = Some(w);
        self
    }

    pub fn align(mut self, ox: Origin, oy: Origin) -> Self {
        self.ox = ox;
        self.oy = oy;
        self
    }

    /// Compresses the rendered text horizontally into `max_width`,
    /// leaving its height untouched.
    fn squash(&self, ib: &ImgBackend, img: VipsImage) -> Result<VipsImage> {
        if let Some(w) = self.max_width {
            let iw = img.get_width() as f64;
            if iw > w {
                return ib.scale(&img, w / iw, 1.0);
            }
        }
        Ok(img)
    }

    pub(super) fn render(&self, img: VipsImage, ctx: &mut RenderContext) -> Result<VipsImage> {
        let desc = ctx.font_map.get_desc(self.font, self.size, self.bold, false);
        let text_img = ctx.backend.print(&self.text, &desc, self.color)?;
        let text_img = self.squash(ctx.backend, text_img)?;
        ctx.backend.overlay(&img, &text_img, self.x, self.y, self.ox, self.oy)
    }
}
