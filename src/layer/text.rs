//! Autosized multi-line text block.

use crate::error::Result;
use crate::image::{Color, Origin};
use crate::layer::RenderContext;
use crate::text::{fit, FitOptions, FontSlot};

use libvips::VipsImage;

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub fit: FitOptions,
    pub font: FontSlot,
    pub italic: bool,
    pub color: Color,
}

impl TextLayer {
    pub fn new(text: impl Into<String>, x: i32, y: i32, fit: FitOptions, font: FontSlot) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            fit,
            font,
            italic: false,
            color: Color::BLACK,
        }
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub(super) fn render(&self, img: VipsImage, ctx: &mut RenderContext) -> Result<VipsImage> {
        let desc = ctx.font_map.get_desc(self.font, self.fit.max_size, false, self.italic);
        let mut measure = ctx.backend.measure(&desc);
        let fitted = fit(&self.text, &self.fit, &mut measure);

        let desc = ctx.font_map.get_desc(self.font, fitted.size, false, self.italic);
        let mut img = img;
        for (i, line) in fitted.lines.iter().enumerate() {
            let line_img = ctx.backend.print(line, &desc, self.color)?;
            // a line that still overflows after wrapping holds a single
            // over-long word; squash it horizontally
            let lw = line_img.get_width() as f64;
            let line_img = if lw > self.fit.max_width {
                ctx.backend.scale(&line_img, self.fit.max_width / lw, 1.0)?
            } else {
                line_img
            };
            let y = self.y + (i as f64 * fitted.size) as i32;
            img = ctx.backend.overlay(
                &img,
                &line_img,
                self.x,
                y,
                Origin::Absolute(0.0),
                Origin::Absolute(0.0),
            )?;
        }
        Ok(img)
    }
}
