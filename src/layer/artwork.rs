//! The card's illustration, stretched into its frame window.

use crate::error::Result;
use crate::image::Origin;
use crate::layer::RenderContext;
use crate::logs;

use libvips::VipsImage;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkLayer {
    pub path: PathBuf,
    pub x: i32,
    pub y: i32,
    pub w: f64,
    pub h: f64,
}

impl ArtworkLayer {
    pub fn new(path: impl Into<PathBuf>, x: i32, y: i32, w: f64, h: f64) -> Self {
        Self { path: path.into(), x, y, w, h }
    }

    pub(super) fn render(&self, img: VipsImage, ctx: &mut RenderContext) -> Result<VipsImage> {
        // artwork is user-provided and may change between renders, so it
        // bypasses the asset cache
        let artwork = match ctx.backend.open(self.path.to_string_lossy()) {
            Ok(artwork) => artwork,
            Err(e) => {
                logs::warn(format!("skipping artwork `{}`: {e}", self.path.display()));
                return Ok(img);
            }
        };
        let artwork = ctx.backend.scale_to(&artwork, Some(self.w), Some(self.h))?;
        ctx.backend.overlay(
            &img,
            &artwork,
            self.x,
            self.y,
            Origin::Absolute(0.0),
            Origin::Absolute(0.0),
        )
    }
}
