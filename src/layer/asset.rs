//! Fixed-position image element from the assets folder.

use crate::error::Result;
use crate::image::Origin;
use crate::layer::RenderContext;
use crate::logs;

use libvips::VipsImage;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetLayer {
    pub path: String,
    pub x: i32,
    pub y: i32,
    pub w: f64,
    pub h: f64,
}

impl AssetLayer {
    pub fn new(path: impl Into<String>, x: i32, y: i32, w: f64, h: f64) -> Self {
        Self { path: path.into(), x, y, w, h }
    }

    pub(super) fn render(&self, img: VipsImage, ctx: &mut RenderContext) -> Result<VipsImage> {
        let fp = ctx.img_map.asset_path(&self.path);
        let fp = fp.to_string_lossy();
        if let Err(e) = ctx.backend.cache(&fp) {
            logs::warn(format!("skipping `{}`: {e}", self.path));
            return Ok(img);
        }
        let asset = ctx.backend.get_cached(&fp)?;
        let (iw, ih) = (asset.get_width() as f64, asset.get_height() as f64);
        let asset = ctx.backend.scale(asset, self.w / iw, self.h / ih)?;
        ctx.backend.overlay(
            &img,
            &asset,
            self.x,
            self.y,
            Origin::Absolute(0.0),
            Origin::Absolute(0.0),
        )
    }
}
