//! Asset location and output sizing.

use crate::error::Result;
use crate::image::color::Color;
use crate::image::ImgBackend;

use libvips::VipsImage;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where card assets live and how the canvas is set up.
pub struct ImageMap {
    pub assets_folder: PathBuf,
    pub card_size: (i32, i32),
    pub background: Color,
}

impl ImageMap {
    pub fn asset_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let mut fp = self.assets_folder.clone();
        fp.push(path.as_ref());
        fp
    }
}

/// Output dimensions. A missing component preserves the aspect ratio.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resize {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Resize {
    pub fn apply(&self, ib: &ImgBackend, img: &VipsImage) -> Result<VipsImage> {
        ib.scale_to(img, self.width.map(f64::from), self.height.map(f64::from))
    }
}

impl FromStr for Resize {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let re = Regex::new(r"^([0-9]+)?\s*x\s*([0-9]+)?$").unwrap();
        let captures = re
            .captures(s)
            .ok_or("string not in form WxH where W and H are optional integer numbers")?;
        let width = captures
            .get(1)
            .map(|m| m.as_str().parse())
            .transpose()
            .map_err(|_| "W is too large")?;
        let height = captures
            .get(2)
            .map(|m| m.as_str().parse())
            .transpose()
            .map_err(|_| "H is too large")?;
        if width.is_none() && height.is_none() {
            return Err("at least one of W and H must be set");
        }
        Ok(Self { width, height })
    }
}
