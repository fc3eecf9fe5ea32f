//! Image backend implementation.

mod color;
mod map;
mod origin;

use crate::error::{Error, Result};
pub use crate::image::color::Color;
pub use crate::image::map::{ImageMap, Resize};
pub use crate::image::origin::Origin;
use crate::text::Measure;

use cairo::ImageSurface;
use libvips::{ops, VipsApp, VipsImage};
use pango::prelude::FontMapExt;
use std::collections::HashMap;
use std::path::Path;

pub struct ImgBackend {
    vips_app: VipsApp,
    cache: HashMap<String, VipsImage>,
}

impl ImgBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            vips_app: libvips::VipsApp::default("duelsmith")
                .map_err(|e| Error::VipsError(e.to_string()))?,
            cache: HashMap::new(),
        })
    }

    pub fn err(&self, e: libvips::error::Error) -> Error {
        Error::VipsError(format!(
            "{e}\n{}",
            self.vips_app.error_buffer().expect("vips error buffer")
        ))
    }

    fn reinterpret(&self, img: &VipsImage) -> Result<VipsImage> {
        let img = ops::cast(&img, ops::BandFormat::Uchar).map_err(|e| self.err(e))?;
        let img = ops::copy_with_opts(
            &img,
            &ops::CopyOptions {
                interpretation: ops::Interpretation::Srgb,
                width: img.get_width(),
                height: img.get_height(),
                bands: img.get_bands(),
                format: ops::BandFormat::Uchar,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))?;
        if img.get_bands() == 3 {
            ops::bandjoin_const(&img, &mut [255.0]).map_err(|e| self.err(e))
        } else {
            Ok(img)
        }
    }

    pub fn new_canvas(&self, bg: &Color, width: i32, height: i32) -> Result<VipsImage> {
        let (r, g, b, a) = bg.scaled_rgba();
        let img = ops::black_with_opts(width, height, &ops::BlackOptions { bands: 4 })
            .map_err(|e| self.err(e))?;
        let img = VipsImage::new_from_image(&img, &[r, g, b, a]).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn cairo_to_vips(&self, img: ImageSurface) -> Result<VipsImage> {
        let mut buffer = Vec::new();
        img.write_to_png(&mut buffer)
            .map_err(|_| Error::ImageConversion("cairo", "vips"))?;
        let mut img = VipsImage::new_from_buffer(&buffer, "").map_err(|e| self.err(e))?;
        img.image_wio_input().map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn open(&self, fp: impl AsRef<str>) -> Result<VipsImage> {
        let fp = fp.as_ref();
        let img = VipsImage::new_from_file(fp).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn cache(&mut self, key: impl AsRef<str>) -> Result<()> {
        let key_str = key.as_ref();
        if !self.cache.contains_key(key_str) {
            self.cache.insert(key_str.to_string(), self.open(key)?);
        }
        Ok(())
    }

    pub fn get_cached(&self, key: impl AsRef<str>) -> Result<&VipsImage> {
        let key_str = key.as_ref();
        self.cache
            .get(key_str)
            .ok_or_else(|| Error::ImageCacheMiss(key_str.to_string()))
    }

    pub fn scale(&self, img: &VipsImage, sx: f64, sy: f64) -> Result<VipsImage> {
        ops::resize_with_opts(
            &img,
            sx,
            &ops::ResizeOptions {
                vscale: sy,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))
    }

    pub fn scale_to(&self, img: &VipsImage, w: Option<f64>, h: Option<f64>) -> Result<VipsImage> {
        let (iw, ih) = (img.get_width() as f64, img.get_height() as f64);
        let (sx, sy) = match (w, h) {
            (Some(rw), Some(rh)) => (rw / iw, rh / ih),
            (Some(rw), None) => {
                let s = rw / iw;
                (s, s)
            }
            (None, Some(rh)) => {
                let s = rh / ih;
                (s, s)
            }
            (None, None) => (1.0, 1.0),
        };
        self.scale(img, sx, sy)
    }

    pub fn overlay(
        &self,
        base: &VipsImage,
        src: &VipsImage,
        x: i32,
        y: i32,
        ox: Origin,
        oy: Origin,
    ) -> Result<VipsImage> {
        let (bw, bh) = (base.get_width(), base.get_height());
        let (w, h) = (src.get_width() as f64, src.get_height() as f64);
        let ox = ox.apply(w) as i32;
        let oy = oy.apply(h) as i32;
        let src = ops::embed(&src, x - ox, y - oy, bw, bh).map_err(|e| self.err(e))?;
        ops::composite_2(&base, &src, ops::BlendMode::Over).map_err(|e| self.err(e))
    }

    /// Renders a single run of text to a tightly sized image.
    pub fn print(
        &self,
        text: &str,
        desc: &pango::FontDescription,
        color: Color,
    ) -> Result<VipsImage> {
        let err = |e: cairo::Error| Error::CairoError(e.to_string());
        let ctx = pangocairo::FontMap::new().create_context();
        let layout = pango::Layout::new(&ctx);

        let mut opt = cairo::FontOptions::new().map_err(err)?;
        opt.set_antialias(cairo::Antialias::Good);
        pangocairo::functions::context_set_font_options(&ctx, Some(&opt));

        layout.set_font_description(Some(desc));
        layout.set_text(text);

        let (_, log_rect) = layout.extents();
        let width = (log_rect.width() / pango::SCALE).max(1);
        let height = (log_rect.height() / pango::SCALE).max(1);
        let base = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).map_err(err)?;
        let cr = cairo::Context::new(&base).map_err(err)?;
        let (r, g, b, a) = color.rgba();
        cr.set_source_rgba(r, g, b, a);
        pangocairo::functions::show_layout(&cr, &layout);
        self.cairo_to_vips(base)
    }

    /// A reusable measurer over the same text context [`print`] renders with.
    ///
    /// [`print`]: Self::print
    pub fn measure(&self, desc: &pango::FontDescription) -> TextMeasure {
        let ctx = pangocairo::FontMap::new().create_context();
        let layout = pango::Layout::new(&ctx);
        TextMeasure { layout, desc: desc.clone() }
    }

    pub fn write(&self, img: &VipsImage, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        img.image_write_to_file(&path.to_string_lossy())
            .map_err(|e| self.err(e))
    }
}

pub struct TextMeasure {
    layout: pango::Layout,
    desc: pango::FontDescription,
}

impl Measure for TextMeasure {
    fn width(&mut self, text: &str, size: f64) -> f64 {
        let mut desc = self.desc.clone();
        desc.set_absolute_size(size * pango::SCALE as f64);
        self.layout.set_font_description(Some(&desc));
        self.layout.set_text(text);
        let (_, log_rect) = self.layout.extents();
        (log_rect.width() / pango::SCALE) as f64
    }
}
