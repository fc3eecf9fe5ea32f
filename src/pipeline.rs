//! Connects card data to rendered images.

use crate::config::Config;
use crate::data::CardData;
use crate::decode::{CardDecoder, CARD_HEIGHT, CARD_WIDTH};
use crate::error::Result;
use crate::image::{Color, ImageMap, ImgBackend, Resize};
use crate::layer::RenderContext;
use crate::preview::{Face, Preview};
use crate::text::FontMap;

use libvips::VipsImage;

use std::path::Path;
use std::time::Instant;

/// Holds every long-lived piece of the rendering process: the vips backend
/// and its asset cache, the resolved fonts, and the preview state that
/// decides which face of the card to draw.
pub struct Pipeline {
    backend: ImgBackend,
    font_map: FontMap,
    img_map: ImageMap,
    decoder: CardDecoder,
    preview: Preview,
}

impl Pipeline {
    pub fn new(folder: &Path, config: &Config) -> Result<Self> {
        Ok(Self {
            backend: ImgBackend::new()?,
            font_map: FontMap::new(&config.font)?,
            img_map: ImageMap {
                assets_folder: config.assets_folder(folder),
                card_size: (CARD_WIDTH, CARD_HEIGHT),
                background: Color::TRANSPARENT,
            },
            decoder: CardDecoder::new(),
            preview: Preview::new(),
        })
    }

    /// Renders whichever face the preview is showing for this card at `now`.
    /// A card without a template shows the cover, and clearing the template
    /// keeps the front up until the flip animation would have ended.
    pub fn render(&mut self, card: &CardData, now: Instant) -> Result<VipsImage> {
        self.preview.observe(card.template, now);
        let face = self.preview.face(now);
        self.render_face(card, face)
    }

    /// Renders the card back, regardless of the preview state.
    pub fn render_back(&mut self, card: &CardData) -> Result<VipsImage> {
        self.render_face(card, Face::Cover)
    }

    fn render_face(&mut self, card: &CardData, face: Face) -> Result<VipsImage> {
        let stack = self.decoder.decode(card, face);
        let mut ctx = RenderContext {
            backend: &mut self.backend,
            font_map: &self.font_map,
            img_map: &self.img_map,
        };
        stack.render(&mut ctx)
    }

    pub fn write(
        &self,
        img: &VipsImage,
        path: impl AsRef<Path>,
        resize: Option<&Resize>,
    ) -> Result<()> {
        match resize {
            Some(resize) => {
                let img = resize.apply(&self.backend, img)?;
                self.backend.write(&img, path)
            }
            None => self.backend.write(img, path),
        }
    }
}
