//! Implements the drawable layers a card is composed of.

mod artwork;
mod asset;
mod icon_label;
mod label;
mod text;

pub use artwork::ArtworkLayer;
pub use asset::AssetLayer;
pub use icon_label::IconLabelLayer;
pub use label::LabelLayer;
pub use text::TextLayer;

use crate::error::Result;
use crate::image::{ImageMap, ImgBackend};
use crate::text::FontMap;

use libvips::VipsImage;

pub struct RenderContext<'a> {
    pub backend: &'a mut ImgBackend,
    pub font_map: &'a FontMap,
    pub img_map: &'a ImageMap,
}

macro_rules! layers {
    ($($Variant:ident($Layer:ty)),* $(,)?) => {
        /// One drawable element of a card.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Layer {
            $( $Variant($Layer) ),*
        }

        $(
            impl From<$Layer> for Layer {
                fn from(layer: $Layer) -> Self {
                    Self::$Variant(layer)
                }
            }
        )*

        impl Layer {
            pub fn render(&self, img: VipsImage, ctx: &mut RenderContext) -> Result<VipsImage> {
                match self {
                    $( Self::$Variant(layer) => layer.render(img, ctx) ),*
                }
            }
        }
    };
}

layers! {
    Asset(AssetLayer),
    Artwork(ArtworkLayer),
    Label(LabelLayer),
    Text(TextLayer),
    IconLabel(IconLabelLayer),
}

/// An ordered list of layers, rendered bottom to top over a fresh canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStack(pub Vec<Layer>);

impl LayerStack {
    pub fn push(&mut self, layer: impl Into<Layer>) {
        self.0.push(layer.into());
    }

    pub fn render(self, ctx: &mut RenderContext) -> Result<VipsImage> {
        let bg = ctx.img_map.background;
        let (w, h) = ctx.img_map.card_size;

        let mut img = ctx.backend.new_canvas(&bg, w, h)?;

        let LayerStack(layers) = self;
        for layer in layers.into_iter() {
            img = layer.render(img, ctx)?;
        }
        Ok(img)
    }
}
