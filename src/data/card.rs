//! Contains representations for card data.

use crate::data::validate;
use crate::error::{Error, Result};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

macro_rules! named_enum {
    (
        $(#[$outer:meta])*
        $vis:vis enum $Enum:ident {
            $( $Variant:ident ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        $vis enum $Enum {
            $( $Variant ),*
        }

        impl $Enum {
            /// The asset-key spelling of this variant.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$Variant => stringify!($Variant) ),*
                }
            }
        }

        impl fmt::Display for $Enum {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum! {
    /// Card category. Drives almost all conditional layout.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum Template {
        Normal,
        Effect,
        Fusion,
        Ritual,
        Synchro,
        Xyz,
        Link,
        Token,
        Spell,
        Trap,
    }
}

named_enum! {
    /// Elemental attribute icon key.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum Attribute {
        Dark,
        Divine,
        Earth,
        Fire,
        Light,
        Water,
        Wind,
        Spell,
        Trap,
    }
}

named_enum! {
    /// Spell/trap sub-category icon key.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum Symbol {
        Normal,
        Quick,
        Field,
        Equip,
        Continuous,
        Ritual,
        Counter,
    }
}

named_enum! {
    /// Link arrow direction.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum Arrow {
        TopLeft,
        TopCenter,
        TopRight,
        MiddleLeft,
        MiddleRight,
        BottomLeft,
        BottomCenter,
        BottomRight,
    }
}

impl Template {
    pub fn is_magic(&self) -> bool {
        matches!(self, Self::Spell | Self::Trap)
    }

    pub fn allows_pendulum(&self) -> bool {
        !matches!(self, Self::Spell | Self::Trap | Self::Token | Self::Link)
    }

    /// The attribute forced by a Spell or Trap template.
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            Self::Spell => Some(Attribute::Spell),
            Self::Trap => Some(Attribute::Trap),
            _ => None,
        }
    }
}

impl Arrow {
    pub const ALL: [Arrow; 8] = [
        Arrow::TopLeft,
        Arrow::TopCenter,
        Arrow::TopRight,
        Arrow::MiddleLeft,
        Arrow::MiddleRight,
        Arrow::BottomLeft,
        Arrow::BottomCenter,
        Arrow::BottomRight,
    ];
}

/// Directional connector flags, meaningful only for the Link template.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LinkArrows {
    pub top_left: bool,
    pub top_center: bool,
    pub top_right: bool,
    pub middle_left: bool,
    pub middle_right: bool,
    pub bottom_left: bool,
    pub bottom_center: bool,
    pub bottom_right: bool,
}

impl LinkArrows {
    pub fn get(&self, arrow: Arrow) -> bool {
        match arrow {
            Arrow::TopLeft => self.top_left,
            Arrow::TopCenter => self.top_center,
            Arrow::TopRight => self.top_right,
            Arrow::MiddleLeft => self.middle_left,
            Arrow::MiddleRight => self.middle_right,
            Arrow::BottomLeft => self.bottom_left,
            Arrow::BottomCenter => self.bottom_center,
            Arrow::BottomRight => self.bottom_right,
        }
    }

    pub fn set(&mut self, arrow: Arrow, on: bool) {
        let flag = match arrow {
            Arrow::TopLeft => &mut self.top_left,
            Arrow::TopCenter => &mut self.top_center,
            Arrow::TopRight => &mut self.top_right,
            Arrow::MiddleLeft => &mut self.middle_left,
            Arrow::MiddleRight => &mut self.middle_right,
            Arrow::BottomLeft => &mut self.bottom_left,
            Arrow::BottomCenter => &mut self.bottom_center,
            Arrow::BottomRight => &mut self.bottom_right,
        };
        *flag = on;
    }
}

struct LinkArrowsVisitor;

impl<'de> Visitor<'de> for LinkArrowsVisitor {
    type Value = LinkArrows;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a list of link arrow directions")
    }

    fn visit_seq<A: de::SeqAccess<'de>>(
        self,
        mut seq: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut arrows = LinkArrows::default();
        while let Some(arrow) = seq.next_element::<Arrow>()? {
            arrows.set(arrow, true);
        }
        Ok(arrows)
    }
}

impl<'de> Deserialize<'de> for LinkArrows {
    fn deserialize<D>(deserializer: D) -> std::result::Result<LinkArrows, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LinkArrowsVisitor)
    }
}

/// A complete card description. Every edit replaces the record wholesale;
/// nothing mutates a stored card in place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CardData {
    pub template: Option<Template>,
    pub name: String,
    pub attribute: Option<Attribute>,
    pub stars: Option<u8>,
    pub symbol: Option<Symbol>,
    pub art: Option<PathBuf>,
    pub edition: String,
    #[serde(rename = "type")]
    pub type_line: String,
    pub effect: String,
    pub atk: Option<u16>,
    pub def: Option<u16>,
    pub link_rating: Option<u8>,
    pub link_arrows: LinkArrows,
    pub pendulum: bool,
    pub pendulum_blue_scale: u8,
    pub pendulum_red_scale: u8,
    pub pendulum_effect: String,
    pub serial: String,
    pub copyright: String,
}

impl Default for CardData {
    fn default() -> Self {
        Self {
            template: None,
            name: String::from("New Card"),
            attribute: None,
            stars: None,
            symbol: None,
            art: None,
            edition: String::from("TEST-PT000"),
            type_line: String::new(),
            effect: String::new(),
            atk: None,
            def: None,
            link_rating: None,
            link_arrows: LinkArrows::default(),
            pendulum: false,
            pendulum_blue_scale: 1,
            pendulum_red_scale: 12,
            pendulum_effect: String::new(),
            serial: String::from("12345678"),
            copyright: String::from("© 1996 KAZUKI TAKAHASHI"),
        }
    }
}

impl CardData {
    /// Loads a card description from a TOML file. The result is normalized,
    /// and a relative artwork path is resolved against the file's folder.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::card_open(path, e))?;
        let card: Self = toml::from_str(&content).map_err(|e| Error::card_parse(path, e))?;
        let mut card = card.normalized();
        if let Some(art) = card.art.take() {
            card.art = Some(match path.parent() {
                Some(folder) if art.is_relative() => folder.join(art),
                _ => art,
            });
        }
        Ok(card)
    }

    /// Returns a copy with every model invariant enforced, so a hand-written
    /// description cannot carry contradictory fields into the renderer.
    pub fn normalized(&self) -> Self {
        let mut card = self.clone();
        match card.template {
            Some(t) if t.is_magic() => {
                card.attribute = t.attribute();
                card.symbol = card.symbol.or(Some(Symbol::Normal));
                card.stars = None;
                card.type_line.clear();
                card.atk = None;
                card.def = None;
            }
            Some(Template::Link) => {
                card.stars = None;
                card.def = None;
            }
            Some(Template::Token) => {
                card.stars = None;
            }
            None => {
                card.attribute = None;
                card.stars = None;
                card.type_line.clear();
            }
            Some(_) => {}
        }
        if !card.template.is_some_and(|t| t.is_magic()) {
            if matches!(card.attribute, Some(Attribute::Spell | Attribute::Trap)) {
                card.attribute = None;
            }
            card.symbol = None;
        }
        if card.template != Some(Template::Link) {
            card.link_rating = None;
            card.link_arrows = LinkArrows::default();
        }
        if !card.template.is_some_and(|t| t.allows_pendulum()) {
            card.pendulum = false;
        }
        if !card.pendulum {
            card.pendulum_effect.clear();
        }
        card.stars = card.stars.map(|v| v.clamp(1, 12));
        card.atk = card.atk.map(|v| v.min(9999));
        card.def = card.def.map(|v| v.min(9999));
        card.link_rating = card.link_rating.map(|v| v.clamp(1, 6));
        card.pendulum_blue_scale = card.pendulum_blue_scale.clamp(1, 12);
        card.pendulum_red_scale = card.pendulum_red_scale.clamp(1, 12);
        card.name = truncated(&card.name, 50);
        card.edition = truncated(&card.edition, 10);
        card.type_line = truncated(&card.type_line, 30);
        card.effect = truncated(&card.effect, 600);
        card.pendulum_effect = truncated(&card.pendulum_effect, 300);
        card.serial = validate::serial(&card.serial);
        card.copyright = truncated(&card.copyright, 30);
        card
    }
}

pub(crate) fn truncated(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_card_matches_application_start() {
        let card = CardData::default();
        assert_eq!(card.name, "New Card");
        assert_eq!(card.edition, "TEST-PT000");
        assert_eq!(card.serial, "12345678");
        assert_eq!(card.copyright, "© 1996 KAZUKI TAKAHASHI");
        assert_eq!(card.pendulum_blue_scale, 1);
        assert_eq!(card.pendulum_red_scale, 12);
        assert_eq!(card.template, None);
        assert_eq!(card.link_arrows, LinkArrows::default());
    }

    #[test]
    fn toml_description_fills_missing_fields_with_defaults() {
        let card: CardData = toml::from_str(
            r#"
            template = "effect"
            name = "Summoned Skull"
            attribute = "dark"
            stars = 6
            type = "Fiend"
            atk = 2500
            def = 1200
            "#,
        )
        .unwrap();
        assert_eq!(card.template, Some(Template::Effect));
        assert_eq!(card.name, "Summoned Skull");
        assert_eq!(card.stars, Some(6));
        assert_eq!(card.type_line, "Fiend");
        assert_eq!(card.serial, "12345678");
        assert_eq!(card.copyright, "© 1996 KAZUKI TAKAHASHI");
    }

    #[test]
    fn link_arrows_parse_from_direction_list() {
        let card: CardData = toml::from_str(
            r#"
            template = "link"
            link-rating = 2
            link-arrows = ["top-left", "bottom-right"]
            "#,
        )
        .unwrap();
        assert!(card.link_arrows.top_left);
        assert!(card.link_arrows.bottom_right);
        assert!(!card.link_arrows.top_center);
        assert_eq!(card.link_rating, Some(2));
    }

    #[test]
    fn normalized_enforces_magic_invariants() {
        let card: CardData = toml::from_str(
            r#"
            template = "spell"
            attribute = "dark"
            stars = 4
            type = "Dragon"
            atk = 3000
            def = 2500
            "#,
        )
        .unwrap();
        let card = card.normalized();
        assert_eq!(card.attribute, Some(Attribute::Spell));
        assert_eq!(card.symbol, Some(Symbol::Normal));
        assert_eq!(card.stars, None);
        assert_eq!(card.type_line, "");
        assert_eq!(card.atk, None);
        assert_eq!(card.def, None);
    }

    #[test]
    fn normalized_clears_link_fields_for_other_templates() {
        let mut card = CardData {
            template: Some(Template::Effect),
            link_rating: Some(3),
            ..CardData::default()
        };
        card.link_arrows.set(Arrow::TopLeft, true);
        let card = card.normalized();
        assert_eq!(card.link_rating, None);
        assert_eq!(card.link_arrows, LinkArrows::default());
    }

    #[test]
    fn normalized_clamps_out_of_range_values() {
        let card = CardData {
            template: Some(Template::Effect),
            stars: Some(99),
            atk: Some(20000),
            pendulum: true,
            pendulum_blue_scale: 0,
            pendulum_red_scale: 40,
            serial: String::from("no. 123456789"),
            ..CardData::default()
        };
        let card = card.normalized();
        assert_eq!(card.stars, Some(12));
        assert_eq!(card.atk, Some(9999));
        assert_eq!(card.pendulum_blue_scale, 1);
        assert_eq!(card.pendulum_red_scale, 12);
        assert_eq!(card.serial, "12345678");
    }

    #[test]
    fn normalized_drops_pendulum_for_link() {
        let card = CardData {
            template: Some(Template::Link),
            pendulum: true,
            pendulum_effect: String::from("Once per turn..."),
            def: Some(2000),
            ..CardData::default()
        };
        let card = card.normalized();
        assert!(!card.pendulum);
        assert_eq!(card.pendulum_effect, "");
        assert_eq!(card.def, None);
    }

    #[test]
    fn asset_names_keep_pascal_case() {
        assert_eq!(Template::Xyz.name(), "Xyz");
        assert_eq!(Attribute::Dark.name(), "Dark");
        assert_eq!(Symbol::Counter.name(), "Counter");
        assert_eq!(Arrow::BottomCenter.name(), "BottomCenter");
    }
}
