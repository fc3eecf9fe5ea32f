//! Form editing rules. Every setter returns a fresh record with the
//! dependent-field effects of the edit already applied, so the holder can
//! never observe a contradictory intermediate state.

use crate::data::card::{truncated, Arrow, Attribute, CardData, LinkArrows, Symbol, Template};
use crate::data::validate;

use std::path::PathBuf;

impl CardData {
    /// Changes the template, resetting every field that does not carry over.
    pub fn with_template(&self, template: Option<Template>) -> Self {
        let mut card = self.clone();
        let had_magic_attribute =
            matches!(card.attribute, Some(Attribute::Spell | Attribute::Trap));
        card.template = template;
        match template {
            Some(t) if t.is_magic() => {
                card.attribute = t.attribute();
                card.symbol = Some(Symbol::Normal);
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
        if !template.is_some_and(|t| t.is_magic()) {
            if had_magic_attribute {
                card.attribute = None;
            }
            card.symbol = None;
        }
        if template != Some(Template::Link) {
            card.link_rating = None;
            card.link_arrows = LinkArrows::default();
        }
        if !template.is_some_and(|t| t.allows_pendulum()) && card.pendulum {
            card.pendulum = false;
            card.pendulum_effect.clear();
        }
        card
    }

    pub fn with_name(&self, name: impl AsRef<str>) -> Self {
        Self { name: truncated(name.as_ref(), 50), ..self.clone() }
    }

    /// Ignored while the template forces an attribute or no template is set.
    pub fn with_attribute(&self, attribute: Option<Attribute>) -> Self {
        let mut card = self.clone();
        let editable = card.template.is_some_and(|t| !t.is_magic());
        if editable && !matches!(attribute, Some(Attribute::Spell | Attribute::Trap)) {
            card.attribute = attribute;
        }
        card
    }

    /// Accepts raw text input; non-digits are stripped and the value is
    /// clamped into 1..=12. Ignored for templates without a level or rank.
    pub fn with_stars(&self, raw: &str) -> Self {
        let mut card = self.clone();
        let editable = matches!(
            card.template,
            Some(Template::Normal)
                | Some(Template::Effect)
                | Some(Template::Fusion)
                | Some(Template::Ritual)
                | Some(Template::Synchro)
                | Some(Template::Xyz)
        );
        if editable {
            card.stars = validate::numeric(raw, 1, 12).map(|v| v as u8);
        }
        card
    }

    /// Only meaningful for Spell and Trap cards.
    pub fn with_symbol(&self, symbol: Option<Symbol>) -> Self {
        let mut card = self.clone();
        if card.template.is_some_and(|t| t.is_magic()) {
            card.symbol = symbol;
        }
        card
    }

    pub fn with_art(&self, art: Option<PathBuf>) -> Self {
        Self { art, ..self.clone() }
    }

    pub fn with_edition(&self, edition: impl AsRef<str>) -> Self {
        Self { edition: truncated(edition.as_ref(), 10), ..self.clone() }
    }

    pub fn with_type_line(&self, type_line: impl AsRef<str>) -> Self {
        let mut card = self.clone();
        if card.template.is_some_and(|t| !t.is_magic()) {
            card.type_line = truncated(type_line.as_ref(), 30);
        }
        card
    }

    pub fn with_effect(&self, effect: impl AsRef<str>) -> Self {
        Self { effect: truncated(effect.as_ref(), 600), ..self.clone() }
    }

    pub fn with_atk(&self, raw: &str) -> Self {
        let mut card = self.clone();
        if !card.template.is_some_and(|t| t.is_magic()) {
            card.atk = validate::numeric(raw, 0, 9999).map(|v| v as u16);
        }
        card
    }

    pub fn with_def(&self, raw: &str) -> Self {
        let mut card = self.clone();
        let editable = !card.template.is_some_and(|t| t.is_magic())
            && card.template != Some(Template::Link);
        if editable {
            card.def = validate::numeric(raw, 0, 9999).map(|v| v as u16);
        }
        card
    }

    pub fn with_link_rating(&self, raw: &str) -> Self {
        let mut card = self.clone();
        if card.template == Some(Template::Link) {
            card.link_rating = validate::numeric(raw, 1, 6).map(|v| v as u8);
        }
        card
    }

    pub fn with_link_arrow(&self, arrow: Arrow, on: bool) -> Self {
        let mut card = self.clone();
        if card.template == Some(Template::Link) {
            card.link_arrows.set(arrow, on);
        }
        card
    }

    /// Turning pendulum on is ignored for templates that cannot carry it.
    /// Turning it off always clears the pendulum effect text.
    pub fn with_pendulum(&self, on: bool) -> Self {
        let mut card = self.clone();
        if on {
            if card.template.is_some_and(|t| t.allows_pendulum()) {
                card.pendulum = true;
            }
        } else {
            card.pendulum = false;
            card.pendulum_effect.clear();
        }
        card
    }

    pub fn with_blue_scale(&self, raw: &str) -> Self {
        let mut card = self.clone();
        if card.pendulum {
            card.pendulum_blue_scale = validate::numeric_or_min(raw, 1, 12) as u8;
        }
        card
    }

    pub fn with_red_scale(&self, raw: &str) -> Self {
        let mut card = self.clone();
        if card.pendulum {
            card.pendulum_red_scale = validate::numeric_or_min(raw, 1, 12) as u8;
        }
        card
    }

    pub fn with_pendulum_effect(&self, text: impl AsRef<str>) -> Self {
        let mut card = self.clone();
        if card.pendulum {
            card.pendulum_effect = truncated(text.as_ref(), 300);
        }
        card
    }

    pub fn with_serial(&self, raw: &str) -> Self {
        Self { serial: validate::serial(raw), ..self.clone() }
    }

    pub fn with_copyright(&self, copyright: impl AsRef<str>) -> Self {
        Self { copyright: truncated(copyright.as_ref(), 30), ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn effect_monster() -> CardData {
        CardData {
            template: Some(Template::Effect),
            attribute: Some(Attribute::Dark),
            stars: Some(6),
            type_line: String::from("Fiend"),
            atk: Some(2500),
            def: Some(1200),
            ..CardData::default()
        }
    }

    #[test]
    fn spell_forces_attribute_and_symbol() {
        let card = effect_monster().with_template(Some(Template::Spell));
        assert_eq!(card.attribute, Some(Attribute::Spell));
        assert_eq!(card.symbol, Some(Symbol::Normal));
        assert_eq!(card.stars, None);
        assert_eq!(card.type_line, "");
        assert_eq!(card.atk, None);
        assert_eq!(card.def, None);
    }

    #[test]
    fn link_clears_stars_def_and_pendulum() {
        let card = effect_monster()
            .with_pendulum(true)
            .with_pendulum_effect("Once per turn...")
            .with_template(Some(Template::Link));
        assert_eq!(card.stars, None);
        assert_eq!(card.def, None);
        assert!(!card.pendulum);
        assert_eq!(card.pendulum_effect, "");
        assert_eq!(card.atk, Some(2500));
    }

    #[test]
    fn leaving_link_clears_rating_and_arrows() {
        let card = effect_monster()
            .with_template(Some(Template::Link))
            .with_link_rating("3")
            .with_link_arrow(Arrow::TopLeft, true)
            .with_link_arrow(Arrow::BottomRight, true)
            .with_template(Some(Template::Effect));
        assert_eq!(card.link_rating, None);
        assert_eq!(card.link_arrows, LinkArrows::default());
    }

    #[test]
    fn token_drops_stars_and_magic_leftovers() {
        let card = effect_monster()
            .with_template(Some(Template::Spell))
            .with_template(Some(Template::Token));
        assert_eq!(card.stars, None);
        assert_eq!(card.attribute, None);
        assert_eq!(card.symbol, None);
    }

    #[test]
    fn clearing_template_resets_identity_fields() {
        let card = effect_monster().with_template(None);
        assert_eq!(card.attribute, None);
        assert_eq!(card.stars, None);
        assert_eq!(card.type_line, "");
        assert_eq!(card.atk, Some(2500));
    }

    #[test]
    fn attribute_edits_only_apply_to_monsters() {
        let spell = effect_monster().with_template(Some(Template::Spell));
        assert_eq!(
            spell.with_attribute(Some(Attribute::Dark)).attribute,
            Some(Attribute::Spell)
        );
        let blank = effect_monster().with_template(None);
        assert_eq!(blank.with_attribute(Some(Attribute::Dark)).attribute, None);
        let monster = effect_monster().with_attribute(Some(Attribute::Light));
        assert_eq!(monster.attribute, Some(Attribute::Light));
    }

    #[test]
    fn stars_edits_ignored_without_a_level() {
        let link = effect_monster().with_template(Some(Template::Link));
        assert_eq!(link.with_stars("4").stars, None);
        let token = effect_monster().with_template(Some(Template::Token));
        assert_eq!(token.with_stars("4").stars, None);
        assert_eq!(effect_monster().with_stars("15").stars, Some(12));
        assert_eq!(effect_monster().with_stars("").stars, None);
    }

    #[test]
    fn def_edits_ignored_for_link() {
        let link = effect_monster().with_template(Some(Template::Link));
        assert_eq!(link.with_def("1000").def, None);
        assert_eq!(link.with_link_rating("9").link_rating, Some(6));
    }

    #[test]
    fn pendulum_requires_a_monster_template() {
        let spell = effect_monster().with_template(Some(Template::Spell));
        assert!(!spell.with_pendulum(true).pendulum);
        let monster = effect_monster().with_pendulum(true);
        assert!(monster.pendulum);
        assert_eq!(monster.with_blue_scale("0").pendulum_blue_scale, 1);
        assert_eq!(monster.with_red_scale("99").pendulum_red_scale, 12);
    }

    #[test]
    fn pendulum_off_clears_effect_text() {
        let card = effect_monster()
            .with_pendulum(true)
            .with_pendulum_effect("You can Special Summon...")
            .with_pendulum(false);
        assert!(!card.pendulum);
        assert_eq!(card.pendulum_effect, "");
    }

    #[test]
    fn text_fields_truncate_at_their_limits() {
        let long = "x".repeat(100);
        assert_eq!(effect_monster().with_name(&long).name.chars().count(), 50);
        assert_eq!(effect_monster().with_edition(&long).edition.chars().count(), 10);
        assert_eq!(effect_monster().with_type_line(&long).type_line.chars().count(), 30);
    }

    #[test]
    fn raw_numeric_input_is_sanitized() {
        assert_eq!(effect_monster().with_atk("2 500").atk, Some(2500));
        assert_eq!(effect_monster().with_atk("").atk, None);
        assert_eq!(effect_monster().with_def("over 9999").def, Some(9999));
        assert_eq!(effect_monster().with_serial("no. 123456789").serial, "12345678");
    }
}
