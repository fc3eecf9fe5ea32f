//! Decodes card data into the layer stack that draws it.
//!
//! Layout constants are in canvas units on a fixed 420x610 card. Layers are
//! pushed in paint order, so later elements cover earlier ones.

use crate::data::{Arrow, CardData, Symbol, Template};
use crate::image::{Color, Origin};
use crate::layer::{ArtworkLayer, AssetLayer, IconLabelLayer, LabelLayer, LayerStack, TextLayer};
use crate::preview::Face;
use crate::text::{FitOptions, FontSlot};

pub const CARD_WIDTH: i32 = 420;
pub const CARD_HEIGHT: i32 = 610;

const NAME_MAX_WIDTH: f64 = 327.0;
const SPELL_LABEL: &str = "Card de Magia";
const TRAP_LABEL: &str = "Card de Armadilha";

const STAR_SIZE: f64 = 25.0;
const STAR_SPACING: i32 = 28;

const LINK_ARROW_RECTS: [(Arrow, i32, i32, f64, f64); 8] = [
    (Arrow::TopLeft, 30, 93, 45.0, 45.0),
    (Arrow::TopCenter, 165, 84, 90.0, 27.0),
    (Arrow::TopRight, 345, 93, 45.0, 45.0),
    (Arrow::MiddleLeft, 20, 225, 27.0, 90.0),
    (Arrow::MiddleRight, 372, 225, 27.0, 90.0),
    (Arrow::BottomLeft, 30, 402, 45.0, 45.0),
    (Arrow::BottomCenter, 165, 432, 90.0, 27.0),
    (Arrow::BottomRight, 345, 402, 45.0, 45.0),
];

/// Builds the layer stack for one face of a card.
#[derive(Debug, Default)]
pub struct CardDecoder;

impl CardDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, card: &CardData, face: Face) -> LayerStack {
        let mut stack = LayerStack::default();
        let template = match face {
            Face::Cover => {
                stack.push(full_frame("backgrounds/Cover.png"));
                return stack;
            }
            Face::Front(template) => template,
        };
        self.background(card, template, &mut stack);
        self.artwork(card, &mut stack);
        self.name(card, template, &mut stack);
        self.attribute(card, &mut stack);
        self.stars(card, template, &mut stack);
        self.category_label(card, template, &mut stack);
        self.link_arrows(card, template, &mut stack);
        self.pendulum_scales(card, &mut stack);
        self.pendulum_effect(card, &mut stack);
        self.edition(card, template, &mut stack);
        self.type_line(card, template, &mut stack);
        self.effect(card, template, &mut stack);
        self.stats(card, template, &mut stack);
        self.footer(card, template, &mut stack);
        stack
    }

    fn background(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        let variant = if card.pendulum { ".pendulum" } else { "" };
        stack.push(full_frame(format!("backgrounds/{template}{variant}.png")));
    }

    fn artwork(&self, card: &CardData, stack: &mut LayerStack) {
        let Some(art) = &card.art else { return };
        let layer = if card.pendulum {
            ArtworkLayer::new(art, 30, 110, 360.0, 270.0)
        } else {
            ArtworkLayer::new(art, 48, 110, 325.0, 325.0)
        };
        stack.push(layer);
    }

    fn name(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if card.name.is_empty() {
            return;
        }
        let color = match template {
            Template::Xyz | Template::Spell | Template::Trap => Color::WHITE,
            _ => Color::BLACK,
        };
        stack.push(
            LabelLayer::new(card.name.as_str(), 30, 18, 50.0, FontSlot::Title)
                .color(color)
                .max_width(NAME_MAX_WIDTH),
        );
    }

    fn attribute(&self, card: &CardData, stack: &mut LayerStack) {
        let Some(attribute) = card.attribute else { return };
        stack.push(AssetLayer::new(
            format!("attributes/{attribute}.png"),
            CARD_WIDTH - 60,
            29,
            35.0,
            35.0,
        ));
    }

    fn stars(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if matches!(template, Template::Spell | Template::Trap | Template::Link) {
            return;
        }
        let Some(stars) = card.stars else { return };
        let icon = if template == Template::Xyz {
            "stars/Rank.png"
        } else {
            "stars/Level.png"
        };
        for i in 0..i32::from(stars) {
            // ranks grow from the left edge, levels from the right
            let x = if template == Template::Xyz {
                43 + i * STAR_SPACING
            } else {
                CARD_WIDTH - 40 - (i + 1) * STAR_SPACING
            };
            stack.push(AssetLayer::new(icon, x, 73, STAR_SIZE, STAR_SIZE));
        }
    }

    fn category_label(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        let text = match template {
            Template::Spell => SPELL_LABEL,
            Template::Trap => TRAP_LABEL,
            _ => return,
        };
        let icon = card
            .symbol
            .filter(|s| *s != Symbol::Normal)
            .map(|s| format!("symbols/{s}.png"));
        stack.push(IconLabelLayer::new(text, icon, 380, 87, 22.0, FontSlot::Serif));
    }

    fn link_arrows(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if template != Template::Link {
            return;
        }
        for (arrow, x, y, w, h) in LINK_ARROW_RECTS {
            if card.link_arrows.get(arrow) {
                stack.push(AssetLayer::new(
                    format!("arrows/linkArrow{arrow}.png"),
                    x,
                    y,
                    w,
                    h,
                ));
            }
        }
    }

    fn pendulum_scales(&self, card: &CardData, stack: &mut LayerStack) {
        if !card.pendulum {
            return;
        }
        let y = CARD_HEIGHT - 170;
        for (scale, x) in [(card.pendulum_blue_scale, 44), (card.pendulum_red_scale, 377)] {
            stack.push(
                LabelLayer::new(scale.to_string(), x, y, 16.0, FontSlot::SmallCaps)
                    .bold()
                    .align(Origin::Relative(0.5), Origin::Relative(1.0)),
            );
        }
    }

    fn pendulum_effect(&self, card: &CardData, stack: &mut LayerStack) {
        if !card.pendulum || card.pendulum_effect.is_empty() {
            return;
        }
        stack.push(TextLayer::new(
            card.pendulum_effect.as_str(),
            67,
            385,
            FitOptions::new(290.0, 5),
            FontSlot::Body,
        ));
    }

    fn edition(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if card.edition.is_empty() {
            return;
        }
        let x = if card.pendulum {
            100
        } else if template == Template::Link {
            345
        } else {
            378
        };
        let y = CARD_HEIGHT - if card.pendulum { 40 } else { 157 };
        stack.push(
            LabelLayer::new(card.edition.as_str(), x, y, 12.0, FontSlot::SmallCaps)
                .color(footer_color(card, template))
                .align(Origin::Relative(1.0), Origin::Relative(1.0)),
        );
    }

    fn type_line(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if template.is_magic() || card.type_line.is_empty() {
            return;
        }
        let x = if card.pendulum { 33 } else { 30 };
        let text = format!("[{}]", card.type_line);
        stack.push(
            LabelLayer::new(text, x, CARD_HEIGHT - 137, 14.0, FontSlot::Serif)
                .align(Origin::Absolute(0.0), Origin::Relative(1.0)),
        );
    }

    fn effect(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if card.effect.is_empty() {
            return;
        }
        let (x, max_width) = if card.pendulum { (33, 357.0) } else { (28, 363.0) };
        stack.push(
            TextLayer::new(
                card.effect.as_str(),
                x,
                475,
                FitOptions::new(max_width, 8),
                FontSlot::Body,
            )
            .italic(template == Template::Normal),
        );
    }

    fn stats(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        if template.is_magic() {
            return;
        }
        let y = CARD_HEIGHT - 34;
        if let Some(atk) = card.atk {
            stack.push(
                LabelLayer::new(atk.to_string(), 300, y, 16.0, FontSlot::SmallCaps)
                    .bold()
                    .align(Origin::Relative(1.0), Origin::Relative(1.0)),
            );
        }
        if template == Template::Link {
            if let Some(rating) = card.link_rating {
                stack.push(
                    LabelLayer::new(rating.to_string(), 385, y, 16.0, FontSlot::Numeric)
                        .bold()
                        .align(Origin::Relative(1.0), Origin::Relative(1.0)),
                );
            }
        } else if let Some(def) = card.def {
            stack.push(
                LabelLayer::new(def.to_string(), 385, y, 16.0, FontSlot::SmallCaps)
                    .bold()
                    .align(Origin::Relative(1.0), Origin::Relative(1.0)),
            );
        }
    }

    fn footer(&self, card: &CardData, template: Template, stack: &mut LayerStack) {
        let color = footer_color(card, template);
        let y = CARD_HEIGHT - if card.pendulum { 15 } else { 12 };
        if !card.serial.is_empty() {
            stack.push(
                LabelLayer::new(card.serial.as_str(), 20, y, 12.0, FontSlot::SmallCaps)
                    .color(color)
                    .align(Origin::Absolute(0.0), Origin::Relative(1.0)),
            );
        }
        if !card.copyright.is_empty() {
            stack.push(
                LabelLayer::new(card.copyright.as_str(), 380, y, 12.0, FontSlot::SmallCaps)
                    .color(color)
                    .align(Origin::Relative(1.0), Origin::Relative(1.0)),
            );
        }
    }
}

fn full_frame(path: impl Into<String>) -> AssetLayer {
    AssetLayer::new(path, 0, 0, CARD_WIDTH as f64, CARD_HEIGHT as f64)
}

/// Xyz frames are dark enough to need white footer text, except in the
/// pendulum variant where the footer sits on the light pendulum box.
fn footer_color(card: &CardData, template: Template) -> Color {
    if template == Template::Xyz && !card.pendulum {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Attribute, LinkArrows};
    use crate::layer::Layer;
    use pretty_assertions::assert_eq;

    fn decode(card: &CardData) -> LayerStack {
        let template = card.template.expect("test card has a template");
        CardDecoder::new().decode(card, Face::Front(template))
    }

    fn assets(stack: &LayerStack) -> Vec<&AssetLayer> {
        stack
            .0
            .iter()
            .filter_map(|l| match l {
                Layer::Asset(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    fn labels(stack: &LayerStack) -> Vec<&LabelLayer> {
        stack
            .0
            .iter()
            .filter_map(|l| match l {
                Layer::Label(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    fn texts(stack: &LayerStack) -> Vec<&TextLayer> {
        stack
            .0
            .iter()
            .filter_map(|l| match l {
                Layer::Text(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    fn find_label<'a>(stack: &'a LayerStack, text: &str) -> &'a LabelLayer {
        labels(stack)
            .into_iter()
            .find(|l| l.text == text)
            .unwrap_or_else(|| panic!("no label `{text}`"))
    }

    fn monster() -> CardData {
        CardData {
            template: Some(Template::Effect),
            attribute: Some(Attribute::Dark),
            stars: Some(4),
            type_line: String::from("Fiend"),
            effect: String::from("Cannot be destroyed by battle."),
            atk: Some(1800),
            def: Some(1200),
            ..CardData::default()
        }
    }

    #[test]
    fn cover_face_is_a_single_background() {
        let stack = CardDecoder::new().decode(&CardData::default(), Face::Cover);
        assert_eq!(
            stack.0,
            vec![Layer::Asset(AssetLayer::new("backgrounds/Cover.png", 0, 0, 420.0, 610.0))]
        );
    }

    #[test]
    fn background_key_follows_template_and_pendulum() {
        let stack = decode(&monster());
        assert_eq!(assets(&stack)[0].path, "backgrounds/Effect.png");

        let pendulum = CardData { pendulum: true, ..monster() };
        let stack = decode(&pendulum);
        assert_eq!(assets(&stack)[0].path, "backgrounds/Effect.pendulum.png");
    }

    #[test]
    fn artwork_window_depends_on_pendulum() {
        let card = CardData { art: Some("dragon.png".into()), ..monster() };
        let stack = decode(&card);
        let art = stack
            .0
            .iter()
            .find_map(|l| match l {
                Layer::Artwork(a) => Some(a),
                _ => None,
            })
            .expect("artwork layer");
        assert_eq!((art.x, art.y, art.w, art.h), (48, 110, 325.0, 325.0));

        let card = CardData { art: Some("dragon.png".into()), pendulum: true, ..monster() };
        let stack = decode(&card);
        let art = stack
            .0
            .iter()
            .find_map(|l| match l {
                Layer::Artwork(a) => Some(a),
                _ => None,
            })
            .expect("artwork layer");
        assert_eq!((art.x, art.y, art.w, art.h), (30, 110, 360.0, 270.0));
    }

    #[test]
    fn name_is_white_on_dark_frames() {
        for template in [Template::Xyz, Template::Spell, Template::Trap] {
            let card = monster().with_template(Some(template));
            let name = find_label(&decode(&card), "New Card");
            assert_eq!(name.color, Color::WHITE, "{template}");
        }
        let name = find_label(&decode(&monster()), "New Card");
        assert_eq!(name.color, Color::BLACK);
        assert_eq!(name.max_width, Some(327.0));
        assert_eq!((name.x, name.y, name.size), (30, 18, 50.0));
        assert_eq!(name.font, FontSlot::Title);
    }

    #[test]
    fn ranks_grow_from_the_left_levels_from_the_right() {
        let xyz = CardData {
            template: Some(Template::Xyz),
            stars: Some(4),
            ..CardData::default()
        };
        let stack = decode(&xyz);
        let pips: Vec<_> = assets(&stack)
            .into_iter()
            .filter(|a| a.path == "stars/Rank.png")
            .map(|a| a.x)
            .collect();
        assert_eq!(pips, vec![43, 71, 99, 127]);

        let stack = decode(&monster());
        let pips: Vec<_> = assets(&stack)
            .into_iter()
            .filter(|a| a.path == "stars/Level.png")
            .map(|a| a.x)
            .collect();
        assert_eq!(pips, vec![352, 324, 296, 268]);
    }

    #[test]
    fn spell_card_draws_its_label_and_no_monster_chrome() {
        let card = monster().with_template(Some(Template::Spell));
        let stack = decode(&card);
        let label = stack
            .0
            .iter()
            .find_map(|l| match l {
                Layer::IconLabel(a) => Some(a),
                _ => None,
            })
            .expect("category label");
        assert_eq!(label.text, SPELL_LABEL);
        assert_eq!(label.icon, None);
        assert_eq!((label.end_x, label.y, label.size), (380, 87, 22.0));

        let paths: Vec<_> = assets(&stack).into_iter().map(|a| a.path.as_str()).collect();
        assert!(paths.contains(&"attributes/Spell.png"));
        assert!(!paths.iter().any(|p| p.starts_with("stars/")));
        assert!(labels(&stack).iter().all(|l| l.text != "1800" && l.text != "1200"));
    }

    #[test]
    fn non_normal_symbol_gets_an_icon() {
        let card = monster()
            .with_template(Some(Template::Trap))
            .with_symbol(Some(Symbol::Counter));
        let stack = decode(&card);
        let label = stack
            .0
            .iter()
            .find_map(|l| match l {
                Layer::IconLabel(a) => Some(a),
                _ => None,
            })
            .expect("category label");
        assert_eq!(label.text, TRAP_LABEL);
        assert_eq!(label.icon.as_deref(), Some("symbols/Counter.png"));
    }

    #[test]
    fn link_card_draws_arrows_and_rating_instead_of_def() {
        let mut arrows = LinkArrows::default();
        arrows.set(Arrow::TopLeft, true);
        arrows.set(Arrow::BottomCenter, true);
        let card = CardData {
            template: Some(Template::Link),
            atk: Some(2000),
            link_rating: Some(3),
            link_arrows: arrows,
            ..CardData::default()
        };
        let stack = decode(&card);

        let arrow_layers: Vec<_> = assets(&stack)
            .into_iter()
            .filter(|a| a.path.starts_with("arrows/"))
            .collect();
        assert_eq!(arrow_layers.len(), 2);
        assert_eq!(arrow_layers[0].path, "arrows/linkArrowTopLeft.png");
        assert_eq!(
            (arrow_layers[0].x, arrow_layers[0].y, arrow_layers[0].w, arrow_layers[0].h),
            (30, 93, 45.0, 45.0)
        );
        assert_eq!(arrow_layers[1].path, "arrows/linkArrowBottomCenter.png");
        assert_eq!(
            (arrow_layers[1].x, arrow_layers[1].y, arrow_layers[1].w, arrow_layers[1].h),
            (165, 432, 90.0, 27.0)
        );

        let rating = find_label(&stack, "3");
        assert_eq!(rating.font, FontSlot::Numeric);
        assert_eq!((rating.x, rating.y), (385, CARD_HEIGHT - 34));
        assert_eq!(find_label(&stack, "2000").x, 300);
        assert!(labels(&stack).iter().all(|l| l.text != "1200"));
    }

    #[test]
    fn pendulum_layout_adds_scales_and_second_text_box() {
        let card = CardData {
            pendulum: true,
            pendulum_blue_scale: 2,
            pendulum_red_scale: 9,
            pendulum_effect: String::from("Once per turn: add 1 card."),
            ..monster()
        };
        let stack = decode(&card);

        let blue = find_label(&stack, "2");
        let red = find_label(&stack, "9");
        assert_eq!((blue.x, blue.y), (44, 440));
        assert_eq!((red.x, red.y), (377, 440));
        assert!(blue.bold && red.bold);

        let boxes = texts(&stack);
        assert_eq!(boxes.len(), 2);
        let pendulum_box = boxes[0];
        assert_eq!((pendulum_box.x, pendulum_box.y), (67, 385));
        assert_eq!(pendulum_box.fit, FitOptions::new(290.0, 5));
        let effect_box = boxes[1];
        assert_eq!((effect_box.x, effect_box.y), (33, 475));
        assert_eq!(effect_box.fit, FitOptions::new(357.0, 8));

        let edition = find_label(&stack, "TEST-PT000");
        assert_eq!((edition.x, edition.y), (100, 570));
    }

    #[test]
    fn effect_is_italic_only_for_normal_monsters() {
        let normal = CardData {
            template: Some(Template::Normal),
            effect: String::from("A legendary dragon."),
            ..CardData::default()
        };
        assert!(texts(&decode(&normal))[0].italic);
        assert!(!texts(&decode(&monster()))[0].italic);
        assert_eq!(texts(&decode(&monster()))[0].fit, FitOptions::new(363.0, 8));
    }

    #[test]
    fn footer_is_white_only_on_plain_xyz() {
        let xyz = monster().with_template(Some(Template::Xyz));
        let stack = decode(&xyz);
        assert_eq!(find_label(&stack, "12345678").color, Color::WHITE);
        assert_eq!(find_label(&stack, "© 1996 KAZUKI TAKAHASHI").color, Color::WHITE);

        let pendulum_xyz = CardData { pendulum: true, ..xyz };
        let stack = decode(&pendulum_xyz);
        assert_eq!(find_label(&stack, "12345678").color, Color::BLACK);

        let stack = decode(&monster());
        assert_eq!(find_label(&stack, "12345678").color, Color::BLACK);
        assert_eq!(find_label(&stack, "12345678").y, CARD_HEIGHT - 12);
    }

    #[test]
    fn type_line_is_bracketed_and_skipped_for_magic() {
        let stack = decode(&monster());
        let type_line = find_label(&stack, "[Fiend]");
        assert_eq!((type_line.x, type_line.y), (30, 473));
        assert_eq!(type_line.font, FontSlot::Serif);

        let spell = monster().with_template(Some(Template::Spell));
        let stack = decode(&spell);
        assert!(labels(&stack).iter().all(|l| !l.text.starts_with('[')));
    }

    #[test]
    fn unset_fields_are_simply_omitted() {
        let card = CardData {
            template: Some(Template::Effect),
            ..CardData::default()
        };
        let stack = decode(&card);
        assert!(assets(&stack).iter().all(|a| !a.path.starts_with("attributes/")));
        assert!(assets(&stack).iter().all(|a| !a.path.starts_with("stars/")));
        assert!(texts(&stack).is_empty());
        // name, edition, serial and copyright still come from the defaults
        assert_eq!(labels(&stack).len(), 4);
    }
}
