//! Card data model, input validation and form editing rules.

pub mod card;
mod form;
pub mod validate;

pub use card::{Arrow, Attribute, CardData, LinkArrows, Symbol, Template};
