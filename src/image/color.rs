//! Implements utilities to create color values.

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: None };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: None };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: Some(0.0) };

    pub fn rgba(&self) -> (f64, f64, f64, f64) {
        (self.r, self.g, self.b, self.a.unwrap_or(1.0))
    }

    pub fn scaled_rgba(&self) -> (f64, f64, f64, f64) {
        (
            self.r * 255.0,
            self.g * 255.0,
            self.b * 255.0,
            self.a.map(|a| a * 255.0).unwrap_or(255.0),
        )
    }
}
