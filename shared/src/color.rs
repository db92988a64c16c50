use serde::{Deserialize, Serialize};

/// Stroke color: 8-bit channels plus an opacity in `[0, 1]`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Default pen color (red-500).
    pub const PEN_RED: Color = Color {
        r: 239,
        g: 68,
        b: 68,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 };
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// CSS `rgba(...)` string handed to the canvas layer.
    ///
    /// Alpha uses the shortest representation that parses back to the same
    /// value, so `0.5` stays `0.5` and `1.0` becomes `1`.
    pub fn to_display_color(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::PEN_RED
    }
}
