//! Conversion between rendered-page pixels and unit-square coordinates.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Pointer position in pixels, relative to the top-left of the rendered page.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PixelPosition {
    pub x: f64,
    pub y: f64,
}

impl PixelPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered size of a page. Both dimensions are finite and strictly positive.
///
/// The rendering layer reports `0 x 0` until a page has loaded; such sizes are
/// rejected here so normalization never divides by zero.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    width: f64,
    height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if valid(width) && valid(height) {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Maps a pixel position onto the page's unit square, clamping positions that
/// fall outside the page (e.g. a drag past the edge).
pub fn normalize(raw: PixelPosition, size: PageSize) -> Point {
    Point {
        x: (raw.x / size.width) as f32,
        y: (raw.y / size.height) as f32,
    }
    .clamp()
}

pub fn to_pixels(point: Point, size: PageSize) -> PixelPosition {
    PixelPosition {
        x: point.x as f64 * size.width,
        y: point.y as f64 * size.height,
    }
}

/// Flat `[x0, y0, x1, y1, ...]` pixel sequence for line rendering.
pub fn denormalize(points: &[Point], size: PageSize) -> Vec<f64> {
    let mut result = Vec::with_capacity(points.len() * 2);
    for point in points {
        let pixel = to_pixels(*point, size);
        result.push(pixel.x);
        result.push(pixel.y);
    }
    result
}
