use serde::{Deserialize, Serialize};

pub mod annotation;
pub mod color;
pub mod document;
pub mod geometry;

pub use annotation::{
    create_draw_annotation, is_draw_annotation, Annotation, AnnotationId, AnnotationKind,
    DrawAnnotation, NewDrawAnnotation,
};
pub use color::Color;
pub use document::{DocumentFile, DocumentInfo, PageInfo, PDF_MEDIA_TYPE};
pub use geometry::{denormalize, normalize, to_pixels, PageSize, PixelPosition};

/// Page-relative coordinate in the unit square.
///
/// `x` is a fraction of the rendered page width and `y` a fraction of its
/// height, so stored geometry does not depend on the zoom it was drawn at.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn clamp(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

/// What the drawing controller asks the session to do.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ControllerOutput {
    #[serde(rename = "annotation:create")]
    Create { annotation: Annotation },
    #[serde(rename = "annotation:delete")]
    Delete { id: AnnotationId },
}
