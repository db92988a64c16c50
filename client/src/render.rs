use serde::Serialize;

use inkpage_shared::{denormalize, Annotation, AnnotationId, PageSize, Point};

use crate::state::PenSettings;

/// One polyline as the canvas layer draws it, in pixels of the current render.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedStroke {
    /// `None` for the stroke still being drawn.
    pub id: Option<AnnotationId>,
    pub points: Vec<f64>,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
    pub strokes: Vec<RenderedStroke>,
    pub preview: Option<RenderedStroke>,
}

pub fn render_annotation(annotation: &Annotation, size: PageSize) -> RenderedStroke {
    match annotation {
        Annotation::Draw(draw) => RenderedStroke {
            id: Some(draw.id),
            points: denormalize(&draw.points, size),
            stroke: draw.color.to_display_color(),
            stroke_width: draw.stroke_width as f64 * size.width(),
        },
    }
}

pub fn render_preview(points: &[Point], pen: &PenSettings, size: PageSize) -> Option<RenderedStroke> {
    if points.is_empty() {
        return None;
    }
    Some(RenderedStroke {
        id: None,
        points: denormalize(points, size),
        stroke: pen.color.to_display_color(),
        stroke_width: pen.stroke_width as f64 * size.width(),
    })
}

pub fn render_scene(
    page_number: u32,
    visible: &[&Annotation],
    preview: &[Point],
    pen: &PenSettings,
    size: PageSize,
) -> Scene {
    Scene {
        page_number,
        width: size.width(),
        height: size.height(),
        strokes: visible
            .iter()
            .map(|annotation| render_annotation(annotation, size))
            .collect(),
        preview: render_preview(preview, pen, size),
    }
}
