use inkpage_shared::{to_pixels, Annotation, AnnotationId, DrawAnnotation, PageSize, PixelPosition};

/// Minimum pick radius in pixels, so hairline strokes stay clickable.
pub const MIN_HIT_RADIUS: f64 = 6.0;

pub fn distance_to_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return ((px - x1).powi(2) + (py - y1).powi(2)).sqrt();
    }
    let t = ((px - x1) * dx + (py - y1) * dy) / (dx * dx + dy * dy);
    let t = t.clamp(0.0, 1.0);
    let proj_x = x1 + t * dx;
    let proj_y = y1 + t * dy;
    ((px - proj_x).powi(2) + (py - proj_y).powi(2)).sqrt()
}

pub fn stroke_hit(stroke: &DrawAnnotation, pos: PixelPosition, size: PageSize) -> bool {
    if stroke.points.is_empty() {
        return false;
    }
    let threshold = (stroke.stroke_width as f64 * size.width() / 2.0).max(MIN_HIT_RADIUS);
    if stroke.points.len() == 1 {
        let point = to_pixels(stroke.points[0], size);
        let dx = point.x - pos.x;
        let dy = point.y - pos.y;
        return dx * dx + dy * dy <= threshold * threshold;
    }
    for window in stroke.points.windows(2) {
        let start = to_pixels(window[0], size);
        let end = to_pixels(window[1], size);
        if distance_to_segment(pos.x, pos.y, start.x, start.y, end.x, end.y) <= threshold {
            return true;
        }
    }
    false
}

/// Topmost annotation under the pointer. Later entries are drawn above
/// earlier ones, so the search runs back to front.
pub fn hit_test(visible: &[&Annotation], pos: PixelPosition, size: PageSize) -> Option<AnnotationId> {
    visible
        .iter()
        .rev()
        .find(|annotation| match annotation {
            Annotation::Draw(stroke) => stroke_hit(stroke, pos, size),
        })
        .map(|annotation| annotation.id())
}
