//! Pointer interpretation for the annotation layer.
//!
//! In draw mode a pointer-down starts a stroke, every move appends one point
//! and pointer-up (or leaving the page) commits it. In select mode a
//! pointer-down on a visible stroke asks for its deletion.

use tracing::debug;

use inkpage_shared::{
    create_draw_annotation, normalize, Annotation, ControllerOutput, NewDrawAnnotation, PageSize,
    PixelPosition, Point,
};

use crate::geometry::hit_test;
use crate::state::{DrawMode, Mode, PenSettings, Tool};

/// The page a pointer event lands on.
pub struct PageContext<'a> {
    pub document_id: &'a str,
    pub page_number: u32,
    pub size: PageSize,
    /// Annotations rendered on this page, in creation order.
    pub visible: &'a [&'a Annotation],
    pub user_id: Option<&'a str>,
}

pub struct DrawingController {
    mode: Mode,
    pen: PenSettings,
}

impl Default for DrawingController {
    fn default() -> Self {
        Self::new(PenSettings::default())
    }
}

impl DrawingController {
    pub fn new(pen: PenSettings) -> Self {
        Self {
            mode: Mode::Draw(DrawMode::Idle),
            pen,
        }
    }

    pub fn tool(&self) -> Tool {
        self.mode.tool()
    }

    /// Switching tools drops a stroke that is still being drawn; it is never
    /// committed.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool() {
            return;
        }
        if self.mode.is_drawing() {
            debug!(
                points = self.mode.in_progress().len(),
                "discarding in-progress stroke on tool switch"
            );
        }
        self.mode = Mode::for_tool(tool);
    }

    pub fn pen(&self) -> PenSettings {
        self.pen
    }

    /// Takes effect from the next stroke.
    pub fn set_pen(&mut self, pen: PenSettings) {
        self.pen = pen;
    }

    pub fn in_progress(&self) -> &[Point] {
        self.mode.in_progress()
    }

    pub fn is_drawing(&self) -> bool {
        self.mode.is_drawing()
    }

    /// Drops the in-progress stroke, if any. Returns whether one was dropped.
    pub fn cancel_stroke(&mut self) -> bool {
        match &mut self.mode {
            Mode::Draw(draw @ DrawMode::Drawing { .. }) => {
                *draw = DrawMode::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn pointer_down(
        &mut self,
        pos: PixelPosition,
        page: &PageContext<'_>,
    ) -> Option<ControllerOutput> {
        match &mut self.mode {
            Mode::Draw(draw) => {
                if let DrawMode::Drawing { points } = &*draw {
                    // pointer-up never arrived for the previous stroke
                    debug!(points = points.len(), "discarding abandoned stroke");
                }
                *draw = DrawMode::Drawing {
                    points: vec![normalize(pos, page.size)],
                };
                None
            }
            Mode::Select => {
                let id = hit_test(page.visible, pos, page.size)?;
                debug!(%id, "erase requested");
                Some(ControllerOutput::Delete { id })
            }
        }
    }

    pub fn pointer_move(&mut self, pos: PixelPosition, size: PageSize) {
        if let Mode::Draw(DrawMode::Drawing { points }) = &mut self.mode {
            points.push(normalize(pos, size));
        }
    }

    /// Ends the stroke in progress. A stroke with at least one point becomes
    /// an annotation on `page`.
    pub fn pointer_up(&mut self, page: &PageContext<'_>) -> Option<ControllerOutput> {
        let Mode::Draw(draw) = &mut self.mode else {
            return None;
        };
        let DrawMode::Drawing { points } = std::mem::replace(draw, DrawMode::Idle) else {
            return None;
        };
        if points.is_empty() {
            return None;
        }
        let annotation = create_draw_annotation(NewDrawAnnotation {
            document_id: page.document_id.to_string(),
            page_number: page.page_number,
            points,
            color: self.pen.color,
            stroke_width: self.pen.stroke_width,
            user_id: page.user_id.map(str::to_string),
        });
        debug!(
            id = %annotation.id(),
            page = page.page_number,
            "stroke committed"
        );
        Some(ControllerOutput::Create { annotation })
    }

    pub fn pointer_leave(&mut self, page: &PageContext<'_>) -> Option<ControllerOutput> {
        self.pointer_up(page)
    }
}
