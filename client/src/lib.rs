mod app;
mod bindings;
mod controller;
mod geometry;
mod navigation;
mod render;
mod session;
mod state;

pub use app::{Annotator, LoadError};
pub use bindings::{start, AnnotatorHandle};
pub use controller::{DrawingController, PageContext};
pub use geometry::{distance_to_segment, hit_test, stroke_hit, MIN_HIT_RADIUS};
pub use navigation::{go_to_page, next_page, previous_page};
pub use render::{render_annotation, render_preview, render_scene, RenderedStroke, Scene};
pub use session::SessionState;
pub use state::{PenSettings, Tool, UnknownTool, DEFAULT_STROKE_WIDTH};
