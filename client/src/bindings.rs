//! Browser-facing wrapper around [`Annotator`].
//!
//! The host page owns the document renderer and the canvas. It forwards
//! pointer events and page sizes here and draws whatever `renderJson`
//! returns. Structured values cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use inkpage_shared::{AnnotationId, DocumentInfo, PixelPosition};

use crate::app::Annotator;
use crate::state::Tool;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct AnnotatorHandle {
    inner: Annotator,
}

impl Default for AnnotatorHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AnnotatorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> AnnotatorHandle {
        AnnotatorHandle {
            inner: Annotator::default(),
        }
    }

    /// Returns false (and keeps the current session) for non-PDF files.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, name: &str, media_type: &str, file_size: f64) -> bool {
        let info = DocumentInfo::new(name, file_size.max(0.0) as u64, media_type);
        self.inner.load_document(info).is_ok()
    }

    #[wasm_bindgen(js_name = closeDocument)]
    pub fn close_document(&mut self) {
        self.inner.close_document();
    }

    #[wasm_bindgen(js_name = documentLoaded)]
    pub fn document_loaded(&mut self, total_pages: u32) {
        self.inner.document_loaded(total_pages);
    }

    #[wasm_bindgen(js_name = setPageSize)]
    pub fn set_page_size(&mut self, width: f64, height: f64) -> bool {
        self.inner.set_page_size(width, height)
    }

    #[wasm_bindgen(js_name = setUserId)]
    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.inner.set_user_id(user_id);
    }

    /// Accepts `"draw"`, `"select"` or `"erase"`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> bool {
        match mode.parse::<Tool>() {
            Ok(tool) => {
                self.inner.set_tool(tool);
                true
            }
            Err(_) => false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.tool().to_string()
    }

    /// JSON of the resulting create/delete, if any.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<String> {
        let output = self.inner.pointer_down(PixelPosition::new(x, y))?;
        serde_json::to_string(&output).ok()
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(PixelPosition::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Option<String> {
        let output = self.inner.pointer_up()?;
        serde_json::to_string(&output).ok()
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Option<String> {
        let output = self.inner.pointer_leave()?;
        serde_json::to_string(&output).ok()
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.inner.current_page()
    }

    #[wasm_bindgen(getter, js_name = totalPages)]
    pub fn total_pages(&self) -> u32 {
        self.inner.total_pages()
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&mut self, target: f64) -> u32 {
        self.inner.go_to_page(target as i64)
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> u32 {
        self.inner.next_page()
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&mut self) -> u32 {
        self.inner.previous_page()
    }

    #[wasm_bindgen(js_name = deleteAnnotation)]
    pub fn delete_annotation(&mut self, id: &str) -> bool {
        match id.parse::<AnnotationId>() {
            Ok(id) => {
                self.inner.remove_annotation(id);
                true
            }
            Err(_) => false,
        }
    }

    #[wasm_bindgen(js_name = deleteCurrentPage)]
    pub fn delete_current_page(&mut self) {
        self.inner.delete_current_page();
    }

    #[wasm_bindgen(js_name = deleteAll)]
    pub fn delete_all(&mut self) {
        self.inner.delete_all();
    }

    /// Scene for the current page, or `"null"` while the page has no size.
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self) -> String {
        serde_json::to_string(&self.inner.render()).unwrap_or_else(|_| "null".to_string())
    }

    #[wasm_bindgen(js_name = annotationsJson)]
    pub fn annotations_json(&self) -> String {
        serde_json::to_string(self.inner.annotations()).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> AnnotatorHandle {
        let mut handle = AnnotatorHandle::new();
        assert!(handle.load_document("report.pdf", "application/pdf", 1024.0));
        handle.document_loaded(3);
        assert!(handle.set_page_size(200.0, 100.0));
        handle
    }

    #[test]
    fn rejects_non_pdf_and_unknown_modes() {
        let mut handle = AnnotatorHandle::new();
        assert!(!handle.load_document("notes.txt", "text/plain", 10.0));
        assert!(!handle.set_mode("lasso"));
        assert_eq!(handle.mode(), "draw");
        assert!(handle.set_mode("erase"));
        assert_eq!(handle.mode(), "select");
    }

    #[test]
    fn stroke_round_trip_through_json() {
        let mut handle = handle();
        assert!(handle.pointer_down(50.0, 50.0).is_none());
        handle.pointer_move(150.0, 50.0);
        let created: serde_json::Value =
            serde_json::from_str(&handle.pointer_up().unwrap()).unwrap();
        assert_eq!(created["type"], "annotation:create");
        assert_eq!(created["annotation"]["type"], "draw");
        assert_eq!(created["annotation"]["pageNumber"], 1);

        let scene: serde_json::Value = serde_json::from_str(&handle.render_json()).unwrap();
        assert_eq!(scene["strokes"][0]["points"], serde_json::json!([50.0, 50.0, 150.0, 50.0]));
        assert_eq!(scene["strokes"][0]["stroke"], "rgba(239, 68, 68, 1)");
        assert!(scene["preview"].is_null());

        let id = created["annotation"]["id"].as_str().unwrap().to_string();
        assert!(handle.delete_annotation(&id));
        assert!(!handle.delete_annotation("nope"));
        assert_eq!(handle.annotations_json(), "[]");
    }

    #[test]
    fn navigation_is_clamped() {
        let mut handle = handle();
        assert_eq!(handle.go_to_page(-2.0), 1);
        assert_eq!(handle.go_to_page(7.0), 3);
        assert_eq!(handle.next_page(), 3);
        assert_eq!(handle.previous_page(), 2);
        assert_eq!(handle.current_page(), 2);
        assert_eq!(handle.total_pages(), 3);
    }

    #[test]
    fn render_is_null_before_page_size() {
        let mut handle = AnnotatorHandle::new();
        handle.load_document("report.pdf", "application/pdf", 0.0);
        assert_eq!(handle.render_json(), "null");
    }
}
