use tracing::{debug, info};

use inkpage_shared::{
    Annotation, AnnotationId, ControllerOutput, DocumentFile, DocumentInfo, PageSize,
    PixelPosition, PDF_MEDIA_TYPE,
};

use crate::controller::{DrawingController, PageContext};
use crate::render::{render_scene, Scene};
use crate::session::SessionState;
use crate::state::{PenSettings, Tool};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported media type {0:?}, expected application/pdf")]
    UnsupportedMediaType(String),
}

/// One annotating session: the loaded document, its annotations and the
/// pointer interaction on the page currently shown.
///
/// This is the only writer of the session state; every pointer event and
/// button press goes through `&mut self`.
#[derive(Default)]
pub struct Annotator {
    session: SessionState,
    controller: DrawingController,
    document: Option<DocumentInfo>,
    page_size: Option<PageSize>,
    user_id: Option<String>,
}

impl Annotator {
    pub fn new(pen: PenSettings) -> Self {
        Self {
            controller: DrawingController::new(pen),
            ..Self::default()
        }
    }

    /// Starts a fresh session for `info`. Annotations of the previous
    /// document are dropped and the view returns to page 1.
    pub fn load_document(&mut self, info: DocumentInfo) -> Result<(), LoadError> {
        if info.mime_type != PDF_MEDIA_TYPE {
            return Err(LoadError::UnsupportedMediaType(info.mime_type));
        }
        info!(document = %info.id, bytes = info.file_size, "document loaded");
        self.session.reset();
        self.controller.cancel_stroke();
        self.page_size = None;
        self.document = Some(info);
        Ok(())
    }

    pub fn load_file(&mut self, file: &DocumentFile) -> Result<(), LoadError> {
        self.load_document(file.info())
    }

    /// Forgets the document and everything drawn on it.
    pub fn close_document(&mut self) {
        if let Some(document) = self.document.take() {
            info!(document = %document.id, "document closed");
        }
        self.session.reset();
        self.controller.cancel_stroke();
        self.page_size = None;
    }

    pub fn document(&self) -> Option<&DocumentInfo> {
        self.document.as_ref()
    }

    /// Page count reported by the renderer once the document has been parsed.
    pub fn document_loaded(&mut self, total_pages: u32) {
        self.session.set_total_pages(total_pages);
        if let Some(document) = &mut self.document {
            document.total_pages = total_pages;
        }
    }

    /// Rendered size of the current page. The renderer reports `0 x 0` until
    /// the page is ready; pointer input is ignored until a real size arrives.
    pub fn set_page_size(&mut self, width: f64, height: f64) -> bool {
        self.page_size = PageSize::new(width, height);
        match (self.page_size, &mut self.document) {
            (Some(size), Some(document)) => {
                document.set_page_size(self.session.current_page(), size);
                true
            }
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn page_size(&self) -> Option<PageSize> {
        self.page_size
    }

    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub fn tool(&self) -> Tool {
        self.controller.tool()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.controller.set_tool(tool);
    }

    pub fn pen(&self) -> PenSettings {
        self.controller.pen()
    }

    pub fn set_pen(&mut self, pen: PenSettings) {
        self.controller.set_pen(pen);
    }

    pub fn is_drawing(&self) -> bool {
        self.controller.is_drawing()
    }

    pub fn pointer_down(&mut self, pos: PixelPosition) -> Option<ControllerOutput> {
        let (Some(document), Some(size)) = (&self.document, self.page_size) else {
            debug!("pointer down ignored, page not ready");
            return None;
        };
        let page_number = self.session.current_page();
        let visible = self.session.visible_on(page_number);
        let output = self.controller.pointer_down(
            pos,
            &PageContext {
                document_id: &document.id,
                page_number,
                size,
                visible: &visible,
                user_id: self.user_id.as_deref(),
            },
        );
        self.apply(output)
    }

    pub fn pointer_move(&mut self, pos: PixelPosition) {
        if let Some(size) = self.page_size {
            self.controller.pointer_move(pos, size);
        }
    }

    pub fn pointer_up(&mut self) -> Option<ControllerOutput> {
        self.finish_stroke(false)
    }

    pub fn pointer_leave(&mut self) -> Option<ControllerOutput> {
        self.finish_stroke(true)
    }

    fn finish_stroke(&mut self, left_page: bool) -> Option<ControllerOutput> {
        let (Some(document), Some(size)) = (&self.document, self.page_size) else {
            self.controller.cancel_stroke();
            return None;
        };
        let page = PageContext {
            document_id: &document.id,
            page_number: self.session.current_page(),
            size,
            visible: &[],
            user_id: self.user_id.as_deref(),
        };
        let output = if left_page {
            self.controller.pointer_leave(&page)
        } else {
            self.controller.pointer_up(&page)
        };
        self.apply(output)
    }

    fn apply(&mut self, output: Option<ControllerOutput>) -> Option<ControllerOutput> {
        match &output {
            Some(ControllerOutput::Create { annotation }) => {
                self.session.add_annotation(annotation.clone());
            }
            Some(ControllerOutput::Delete { id }) => self.session.remove_annotation(*id),
            None => {}
        }
        output
    }

    pub fn current_page(&self) -> u32 {
        self.session.current_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.session.total_pages()
    }

    pub fn go_to_page(&mut self, target: i64) -> u32 {
        self.leave_page();
        self.session.go_to_page(target)
    }

    pub fn next_page(&mut self) -> u32 {
        self.leave_page();
        self.session.next_page()
    }

    pub fn previous_page(&mut self) -> u32 {
        self.leave_page();
        self.session.previous_page()
    }

    // A stroke belongs to the page it was started on.
    fn leave_page(&mut self) {
        if self.controller.cancel_stroke() {
            debug!("discarding in-progress stroke on page change");
        }
    }

    pub fn remove_annotation(&mut self, id: AnnotationId) {
        self.session.remove_annotation(id);
    }

    pub fn delete_current_page(&mut self) {
        let page = self.session.current_page();
        self.session.clear_page(page);
    }

    pub fn delete_all(&mut self) {
        self.session.clear_all();
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.session.annotations()
    }

    pub fn visible_annotations(&self) -> Vec<&Annotation> {
        self.session.visible_on(self.session.current_page())
    }

    /// Strokes of the current page in pixels, or `None` before the page has
    /// a size.
    pub fn render(&self) -> Option<Scene> {
        let size = self.page_size?;
        let pen = self.controller.pen();
        Some(render_scene(
            self.session.current_page(),
            &self.visible_annotations(),
            self.controller.in_progress(),
            &pen,
            size,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpage_shared::Point;

    fn loaded(pages: u32) -> Annotator {
        let mut annotator = Annotator::default();
        annotator
            .load_file(&DocumentFile::new("report.pdf", PDF_MEDIA_TYPE, vec![1, 2, 3]))
            .unwrap();
        annotator.document_loaded(pages);
        assert!(annotator.set_page_size(200.0, 100.0));
        annotator
    }

    fn draw_line(annotator: &mut Annotator, y: f64) -> Annotation {
        annotator.pointer_down(PixelPosition::new(20.0, y));
        annotator.pointer_move(PixelPosition::new(180.0, y));
        match annotator.pointer_up() {
            Some(ControllerOutput::Create { annotation }) => annotation,
            other => panic!("expected a stroke, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_pdf_documents() {
        let mut annotator = Annotator::default();
        let result = annotator.load_file(&DocumentFile::new("notes.txt", "text/plain", vec![]));
        assert_eq!(
            result,
            Err(LoadError::UnsupportedMediaType("text/plain".to_string()))
        );
        assert!(annotator.document().is_none());
    }

    #[test]
    fn strokes_land_on_the_current_page() {
        let mut annotator = loaded(3);
        let first = draw_line(&mut annotator, 50.0);
        annotator.go_to_page(2);
        let second = draw_line(&mut annotator, 50.0);

        assert_eq!(first.page_number(), 1);
        assert_eq!(first.document_id(), "report.pdf");
        assert_eq!(second.page_number(), 2);
        assert_eq!(annotator.annotations().len(), 2);
        assert_eq!(
            annotator
                .visible_annotations()
                .iter()
                .map(|annotation| annotation.id())
                .collect::<Vec<_>>(),
            vec![second.id()]
        );
    }

    #[test]
    fn erase_only_reaches_strokes_on_the_shown_page() {
        let mut annotator = loaded(2);
        let on_first = draw_line(&mut annotator, 50.0);
        annotator.next_page();
        let on_second = draw_line(&mut annotator, 20.0);

        annotator.set_tool(Tool::Select);
        assert!(annotator.pointer_down(PixelPosition::new(100.0, 50.0)).is_none());
        assert_eq!(
            annotator.pointer_down(PixelPosition::new(100.0, 20.0)),
            Some(ControllerOutput::Delete { id: on_second.id() })
        );
        assert_eq!(annotator.annotations(), &[on_first]);
    }

    #[test]
    fn tool_switch_keeps_committed_annotations() {
        let mut annotator = loaded(1);
        let committed = draw_line(&mut annotator, 50.0);
        annotator.pointer_down(PixelPosition::new(10.0, 10.0));
        annotator.set_tool(Tool::Select);
        annotator.set_tool(Tool::Draw);
        assert!(annotator.pointer_up().is_none());
        assert_eq!(annotator.annotations(), &[committed]);
    }

    #[test]
    fn pointer_input_waits_for_page_size() {
        let mut annotator = Annotator::default();
        annotator
            .load_file(&DocumentFile::new("report.pdf", PDF_MEDIA_TYPE, vec![]))
            .unwrap();
        annotator.document_loaded(2);
        assert!(!annotator.set_page_size(0.0, 0.0));

        assert!(annotator.pointer_down(PixelPosition::new(10.0, 10.0)).is_none());
        annotator.pointer_move(PixelPosition::new(20.0, 20.0));
        assert!(annotator.pointer_up().is_none());
        assert!(annotator.annotations().is_empty());
        assert!(annotator.render().is_none());
    }

    #[test]
    fn page_change_drops_unfinished_stroke() {
        let mut annotator = loaded(2);
        annotator.pointer_down(PixelPosition::new(10.0, 10.0));
        annotator.next_page();
        assert!(annotator.pointer_up().is_none());
        assert!(annotator.annotations().is_empty());
    }

    #[test]
    fn loading_another_document_resets_the_session() {
        let mut annotator = loaded(4);
        annotator.go_to_page(3);
        draw_line(&mut annotator, 50.0);

        annotator
            .load_file(&DocumentFile::new("other.pdf", PDF_MEDIA_TYPE, vec![]))
            .unwrap();

        assert!(annotator.annotations().is_empty());
        assert_eq!(annotator.current_page(), 1);
        assert_eq!(annotator.document().map(|doc| doc.id.as_str()), Some("other.pdf"));
        assert!(annotator.page_size().is_none());
    }

    #[test]
    fn delete_current_page_and_delete_all() {
        let mut annotator = loaded(2);
        draw_line(&mut annotator, 50.0);
        annotator.next_page();
        draw_line(&mut annotator, 50.0);

        annotator.delete_current_page();
        assert!(annotator.visible_annotations().is_empty());
        assert_eq!(annotator.annotations().len(), 1);

        annotator.delete_all();
        assert!(annotator.annotations().is_empty());
    }

    #[test]
    fn close_document_clears_everything() {
        let mut annotator = loaded(3);
        annotator.go_to_page(2);
        draw_line(&mut annotator, 50.0);

        annotator.close_document();

        assert!(annotator.document().is_none());
        assert!(annotator.annotations().is_empty());
        assert_eq!(annotator.current_page(), 1);
        assert_eq!(annotator.total_pages(), 0);
    }

    #[test]
    fn render_includes_preview_of_stroke_in_progress() {
        let mut annotator = loaded(1);
        let committed = draw_line(&mut annotator, 50.0);
        annotator.pointer_down(PixelPosition::new(100.0, 50.0));

        let scene = annotator.render().unwrap();
        assert_eq!(scene.page_number, 1);
        assert_eq!(scene.strokes.len(), 1);
        assert_eq!(scene.strokes[0].id, Some(committed.id()));
        assert_eq!(scene.preview.map(|stroke| stroke.points), Some(vec![100.0, 50.0]));
    }

    #[test]
    fn user_id_is_stamped_on_new_strokes() {
        let mut annotator = loaded(1);
        annotator.set_user_id(Some("user-123".to_string()));
        let annotation = draw_line(&mut annotator, 50.0);
        assert_eq!(annotation.user_id(), Some("user-123"));
        let Annotation::Draw(draw) = &annotation;
        assert_eq!(draw.points, vec![Point::new(0.1, 0.5), Point::new(0.9, 0.5)]);
    }
}
