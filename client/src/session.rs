use tracing::debug;

use inkpage_shared::{Annotation, AnnotationId};

use crate::navigation;

/// Annotations of the loaded document plus the page being viewed.
///
/// Annotations are kept in creation order. The per-page view is always
/// derived from this one collection.
pub struct SessionState {
    annotations: Vec<Annotation>,
    current_page: u32,
    total_pages: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            current_page: 1,
            total_pages: 0,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        debug!(id = %annotation.id(), page = annotation.page_number(), "annotation added");
        self.annotations.push(annotation);
    }

    /// Unknown ids are ignored.
    pub fn remove_annotation(&mut self, id: AnnotationId) {
        if let Some(index) = self.annotations.iter().position(|item| item.id() == id) {
            self.annotations.remove(index);
            debug!(%id, "annotation removed");
        }
    }

    pub fn clear_page(&mut self, page_number: u32) {
        let before = self.annotations.len();
        self.annotations
            .retain(|annotation| annotation.page_number() != page_number);
        debug!(
            page = page_number,
            removed = before - self.annotations.len(),
            "page cleared"
        );
    }

    pub fn clear_all(&mut self) {
        self.annotations.clear();
    }

    pub fn visible_on(&self, page_number: u32) -> Vec<&Annotation> {
        self.annotations
            .iter()
            .filter(|annotation| annotation.page_number() == page_number)
            .collect()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Records the page count reported by the renderer and pulls the current
    /// page back into range.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.current_page = navigation::go_to_page(i64::from(self.current_page), total_pages);
    }

    pub fn go_to_page(&mut self, target: i64) -> u32 {
        self.current_page = navigation::go_to_page(target, self.total_pages);
        self.current_page
    }

    pub fn next_page(&mut self) -> u32 {
        self.current_page = navigation::next_page(self.current_page, self.total_pages);
        self.current_page
    }

    pub fn previous_page(&mut self) -> u32 {
        self.current_page = navigation::previous_page(self.current_page, self.total_pages);
        self.current_page
    }

    /// Back to an empty session on page 1, as after loading a new document.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
