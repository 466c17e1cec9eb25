//! Tab session state and transitions.
//!
//! [`Session`] owns the ordered list of open documents, the active
//! view and the id counter. The UI layer dispatches user intents into
//! the methods here and repaints from the state it reads back; no
//! mutable state escapes this module.

use thiserror::Error;

use crate::core::document::{self, Document, DocumentId};

pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised by session operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("document {0} not found")]
    NotFound(DocumentId),
    #[error("the last remaining document cannot be closed")]
    SoleDocument,
}

/// What the main view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    /// A single document
    Document(DocumentId),
    /// The gallery of filled documents
    Gallery,
}

/// The set of open documents and the view selection
#[derive(Debug)]
pub struct Session {
    /// Tab display order; stable except for closes
    documents: Vec<Document>,
    active: ActiveView,
    /// Next id to hand out; never reused, even after closes
    next_id: u64,
}

impl Session {
    /// Start a session holding a single blank document
    pub fn new() -> Self {
        let first = Document::blank(DocumentId::new(1));
        let active = ActiveView::Document(first.id);
        Self {
            documents: vec![first],
            active,
            next_id: 2,
        }
    }

    /// Documents in tab order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The current view selection
    pub fn active(&self) -> ActiveView {
        self.active
    }

    /// Look up a document by id
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// The active document, unless the gallery is showing
    pub fn active_document(&self) -> Option<&Document> {
        match self.active {
            ActiveView::Document(id) => self.document(id),
            ActiveView::Gallery => None,
        }
    }

    /// Whether the gallery view is offered: at least two documents
    /// have non-whitespace content.
    pub fn gallery_visible(&self) -> bool {
        self.documents.iter().filter(|doc| !doc.is_blank()).count() >= 2
    }

    /// Append a fresh blank document and make it active
    pub fn create_blank_document(&mut self) -> DocumentId {
        let id = self.allocate_id();
        self.documents.push(Document::blank(id));
        self.active = ActiveView::Document(id);
        tracing::debug!("Created blank document {}", id);
        id
    }

    /// Close a document.
    ///
    /// The last remaining document cannot be closed. When the active
    /// document is closed, activation moves to its left neighbor, or
    /// to the new first document if the closed one was first.
    pub fn close_document(&mut self, id: DocumentId) -> Result<()> {
        if self.documents.len() == 1 {
            return Err(SessionError::SoleDocument);
        }
        let index = self
            .documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or(SessionError::NotFound(id))?;
        self.documents.remove(index);

        if self.active == ActiveView::Document(id) {
            let neighbor = if index > 0 { index - 1 } else { 0 };
            self.active = ActiveView::Document(self.documents[neighbor].id);
        }
        tracing::debug!("Closed document {}", id);
        Ok(())
    }

    /// Make the given document the active view
    pub fn set_active(&mut self, id: DocumentId) -> Result<()> {
        if self.document(id).is_none() {
            return Err(SessionError::NotFound(id));
        }
        self.active = ActiveView::Document(id);
        Ok(())
    }

    /// Switch the active view to the gallery
    pub fn show_gallery(&mut self) {
        self.active = ActiveView::Gallery;
    }

    /// Replace a document's content.
    ///
    /// Without a title override, a document that previously held no
    /// content gets its title derived from the new text; a filled
    /// document keeps its title. The pending drop flag is cleared
    /// either way.
    pub fn replace_content(
        &mut self,
        id: DocumentId,
        content: String,
        title_override: Option<String>,
    ) -> Result<()> {
        let doc = self
            .documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(SessionError::NotFound(id))?;
        let was_blank = doc.is_blank();
        if let Some(title) = title_override {
            doc.title = title;
        } else if was_blank {
            doc.title = document::derive_title(&content);
        }
        doc.content = content;
        doc.pending_drop = false;
        Ok(())
    }

    /// Toggle the transient drag-over flag on a document
    pub fn set_pending_drop(&mut self, id: DocumentId, pending: bool) -> Result<()> {
        let doc = self
            .documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(SessionError::NotFound(id))?;
        doc.pending_drop = pending;
        Ok(())
    }

    /// Hand out the next document id
    pub(crate) fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an already-filled document without changing the active view
    pub(crate) fn append_document(&mut self, title: String, content: String) -> DocumentId {
        let id = self.allocate_id();
        self.documents.push(Document::with_content(id, title, content));
        id
    }

    /// Point the active view at a document known to exist
    pub(crate) fn activate(&mut self, id: DocumentId) {
        self.active = ActiveView::Document(id);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::DEFAULT_TITLE;

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(session.documents().len(), 1);
        let doc = &session.documents()[0];
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert!(doc.content.is_empty());
        assert_eq!(session.active(), ActiveView::Document(doc.id));
        assert!(!session.gallery_visible());
    }

    #[test]
    fn test_create_blank_document_activates_it() {
        let mut session = Session::new();
        let first = session.documents()[0].id;
        let second = session.create_blank_document();
        assert_ne!(first, second);
        assert_eq!(session.documents().len(), 2);
        assert_eq!(session.active(), ActiveView::Document(second));
    }

    #[test]
    fn test_sole_document_cannot_be_closed() {
        let mut session = Session::new();
        let id = session.documents()[0].id;
        assert_eq!(session.close_document(id), Err(SessionError::SoleDocument));
        assert_eq!(session.documents().len(), 1);
        assert_eq!(session.active(), ActiveView::Document(id));
    }

    #[test]
    fn test_closing_active_document_activates_left_neighbor() {
        let mut session = Session::new();
        let first = session.documents()[0].id;
        let second = session.create_blank_document();
        let third = session.create_blank_document();
        assert_eq!(session.active(), ActiveView::Document(third));

        session.close_document(third).unwrap();
        assert_eq!(session.active(), ActiveView::Document(second));
        assert_eq!(session.documents().len(), 2);
        assert_eq!(session.documents()[0].id, first);
    }

    #[test]
    fn test_closing_active_first_document_activates_new_first() {
        let mut session = Session::new();
        let first = session.documents()[0].id;
        let second = session.create_blank_document();
        session.set_active(first).unwrap();

        session.close_document(first).unwrap();
        assert_eq!(session.active(), ActiveView::Document(second));
    }

    #[test]
    fn test_closing_inactive_document_keeps_active() {
        let mut session = Session::new();
        let first = session.documents()[0].id;
        let second = session.create_blank_document();
        session.close_document(first).unwrap();
        assert_eq!(session.active(), ActiveView::Document(second));
    }

    #[test]
    fn test_closing_unknown_document_fails() {
        let mut session = Session::new();
        session.create_blank_document();
        let bogus = DocumentId::new(99);
        assert_eq!(
            session.close_document(bogus),
            Err(SessionError::NotFound(bogus))
        );
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut session = Session::new();
        let second = session.create_blank_document();
        session.close_document(second).unwrap();
        let third = session.create_blank_document();
        assert!(third > second);
    }

    #[test]
    fn test_gallery_needs_two_filled_documents() {
        let mut session = Session::new();
        let first = session.documents()[0].id;
        session
            .replace_content(first, "# One".to_string(), None)
            .unwrap();
        assert!(!session.gallery_visible());

        let second = session.create_blank_document();
        assert!(!session.gallery_visible());

        session
            .replace_content(second, "# Two".to_string(), None)
            .unwrap();
        assert!(session.gallery_visible());

        session.close_document(second).unwrap();
        assert!(!session.gallery_visible());
    }

    #[test]
    fn test_whitespace_content_does_not_count_toward_gallery() {
        let mut session = Session::new();
        let first = session.documents()[0].id;
        session
            .replace_content(first, "# One".to_string(), None)
            .unwrap();
        let second = session.create_blank_document();
        session
            .replace_content(second, "   \n\t".to_string(), None)
            .unwrap();
        assert!(!session.gallery_visible());
    }

    #[test]
    fn test_replace_content_derives_title_for_blank_document() {
        let mut session = Session::new();
        let id = session.documents()[0].id;
        session
            .replace_content(id, "# Hello World\nbody".to_string(), None)
            .unwrap();
        assert_eq!(session.document(id).unwrap().title, "Hello World");
    }

    #[test]
    fn test_replace_content_keeps_title_of_filled_document() {
        let mut session = Session::new();
        let id = session.documents()[0].id;
        session
            .replace_content(id, "# First".to_string(), None)
            .unwrap();
        session
            .replace_content(id, "# Second".to_string(), None)
            .unwrap();
        assert_eq!(session.document(id).unwrap().title, "First");
    }

    #[test]
    fn test_replace_content_title_override_wins() {
        let mut session = Session::new();
        let id = session.documents()[0].id;
        session
            .replace_content(id, "# Body".to_string(), Some("notes".to_string()))
            .unwrap();
        assert_eq!(session.document(id).unwrap().title, "notes");
    }

    #[test]
    fn test_replace_content_clears_pending_drop() {
        let mut session = Session::new();
        let id = session.documents()[0].id;
        session.set_pending_drop(id, true).unwrap();
        assert!(session.document(id).unwrap().pending_drop);
        session
            .replace_content(id, "dropped".to_string(), None)
            .unwrap();
        assert!(!session.document(id).unwrap().pending_drop);
    }

    #[test]
    fn test_set_active_rejects_unknown_id() {
        let mut session = Session::new();
        let bogus = DocumentId::new(42);
        assert_eq!(session.set_active(bogus), Err(SessionError::NotFound(bogus)));
    }

    #[test]
    fn test_gallery_selection_round_trip() {
        let mut session = Session::new();
        let id = session.documents()[0].id;
        session.show_gallery();
        assert_eq!(session.active(), ActiveView::Gallery);
        assert!(session.active_document().is_none());
        session.set_active(id).unwrap();
        assert_eq!(session.active_document().unwrap().id, id);
    }
}
