//! Content area for the active document

use eframe::egui;
use egui_commonmark::CommonMarkViewer;

use crate::app::MdTabsApp;
use crate::ui::drop_zone::DropZonePanel;

/// Rendered view of the active document
pub struct ViewerPanel;

impl ViewerPanel {
    /// Show the rendered document, or the drop target while the
    /// document has no content at all.
    pub fn show(ui: &mut egui::Ui, app: &mut MdTabsApp) {
        // Clone content first to avoid borrow conflicts
        let content = app
            .session
            .active_document()
            .map(|doc| doc.content.clone());

        match content {
            Some(content) if !content.is_empty() => {
                egui::ScrollArea::vertical()
                    .id_salt("viewer_scroll")
                    .show(ui, |ui| {
                        CommonMarkViewer::new().show(ui, &mut app.commonmark_cache, &content);
                    });
            }
            _ => DropZonePanel::show(ui, app),
        }
    }
}
