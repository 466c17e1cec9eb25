//! Modal editor for pasting or editing raw markdown

use eframe::egui;

use crate::core::document::DocumentId;

/// What the user chose in the modal this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Keep the modal open
    KeepOpen,
    /// Apply the edited text to the document
    Save,
    /// Discard the edits
    Cancel,
}

/// Modal window holding a working copy of one document's text
pub struct EditorModal {
    /// Document the text belongs to
    pub document_id: DocumentId,
    /// Working copy, applied on save
    pub text: String,
}

impl EditorModal {
    pub fn new(document_id: DocumentId, text: String) -> Self {
        Self { document_id, text }
    }

    /// Show the modal and report the user's choice
    pub fn show(&mut self, ctx: &egui::Context) -> ModalAction {
        let mut action = ModalAction::KeepOpen;
        let mut open = true;

        egui::Window::new("Edit Markdown")
            .collapsible(false)
            .resizable(true)
            .default_size([560.0, 420.0])
            .open(&mut open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("editor_modal_scroll")
                    .max_height(340.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut self.text)
                                .font(egui::TextStyle::Monospace)
                                .code_editor()
                                .desired_width(f32::INFINITY)
                                .desired_rows(18),
                        );
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = ModalAction::Save;
                    }
                    if ui.button("Cancel").clicked() {
                        action = ModalAction::Cancel;
                    }
                });
            });

        if !open {
            action = ModalAction::Cancel;
        }
        action
    }
}
