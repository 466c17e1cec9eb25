//! Horizontal tab strip with the home and new-tab affordances

use eframe::egui;

use crate::app::MdTabsApp;
use crate::core::document::DocumentId;
use crate::core::session::ActiveView;

/// Longest tab label before truncation, in characters
const TAB_TITLE_MAX_CHARS: usize = 18;

/// The tab strip across the top of the window
pub struct TabBarPanel;

impl TabBarPanel {
    /// Show the tab strip
    pub fn show(ui: &mut egui::Ui, app: &mut MdTabsApp) {
        // Snapshot tab state first to avoid borrow conflicts
        let tabs: Vec<(DocumentId, String)> = app
            .session
            .documents()
            .iter()
            .map(|doc| (doc.id, doc.title.clone()))
            .collect();
        let active = app.session.active();
        let gallery_visible = app.session.gallery_visible();
        let closable = tabs.len() > 1;

        egui::ScrollArea::horizontal()
            .id_salt("tab_strip_scroll")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if gallery_visible {
                        let selected = active == ActiveView::Gallery;
                        if ui
                            .selectable_label(selected, "⌂")
                            .on_hover_text("Home - View all files")
                            .clicked()
                        {
                            app.session.show_gallery();
                        }
                    }

                    for (id, title) in &tabs {
                        let selected = active == ActiveView::Document(*id);
                        let response = ui.selectable_label(selected, clamp_title(title));
                        if response.clicked() {
                            if let Err(err) = app.session.set_active(*id) {
                                tracing::warn!("Failed to activate tab: {}", err);
                            }
                        }
                        response.context_menu(|ui| {
                            if ui.button("Edit").clicked() {
                                app.open_editor(*id);
                                ui.close();
                            }
                            if ui.button("Download as file").clicked() {
                                app.download_markdown(*id);
                                ui.close();
                            }
                            if ui.button("Export as HTML").clicked() {
                                app.export_html(*id);
                                ui.close();
                            }
                        });

                        if closable && ui.small_button("✕").on_hover_text("Close tab").clicked()
                        {
                            if let Err(err) = app.session.close_document(*id) {
                                tracing::debug!("Close ignored: {}", err);
                            }
                        }
                    }

                    if ui.button("+").on_hover_text("Add new tab").clicked() {
                        app.session.create_blank_document();
                    }
                });
            });
    }
}

/// Truncate a title to fit the tab strip
fn clamp_title(title: &str) -> String {
    let mut clamped: String = title.chars().take(TAB_TITLE_MAX_CHARS).collect();
    if title.chars().count() > TAB_TITLE_MAX_CHARS {
        clamped.push('…');
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_title_passes_short_titles_through() {
        assert_eq!(clamp_title("notes"), "notes");
    }

    #[test]
    fn test_clamp_title_truncates_long_titles() {
        let long = "a very long document title";
        let clamped = clamp_title(long);
        assert_eq!(clamped.chars().count(), TAB_TITLE_MAX_CHARS + 1);
        assert!(clamped.ends_with('…'));
    }
}
