//! Drop target shown while the active document is empty

use eframe::egui;
use eframe::egui::RichText;

use crate::app::MdTabsApp;

/// Empty-tab drop target
pub struct DropZonePanel;

impl DropZonePanel {
    /// Show the drop target for the active document
    pub fn show(ui: &mut egui::Ui, app: &mut MdTabsApp) {
        let active = app.session.active_document();
        let active_id = active.map(|doc| doc.id);
        let pending = active.map(|doc| doc.pending_drop).unwrap_or(false);

        let accent = ui.visuals().selection.stroke.color;
        let accent_fill = ui.visuals().selection.bg_fill;
        let weak = ui.visuals().weak_text_color();

        let rect = ui.available_rect_before_wrap().shrink(24.0);
        let stroke = if pending {
            egui::Stroke::new(2.0, accent)
        } else {
            egui::Stroke::new(2.0, weak)
        };
        if pending {
            ui.painter().rect_filled(
                rect,
                egui::CornerRadius::same(12),
                accent_fill.linear_multiply(0.15),
            );
        }
        paint_dashed_border(ui.painter(), rect, stroke);

        ui.vertical_centered(|ui| {
            ui.add_space(rect.height() * 0.3);
            ui.label(RichText::new("📄").size(40.0));
            ui.add_space(12.0);
            let heading = if pending {
                "Drop your markdown files here"
            } else {
                "Drop multiple markdown files"
            };
            ui.heading(heading);
            ui.add_space(6.0);
            ui.label("Select multiple .md files and drop them here");
            ui.label(RichText::new("Each markdown file will open in its own tab").weak());
            ui.add_space(16.0);
            if ui.button("Browse files…").clicked() {
                app.open_files_dialog();
            }
            ui.add_space(4.0);
            if ui.button("Paste markdown…").clicked() {
                if let Some(id) = active_id {
                    app.open_editor(id);
                }
            }
        });
    }
}

fn paint_dashed_border(painter: &egui::Painter, rect: egui::Rect, stroke: egui::Stroke) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    for pair in corners.windows(2) {
        painter.extend(egui::Shape::dashed_line(pair, stroke, 8.0, 6.0));
    }
}
