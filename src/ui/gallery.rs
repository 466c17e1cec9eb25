//! Gallery view of all filled documents

use eframe::egui;
use eframe::egui::RichText;

use crate::app::MdTabsApp;
use crate::core::document::DocumentId;
use crate::core::render;

/// Characters of stripped preview the wireframe is built from
const PREVIEW_CHARS: usize = 150;
/// Characters of stripped preview shown under the card title
const SNIPPET_CHARS: usize = 60;
/// Most bars shown in one card's wireframe
const WIREFRAME_BARS: usize = 8;
/// Line length that makes a bar span the full card width
const FULL_BAR_CHARS: f32 = 60.0;

const CARD_WIDTH: f32 = 220.0;
const CARD_GAP: f32 = 16.0;

/// Grid of document cards, one per filled document
pub struct GalleryPanel;

struct GalleryCard {
    id: DocumentId,
    title: String,
    snippet: String,
    bar_widths: Vec<f32>,
}

impl GalleryPanel {
    /// Show the gallery
    pub fn show(ui: &mut egui::Ui, app: &mut MdTabsApp) {
        // Snapshot card data first to avoid borrow conflicts
        let cards: Vec<GalleryCard> = app
            .session
            .documents()
            .iter()
            .filter(|doc| !doc.is_blank())
            .map(|doc| GalleryCard {
                id: doc.id,
                title: doc.title.clone(),
                snippet: render::preview_text(&doc.content, SNIPPET_CHARS),
                bar_widths: wireframe_widths(&doc.content),
            })
            .collect();

        let mut open_request = None;

        egui::ScrollArea::vertical()
            .id_salt("gallery_scroll")
            .show(ui, |ui| {
                ui.add_space(12.0);
                ui.heading("All Documents");
                ui.label(RichText::new("Click on any document to open it").weak());
                ui.add_space(16.0);

                let columns = (ui.available_width() / (CARD_WIDTH + CARD_GAP))
                    .floor()
                    .max(1.0) as usize;
                for row in cards.chunks(columns) {
                    ui.with_layout(egui::Layout::left_to_right(egui::Align::TOP), |ui| {
                        for card in row {
                            if show_card(ui, card).clicked() {
                                open_request = Some(card.id);
                            }
                        }
                    });
                    ui.add_space(CARD_GAP);
                }
            });

        if let Some(id) = open_request {
            if let Err(err) = app.session.set_active(id) {
                tracing::warn!("Failed to open document from gallery: {}", err);
            }
        }
    }
}

fn show_card(ui: &mut egui::Ui, card: &GalleryCard) -> egui::Response {
    let frame = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            let bar_color = ui.visuals().widgets.noninteractive.bg_fill;
            for width in &card.bar_widths {
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(CARD_WIDTH * width, 8.0),
                    egui::Sense::hover(),
                );
                ui.painter()
                    .rect_filled(rect, egui::CornerRadius::same(2), bar_color);
            }
            ui.add_space(8.0);
            ui.label(RichText::new(&card.title).strong());
            ui.label(RichText::new(&card.snippet).weak().small());
        });

    ui.interact(
        frame.response.rect,
        egui::Id::new(("gallery_card", card.id)),
        egui::Sense::click(),
    )
}

/// Bar widths for a card's wireframe, as fractions of the card width.
///
/// One bar per line of the stripped preview, at most
/// [`WIREFRAME_BARS`] bars; blank lines get a short stub.
fn wireframe_widths(content: &str) -> Vec<f32> {
    render::preview_text(content, PREVIEW_CHARS)
        .split('\n')
        .take(WIREFRAME_BARS)
        .map(|line| {
            if line.trim().is_empty() {
                0.25
            } else {
                (line.chars().count() as f32 / FULL_BAR_CHARS).min(1.0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_proportional_to_line_length() {
        let widths = wireframe_widths("123456789012345678901234567890");
        assert_eq!(widths.len(), 1);
        assert!((widths[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bar_width_caps_at_full_width() {
        let widths = wireframe_widths(&"x".repeat(90));
        assert_eq!(widths[0], 1.0);
    }

    #[test]
    fn test_blank_lines_get_stub_bars() {
        let widths = wireframe_widths("line one\n\nline two");
        assert_eq!(widths.len(), 3);
        assert!((widths[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_bar_count_is_limited() {
        let content = "a\n".repeat(20);
        assert_eq!(wireframe_widths(&content).len(), WIREFRAME_BARS);
    }

    #[test]
    fn test_bars_use_stripped_text() {
        // "# Header" strips to " Header": seven characters.
        let widths = wireframe_widths("# Header");
        assert!((widths[0] - 7.0 / 60.0).abs() < 1e-6);
    }
}
