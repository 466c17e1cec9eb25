//! Main application state and UI coordination

use std::path::PathBuf;

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::document::DocumentId;
use crate::core::import;
use crate::core::render;
use crate::core::session::{ActiveView, Session};
use crate::ui::editor_modal::{EditorModal, ModalAction};
use crate::ui::gallery::GalleryPanel;
use crate::ui::tab_bar::TabBarPanel;
use crate::ui::viewer::ViewerPanel;

/// Main application state
pub struct MdTabsApp {
    /// Open documents and view selection
    pub session: Session,
    /// Application configuration
    pub config: AppConfig,
    /// Modal editor, while one is open
    pub editor: Option<EditorModal>,
    /// Commonmark cache for the rendered view
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
}

impl MdTabsApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let app = Self {
            session: Session::new(),
            config,
            editor: None,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
        };
        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Apply the configured theme
    fn apply_theme(&self, ctx: &egui::Context) {
        match self.config.ui.theme.as_str() {
            "dark" => ctx.set_visuals(egui::Visuals::dark()),
            _ => ctx.set_visuals(egui::Visuals::light()),
        }
    }

    /// Switch theme and persist the choice
    fn set_theme(&mut self, ctx: &egui::Context, theme: &str) {
        self.config.ui.theme = theme.to_string();
        self.apply_theme(ctx);
        let _ = self.config.save();
    }

    /// Open the multi-file import dialog
    pub fn open_files_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Markdown", &["md", "markdown"]);
        if let Some(dir) = &self.config.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(paths) = dialog.pick_files() {
            if let Some(path) = paths.first() {
                self.config.remember_open_dir(path);
                let _ = self.config.save();
            }
            import::import_paths(&mut self.session, &paths);
        }
    }

    /// Open the folder import dialog
    pub fn open_folder_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = &self.config.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(folder) = dialog.pick_folder() {
            self.config.remember_open_dir(&folder);
            let _ = self.config.save();
            import::import_paths(&mut self.session, &[folder]);
        }
    }

    /// Open the modal editor on a document
    pub fn open_editor(&mut self, id: DocumentId) {
        if let Some(doc) = self.session.document(id) {
            self.editor = Some(EditorModal::new(id, doc.content.clone()));
        }
    }

    /// Save a document's raw markdown through a file dialog
    pub fn download_markdown(&mut self, id: DocumentId) {
        let (title, content) = match self.session.document(id) {
            Some(doc) => (doc.title.clone(), doc.content.clone()),
            None => return,
        };
        let file_name = format!("{}.md", render::sanitize_file_name(&title));
        if let Some(path) = rfd::FileDialog::new().set_file_name(file_name).save_file() {
            if let Err(err) = render::write_markdown(&path, &content) {
                tracing::error!("Failed to save markdown: {:#}", err);
            }
        }
    }

    /// Render a document to a standalone HTML file through a file dialog
    pub fn export_html(&mut self, id: DocumentId) {
        let (title, content) = match self.session.document(id) {
            Some(doc) => (doc.title.clone(), doc.content.clone()),
            None => return,
        };
        let file_name = format!("{}.html", render::sanitize_file_name(&title));
        if let Some(path) = rfd::FileDialog::new().set_file_name(file_name).save_file() {
            if let Err(err) = render::write_html(&path, &title, &content) {
                tracing::error!("Failed to export HTML: {:#}", err);
            }
        }
    }

    /// Close the active document, if any
    fn close_active_document(&mut self) {
        if let ActiveView::Document(id) = self.session.active() {
            if let Err(err) = self.session.close_document(id) {
                tracing::debug!("Close ignored: {}", err);
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Collect first; dialogs must not run under the input lock
        let (new_tab, close_tab, open_files) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::T),
                i.modifiers.ctrl && i.key_pressed(egui::Key::W),
                i.modifiers.ctrl && i.key_pressed(egui::Key::O),
            )
        });
        if new_tab {
            self.session.create_blank_document();
        }
        if close_tab {
            self.close_active_document();
        }
        if open_files {
            self.open_files_dialog();
        }
    }

    /// Track drag-over state and apply dropped files
    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let flagged = self
            .session
            .active_document()
            .map(|doc| (doc.id, doc.pending_drop));
        if let Some((id, pending)) = flagged {
            if pending != hovering {
                let _ = self.session.set_pending_drop(id, hovering);
            }
        }

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            import::import_paths(&mut self.session, &dropped);
        }
    }

    /// Full-window hint while files hover over an already-filled view
    fn show_drag_overlay(&self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if !hovering {
            return;
        }
        // The empty-tab drop zone paints its own highlight.
        let over_drop_zone = self
            .session
            .active_document()
            .map(|doc| doc.content.is_empty())
            .unwrap_or(false);
        if over_drop_zone {
            return;
        }

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_overlay"),
        ));
        let rect = ctx.screen_rect();
        painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(96));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Drop markdown files to import",
            egui::FontId::proportional(24.0),
            egui::Color32::WHITE,
        );
    }

    fn show_editor_modal(&mut self, ctx: &egui::Context) {
        let mut finished: Option<(DocumentId, Option<String>)> = None;
        if let Some(modal) = &mut self.editor {
            match modal.show(ctx) {
                ModalAction::Save => {
                    finished = Some((modal.document_id, Some(std::mem::take(&mut modal.text))));
                }
                ModalAction::Cancel => finished = Some((modal.document_id, None)),
                ModalAction::KeepOpen => {}
            }
        }
        if let Some((id, text)) = finished {
            self.editor = None;
            if let Some(text) = text {
                if let Err(err) = self.session.replace_content(id, text, None) {
                    tracing::warn!("Failed to apply edited text: {}", err);
                }
            }
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let active_id = match self.session.active() {
                        ActiveView::Document(id) => Some(id),
                        ActiveView::Gallery => None,
                    };

                    if ui.button("Open Files...").clicked() {
                        self.open_files_dialog();
                        ui.close();
                    }
                    if ui.button("Open Folder...").clicked() {
                        self.open_folder_dialog();
                        ui.close();
                    }
                    if ui.button("New Tab").clicked() {
                        self.session.create_blank_document();
                        ui.close();
                    }
                    let closable = self.session.documents().len() > 1 && active_id.is_some();
                    if ui
                        .add_enabled(closable, egui::Button::new("Close Tab"))
                        .clicked()
                    {
                        self.close_active_document();
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(active_id.is_some(), egui::Button::new("Download as file"))
                        .clicked()
                    {
                        if let Some(id) = active_id {
                            self.download_markdown(id);
                        }
                        ui.close();
                    }
                    if ui
                        .add_enabled(active_id.is_some(), egui::Button::new("Export as HTML"))
                        .clicked()
                    {
                        if let Some(id) = active_id {
                            self.export_html(id);
                        }
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui
                        .add_enabled(
                            self.session.gallery_visible(),
                            egui::Button::new("All Documents"),
                        )
                        .clicked()
                    {
                        self.session.show_gallery();
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .selectable_label(self.config.ui.theme == "light", "Light Theme")
                        .clicked()
                    {
                        self.set_theme(ctx, "light");
                        ui.close();
                    }
                    if ui
                        .selectable_label(self.config.ui.theme == "dark", "Dark Theme")
                        .clicked()
                    {
                        self.set_theme(ctx, "dark");
                        ui.close();
                    }
                });
            });
        });
    }
}

impl eframe::App for MdTabsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.handle_file_drops(ctx);

        self.render_menu_bar(ctx);

        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            TabBarPanel::show(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.session.active() {
            ActiveView::Gallery => GalleryPanel::show(ui, self),
            ActiveView::Document(_) => ViewerPanel::show(ui, self),
        });

        self.show_editor_modal(ctx);
        self.show_drag_overlay(ctx);

        // Remember the window size for the next start
        let size = ctx.screen_rect().size();
        self.config.ui.window_width = size.x;
        self.config.ui.window_height = size.y;
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.config.save() {
            tracing::error!("Failed to save config: {}", err);
        }
    }
}
