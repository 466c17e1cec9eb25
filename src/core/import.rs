//! File import into the tab session.
//!
//! Imports arrive as batches (a multi-file drop or a dialog
//! selection). Whether the first file may take over the active blank
//! tab is decided once per batch, against the state at the time the
//! batch is opened, so reads finishing later cannot shift the target.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::document;
use crate::core::document::DocumentId;
use crate::core::session::Session;

/// Staged import of one ordered batch of files
#[derive(Debug)]
pub struct ImportBatch {
    /// Blank active document captured when the batch was opened
    replace_target: Option<DocumentId>,
    next_index: usize,
    replaced_first: bool,
    activated: Option<DocumentId>,
}

impl ImportBatch {
    /// Open a batch, snapshotting replace eligibility from the
    /// current session state.
    pub fn begin(session: &Session) -> Self {
        let replace_target = session
            .active_document()
            .filter(|doc| doc.is_blank())
            .map(|doc| doc.id);
        Self {
            replace_target,
            next_index: 0,
            replaced_first: false,
            activated: None,
        }
    }

    /// Apply one file's read result, in input order.
    ///
    /// The first file of the batch fills the snapshotted blank active
    /// document in place; every other file lands in a new tab. The
    /// first newly created document becomes active unless the first
    /// file replaced in place. A failed read is logged and skipped
    /// without consuming an id. Returns the id of the document the
    /// file landed in.
    pub fn apply(
        &mut self,
        session: &mut Session,
        file_name: &str,
        text: Result<String>,
    ) -> Option<DocumentId> {
        let index = self.next_index;
        self.next_index += 1;

        let text = match text {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Skipping {}: {:#}", file_name, err);
                return None;
            }
        };

        let title = document::title_from_file_name(file_name);

        if index == 0 {
            if let Some(target) = self.replace_target {
                if session.document(target).is_some() {
                    let _ = session.replace_content(target, text, Some(title));
                    self.replaced_first = true;
                    tracing::debug!("Imported {} into document {}", file_name, target);
                    return Some(target);
                }
                tracing::debug!("Replacement target {} is gone, appending instead", target);
            }
        }

        let id = session.append_document(title, text);
        if !self.replaced_first && self.activated.is_none() {
            session.activate(id);
            self.activated = Some(id);
        }
        tracing::debug!("Imported {} as document {}", file_name, id);
        Some(id)
    }
}

/// Read a set of dropped or picked paths into the session.
///
/// Directories are expanded to the markdown files under them and
/// non-markdown files are dropped before the batch is opened. Returns
/// the number of files that landed in a tab.
pub fn import_paths(session: &mut Session, paths: &[PathBuf]) -> usize {
    let files = expand_paths(paths);
    let mut batch = ImportBatch::begin(session);
    let mut imported = 0;
    for path in &files {
        let name = file_display_name(path);
        if batch.apply(session, &name, read_text(path)).is_some() {
            imported += 1;
        }
    }
    if !files.is_empty() {
        tracing::info!("Imported {} of {} markdown files", imported, files.len());
    }
    imported
}

/// Whether the path has a markdown extension
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// All markdown files under a directory, in file-name order
pub fn collect_markdown_paths(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_markdown_path(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(collect_markdown_paths(path));
        } else if is_markdown_path(path) {
            files.push(path.clone());
        } else {
            tracing::debug!("Ignoring non-markdown file: {}", path.display());
        }
    }
    files
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
