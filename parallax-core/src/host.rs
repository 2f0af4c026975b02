/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Boundaries to the host document-editing application. The engine never
//! reaches for an ambient application object; every component takes the
//! boundary it needs as a parameter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("storage lookup failed: {0}")]
    Storage(String),
    #[error("editor operation failed: {0}")]
    Editor(String),
}

/// File storage of the host, addressed by vault-relative paths.
pub trait Vault {
    /// Resource-serving address for the file at `path`. `Ok(None)` when the
    /// path is absent or resolves to something that is not a file.
    fn resource_url(&self, path: &str) -> Result<Option<String>, HostError>;

    /// Paths of every file in the vault, used by the insert dialog to offer
    /// image candidates.
    fn files(&self) -> Vec<String>;
}

/// The host's active editing surface.
pub trait EditorSurface {
    /// Path of the document currently open for editing, if any.
    fn active_document(&self) -> Option<String>;

    /// Replaces the lines in `[from_line, to_line)` with `text`.
    fn replace_lines(&mut self, from_line: usize, to_line: usize, text: &str)
    -> Result<(), HostError>;

    /// Inserts `text` at the current selection.
    fn insert_at_cursor(&mut self, text: &str) -> Result<(), HostError>;
}

/// Single write-text clipboard operation; failures are the host's concern.
pub trait Clipboard {
    fn write_text(&mut self, text: &str);
}

/// Transient user-visible message, fire and forget.
pub trait Notifier {
    fn notify(&self, message: &str);
}
