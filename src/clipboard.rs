//! Clipboard seam. The session only hands over plain text and reports
//! pass/fail.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};

use thiserror::Error;

pub const COPY_SUCCESS: &str = "Copied to clipboard!";
pub const COPY_FAILURE: &str = "Failed to copy. Please select and copy manually.";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unsupported,
    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes copied text to a file, replacing earlier contents.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Used when no clipboard target is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedClipboard;

impl Clipboard for UnsupportedClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}
