//! Output renderers for resolved quote documents.
//!
//! Renderers only lay out the strings a [`Document`] already carries; they
//! never recompute or reformat values.

pub mod html;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use quote_core::documents::Document;
use thiserror::Error;

pub use html::HtmlRenderer;
pub use pdf::PdfRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("'{binary}' is not installed or not on PATH; install Typst to export PDFs")]
    TypstUnavailable { binary: String },

    #[error("typst compile failed: {stderr}")]
    Compile { stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered file, ready to be written or attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Writes the artifact into `dir` under its own file name.
    pub fn write_to(
        &self,
        dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), "wrote {}", self.content_type);
        Ok(path)
    }

    /// The bytes as text, for HTML artifacts.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

pub trait DocumentRenderer {
    fn render(
        &self,
        document: &Document,
    ) -> Result<Artifact, RenderError>;
}
