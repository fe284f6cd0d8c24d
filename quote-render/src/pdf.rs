//! PDF export through Typst.
//!
//! The document is rendered into Typst markup from an embedded tera
//! template, then compiled by the `typst` command-line tool in a scratch
//! directory. Every piece of user text enters the markup as a Typst string
//! literal, so no character in it can be read as markup.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use quote_core::documents::Document;
use tera::{Context, Tera, Value};

use crate::{Artifact, DocumentRenderer, RenderError};

const TEMPLATE_NAME: &str = "document.typ";
const TEMPLATE: &str = include_str!("../templates/document.typ");

pub struct PdfRenderer {
    tera: Tera,
    typst_binary: PathBuf,
}

impl PdfRenderer {
    /// Renderer that runs `typst` from `PATH`.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_binary("typst")
    }

    pub fn with_binary(typst_binary: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.register_filter("typst_str", typst_str_filter);
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self {
            tera,
            typst_binary: typst_binary.into(),
        })
    }

    /// The Typst markup for `document`, before compilation.
    pub fn typst_source(
        &self,
        document: &Document,
    ) -> Result<String, RenderError> {
        let context = Context::from_serialize(document)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    fn compile(
        &self,
        source: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("document.typ");
        let output = scratch.path().join("document.pdf");
        fs::write(&input, source)?;

        let result = Command::new(&self.typst_binary)
            .arg("compile")
            .arg(&input)
            .arg(&output)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RenderError::TypstUnavailable {
                    binary: self.typst_binary.display().to_string(),
                },
                _ => RenderError::Io(e),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::error!(status = %result.status, "typst compile failed: {}", stderr);
            return Err(RenderError::Compile { stderr });
        }

        Ok(fs::read(&output)?)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        document: &Document,
    ) -> Result<Artifact, RenderError> {
        let source = self.typst_source(document)?;
        let bytes = self.compile(&source)?;
        tracing::debug!(file = %document.file_name, bytes = bytes.len(), "pdf compiled");
        Ok(Artifact {
            file_name: document.file_name.clone(),
            content_type: "application/pdf",
            bytes,
        })
    }
}

/// Quotes `text` as a Typst string literal.
pub fn typst_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn typst_str_filter(
    value: &Value,
    _args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => typst_literal(s),
        Value::Null => typst_literal(""),
        other => typst_literal(&other.to_string()),
    };
    Ok(Value::String(text))
}
