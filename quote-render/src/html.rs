use quote_core::documents::Document;
use tera::{Context, Tera};

use crate::{Artifact, DocumentRenderer, RenderError};

const TEMPLATE_NAME: &str = "document.html";
const TEMPLATE: &str = include_str!("../templates/document.html");

/// Renders a document as a self-contained HTML page with inline styles,
/// suitable as an email body. All user text is HTML-escaped.
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        // Autoescape is keyed on the `.html` template name.
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera })
    }

    /// The rendered page as a string.
    pub fn render_string(
        &self,
        document: &Document,
    ) -> Result<String, RenderError> {
        let context = Context::from_serialize(document)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(
        &self,
        document: &Document,
    ) -> Result<Artifact, RenderError> {
        let html = self.render_string(document)?;
        let stem = document
            .file_name
            .strip_suffix(".pdf")
            .unwrap_or(&document.file_name);
        Ok(Artifact {
            file_name: format!("{stem}.html"),
            content_type: "text/html",
            bytes: html.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;

    #[test]
    fn proposal_html_carries_totals_and_tasks() {
        let html = HtmlRenderer::new()
            .unwrap()
            .render_string(&fixtures::proposal("Acme Corp"))
            .unwrap();

        assert!(html.contains("Cleaning Specifications"));
        assert!(html.contains("Times Per Week (2)"));
        assert!(html.contains("€2600.00"));
        assert!(html.contains("<li>Vacuum all carpet and floor mats.</li>"));
        assert!(html.contains("This is an estimate."));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = HtmlRenderer::new()
            .unwrap()
            .render_string(&fixtures::proposal("<script>alert(1)</script>"))
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn agreement_sections_print_their_numbers() {
        let html = HtmlRenderer::new()
            .unwrap()
            .render_string(&fixtures::agreement("Acme Corp"))
            .unwrap();

        assert!(html.contains("VI. Cost of Service and Invoicing"));
        assert!(html.contains("Customer: Acme Corp"));
        assert!(html.contains("CleanPro Services – Service Agreement"));
    }

    #[test]
    fn each_signature_gets_name_signature_and_date_lines() {
        let html = HtmlRenderer::new()
            .unwrap()
            .render_string(&fixtures::agreement("Acme Corp"))
            .unwrap();

        assert_eq!(html.matches("Printed Name: ____").count(), 2);
        assert_eq!(html.matches("Signature: ____").count(), 2);
        assert_eq!(html.matches("Date: ____").count(), 2);
    }

    #[test]
    fn artifact_swaps_pdf_extension_for_html() {
        let artifact = HtmlRenderer::new()
            .unwrap()
            .render(&fixtures::proposal("Acme Corp"))
            .unwrap();

        assert_eq!(artifact.file_name, "cleaning-specifications-10-17-2026.html");
        assert_eq!(artifact.content_type, "text/html");
    }
}
