use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Proposal,
    Agreement,
}

impl DocumentKind {
    /// Prefix of generated file names.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Proposal => "cleaning-specifications",
            Self::Agreement => "service-agreement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLine {
    pub label: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureBlock {
    pub role: String,
    pub name: String,
}

/// A unit of section content. Serialized with a `kind` tag so templates
/// can branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    Bullets { items: Vec<String> },
    Enumerated { items: Vec<String> },
    Facts { rows: Vec<LabeledValue> },
    PriceList { items: Vec<PriceLine> },
    Highlight { label: String, value: String },
    Signatures { blocks: Vec<SignatureBlock> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Roman numeral for agreement sections, absent for proposal sections.
    pub number: Option<String>,
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            number: None,
            heading: heading.into(),
            blocks: Vec::new(),
        }
    }

    pub fn numbered(
        number: &str,
        heading: impl Into<String>,
    ) -> Self {
        Self {
            number: Some(number.to_string()),
            ..Self::new(heading)
        }
    }

    pub fn with(
        mut self,
        block: Block,
    ) -> Self {
        self.blocks.push(block);
        self
    }

    /// Heading as printed, e.g. `VI. Cost of Service and Invoicing`.
    pub fn title(&self) -> String {
        match &self.number {
            Some(number) => format!("{number}. {}", self.heading),
            None => self.heading.clone(),
        }
    }
}

/// A fully resolved document: no placeholders, every value already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub heading: String,
    pub subtitle: Option<String>,
    pub contact_line: Option<String>,
    pub header: Vec<LabeledValue>,
    pub sections: Vec<Section>,
    pub closing_notes: Vec<String>,
    /// Printed at the top of every page, followed by the page number.
    pub running_header: Option<String>,
    /// Printed at the bottom of every page, next to the page number.
    pub footer: String,
    pub file_name: String,
}

impl Document {
    pub fn section(
        &self,
        heading: &str,
    ) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}
