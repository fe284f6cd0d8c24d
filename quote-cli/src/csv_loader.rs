//! CSV loader for batch quotes.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column             | Required | Notes                                        |
//! |--------------------|----------|----------------------------------------------|
//! | `client_name`      | yes      | Must not be blank                            |
//! | `address`          | no       |                                              |
//! | `people`           | no       | Hourly mode                                  |
//! | `hours_per_person` | no       | Hourly mode                                  |
//! | `times_per_week`   | no       | Hourly mode                                  |
//! | `area`             | no       | Area mode, in m²                             |
//! | `tier`             | no       | Area mode: `basic`, `deep` or `moveout`      |
//! | `payment_terms`    | no       |                                              |
//!
//! A row that carries an `area` or a `tier` is quoted by area; otherwise it
//! is quoted hourly. Quantities follow the zero-fallback rule, so a
//! malformed number yields an insufficient quote rather than an error.
//!
//! ```csv
//! client_name,address,people,hours_per_person,times_per_week,area,tier,payment_terms
//! Acme Corp,9 Elm Road,3,4,2,,,Net 30
//! Bright Dental,,,,,75,deep,
//! ```

use std::path::Path;

use quote_core::{AreaInputs, ClientInfo, QuoteInputs, QuoteRequest, ServiceTier, StaffingInputs};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    client_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    people: String,
    #[serde(default)]
    hours_per_person: String,
    #[serde(default)]
    times_per_week: String,
    #[serde(default)]
    area: String,
    #[serde(default)]
    tier: String,
    #[serde(default)]
    payment_terms: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based, header excluded.
    #[error("unrecognised service tier '{tier}' on row {row}")]
    InvalidTier { tier: String, row: usize },

    #[error("missing client name on row {row}")]
    MissingClientName { row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<QuoteRequest, CsvLoadError> {
    if row.client_name.is_empty() {
        return Err(CsvLoadError::MissingClientName { row: row_number });
    }

    let inputs = if row.area.is_empty() && row.tier.is_empty() {
        QuoteInputs::Hourly(StaffingInputs::from_text(
            &row.people,
            &row.hours_per_person,
            &row.times_per_week,
        ))
    } else {
        let tier = if row.tier.is_empty() {
            ServiceTier::Basic
        } else {
            ServiceTier::parse(&row.tier).ok_or_else(|| CsvLoadError::InvalidTier {
                tier: row.tier.clone(),
                row: row_number,
            })?
        };
        QuoteInputs::Area(AreaInputs::from_text(&row.area, tier))
    };

    Ok(QuoteRequest {
        client: ClientInfo {
            name: row.client_name,
            address: row.address,
            ..Default::default()
        },
        inputs,
        payment_terms: row.payment_terms,
    })
}

/// Parse CSV text into quote requests, in file order.
pub fn load_from_str(input: &str) -> Result<Vec<QuoteRequest>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

pub fn load_from_file(path: &Path) -> Result<Vec<QuoteRequest>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
