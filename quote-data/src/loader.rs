//! Bulk import of template lists from CSV.
//!
//! | Column  | Required | Notes                                             |
//! |---------|----------|---------------------------------------------------|
//! | `list`  | yes      | `weekly_tasks`, `monthly_tasks`, `contractor_responsibilities`, `customer_responsibilities` or `extra_services` |
//! | `text`  | yes      | Task text, or the extra-service label             |
//! | `price` | no       | Required for `extra_services`, ignored otherwise  |
//!
//! ```csv
//! list,text,price
//! weekly_tasks,Vacuum all carpets,
//! extra_services,Window washing,Quote upon request
//! ```

use std::io::Read;

use quote_core::{
    ExtraService, SettingsPatch, SettingsStore, SettingsStoreError, TemplateList,
};
use serde::Deserialize;
use thiserror::Error;

const EXTRA_SERVICES: &str = "extra_services";

#[derive(Debug, Error)]
pub enum TemplateLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown list '{list}' on row {row}")]
    UnknownList { list: String, row: usize },

    #[error("extra service on row {row} has no price")]
    MissingPrice { row: usize },

    #[error("row {row} has no text")]
    EmptyText { row: usize },

    #[error("Settings store error: {0}")]
    Store(#[from] SettingsStoreError),
}

impl From<csv::Error> for TemplateLoaderError {
    fn from(err: csv::Error) -> Self {
        TemplateLoaderError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct TemplateRow {
    list: String,
    text: String,
    #[serde(default)]
    price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Text { list: TemplateList, text: String },
    Extra(ExtraService),
}

fn convert_row(
    row: TemplateRow,
    row_number: usize,
) -> Result<TemplateEntry, TemplateLoaderError> {
    if row.text.is_empty() {
        return Err(TemplateLoaderError::EmptyText { row: row_number });
    }
    if row.list == EXTRA_SERVICES {
        let price = row
            .price
            .filter(|p| !p.is_empty())
            .ok_or(TemplateLoaderError::MissingPrice { row: row_number })?;
        return Ok(TemplateEntry::Extra(ExtraService::new(row.text, price)));
    }
    let list = TemplateList::parse(&row.list).ok_or_else(|| TemplateLoaderError::UnknownList {
        list: row.list.clone(),
        row: row_number,
    })?;
    Ok(TemplateEntry::Text {
        list,
        text: row.text,
    })
}

pub struct TemplateLoader;

impl TemplateLoader {
    /// Parse entries from CSV, in file order. Rows are numbered from 1
    /// after the header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TemplateEntry>, TemplateLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        csv_reader
            .deserialize::<TemplateRow>()
            .enumerate()
            .map(|(idx, result)| convert_row(result?, idx + 1))
            .collect()
    }

    /// Replaces every list that appears in `entries` with the entries given
    /// for it, keeping file order. Lists not mentioned are left alone. The
    /// result is persisted in one write.
    ///
    /// Returns the number of entries loaded.
    pub async fn load(
        store: &mut SettingsStore,
        entries: &[TemplateEntry],
    ) -> Result<usize, TemplateLoaderError> {
        let mut settings = store.settings().clone();

        for list in TemplateList::ALL {
            let texts: Vec<String> = entries
                .iter()
                .filter_map(|entry| match entry {
                    TemplateEntry::Text { list: l, text } if *l == list => Some(text.clone()),
                    _ => None,
                })
                .collect();
            if !texts.is_empty() {
                tracing::debug!(list = list.as_str(), count = texts.len(), "replacing list");
                *settings.list_mut(list) = texts;
            }
        }

        let extras: Vec<ExtraService> = entries
            .iter()
            .filter_map(|entry| match entry {
                TemplateEntry::Extra(extra) => Some(extra.clone()),
                _ => None,
            })
            .collect();
        if !extras.is_empty() {
            settings.agreement_template.extra_services = extras;
        }

        store
            .update(SettingsPatch {
                proposal_template: Some(settings.proposal_template),
                agreement_template: Some(settings.agreement_template),
                ..Default::default()
            })
            .await?;

        Ok(entries.len())
    }
}
