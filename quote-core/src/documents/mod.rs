//! Document content builder.
//!
//! Turns settings plus a calculated quote into a fully resolved
//! [`Document`]. Every number and date is formatted here, once; renderers
//! only lay the strings out.

mod agreement;
mod model;
mod proposal;

use chrono::{Datelike, NaiveDate};

use crate::calculations::common::{format_money, format_quantity};
use crate::models::{QuoteInputs, QuoteRequest, QuoteResult, Settings};

pub use agreement::build_agreement;
pub use model::{Block, Document, DocumentKind, LabeledValue, PriceLine, Section, SignatureBlock};
pub use proposal::build_proposal;

/// Inputs shared by both document variants.
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    pub settings: &'a Settings,
    pub request: &'a QuoteRequest,
    pub result: &'a QuoteResult,
    pub as_of: NaiveDate,
}

/// Date as printed inside documents, e.g. `10/17/2026`.
pub fn display_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Date as used in generated file names, e.g. `10-17-2026`.
pub fn file_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.month(), date.day(), date.year())
}

/// Subject line for the proposal email, carrying the computed total.
pub fn email_subject(
    inputs: &QuoteInputs,
    result: &QuoteResult,
) -> String {
    let total = format_money(result.total_bill);
    match inputs {
        QuoteInputs::Hourly(_) => format!("Cleaning Proposal — {total} per month"),
        QuoteInputs::Area(area) => format!(
            "Cleaning Proposal — {} ({} m²) — {total}",
            area.tier.label(),
            format_quantity(area.area)
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::QuoteCalculator;
    use crate::models::{AreaInputs, RateConfig, ServiceTier, StaffingInputs};

    #[test]
    fn display_and_file_dates_do_not_pad() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();

        assert_eq!(display_date(date), "3/7/2026");
        assert_eq!(file_date(date), "3-7-2026");
    }

    #[test]
    fn hourly_subject_contains_monthly_total() {
        let inputs = QuoteInputs::Hourly(StaffingInputs::from_text("3", "4", "2"));
        let result = QuoteCalculator::new(&RateConfig::default()).calculate(&inputs);

        assert_eq!(
            email_subject(&inputs, &result),
            "Cleaning Proposal — €2600.00 per month"
        );
    }

    #[test]
    fn area_subject_names_tier_and_area() {
        let inputs = QuoteInputs::Area(AreaInputs {
            area: dec!(75),
            tier: ServiceTier::Deep,
        });
        let result = QuoteCalculator::new(&RateConfig::default()).calculate(&inputs);

        assert_eq!(
            email_subject(&inputs, &result),
            "Cleaning Proposal — Deep Cleaning (75 m²) — €450.00"
        );
    }
}
