//! Integration tests that run the batch loader against an on-disk fixture
//! and price every row with the default rates.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use quote_cli::csv_loader;
use quote_core::calculations::QuoteCalculator;
use quote_core::calculations::common::format_money;
use quote_core::{QuoteInputs, RateConfig, ServiceTier};
use rust_decimal_macros::dec;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_quotes.csv")
}

#[test]
fn fixture_loads_every_row_in_order() {
    let requests =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load");

    let names: Vec<&str> = requests.iter().map(|r| r.client.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Acme Corp", "Bright Dental", "Harbor Lofts", "Sunrise Yoga"]
    );
}

#[test]
fn fixture_rows_pick_their_pricing_mode() {
    let requests = csv_loader::load_from_file(&fixture_path()).unwrap();

    assert!(matches!(requests[0].inputs, QuoteInputs::Hourly(_)));
    match &requests[2].inputs {
        QuoteInputs::Area(area) => {
            assert_eq!(area.tier, ServiceTier::MoveOut);
            assert_eq!(area.area, dec!(120));
        }
        other => panic!("expected area inputs, got {other:?}"),
    }
    assert_eq!(requests[1].payment_terms, "Due upon receipt");
    assert_eq!(requests[2].payment_terms, "");
}

#[test]
fn fixture_totals_with_default_rates() {
    let requests = csv_loader::load_from_file(&fixture_path()).unwrap();
    let rates = RateConfig::default();
    let calculator = QuoteCalculator::new(&rates);

    let totals: Vec<String> = requests
        .iter()
        .map(|r| format_money(calculator.calculate(&r.inputs).total_bill))
        .collect();

    assert_eq!(totals, vec!["€2600.00", "€450.00", "€960.00", "€1625.00"]);
}

#[test]
fn missing_fixture_reports_path() {
    let err = csv_loader::load_from_file(&fixture_path().with_file_name("absent.csv"))
        .unwrap_err();

    assert!(err.to_string().contains("absent.csv"));
}
