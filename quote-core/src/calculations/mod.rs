//! Quote arithmetic and shared numeric helpers.

pub mod common;
pub mod quote;

pub use quote::{QuoteCalculator, has_sufficient_input};
