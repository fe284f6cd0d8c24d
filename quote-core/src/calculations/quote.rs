//! Recurring cleaning bill calculation.
//!
//! | Mode   | Formula |
//! |--------|---------|
//! | Hourly | `people × hours_per_person × times_per_week` hours/week, × 52 / 12 hours/month, × hourly rate |
//! | Area   | `area × rate[tier]` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::QuoteCalculator;
//! use quote_core::{QuoteInputs, RateConfig, StaffingInputs};
//!
//! let rates = RateConfig::default(); // €25 per hour
//! let inputs = QuoteInputs::Hourly(StaffingInputs::from_text("3", "4", "2"));
//!
//! let result = QuoteCalculator::new(&rates).calculate(&inputs);
//!
//! assert_eq!(result.total_hours_per_week, dec!(24));
//! assert_eq!(result.monthly_hours, dec!(104));
//! assert_eq!(result.total_bill, dec!(2600));
//! assert!(result.sufficient_input);
//! ```

use rust_decimal::Decimal;

use crate::models::{AreaInputs, QuoteInputs, QuoteResult, RateConfig, StaffingInputs};

/// Weeks per year used to amortize weekly hours into a month.
pub const WEEKS_PER_YEAR: u32 = 52;

pub const MONTHS_PER_YEAR: u32 = 12;

/// True when every quantity that feeds the bill is strictly positive.
///
/// This gates whether exports and email are offered; it is not an error.
pub fn has_sufficient_input(inputs: &QuoteInputs) -> bool {
    match inputs {
        QuoteInputs::Hourly(staffing) => {
            staffing.people > Decimal::ZERO
                && staffing.hours_per_person > Decimal::ZERO
                && staffing.times_per_week > Decimal::ZERO
        }
        QuoteInputs::Area(area) => area.area > Decimal::ZERO,
    }
}

/// Pure quote calculator over a rate configuration.
#[derive(Debug, Clone)]
pub struct QuoteCalculator<'a> {
    rates: &'a RateConfig,
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(rates: &'a RateConfig) -> Self {
        Self { rates }
    }

    /// Calculates the quote. Infallible: inputs are already coerced to
    /// non-negative numbers and products saturate instead of overflowing.
    pub fn calculate(
        &self,
        inputs: &QuoteInputs,
    ) -> QuoteResult {
        let sufficient_input = has_sufficient_input(inputs);
        match inputs {
            QuoteInputs::Hourly(staffing) => self.hourly(staffing, sufficient_input),
            QuoteInputs::Area(area) => self.area(area, sufficient_input),
        }
    }

    fn hourly(
        &self,
        staffing: &StaffingInputs,
        sufficient_input: bool,
    ) -> QuoteResult {
        let total_hours_per_week = self.total_hours_per_week(staffing);
        let monthly_hours = self.monthly_hours(total_hours_per_week);
        let unit_rate = self.rates.hourly_rate;

        QuoteResult {
            total_hours_per_week,
            monthly_hours,
            unit_rate,
            total_bill: clamp_non_negative(monthly_hours.saturating_mul(unit_rate)),
            sufficient_input,
        }
    }

    fn area(
        &self,
        area: &AreaInputs,
        sufficient_input: bool,
    ) -> QuoteResult {
        let unit_rate = self.rates.area_rates.rate_for(area.tier);

        QuoteResult {
            total_hours_per_week: Decimal::ZERO,
            monthly_hours: Decimal::ZERO,
            unit_rate,
            total_bill: clamp_non_negative(area.area.saturating_mul(unit_rate)),
            sufficient_input,
        }
    }

    /// Calculates total staff hours per week.
    fn total_hours_per_week(
        &self,
        staffing: &StaffingInputs,
    ) -> Decimal {
        staffing
            .people
            .saturating_mul(staffing.hours_per_person)
            .saturating_mul(staffing.times_per_week)
    }

    /// Amortizes weekly hours over a month (52 weeks / 12 months).
    fn monthly_hours(
        &self,
        total_hours_per_week: Decimal,
    ) -> Decimal {
        total_hours_per_week.saturating_mul(Decimal::from(WEEKS_PER_YEAR))
            / Decimal::from(MONTHS_PER_YEAR)
    }
}

/// A negative rate stored by hand must not produce a negative bill.
fn clamp_non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
