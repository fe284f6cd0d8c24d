use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::coerce_quantity;
use crate::models::{ClientInfo, ServiceTier};

/// Staffing quantities for hourly pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingInputs {
    pub people: Decimal,
    pub hours_per_person: Decimal,
    pub times_per_week: Decimal,
}

impl StaffingInputs {
    /// Builds inputs from raw form text. Unparseable fields become zero.
    pub fn from_text(
        people: &str,
        hours_per_person: &str,
        times_per_week: &str,
    ) -> Self {
        Self {
            people: coerce_quantity(people),
            hours_per_person: coerce_quantity(hours_per_person),
            times_per_week: coerce_quantity(times_per_week),
        }
    }
}

/// Floor area and tier for area pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaInputs {
    pub area: Decimal,
    pub tier: ServiceTier,
}

impl AreaInputs {
    pub fn from_text(
        area: &str,
        tier: ServiceTier,
    ) -> Self {
        Self {
            area: coerce_quantity(area),
            tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum QuoteInputs {
    Hourly(StaffingInputs),
    Area(AreaInputs),
}

/// Everything the calculator view collects for one quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub client: ClientInfo,
    pub inputs: QuoteInputs,
    pub payment_terms: String,
}

/// Derived quote figures. Never persisted.
///
/// In area mode `total_hours_per_week` and `monthly_hours` are zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub total_hours_per_week: Decimal,
    pub monthly_hours: Decimal,
    /// Hourly rate or price per m² that was applied.
    pub unit_rate: Decimal,
    pub total_bill: Decimal,
    /// True only when every contributing input is strictly positive.
    pub sufficient_input: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn staffing_inputs_from_text_coerces_each_field() {
        let inputs = StaffingInputs::from_text("3", "abc", " 2 ");

        assert_eq!(inputs.people, dec!(3));
        assert_eq!(inputs.hours_per_person, Decimal::ZERO);
        assert_eq!(inputs.times_per_week, dec!(2));
    }

    #[test]
    fn area_inputs_from_text_coerces_area() {
        let inputs = AreaInputs::from_text("1,250.5", ServiceTier::Basic);

        assert_eq!(inputs.area, dec!(1250.5));
        assert_eq!(inputs.tier, ServiceTier::Basic);
    }

    #[test]
    fn quote_inputs_serialize_with_mode_tag() {
        let inputs = QuoteInputs::Area(AreaInputs {
            area: dec!(75),
            tier: ServiceTier::Deep,
        });
        let json = serde_json::to_value(&inputs).unwrap();

        assert_eq!(json["mode"], "area");
        assert_eq!(json["tier"], "deep");
    }
}
