use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which set of inputs the calculator view collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Staffing model: people × hours × visits per week, billed per hour.
    #[default]
    Hourly,
    /// Tiered model: floor area × price per m² for the selected tier.
    Area,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Area => "area",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hourly" => Some(Self::Hourly),
            "area" => Some(Self::Area),
            _ => None,
        }
    }
}

/// Service level for area-based pricing. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Basic,
    Deep,
    #[serde(rename = "moveout")]
    MoveOut,
}

impl ServiceTier {
    pub const ALL: [ServiceTier; 3] = [Self::Basic, Self::Deep, Self::MoveOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Deep => "deep",
            Self::MoveOut => "moveout",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "deep" => Some(Self::Deep),
            "moveout" | "move-out" => Some(Self::MoveOut),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Cleaning",
            Self::Deep => "Deep Cleaning",
            Self::MoveOut => "Move-out Cleaning",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Basic => "Routine dusting, vacuuming, mopping and surface cleaning.",
            Self::Deep => {
                "Thorough cleaning including baseboards, fixtures, appliances and hard-to-reach areas."
            }
            Self::MoveOut => {
                "Complete top-to-bottom cleaning of an emptied property, inside cabinets and appliances."
            }
        }
    }
}

/// Price per m² for every service tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AreaRates {
    pub basic: Decimal,
    pub deep: Decimal,
    pub moveout: Decimal,
}

impl AreaRates {
    pub fn rate_for(
        &self,
        tier: ServiceTier,
    ) -> Decimal {
        match tier {
            ServiceTier::Basic => self.basic,
            ServiceTier::Deep => self.deep,
            ServiceTier::MoveOut => self.moveout,
        }
    }

    pub fn set_rate(
        &mut self,
        tier: ServiceTier,
        rate: Decimal,
    ) {
        match tier {
            ServiceTier::Basic => self.basic = rate,
            ServiceTier::Deep => self.deep = rate,
            ServiceTier::MoveOut => self.moveout = rate,
        }
    }
}

impl Default for AreaRates {
    fn default() -> Self {
        Self {
            basic: Decimal::new(350, 2),
            deep: Decimal::new(600, 2),
            moveout: Decimal::new(800, 2),
        }
    }
}

/// Rate configuration stored under the `pricing` key of the settings snapshot.
///
/// Both rate shapes are kept so switching `mode` never loses the other
/// shape's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateConfig {
    pub mode: PricingMode,
    pub hourly_rate: Decimal,
    pub area_rates: AreaRates,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            mode: PricingMode::Hourly,
            hourly_rate: Decimal::from(25),
            area_rates: AreaRates::default(),
        }
    }
}
