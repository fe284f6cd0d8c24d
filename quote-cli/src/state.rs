//! The two-step quote wizard.
//!
//! Step 1 collects the client, step 2 the quantities for the active pricing
//! mode and the payment terms. Quantities are kept as typed and only coerced
//! when the quote is computed, so an unfinished field never blocks the user.

use quote_core::calculations::{QuoteCalculator, has_sufficient_input};
use quote_core::{
    AreaInputs, ClientInfo, PricingMode, QuoteInputs, QuoteRequest, QuoteResult, RateConfig,
    ServiceTier, Settings, StaffingInputs,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Client,
    Details,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("client name is required")]
    MissingClientName,
}

#[derive(Debug, Clone)]
pub struct QuoteSession {
    pub step: WizardStep,
    pub mode: PricingMode,
    pub client: ClientInfo,

    // Hourly mode
    pub people: String,
    pub hours_per_person: String,
    pub times_per_week: String,

    // Area mode
    pub area: String,
    pub tier: ServiceTier,

    pub payment_terms: String,
}

impl QuoteSession {
    /// A fresh session in the configured mode, with the company's default
    /// payment terms filled in.
    pub fn new(settings: &Settings) -> Self {
        Self {
            step: WizardStep::Client,
            mode: settings.pricing.mode,
            client: ClientInfo::default(),
            people: String::new(),
            hours_per_person: String::new(),
            times_per_week: String::new(),
            area: String::new(),
            tier: ServiceTier::Basic,
            payment_terms: settings.company.billing_terms.clone(),
        }
    }

    /// Moves from client details to quantities. Refused while the client
    /// name is blank.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        if self.step == WizardStep::Client && !self.client.has_name() {
            return Err(WizardError::MissingClientName);
        }
        self.step = WizardStep::Details;
        Ok(())
    }

    /// Returns to client details. Entered quantities are kept.
    pub fn back(&mut self) {
        self.step = WizardStep::Client;
    }

    pub fn inputs(&self) -> QuoteInputs {
        match self.mode {
            PricingMode::Hourly => QuoteInputs::Hourly(StaffingInputs::from_text(
                &self.people,
                &self.hours_per_person,
                &self.times_per_week,
            )),
            PricingMode::Area => QuoteInputs::Area(AreaInputs::from_text(&self.area, self.tier)),
        }
    }

    pub fn request(&self) -> QuoteRequest {
        QuoteRequest {
            client: self.client.clone(),
            inputs: self.inputs(),
            payment_terms: self.payment_terms.trim().to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.step == WizardStep::Details && has_sufficient_input(&self.inputs())
    }

    pub fn quote(
        &self,
        rates: &RateConfig,
    ) -> QuoteResult {
        QuoteCalculator::new(rates).calculate(&self.inputs())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn new_session_starts_at_client_step_with_default_terms() {
        let session = QuoteSession::new(&settings());

        assert_eq!(session.step, WizardStep::Client);
        assert_eq!(session.mode, PricingMode::Hourly);
        assert_eq!(session.payment_terms, "Due upon receipt");
    }

    #[test]
    fn advance_requires_client_name() {
        let mut session = QuoteSession::new(&settings());
        session.client.name = "   ".to_string();

        assert_eq!(session.advance(), Err(WizardError::MissingClientName));
        assert_eq!(session.step, WizardStep::Client);

        session.client.name = "Acme".to_string();
        assert_eq!(session.advance(), Ok(()));
        assert_eq!(session.step, WizardStep::Details);
    }

    #[test]
    fn back_keeps_entered_quantities() {
        let mut session = QuoteSession::new(&settings());
        session.client.name = "Acme".to_string();
        session.advance().unwrap();
        session.people = "3".to_string();
        session.back();

        assert_eq!(session.step, WizardStep::Client);
        assert_eq!(session.people, "3");
    }

    #[test]
    fn hourly_quote_from_typed_text() {
        let mut session = QuoteSession::new(&settings());
        session.client.name = "Acme".to_string();
        session.advance().unwrap();
        session.people = "3".to_string();
        session.hours_per_person = "4".to_string();
        session.times_per_week = "2".to_string();

        let result = session.quote(&settings().pricing);

        assert!(session.is_ready());
        assert_eq!(result.total_hours_per_week, dec!(24));
        assert_eq!(result.total_bill.round_dp(2), dec!(2600.00));
    }

    #[test]
    fn area_mode_uses_area_and_tier_only() {
        let mut session = QuoteSession::new(&settings());
        session.mode = PricingMode::Area;
        session.client.name = "Acme".to_string();
        session.advance().unwrap();
        session.people = "9".to_string();
        session.area = "75".to_string();
        session.tier = ServiceTier::Deep;

        assert_eq!(
            session.inputs(),
            QuoteInputs::Area(AreaInputs {
                area: dec!(75),
                tier: ServiceTier::Deep
            })
        );
        assert_eq!(session.quote(&settings().pricing).total_bill, dec!(450.00));
    }

    #[test]
    fn incomplete_quantities_are_not_ready() {
        let mut session = QuoteSession::new(&settings());
        session.client.name = "Acme".to_string();
        session.advance().unwrap();
        session.people = "3".to_string();
        session.hours_per_person = "abc".to_string();
        session.times_per_week = "2".to_string();

        assert!(!session.is_ready());
        assert!(!session.quote(&settings().pricing).sufficient_input);
    }
}
