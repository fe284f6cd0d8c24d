//! The persisted settings aggregate and its partial-update patch.
//!
//! Loading never replaces defaults wholesale: a stored snapshot is read as a
//! [`SettingsPatch`] and overlaid on [`Settings::default`], so keys added
//! after a snapshot was written keep their hardcoded defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AgreementTemplate, CompanyProfile, PricingMode, ProposalTemplate, RateConfig, TemplateField,
    TemplateList,
};

/// Storage key of the settings snapshot.
pub const SETTINGS_KEY: &str = "cleaning-template-settings";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub company: CompanyProfile,
    pub pricing: RateConfig,
    pub proposal_template: ProposalTemplate,
    pub agreement_template: AgreementTemplate,
}

/// Field-wise override for [`CompanyProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub dba: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub billing_terms: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaRatesPatch {
    pub basic: Option<Decimal>,
    pub deep: Option<Decimal>,
    pub moveout: Option<Decimal>,
}

/// Field-wise override for [`RateConfig`]; `area_rates` merges one level deeper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatePatch {
    pub mode: Option<PricingMode>,
    pub hourly_rate: Option<Decimal>,
    pub area_rates: Option<AreaRatesPatch>,
}

/// Partial settings update.
///
/// `company` and `pricing` merge per field. The templates replace the
/// current template as a whole. The flat `company*`/`logoUrl`/`billingDate`/
/// `hourlyRate` keys are the layout of snapshots written before the
/// settings were nested; they are folded into `company` and `pricing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<RatePatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_template: Option<ProposalTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_template: Option<AgreementTemplate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(rename = "billingDate", skip_serializing_if = "Option::is_none")]
    pub billing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
}

fn overlay<T>(
    target: &mut T,
    value: Option<T>,
) {
    if let Some(value) = value {
        *target = value;
    }
}

impl CompanyProfile {
    pub fn apply(
        &mut self,
        patch: CompanyPatch,
    ) {
        overlay(&mut self.name, patch.name);
        overlay(&mut self.dba, patch.dba);
        overlay(&mut self.address, patch.address);
        overlay(&mut self.phone, patch.phone);
        overlay(&mut self.email, patch.email);
        overlay(&mut self.logo_url, patch.logo_url);
        overlay(&mut self.billing_terms, patch.billing_terms);
    }
}

impl RateConfig {
    pub fn apply(
        &mut self,
        patch: RatePatch,
    ) {
        overlay(&mut self.mode, patch.mode);
        overlay(&mut self.hourly_rate, patch.hourly_rate);
        if let Some(rates) = patch.area_rates {
            overlay(&mut self.area_rates.basic, rates.basic);
            overlay(&mut self.area_rates.deep, rates.deep);
            overlay(&mut self.area_rates.moveout, rates.moveout);
        }
    }
}

impl Settings {
    /// Builds settings from the hardcoded defaults with `patch` overlaid.
    pub fn from_patch(patch: SettingsPatch) -> Self {
        let mut settings = Self::default();
        settings.apply(patch);
        settings
    }

    /// Merges `patch` into these settings.
    ///
    /// Legacy flat keys are applied first so an explicit nested value in the
    /// same patch wins.
    pub fn apply(
        &mut self,
        patch: SettingsPatch,
    ) {
        overlay(&mut self.company.name, patch.company_name);
        overlay(&mut self.company.address, patch.company_address);
        overlay(&mut self.company.phone, patch.company_phone);
        overlay(&mut self.company.email, patch.company_email);
        overlay(&mut self.company.logo_url, patch.logo_url);
        overlay(&mut self.company.billing_terms, patch.billing_date);
        overlay(&mut self.pricing.hourly_rate, patch.hourly_rate);

        if let Some(company) = patch.company {
            self.company.apply(company);
        }
        if let Some(pricing) = patch.pricing {
            self.pricing.apply(pricing);
        }
        overlay(&mut self.proposal_template, patch.proposal_template);
        overlay(&mut self.agreement_template, patch.agreement_template);
    }

    pub fn list(
        &self,
        list: TemplateList,
    ) -> &[String] {
        match list {
            TemplateList::WeeklyTasks => &self.proposal_template.weekly_tasks,
            TemplateList::MonthlyTasks => &self.proposal_template.monthly_tasks,
            TemplateList::ContractorResponsibilities => {
                &self.agreement_template.contractor_responsibilities
            }
            TemplateList::CustomerResponsibilities => {
                &self.agreement_template.customer_responsibilities
            }
        }
    }

    pub fn list_mut(
        &mut self,
        list: TemplateList,
    ) -> &mut Vec<String> {
        match list {
            TemplateList::WeeklyTasks => &mut self.proposal_template.weekly_tasks,
            TemplateList::MonthlyTasks => &mut self.proposal_template.monthly_tasks,
            TemplateList::ContractorResponsibilities => {
                &mut self.agreement_template.contractor_responsibilities
            }
            TemplateList::CustomerResponsibilities => {
                &mut self.agreement_template.customer_responsibilities
            }
        }
    }

    pub fn text_field(
        &self,
        field: TemplateField,
    ) -> &str {
        let proposal = &self.proposal_template;
        let agreement = &self.agreement_template;
        match field {
            TemplateField::ProposalTitle => &proposal.title,
            TemplateField::ContractorName => &proposal.contractor_name,
            TemplateField::ProposalFooter => &proposal.footer_text,
            TemplateField::AgreementTitle => &agreement.title,
            TemplateField::InsuranceText => &agreement.insurance_text,
            TemplateField::PeriodText => &agreement.period_text,
            TemplateField::ChangesText => &agreement.changes_text,
            TemplateField::InvoiceNote => &agreement.invoice_note,
            TemplateField::ThirdPartyNote => &agreement.third_party_note,
            TemplateField::SignaturesNote => &agreement.signatures_note,
            TemplateField::PricesValidDays => &agreement.prices_valid_days,
            TemplateField::CopyrightText => &agreement.copyright_text,
            TemplateField::FooterDisclaimer => &agreement.footer_disclaimer,
        }
    }

    pub fn text_field_mut(
        &mut self,
        field: TemplateField,
    ) -> &mut String {
        let proposal = &mut self.proposal_template;
        let agreement = &mut self.agreement_template;
        match field {
            TemplateField::ProposalTitle => &mut proposal.title,
            TemplateField::ContractorName => &mut proposal.contractor_name,
            TemplateField::ProposalFooter => &mut proposal.footer_text,
            TemplateField::AgreementTitle => &mut agreement.title,
            TemplateField::InsuranceText => &mut agreement.insurance_text,
            TemplateField::PeriodText => &mut agreement.period_text,
            TemplateField::ChangesText => &mut agreement.changes_text,
            TemplateField::InvoiceNote => &mut agreement.invoice_note,
            TemplateField::ThirdPartyNote => &mut agreement.third_party_note,
            TemplateField::SignaturesNote => &mut agreement.signatures_note,
            TemplateField::PricesValidDays => &mut agreement.prices_valid_days,
            TemplateField::CopyrightText => &mut agreement.copyright_text,
            TemplateField::FooterDisclaimer => &mut agreement.footer_disclaimer,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn company_patch_only_overrides_given_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            company: Some(CompanyPatch {
                name: Some("Sparkle Ltd".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(settings.company.name, "Sparkle Ltd");
        assert_eq!(settings.company.phone, CompanyProfile::default().phone);
    }

    #[test]
    fn pricing_patch_merges_area_rates_one_level_deeper() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            pricing: Some(RatePatch {
                area_rates: Some(AreaRatesPatch {
                    deep: Some(dec!(6.75)),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(settings.pricing.area_rates.deep, dec!(6.75));
        assert_eq!(settings.pricing.area_rates.basic, dec!(3.50));
        assert_eq!(settings.pricing.hourly_rate, dec!(25));
        assert_eq!(settings.pricing.mode, PricingMode::Hourly);
    }

    #[test]
    fn template_patch_replaces_whole_template() {
        let replacement = ProposalTemplate {
            weekly_tasks: vec!["Only task".to_string()],
            ..Default::default()
        };
        let settings = Settings::from_patch(SettingsPatch {
            proposal_template: Some(replacement.clone()),
            ..Default::default()
        });

        assert_eq!(settings.proposal_template, replacement);
        assert_eq!(settings.agreement_template, AgreementTemplate::default());
    }

    #[test]
    fn legacy_flat_keys_fold_into_nested_settings() {
        let patch: SettingsPatch = serde_json::from_str(
            r#"{
                "companyName": "Old Co",
                "companyEmail": "old@example.com",
                "billingDate": "Net 30",
                "hourlyRate": 32.5
            }"#,
        )
        .unwrap();
        let settings = Settings::from_patch(patch);

        assert_eq!(settings.company.name, "Old Co");
        assert_eq!(settings.company.email, "old@example.com");
        assert_eq!(settings.company.billing_terms, "Net 30");
        assert_eq!(settings.pricing.hourly_rate, dec!(32.5));
    }

    #[test]
    fn nested_value_wins_over_legacy_key() {
        let patch: SettingsPatch = serde_json::from_str(
            r#"{ "hourlyRate": 20, "pricing": { "hourlyRate": "40" } }"#,
        )
        .unwrap();

        assert_eq!(Settings::from_patch(patch).pricing.hourly_rate, dec!(40));
    }

    #[test]
    fn text_field_mut_targets_matching_template() {
        let mut settings = Settings::default();
        *settings.text_field_mut(TemplateField::InsuranceText) = "Fully insured.".to_string();

        assert_eq!(settings.text_field(TemplateField::InsuranceText), "Fully insured.");
        assert_eq!(settings.agreement_template.insurance_text, "Fully insured.");
    }

    #[test]
    fn list_mut_targets_matching_template() {
        let mut settings = Settings::default();
        settings
            .list_mut(TemplateList::MonthlyTasks)
            .push("Polish brass.".to_string());

        assert_eq!(
            settings.list(TemplateList::MonthlyTasks).last().map(String::as_str),
            Some("Polish brass.")
        );
    }
}
