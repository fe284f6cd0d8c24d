mod company;
mod pricing;
mod quote;
mod settings;
mod templates;

pub use company::{ClientInfo, CompanyProfile};
pub use pricing::{AreaRates, PricingMode, RateConfig, ServiceTier};
pub use quote::{AreaInputs, QuoteInputs, QuoteRequest, QuoteResult, StaffingInputs};
pub use settings::{
    AreaRatesPatch, CompanyPatch, RatePatch, SETTINGS_KEY, Settings, SettingsPatch,
};
pub use templates::{
    AgreementTemplate, ExtraService, ListEdit, ProposalTemplate, TemplateError, TemplateField,
    TemplateList,
};
