use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use quote_core::{PricingMode, ServiceTier, TemplateField, TemplateList};
use rust_decimal::Decimal;

use crate::utils::{parse_position, parse_rate};

// ─── top level ───────────────────────────────────────────────────────────────

/// Cleaning-services quote calculator.
///
/// Computes recurring cleaning bills, exports proposals and service
/// agreements, and manages the company settings and document templates.
#[derive(Debug, Parser)]
#[command(name = "cleaning-quote", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings storage backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Storage connection string. For SQLite a file path or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log filter, e.g. `debug` or `quote_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prepare a quote for one client.
    Quote(QuoteArgs),

    /// Quote every row of a CSV file.
    Batch(BatchArgs),

    /// Show or change company and pricing settings.
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Show or edit the proposal and agreement templates.
    #[command(subcommand)]
    Templates(TemplatesCommand),
}

// ─── quote ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Args)]
pub struct QuoteArgs {
    /// Client name. Required.
    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Client email address.
    #[arg(long = "client-email")]
    pub client_email: Option<String>,

    /// Pricing mode for this quote. Defaults to the saved mode.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Number of staff members (hourly mode).
    #[arg(long)]
    pub people: Option<String>,

    /// Hours per person per visit (hourly mode).
    #[arg(long)]
    pub hours: Option<String>,

    /// Visits per week (hourly mode).
    #[arg(long)]
    pub times: Option<String>,

    /// Floor area in m² (area mode).
    #[arg(long)]
    pub area: Option<String>,

    /// Service tier (area mode).
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,

    /// Payment terms. Defaults to the company's billing terms.
    #[arg(long)]
    pub terms: Option<String>,

    /// Export the proposal.
    #[arg(long)]
    pub proposal: bool,

    /// Export the service agreement.
    #[arg(long)]
    pub agreement: bool,

    /// Export HTML instead of PDF.
    #[arg(long)]
    pub html: bool,

    /// Directory for exported files. Defaults to the configured one.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Email the proposal to this address.
    #[arg(long)]
    pub send_to: Option<String>,

    /// Never prompt; missing values are left empty.
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV with columns client_name, address, people, hours_per_person,
    /// times_per_week, area, tier, payment_terms.
    #[arg(short, long)]
    pub file: PathBuf,
}

// ─── settings ────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings.
    Show,

    /// Update company details. Only the given fields change.
    Company(CompanyArgs),

    /// Update pricing. Only the given values change.
    Pricing(PricingArgs),
}

#[derive(Debug, Default, Args)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// "Doing business as" name.
    #[arg(long)]
    pub dba: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub logo_url: Option<String>,

    /// Default payment terms for new quotes.
    #[arg(long)]
    pub billing_terms: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct PricingArgs {
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long, value_parser = parse_rate)]
    pub hourly_rate: Option<Decimal>,

    /// Price per m² for basic cleaning.
    #[arg(long, value_parser = parse_rate)]
    pub basic: Option<Decimal>,

    /// Price per m² for deep cleaning.
    #[arg(long, value_parser = parse_rate)]
    pub deep: Option<Decimal>,

    /// Price per m² for move-out cleaning.
    #[arg(long, value_parser = parse_rate)]
    pub moveout: Option<Decimal>,
}

// ─── templates ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// Print the templates, or one list.
    Show {
        #[arg(long, value_enum)]
        list: Option<ListArg>,
    },

    /// Add an entry to a list (at the end unless --at is given).
    Add {
        #[arg(value_enum)]
        list: ListArg,
        text: String,
        #[arg(long, value_parser = parse_position)]
        at: Option<usize>,
    },

    /// Replace the entry at a position (1-based).
    Edit {
        #[arg(value_enum)]
        list: ListArg,
        #[arg(value_parser = parse_position)]
        position: usize,
        text: String,
    },

    /// Remove the entry at a position (1-based).
    Remove {
        #[arg(value_enum)]
        list: ListArg,
        #[arg(value_parser = parse_position)]
        position: usize,
    },

    /// Replace a narrative text field.
    Text {
        #[arg(value_enum)]
        field: FieldArg,
        value: String,
    },

    /// Add an extra service to the price list.
    ExtraAdd {
        label: String,
        price: String,
        #[arg(long, value_parser = parse_position)]
        at: Option<usize>,
    },

    /// Replace the extra service at a position (1-based).
    ExtraEdit {
        #[arg(value_parser = parse_position)]
        position: usize,
        label: String,
        price: String,
    },

    /// Remove the extra service at a position (1-based).
    ExtraRemove {
        #[arg(value_parser = parse_position)]
        position: usize,
    },
}

// ─── value enums ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Hourly,
    Area,
}

impl From<ModeArg> for PricingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Hourly => PricingMode::Hourly,
            ModeArg::Area => PricingMode::Area,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Basic,
    Deep,
    Moveout,
}

impl From<TierArg> for ServiceTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Basic => ServiceTier::Basic,
            TierArg::Deep => ServiceTier::Deep,
            TierArg::Moveout => ServiceTier::MoveOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListArg {
    WeeklyTasks,
    MonthlyTasks,
    ContractorResponsibilities,
    CustomerResponsibilities,
}

impl From<ListArg> for TemplateList {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::WeeklyTasks => TemplateList::WeeklyTasks,
            ListArg::MonthlyTasks => TemplateList::MonthlyTasks,
            ListArg::ContractorResponsibilities => TemplateList::ContractorResponsibilities,
            ListArg::CustomerResponsibilities => TemplateList::CustomerResponsibilities,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    ProposalTitle,
    ContractorName,
    ProposalFooter,
    AgreementTitle,
    InsuranceText,
    PeriodText,
    ChangesText,
    InvoiceNote,
    ThirdPartyNote,
    SignaturesNote,
    PricesValidDays,
    CopyrightText,
    FooterDisclaimer,
}

impl From<FieldArg> for TemplateField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::ProposalTitle => TemplateField::ProposalTitle,
            FieldArg::ContractorName => TemplateField::ContractorName,
            FieldArg::ProposalFooter => TemplateField::ProposalFooter,
            FieldArg::AgreementTitle => TemplateField::AgreementTitle,
            FieldArg::InsuranceText => TemplateField::InsuranceText,
            FieldArg::PeriodText => TemplateField::PeriodText,
            FieldArg::ChangesText => TemplateField::ChangesText,
            FieldArg::InvoiceNote => TemplateField::InvoiceNote,
            FieldArg::ThirdPartyNote => TemplateField::ThirdPartyNote,
            FieldArg::SignaturesNote => TemplateField::SignaturesNote,
            FieldArg::PricesValidDays => TemplateField::PricesValidDays,
            FieldArg::CopyrightText => TemplateField::CopyrightText,
            FieldArg::FooterDisclaimer => TemplateField::FooterDisclaimer,
        }
    }
}
