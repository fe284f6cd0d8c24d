//! Command handlers behind the `cleaning-quote` binary.
//!
//! Handlers read and write through generic [`BufRead`]/[`Write`] handles so
//! the whole flow can be driven from tests with in-memory buffers.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use quote_core::calculations::QuoteCalculator;
use quote_core::calculations::common::{format_money, format_quantity};
use quote_core::documents::{
    Block, Document, DocumentContext, build_agreement, build_proposal, email_subject,
};
use quote_core::storage::{MemoryStoreFactory, StorageConfig, StoreRegistry};
use quote_core::{
    AreaRatesPatch, CompanyPatch, ExtraService, ListEdit, PricingMode, QuoteInputs, QuoteRequest,
    QuoteResult, RatePatch, ServiceTier, Settings, SettingsPatch, SettingsStore, TemplateField,
    TemplateList,
};
use quote_db_sqlite::{SqliteStoreFactory, ensure_parent_dir};
use quote_mail::{EmailDispatcher, EmailRequest, EmailTransport, HttpEmailTransport, SendOutcome};
use quote_render::{DocumentRenderer, HtmlRenderer, PdfRenderer};
use tracing::{debug, info};

use crate::cli::{
    BatchArgs, Cli, Command, CompanyArgs, PricingArgs, QuoteArgs, SettingsCommand, TemplatesCommand,
};
use crate::config::AppConfig;
use crate::csv_loader;
use crate::state::QuoteSession;

// ─── storage ─────────────────────────────────────────────────────────────────

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Plain SQLite file paths get their parent directory created first.
fn ensure_database_dir(config: &StorageConfig) -> Result<()> {
    if config.backend != "sqlite" {
        return Ok(());
    }
    ensure_parent_dir(&config.connection_string).with_context(|| {
        format!("Failed to create database directory for {}", config.connection_string)
    })
}

pub async fn open_settings(config: &StorageConfig) -> Result<SettingsStore> {
    ensure_database_dir(config)?;
    let store = build_registry()
        .create(config)
        .await
        .with_context(|| format!("Failed to open {} settings store", config.backend))?;
    Ok(SettingsStore::load(store).await)
}

// ─── console ─────────────────────────────────────────────────────────────────

/// Input and output for one command. When not interactive, prompts are
/// skipped and every field keeps the value it already has.
pub struct Console<R, W> {
    input: R,
    pub out: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        input: R,
        out: W,
        interactive: bool,
    ) -> Self {
        Self {
            input,
            out,
            interactive,
        }
    }

    /// Prompts once. `None` on end of input or when not interactive.
    fn ask(
        &mut self,
        label: &str,
        current: &str,
    ) -> Result<Option<String>> {
        if !self.interactive {
            return Ok(None);
        }
        if current.is_empty() {
            write!(self.out, "{label}: ")?;
        } else {
            write!(self.out, "{label} [{current}]: ")?;
        }
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Sets `slot` from a flag when given, otherwise prompts with the
    /// current value as default.
    fn fill(
        &mut self,
        slot: &mut String,
        given: Option<&str>,
        label: &str,
    ) -> Result<()> {
        if let Some(value) = given {
            *slot = value.to_string();
            return Ok(());
        }
        if let Some(answer) = self.ask(label, slot)?
            && !answer.is_empty()
        {
            *slot = answer;
        }
        Ok(())
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

pub async fn run(
    cli: Cli,
    config: &AppConfig,
) -> Result<()> {
    let storage = config.storage_config(cli.backend.as_deref(), cli.db.as_deref());
    debug!(backend = %storage.backend, connection = %storage.connection_string, "using settings store");
    let mut store = open_settings(&storage).await?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut console = Console::new(stdin.lock(), io::stdout().lock(), interactive);

    match cli.command {
        Command::Quote(args) => quote_command(&args, store.settings(), config, &mut console).await,
        Command::Batch(args) => batch_command(&args, store.settings(), &mut console.out),
        Command::Settings(command) => settings_command(command, &mut store, &mut console.out).await,
        Command::Templates(command) => {
            templates_command(command, &mut store, &mut console.out).await
        }
    }
}

// ─── quote ───────────────────────────────────────────────────────────────────

/// Runs both wizard steps, taking values from flags first and prompting for
/// the rest.
pub fn collect_quote<R: BufRead, W: Write>(
    args: &QuoteArgs,
    settings: &Settings,
    console: &mut Console<R, W>,
) -> Result<QuoteSession> {
    if args.no_input {
        console.interactive = false;
    }
    let mut session = QuoteSession::new(settings);
    if let Some(mode) = args.mode {
        session.mode = mode.into();
    }

    console.fill(&mut session.client.name, args.client.as_deref(), "Client name")?;
    console.fill(&mut session.client.address, args.address.as_deref(), "Address")?;
    console.fill(&mut session.client.phone, args.phone.as_deref(), "Phone")?;
    console.fill(&mut session.client.email, args.client_email.as_deref(), "Email")?;

    while let Err(e) = session.advance() {
        writeln!(console.out, "{e}")?;
        match console.ask("Client name", "")? {
            Some(name) => session.client.name = name,
            None => return Err(e.into()),
        }
    }

    match session.mode {
        PricingMode::Hourly => {
            console.fill(&mut session.people, args.people.as_deref(), "Staff members")?;
            console.fill(&mut session.hours_per_person, args.hours.as_deref(), "Hours per person")?;
            console.fill(&mut session.times_per_week, args.times.as_deref(), "Visits per week")?;
        }
        PricingMode::Area => {
            console.fill(&mut session.area, args.area.as_deref(), "Area (m²)")?;
            match args.tier {
                Some(tier) => session.tier = tier.into(),
                None => {
                    if let Some(answer) =
                        console.ask("Service tier (basic/deep/moveout)", session.tier.as_str())?
                        && !answer.is_empty()
                    {
                        match ServiceTier::parse(&answer) {
                            Some(tier) => session.tier = tier,
                            None => writeln!(
                                console.out,
                                "Unknown tier '{answer}', using {}",
                                session.tier.label()
                            )?,
                        }
                    }
                }
            }
        }
    }
    console.fill(&mut session.payment_terms, args.terms.as_deref(), "Payment terms")?;

    Ok(session)
}

/// A calculated quote with both documents built.
#[derive(Debug, Clone)]
pub struct PreparedQuote {
    pub request: QuoteRequest,
    pub result: QuoteResult,
    pub proposal: Document,
    pub agreement: Document,
}

impl PreparedQuote {
    pub fn new(
        session: &QuoteSession,
        settings: &Settings,
        as_of: NaiveDate,
    ) -> Self {
        let request = session.request();
        let result = session.quote(&settings.pricing);
        let ctx = DocumentContext {
            settings,
            request: &request,
            result: &result,
            as_of,
        };
        let proposal = build_proposal(&ctx);
        let agreement = build_agreement(&ctx);
        Self {
            request,
            result,
            proposal,
            agreement,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.sufficient_input
    }
}

/// Prints the quote card, or the prompt for missing details.
pub fn write_summary<W: Write>(
    out: &mut W,
    quote: &PreparedQuote,
) -> Result<()> {
    if !quote.is_complete() {
        writeln!(out, "Enter details above to see your quote")?;
        return Ok(());
    }

    writeln!(out, "Quote for {}", quote.request.client.name.trim())?;
    let Some(summary) = quote.proposal.section("Quote Summary") else {
        return Ok(());
    };
    for block in &summary.blocks {
        match block {
            Block::Facts { rows } => {
                for row in rows {
                    writeln!(out, "  {:<20} {}", row.label, row.value)?;
                }
            }
            Block::Highlight { label, value } => writeln!(out, "  {label:<20} {value}")?,
            Block::Paragraph { text } => writeln!(out, "  {text}")?,
            _ => {}
        }
    }
    Ok(())
}

/// Renders the requested documents into `dir`, returning the written paths.
pub fn export_documents(
    quote: &PreparedQuote,
    args: &QuoteArgs,
    renderer: &dyn DocumentRenderer,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    if args.proposal {
        documents.push(&quote.proposal);
    }
    if args.agreement {
        documents.push(&quote.agreement);
    }

    documents
        .into_iter()
        .map(|document| -> Result<PathBuf> {
            let artifact = renderer
                .render(document)
                .with_context(|| format!("Failed to render {}", document.heading))?;
            Ok(artifact.write_to(dir)?)
        })
        .collect()
}

/// Emails the proposal as HTML. A failed send becomes an error carrying the
/// message to show.
pub async fn send_proposal<T: EmailTransport>(
    dispatcher: &EmailDispatcher<T>,
    recipient: &str,
    quote: &PreparedQuote,
) -> Result<()> {
    let html = HtmlRenderer::new()?.render_string(&quote.proposal)?;
    let subject = email_subject(&quote.request.inputs, &quote.result);
    let request = EmailRequest::new(recipient.trim(), subject, html);

    match dispatcher.dispatch(&request).await {
        SendOutcome::Sent => Ok(()),
        SendOutcome::Failed { message } => Err(anyhow!("Failed to send: {message}")),
    }
}

async fn quote_command<R: BufRead, W: Write>(
    args: &QuoteArgs,
    settings: &Settings,
    config: &AppConfig,
    console: &mut Console<R, W>,
) -> Result<()> {
    let session = collect_quote(args, settings, console)?;
    let quote = PreparedQuote::new(&session, settings, Local::now().date_naive());
    write_summary(&mut console.out, &quote)?;

    let wants_output = args.proposal || args.agreement || args.send_to.is_some();
    if !quote.is_complete() {
        if wants_output {
            bail!("The quote is incomplete; nothing was exported or sent");
        }
        return Ok(());
    }

    if args.proposal || args.agreement {
        let dir = args.out_dir.as_deref().unwrap_or(&config.output.directory);
        let renderer: Box<dyn DocumentRenderer> = if args.html {
            Box::new(HtmlRenderer::new()?)
        } else {
            Box::new(PdfRenderer::with_binary(&config.output.typst_binary)?)
        };
        for path in export_documents(&quote, args, renderer.as_ref(), dir)? {
            writeln!(console.out, "Saved {}", path.display())?;
        }
    }

    if let Some(recipient) = &args.send_to {
        let endpoint = config.email.endpoint.as_deref().ok_or_else(|| {
            anyhow!("No email endpoint configured; set [email] endpoint in the config file")
        })?;
        let transport = HttpEmailTransport::from_env(endpoint, &config.email.api_key_env);
        let dispatcher = EmailDispatcher::new(transport);
        send_proposal(&dispatcher, recipient, &quote).await?;
        writeln!(console.out, "Email sent! Proposal sent to {}", recipient.trim())?;
    }
    Ok(())
}

// ─── batch ───────────────────────────────────────────────────────────────────

fn describe_inputs(inputs: &QuoteInputs) -> String {
    match inputs {
        QuoteInputs::Hourly(staffing) => format!(
            "{} staff x {} h x {}/week",
            format_quantity(staffing.people),
            format_quantity(staffing.hours_per_person),
            format_quantity(staffing.times_per_week)
        ),
        QuoteInputs::Area(area) => {
            format!("{} {} m²", area.tier.label(), format_quantity(area.area))
        }
    }
}

pub fn batch_command<W: Write>(
    args: &BatchArgs,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let requests = csv_loader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let calculator = QuoteCalculator::new(&settings.pricing);

    let mut complete = 0;
    for (idx, request) in requests.iter().enumerate() {
        let result = calculator.calculate(&request.inputs);
        let total = if result.sufficient_input {
            complete += 1;
            format_money(result.total_bill)
        } else {
            "incomplete".to_string()
        };
        writeln!(
            out,
            "{:>3}. {:<24} {:<30} {}",
            idx + 1,
            request.client.name,
            describe_inputs(&request.inputs),
            total
        )?;
    }
    info!(rows = requests.len(), complete, "batch quoted");
    writeln!(out, "{complete} of {} quotes complete", requests.len())?;
    Ok(())
}

// ─── settings ────────────────────────────────────────────────────────────────

pub async fn settings_command<W: Write>(
    command: SettingsCommand,
    store: &mut SettingsStore,
    out: &mut W,
) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let text = toml::to_string_pretty(store.settings())
                .context("Failed to format settings")?;
            write!(out, "{text}")?;
        }
        SettingsCommand::Company(args) => {
            let patch = company_patch(args);
            if patch == CompanyPatch::default() {
                writeln!(out, "Nothing to update")?;
                return Ok(());
            }
            store
                .update(SettingsPatch {
                    company: Some(patch),
                    ..Default::default()
                })
                .await
                .context("Failed to save settings")?;
            writeln!(out, "Company details saved")?;
        }
        SettingsCommand::Pricing(args) => {
            let patch = rate_patch(args);
            if patch == RatePatch::default() {
                writeln!(out, "Nothing to update")?;
                return Ok(());
            }
            store
                .update_pricing(patch)
                .await
                .context("Failed to save settings")?;
            writeln!(out, "Pricing saved")?;
        }
    }
    Ok(())
}

fn company_patch(args: CompanyArgs) -> CompanyPatch {
    CompanyPatch {
        name: args.name,
        dba: args.dba,
        address: args.address,
        phone: args.phone,
        email: args.email,
        logo_url: args.logo_url,
        billing_terms: args.billing_terms,
    }
}

fn rate_patch(args: PricingArgs) -> RatePatch {
    let area_rates = AreaRatesPatch {
        basic: args.basic,
        deep: args.deep,
        moveout: args.moveout,
    };
    RatePatch {
        mode: args.mode.map(Into::into),
        hourly_rate: args.hourly_rate,
        area_rates: (area_rates != AreaRatesPatch::default()).then_some(area_rates),
    }
}

// ─── templates ───────────────────────────────────────────────────────────────

fn write_list<W: Write>(
    out: &mut W,
    settings: &Settings,
    list: TemplateList,
) -> Result<()> {
    writeln!(out, "{}:", list.as_str())?;
    for (idx, item) in settings.list(list).iter().enumerate() {
        writeln!(out, "  {}. {item}", idx + 1)?;
    }
    Ok(())
}

fn write_templates<W: Write>(
    out: &mut W,
    settings: &Settings,
) -> Result<()> {
    for field in TemplateField::ALL {
        writeln!(out, "{}: {}", field.as_str(), settings.text_field(field))?;
    }
    for list in TemplateList::ALL {
        write_list(out, settings, list)?;
    }
    writeln!(out, "extra_services:")?;
    for (idx, extra) in settings.agreement_template.extra_services.iter().enumerate() {
        writeln!(out, "  {}. {}: {}", idx + 1, extra.label, extra.price)?;
    }
    Ok(())
}

pub async fn templates_command<W: Write>(
    command: TemplatesCommand,
    store: &mut SettingsStore,
    out: &mut W,
) -> Result<()> {
    let saved = match command {
        TemplatesCommand::Show { list } => {
            match list {
                Some(list) => write_list(out, store.settings(), list.into())?,
                None => write_templates(out, store.settings())?,
            }
            return Ok(());
        }
        TemplatesCommand::Add { list, text, at } => {
            let edit = match at {
                Some(index) => ListEdit::Insert { index, item: text },
                None => ListEdit::Push(text),
            };
            store.edit_list(list.into(), edit).await
        }
        TemplatesCommand::Edit {
            list,
            position,
            text,
        } => {
            store
                .edit_list(
                    list.into(),
                    ListEdit::Update {
                        index: position,
                        item: text,
                    },
                )
                .await
        }
        TemplatesCommand::Remove { list, position } => {
            store.edit_list(list.into(), ListEdit::Remove(position)).await
        }
        TemplatesCommand::Text { field, value } => store.set_text(field.into(), value).await,
        TemplatesCommand::ExtraAdd { label, price, at } => {
            let item = ExtraService::new(label, price);
            let edit = match at {
                Some(index) => ListEdit::Insert { index, item },
                None => ListEdit::Push(item),
            };
            store.edit_extra_services(edit).await
        }
        TemplatesCommand::ExtraEdit {
            position,
            label,
            price,
        } => {
            store
                .edit_extra_services(ListEdit::Update {
                    index: position,
                    item: ExtraService::new(label, price),
                })
                .await
        }
        TemplatesCommand::ExtraRemove { position } => {
            store
                .edit_extra_services(ListEdit::Remove(position))
                .await
        }
    };
    saved.context("Failed to update templates")?;
    writeln!(out, "Template saved")?;
    Ok(())
}
