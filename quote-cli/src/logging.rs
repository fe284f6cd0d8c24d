//! Log output for the `cleaning-quote` binary.
//!
//! Two layers share one level filter. The console layer writes short
//! `LEVEL message` lines to stderr and can be silenced with `--quiet`. The
//! file layer stays idle until `--log-file` points it at a file, then writes
//! timestamped lines with the emitting module.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, filter};

const DEFAULT_DIRECTIVE: &str = "info";

static CONSOLE_ENABLED: AtomicBool = AtomicBool::new(true);
static LOG_FILE: OnceLock<Arc<Mutex<Option<File>>>> = OnceLock::new();

// --- Line format ---

/// `[timestamp] LEVEL [target:] message fields`.
struct QuoteFmt {
    detailed: bool,
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for QuoteFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();

        if self.detailed {
            write!(writer, "{} ", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))?;
        }
        if writer.has_ansi_escapes() {
            write!(writer, "{}{level:>5}\x1b[0m ", level_color(level))?;
        } else {
            write!(writer, "{level:>5} ")?;
        }
        if self.detailed {
            write!(writer, "{}: ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Log file ---

/// Writer over the shared log file handle; discards output while unset.
#[derive(Clone)]
struct LogFile(Arc<Mutex<Option<File>>>);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over the default.
fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))),
    }
}

// --- Public API ---

/// Shows or hides console log lines. File logging is unaffected.
pub fn set_console_enabled(enabled: bool) {
    CONSOLE_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Appends log output to `path` from now on, replacing any previous file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    let Some(slot) = LOG_FILE.get() else {
        bail!("logging not yet initialized");
    };
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Only the first call takes effect.
///
/// The level is `level` if given, else `RUST_LOG`, else `info`. An invalid
/// `level` is an error.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = make_filter(level)?;
    let slot = LOG_FILE.get_or_init(|| Arc::new(Mutex::new(None))).clone();

    let console = tracing_subscriber::fmt::layer()
        .event_format(QuoteFmt { detailed: false })
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(filter::filter_fn(|_| {
            CONSOLE_ENABLED.load(Ordering::Relaxed)
        }));

    let file = tracing_subscriber::fmt::layer()
        .event_format(QuoteFmt { detailed: true })
        .with_ansi(false)
        .with_writer(LogFile(slot));

    if tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .is_err()
    {
        tracing::debug!("logging already initialized");
    }
    Ok(())
}
