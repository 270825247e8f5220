//! Subscriber setup for the command-line tools.
//!
//! Log records go to stderr so reports printed on stdout stay clean, and
//! optionally to a file chosen after start-up.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, reload};

const DEFAULT_FILTER: &str = "info";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Writes `text` wrapped in `color` when the writer accepts escapes.
fn styled(
    writer: &mut Writer<'_>,
    color: &str,
    text: impl std::fmt::Display,
) -> std::fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{color}{text}{RESET} ")
    } else {
        write!(writer, "{text} ")
    }
}

/// `timestamp LEVEL file:line fields`.
struct CliFormat;

impl<S, N> FormatEvent<S, N> for CliFormat
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

        styled(&mut writer, DIM, Local::now().format(TIME_FORMAT))?;
        styled(
            &mut writer,
            level_color(meta.level()),
            format_args!("{:>5}", meta.level()),
        )?;
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            styled(&mut writer, CYAN, format_args!("{}:{line}", short_path(file)))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `tax-states/src/states/ohio.rs` → `states/ohio.rs`.
fn short_path(file: &str) -> &str {
    let file = match file.rfind("src/").or_else(|| file.rfind("src\\")) {
        Some(index) => &file[index..],
        None => file,
    };
    file.strip_prefix("src/")
        .or_else(|| file.strip_prefix("src\\"))
        .unwrap_or(file)
}

type SharedFile = Arc<Mutex<Option<File>>>;

/// Log file chosen after the subscriber is installed. Records written
/// before a file is set are dropped.
#[derive(Clone)]
struct LateFile(SharedFile);

struct LateFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LateFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LateFile {
    type Writer = LateFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LateFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER: OnceLock<FilterHandle> = OnceLock::new();
static LOG_FILE: OnceLock<SharedFile> = OnceLock::new();

fn initial_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Replaces the active filter. `directive` is a bare level such as
/// `debug` or a full directive such as `info,tax_states=trace`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let handle = FILTER
        .get()
        .ok_or_else(|| anyhow!("logging has not been initialized"))?;
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;
    handle
        .reload(filter)
        .context("could not swap the log filter")
}

/// Also appends records to `path`, replacing any earlier log file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let shared = LOG_FILE
        .get()
        .ok_or_else(|| anyhow!("logging has not been initialized"))?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    shared
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(file);
    Ok(())
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// The filter starts from `RUST_LOG`, falling back to `info`. Stderr
/// output is colored only on a terminal. The file layer writes nothing
/// until [`enable_file_logging`] names a file.
pub fn init_default_logging() {
    let shared: SharedFile = Arc::new(Mutex::new(None));
    let (filter, handle) = reload::Layer::new(initial_filter());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CliFormat)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CliFormat)
                .with_ansi(false)
                .with_writer(LateFile(shared.clone())),
        )
        .try_init();

    if installed.is_ok() {
        let _ = FILTER.set(handle);
        let _ = LOG_FILE.set(shared);
    }
}
