use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use miette::IntoDiagnostic;

use imgconv::{Format, Session, Severity};

#[derive(Parser, Debug)]
#[command(name = "imgconv")]
#[command(version, about = "Convert an image to another raster format")]
struct Args {
    /// Image to convert. When several are given, only the first supported
    /// image is converted
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Target format (PNG, JPEG, JPG, BMP, ICO, TIFF, WEBP)
    #[arg(short, long, required_unless_present = "list")]
    to: Option<String>,

    /// Output path without extension (defaults to the input path without its extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the formats the selected image can be converted to
    #[arg(long)]
    list: bool,

    /// Log level (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<LogLevel>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn setup_logging(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn list_targets(session: &Session) -> miette::Result<()> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for format in session.enabled_targets() {
        writeln!(writer, "{format}").into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}

fn default_base(source: &Path) -> PathBuf {
    source.with_extension("")
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    setup_logging(args.log_level);

    let mut session = Session::new();
    let source = session.select(&args.files).into_diagnostic()?.to_path_buf();

    if args.list {
        return list_targets(&session);
    }

    let target = args.to.ok_or_else(|| {
        miette::miette!(
            "No target format specified. Use --to with one of: {}",
            Format::ALL.map(Format::name).join(", ")
        )
    })?;
    let base = args.output.unwrap_or_else(|| default_base(&source));

    let outcome = session.convert(&target, &base);
    match outcome.severity {
        Severity::Info => {
            let written = outcome.output.as_deref().unwrap_or(&base);
            println!("{}: {} ({})", outcome.title, outcome.message, written.display());
            Ok(())
        }
        Severity::Warning => Err(miette::miette!(
            severity = miette::Severity::Warning,
            "{}: {}",
            outcome.title,
            outcome.message
        )),
        Severity::Error => Err(miette::miette!("{}: {}", outcome.title, outcome.message)),
    }
}
