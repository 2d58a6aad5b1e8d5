//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use toponymy_core::pipeline::{ExtractSummary, ProgressReporter, run_extract, scan_entries};
use toponymy_core::source::source_for;
use toponymy_segment::HeadingRule;
use toponymy_shared::{
    AppConfig, ExtractConfig, ReportFormat, config_file_path, init_config, load_config,
    load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// toponymy: find keyword paragraphs in scanned dictionary text.
#[derive(Parser)]
#[command(
    name = "toponymy",
    version,
    about = "Segment extracted dictionary text into entries and report keyword paragraphs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.toponymy/toponymy.toml).
    #[arg(long, global = true, env = "TOPONYMY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Report format flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract keyword paragraphs from a text file and write the report.
    Extract {
        /// Extracted document text, or `-` for stdin.
        input: String,

        /// Keyword to search for (repeatable or comma-separated).
        #[arg(short, long = "keyword", value_delimiter = ',')]
        keywords: Vec<String>,

        /// Report output path.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Report format.
        #[arg(short, long)]
        format: Option<FormatArg>,

        /// Uppercase letters accepted in headings besides A-Z.
        #[arg(long)]
        uppercase_extra: Option<String>,

        /// Minimum heading token length (letters and hyphens).
        #[arg(long)]
        min_heading_len: Option<usize>,
    },

    /// List the entries found in a text file.
    Entries {
        /// Extracted document text, or `-` for stdin.
        input: String,

        /// Uppercase letters accepted in headings besides A-Z.
        #[arg(long)]
        uppercase_extra: Option<String>,

        /// Minimum heading token length (letters and hyphens).
        #[arg(long)]
        min_heading_len: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "toponymy=info",
        1 => "toponymy=debug",
        _ => "toponymy=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays clean for summaries and listings.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Extract {
            input,
            keywords,
            out,
            format,
            uppercase_extra,
            min_heading_len,
        } => {
            let overrides = ExtractOverrides {
                keywords,
                out,
                format: format.map(Into::into),
                uppercase_extra,
                min_heading_len,
            };
            cmd_extract(config_path, &input, overrides)
        }
        Command::Entries {
            input,
            uppercase_extra,
            min_heading_len,
        } => cmd_entries(config_path, &input, uppercase_extra, min_heading_len),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load config from `--config` if given, else the user config (or defaults).
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// CLI flags that override config file values.
#[derive(Debug, Default)]
struct ExtractOverrides {
    keywords: Vec<String>,
    out: Option<PathBuf>,
    format: Option<ReportFormat>,
    uppercase_extra: Option<String>,
    min_heading_len: Option<usize>,
}

/// Merge config file values with CLI overrides.
fn build_extract_config(config: &AppConfig, overrides: ExtractOverrides) -> ExtractConfig {
    let mut extract = ExtractConfig::from(config);
    if !overrides.keywords.is_empty() {
        extract.keywords = overrides.keywords;
    }
    if let Some(out) = overrides.out {
        extract.output = out;
    }
    if let Some(format) = overrides.format {
        extract.format = format;
    }
    if let Some(extra) = overrides.uppercase_extra {
        extract.extra_uppercase = extra;
    }
    if let Some(len) = overrides.min_heading_len {
        extract.min_token_len = len;
    }
    extract
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_extract(config_path: Option<&Path>, input: &str, overrides: ExtractOverrides) -> Result<()> {
    let config = resolve_config(config_path)?;
    let extract = build_extract_config(&config, overrides);

    info!(
        input,
        keywords = ?extract.keywords,
        format = %extract.format,
        "extracting keyword paragraphs"
    );

    let source = source_for(input);
    let reporter = CliProgress::new();
    let summary = run_extract(&extract, source.as_ref(), &reporter)?;

    // Print summary
    println!();
    println!(
        "  Found {} entries containing the keywords ({} scanned).",
        summary.matched_headings.len(),
        summary.entries_scanned
    );
    println!("  Paragraphs: {}", summary.paragraphs);
    println!("  Report:     {}", summary.output.display());
    println!("  Time:       {:.1}s", summary.elapsed.as_secs_f64());

    if !summary.matched_headings.is_empty() {
        println!();
        println!("  Entries:");
        for heading in &summary.matched_headings {
            println!("  - {heading}");
        }
    }
    println!();

    Ok(())
}

fn cmd_entries(
    config_path: Option<&Path>,
    input: &str,
    uppercase_extra: Option<String>,
    min_heading_len: Option<usize>,
) -> Result<()> {
    let mut headings = resolve_config(config_path)?.headings;
    if let Some(extra) = uppercase_extra {
        headings.extra_uppercase = extra;
    }
    if let Some(len) = min_heading_len {
        headings.min_token_len = len;
    }
    let rule = HeadingRule::new(&headings.extra_uppercase, headings.min_token_len)?;

    let text = source_for(input).read_text()?;
    let overview = scan_entries(&text, &rule);

    for entry in &overview {
        println!("{}\t{}", entry.heading, entry.paragraphs);
    }
    info!(entries = overview.len(), "listed entries");

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = config_file_path()?;
    if path.exists() {
        return Err(eyre!(
            "config file already exists at {}; edit it or remove it first",
            path.display()
        ));
    }

    let path = init_config()?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let rendered = toml::to_string_pretty(&config)?;

    match config_path {
        Some(p) => println!("# {}", p.display()),
        None => println!("# {}", config_file_path()?.display()),
    }
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _summary: &ExtractSummary) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
