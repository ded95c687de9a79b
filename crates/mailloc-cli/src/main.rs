use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use i18n_embed::fluent::{fluent_language_loader, FluentLanguageLoader};
use i18n_embed::DesktopLanguageRequester;
use rust_embed::RustEmbed;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod ui;

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

/// Fluent loader behind `tr!`; set once in `main`.
pub static LANG_LOADER: OnceLock<FluentLanguageLoader> = OnceLock::new();

fn init_i18n() -> Result<()> {
    let loader: FluentLanguageLoader = fluent_language_loader!();
    let requested = DesktopLanguageRequester::requested_languages();
    i18n_embed::select(&loader, &Localizations, &requested)?;
    // plain text on stderr; no bidi isolation marks around arguments
    loader.set_use_isolating(false);
    let _ = LANG_LOADER.set(loader);
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "mailloc-cli",
    version,
    about = "Compile a translations table into a multi-locale Liquid email template"
)]
struct Cli {
    /// Only log warnings and errors to the console
    #[arg(long, global = true)]
    quiet: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Options shared by `build` and `preview`. Unset options fall back to
/// mailloc.toml, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Theme name, loaded from <themes-dir>/<name>.liquid
    #[arg(long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub themes_dir: Option<PathBuf>,
    /// App download card preset: light or dark
    #[arg(long)]
    pub colour_preset: Option<String>,
    /// en-only, top-5 or global
    #[arg(long, conflicts_with = "include_locales")]
    pub locale_preset: Option<String>,
    /// Comma-separated locale codes; the default locale is always added
    #[arg(long)]
    pub include_locales: Option<String>,
    #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
    pub show_header_logo: Option<bool>,
    #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
    pub show_footer: Option<bool>,
    #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
    pub show_terms: Option<bool>,
    /// Which row wins when two rows set the same key and locale: last or first
    #[arg(long)]
    pub duplicates: Option<String>,
    /// JSON file with link overrides
    #[arg(long)]
    pub links: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a translations table into a Liquid template
    Build {
        table: PathBuf,
        /// Write the template here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        template: TemplateArgs,
        /// Build report format (written to stderr)
        #[arg(long, value_enum, default_value_t = Format::Text)]
        report: Format,
    },

    /// Render a static HTML preview for one locale
    Preview {
        table: PathBuf,
        #[arg(long)]
        locale: String,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        template: TemplateArgs,
    },

    /// Write a blank module-dialect sheet for the chosen modules
    InputTemplate {
        /// Comma-separated module names
        #[arg(long, required = true)]
        modules: String,
        #[arg(long, conflicts_with = "include_locales")]
        locale_preset: Option<String>,
        #[arg(long)]
        include_locales: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show which locale the template picks for a recipient
    Resolve {
        #[arg(long)]
        lang: String,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List supported locales in dispatch order
    Locales {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Dump JSON Schemas of the machine-readable reports
    Schema {
        #[arg(long, default_value = "./docs/assets/schemas")]
        out_dir: PathBuf,
    },
}

trait Runnable {
    fn run(self, use_color: bool) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, use_color: bool) -> Result<()> {
        let cmd_name = match &self {
            Commands::Build { .. } => "build",
            Commands::Preview { .. } => "preview",
            Commands::InputTemplate { .. } => "input-template",
            Commands::Resolve { .. } => "resolve",
            Commands::Locales { .. } => "locales",
            Commands::Schema { .. } => "schema",
        };
        info!(event = "command_start", command = cmd_name);
        debug!(event = "command_args", args = ?self);

        let result = match self {
            Commands::Build {
                table,
                out,
                template,
                report,
            } => commands::build::run_build(table, out, template, report, use_color),
            Commands::Preview {
                table,
                locale,
                out,
                template,
            } => commands::preview::run_preview(table, locale, out, template, use_color),
            Commands::InputTemplate {
                modules,
                locale_preset,
                include_locales,
                out,
            } => commands::input_template::run_input_template(
                modules,
                locale_preset,
                include_locales,
                out,
                use_color,
            ),
            Commands::Resolve {
                lang,
                country,
                format,
            } => commands::resolve::run_resolve(lang, country, format),
            Commands::Locales { format } => commands::resolve::run_locales(format, use_color),
            Commands::Schema { out_dir } => commands::schema::run_schema(out_dir, use_color),
        };

        match &result {
            Ok(_) => info!(event = "command_done", command = cmd_name),
            Err(e) => error!(event = "command_failed", command = cmd_name, error = %e),
        }
        result
    }
}

fn init_tracing(quiet: bool) -> WorkerGuard {
    let log_dir = std::env::var_os("MAILLOC_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = rolling::daily(log_dir, "mailloc.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_filter = if quiet {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);
    init_i18n()?;

    let use_color = !cli.no_color
        && std::io::stderr().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    cli.cmd.run(use_color)
}
