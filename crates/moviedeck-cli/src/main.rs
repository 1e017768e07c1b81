//! moviedeck - TMDB movie search, details and statistics CLI.

/// Application configuration (TOML).
mod config;
/// Text rendering of shaped records.
mod view;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::view::{Action, View, emit};
use moviedeck_api::tmdb::TmdbClient;
use moviedeck_core::{parse_limit, resolve_limit, service};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies by title, or list popular movies without a query.
    Search(SearchArgs),
    /// Show details for one movie.
    Detail(DetailArgs),
    /// Show statistics across popular, top-rated and upcoming movies.
    Stats,
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for; partial titles match. Lists popular movies if omitted.
    #[arg(long, short)]
    query: Option<String>,
    /// Number of results to show (falls back to the default when not a positive integer).
    #[arg(long, short, allow_hyphen_values = true)]
    limit: Option<String>,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// TMDB movie ID (e.g. 27205).
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the resolved config path and its effective contents.
    Show,
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Builds a `TmdbClient` from `TMDB_API_KEY` or the config file.
///
/// # Errors
///
/// Returns an error if no API key is configured or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = config
        .api_key(std::env::var("TMDB_API_KEY").ok())
        .context("TMDB_API_KEY environment variable or tmdb.api_key in config is required")?;
    let base_url = config
        .tmdb
        .base_url
        .parse::<url::Url>()
        .with_context(|| format!("invalid tmdb.base_url: {}", config.tmdb.base_url))?;

    TmdbClient::builder()
        .base_url(base_url)
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Logs the cause of a failed action and returns its failure view.
fn failure_view(action: Action, err: &anyhow::Error) -> View {
    tracing::error!("{action:?} error: {err:#}");
    View::failed(action)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client cannot be built.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<View> {
    let client = build_tmdb_client(config)?;
    let limit = resolve_limit(
        args.limit.as_deref().and_then(parse_limit),
        config.search.default_limit,
        config.search.max_limit,
    );

    let result = service::search(
        &client,
        args.query.as_deref().unwrap_or_default(),
        limit,
        &config.tmdb.language,
        &config.images.to_image_urls(),
    )
    .await;

    Ok(match result {
        Ok(outcome) if outcome.rows.is_empty() => View::NoResults,
        Ok(outcome) => View::SearchResults(outcome),
        Err(err) => failure_view(Action::Search, &err),
    })
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client cannot be built.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, config: &AppConfig) -> Result<View> {
    let client = build_tmdb_client(config)?;
    let result = service::movie_detail(
        &client,
        args.id,
        &config.tmdb.language,
        &config.images.to_image_urls(),
    )
    .await;

    Ok(match result {
        Ok(detail) => View::Detail(detail),
        Err(err) => failure_view(Action::Detail, &err),
    })
}

/// Runs the `stats` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client cannot be built.
#[instrument(skip_all)]
async fn run_stats(config: &AppConfig) -> Result<View> {
    let client = build_tmdb_client(config)?;
    let result = service::statistics(&client, &config.tmdb.language).await;

    Ok(match result {
        Ok(stats) => View::Statistics(stats),
        Err(err) => failure_view(Action::Statistics, &err),
    })
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be resolved, loaded or serialized.
fn run_config_show(dir: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;
    if config.tmdb.api_key.is_some() {
        config.tmdb.api_key = Some(String::from("********"));
    }

    tracing::info!("Config file: {}", path.display());
    let content = toml::to_string_pretty(&config).context("failed to serialize config to TOML")?;
    for line in content.lines() {
        tracing::info!("{}", line);
    }
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(dir: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(())
}

/// Log destination: stdout for text output, stderr when stdout carries JSON.
fn log_writer(json: bool) -> BoxMakeWriter {
    if json {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    }
}

/// Entry point.
///
/// Exits with a failure code when the requested action fails.
///
/// # Errors
///
/// Returns an error if configuration or client setup fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(log_writer(cli.json))
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(log_writer(cli.json));

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let dir = cli.dir.as_deref();
    let view = match cli.command {
        Commands::Config(cmd) => {
            match cmd.command {
                ConfigSubcommands::Show => run_config_show(dir)?,
                ConfigSubcommands::Init { force } => run_config_init(dir, force)?,
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Search(args) => run_search(&args, &load_config(dir)?).await?,
        Commands::Detail(args) => run_detail(&args, &load_config(dir)?).await?,
        Commands::Stats => run_stats(&load_config(dir)?).await?,
    };

    emit(&view, cli.json)?;
    Ok(if view.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
