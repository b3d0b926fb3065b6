//! Command-line interface for the `readme-stats` binary.
//!
//! The CLI prints normalized statistics as JSON, renders themed SVG badges
//! to stdout or a file, and lists the registered themes. Logs go to stderr
//! so that stdout carries only the requested document.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use readme_stats::{
    BadgeKind, BadgeResponse, BadgeService, Error, GithubClient, ServiceConfig, badge_io_error,
    load_config, theme, write_badge,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for GitHub profile statistics and badges.
#[derive(Debug, Parser,)]
#[command(name = "readme-stats", version, about = "Render GitHub profile statistics as SVG badges")]
struct Cli
{
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Default,)]
struct GlobalArgs
{
    /// Path to an optional YAML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf,>,

    /// GitHub personal access token.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String,>,

    /// Count contributions to private repositories in the commit total.
    #[arg(long = "include-private", action = ArgAction::SetTrue, global = true)]
    include_private: bool,
}

#[derive(Debug, Subcommand,)]
enum Command
{
    /// Print normalized profile statistics and language usage as JSON.
    Stats(UserArgs,),
    /// Print contribution streak statistics as JSON.
    Contributions(UserArgs,),
    /// Render an SVG badge.
    Badge(BadgeArgs,),
    /// List registered theme names.
    Themes,
}

#[derive(Debug, Args,)]
struct UserArgs
{
    /// GitHub login to inspect.
    #[arg(long = "user", value_name = "LOGIN")]
    user: String,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

#[derive(Debug, Args,)]
struct BadgeArgs
{
    /// Badge variant to render.
    #[arg(value_enum)]
    kind: BadgeKind,

    /// GitHub login to render the badge for.
    #[arg(long = "user", value_name = "LOGIN")]
    user: String,

    /// Theme name; overrides the configured default.
    #[arg(long = "theme", value_name = "NAME")]
    theme: Option<String,>,

    /// Write the SVG to this file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,
}

#[tokio::main]
async fn main() -> ExitCode
{
    init_tracing();

    match run(Cli::parse(),).await {
        Ok(true,) => ExitCode::SUCCESS,
        Ok(false,) => ExitCode::FAILURE,
        Err(error,) => {
            eprintln!("{}", error.to_display_string());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing()
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with_writer(io::stderr,)
        .init();
}

/// Executes the parsed command.
///
/// Returns `Ok(false)` when a badge was emitted as an error card.
///
/// # Errors
///
/// Propagates configuration, upstream and output errors.
async fn run(cli: Cli,) -> Result<bool, Error,>
{
    let stdout = io::stdout();

    if let Command::Themes = cli.command {
        write_themes(&mut stdout.lock(),)?;
        return Ok(true,);
    }

    let config = resolve_config(&cli.global,)?;
    let token = cli
        .global
        .token
        .as_deref()
        .map(str::trim,)
        .filter(|token| !token.is_empty(),)
        .ok_or_else(|| Error::validation("missing GitHub token: pass --token or set GITHUB_TOKEN",),)?;
    let client =
        GithubClient::new(token, config.retry.clone(), config.repositories.page_size,)?;
    let service = BadgeService::new(client, config.service_options(),);

    match cli.command {
        Command::Stats(args,) => {
            let summary = service.user_stats(&args.user,).await?;
            write_json(&mut stdout.lock(), &summary, args.pretty,)?;
            Ok(true,)
        }
        Command::Contributions(args,) => {
            let stats = service.contribution_years(&args.user,).await?;
            write_json(&mut stdout.lock(), &stats, args.pretty,)?;
            Ok(true,)
        }
        Command::Badge(args,) => {
            let theme = args.theme.as_deref().unwrap_or(config.theme_name(),);
            let response = service.badge(args.kind, &args.user, theme,).await;
            deliver_badge(&response, args.output.as_deref(), &mut stdout.lock(),)
        }
        Command::Themes => Ok(true,),
    }
}

/// Loads the configuration file, if any, and applies flag overrides.
fn resolve_config(global: &GlobalArgs,) -> Result<ServiceConfig, Error,>
{
    let mut config = match global.config.as_deref() {
        Some(path,) => load_config(path,)?,
        None => ServiceConfig::default(),
    };
    if global.include_private {
        config.include_private = true;
    }
    Ok(config,)
}

/// Writes the badge body to `output` or `stdout`.
///
/// Returns whether the badge rendered successfully; error cards are still
/// written so callers always receive an image.
fn deliver_badge<W: Write,>(
    response: &BadgeResponse,
    output: Option<&Path,>,
    stdout: &mut W,
) -> Result<bool, Error,>
{
    match output {
        Some(path,) => write_badge(path, &response.body,)?,
        None => stdout
            .write_all(response.body.as_bytes(),)
            .map_err(|source| badge_io_error(Path::new("<stdout>",), source,),)?,
    }

    if !response.is_success() {
        eprintln!("badge request failed with status {}", response.status);
        return Ok(false,);
    }

    info!(status = response.status, "Badge delivered");
    Ok(true,)
}

fn write_json<W: Write, T: Serialize,>(writer: &mut W, value: &T, pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value,)?;
    } else {
        serde_json::to_writer(&mut *writer, value,)?;
    }

    writer.write_all(b"\n",).map_err(|source| badge_io_error(Path::new("<stdout>",), source,),)
}

fn write_themes<W: Write,>(writer: &mut W,) -> Result<(), Error,>
{
    for name in theme::names() {
        writeln!(writer, "{name}").map_err(|source| badge_io_error(Path::new("<stdout>",), source,),)?;
    }
    Ok((),)
}
