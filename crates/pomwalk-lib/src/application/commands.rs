//! Command execution handlers
//!
//! Handlers write their results to a caller-supplied writer so the same code
//! serves the terminal and the tests.

use crate::api::PomFetcher;
use crate::application::session::CommandSession;
use crate::application::{CliConfig, Commands, OutputFormat};
use crate::logger::Logger;
use crate::maven::{ArtifactKind, Coordinate};
use crate::primitives::{LogContext, LogLevel, ResolutionError};
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::io::Write;

/// One resolved coordinate in JSON output
#[derive(Debug, Serialize)]
struct ResolvedEntry {
    coordinate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    jar: Option<bool>,
}

/// Execute CLI commands against the configured repository
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            println!("pomwalk - Maven transitive dependency resolver");
            println!("Run 'pomwalk --help' for usage information");
            return Ok(());
        }
    };

    Logger::init(config.app_config.to_logger_config()).context("Failed to initialize logging")?;

    let session = CommandSession::live(config.app_config)?;
    let mut stdout = std::io::stdout().lock();
    execute_cached_command(command, &session, &mut stdout).await
}

/// Execute a command, loading and saving the session's POM cache only when
/// the command talks to the repository
pub async fn execute_cached_command<F>(
    command: Commands,
    session: &CommandSession<F>,
    out: &mut dyn Write,
) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    let networked = command.requires_network();
    if networked {
        session.load_cache().await;
    }

    let result = execute_command_with_session(command, session, out).await;

    if networked {
        session.save_cache().await;
    }
    result
}

/// Execute a specific command with a provided session (for testing)
pub async fn execute_command_with_session<F>(
    command: Commands,
    session: &CommandSession<F>,
    out: &mut dyn Write,
) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    match command {
        Commands::Resolve {
            coordinate,
            check_jars,
            format,
        } => handle_resolve(session, out, &coordinate, check_jars, format).await,
        Commands::Pom { coordinate } => handle_pom(session, out, &coordinate).await,
        Commands::Url { coordinate } => handle_url(session, out, &coordinate),
        Commands::Probe { coordinate } => handle_probe(session, out, &coordinate).await,
        Commands::Version => handle_version(session, out),
    }
}

/// Reject anything that is not a plain `group:artifact:version`
fn validate_coordinate(input: &str) -> Result<Coordinate> {
    let coordinate = Coordinate::parse(input)?;
    if !Coordinate::is_resolvable(input) {
        return Err(ResolutionError::InvalidCoordinateFormat {
            input: input.to_string(),
        }
        .into());
    }
    Ok(coordinate)
}

async fn handle_resolve<F>(
    session: &CommandSession<F>,
    out: &mut dyn Write,
    input: &str,
    check_jars: bool,
    format: OutputFormat,
) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    let root = validate_coordinate(input)?;

    let spinner = session.spinner(&format!("Resolving {}", root));
    let mut context = LogContext::new("resolve");
    let mut entries: Vec<ResolvedEntry> = Vec::new();
    let mut failure: Option<ResolutionError> = None;

    let mut stream = session.resolver().resolve(&root.to_string());
    while let Some(item) = stream.next().await {
        let coordinate = match item {
            Ok(coordinate) => coordinate,
            Err(error) => {
                failure = Some(error);
                break;
            }
        };

        let jar = if check_jars {
            Some(session.source().probe_artifact_exists(&coordinate).await)
        } else {
            None
        };

        let entry = ResolvedEntry { coordinate, jar };
        if format == OutputFormat::Plain {
            let line = plain_line(&entry, session.color());
            spinner.suspend(|| writeln!(out, "{}", line))?;
        }

        entries.push(entry);
        context.set_progress(entries.len() as u64);
        spinner.set_message(format!("Resolving {} ({} found)", root, entries.len()));
    }
    spinner.finish_and_clear();

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
    }

    match failure {
        None => {
            Logger::log(LogLevel::Info, &format!("Resolved {}", root), Some(&context));
            Ok(())
        }
        Some(error) => Err(anyhow::Error::new(error).context(format!(
            "Resolution of {} stopped after {} coordinates",
            root,
            entries.len()
        ))),
    }
}

fn plain_line(entry: &ResolvedEntry, color: bool) -> String {
    match entry.jar {
        None => entry.coordinate.clone(),
        Some(true) => format!(
            "{} {}",
            entry.coordinate,
            style("[jar]").green().force_styling(color)
        ),
        Some(false) => format!(
            "{} {}",
            entry.coordinate,
            style("[no jar]").dim().force_styling(color)
        ),
    }
}

async fn handle_pom<F>(session: &CommandSession<F>, out: &mut dyn Write, input: &str) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    let coordinate = validate_coordinate(input)?;
    let spinner = session.spinner(&format!("Fetching {}", coordinate));

    let raw = session
        .source()
        .fetch_raw_document(input)
        .await
        .with_context(|| format!("Failed to fetch POM for {}", coordinate));
    spinner.finish_and_clear();

    writeln!(out, "{}", raw?.trim_end())?;
    Ok(())
}

fn handle_url<F>(session: &CommandSession<F>, out: &mut dyn Write, input: &str) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    let coordinate = validate_coordinate(input)?;
    writeln!(
        out,
        "{}",
        coordinate.url(&session.config().repository_url, ArtifactKind::Pom)
    )?;
    Ok(())
}

async fn handle_probe<F>(session: &CommandSession<F>, out: &mut dyn Write, input: &str) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    let coordinate = validate_coordinate(input)?;
    let exists = session.source().probe_artifact_exists(input).await;

    let verdict = if exists {
        style("jar found").green().force_styling(session.color())
    } else {
        style("no jar").yellow().force_styling(session.color())
    };
    writeln!(out, "{}: {}", coordinate, verdict)?;
    Ok(())
}

fn handle_version<F>(session: &CommandSession<F>, out: &mut dyn Write) -> Result<()>
where
    F: PomFetcher + Send + Sync + 'static,
{
    writeln!(
        out,
        "{}",
        style(format!("pomwalk {}", env!("CARGO_PKG_VERSION")))
            .bold()
            .force_styling(session.color())
    )?;
    writeln!(out, "Transitive dependency resolver for Maven POMs")?;
    writeln!(out)?;
    writeln!(out, "Repository: {}", session.config().repository_url)?;
    writeln!(out, "Target:     {}", std::env::consts::ARCH)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
