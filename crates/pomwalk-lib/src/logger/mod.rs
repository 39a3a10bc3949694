use crate::primitives::*;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Crates whose logs are clamped to `warn` unless `RUST_LOG` says otherwise
const QUIET_CRATES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls", "tokio", "mio", "want"];

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

/// Filter directive used when `RUST_LOG` is unset
pub fn default_filter(level: LogLevel) -> String {
    let level = level.as_filter_str();
    let quiet: Vec<String> = QUIET_CRATES
        .iter()
        .map(|name| format!("{}=warn", name))
        .collect();

    format!("pomwalk={level},pomwalk_lib={level},{},{level}", quiet.join(","))
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Log lines go through the indicatif writers so spinners are not torn
        let indicatif_layer = IndicatifLayer::new();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(config.level)));

        let writer = match config.output {
            LogOutput::Stderr => BoxMakeWriter::new(indicatif_layer.get_stderr_writer()),
            LogOutput::Stdout => BoxMakeWriter::new(indicatif_layer.get_stdout_writer()),
        };

        let fmt_layer = match config.format {
            LogFormat::Text => fmt::layer()
                .with_writer(writer)
                .with_ansi(config.color)
                .compact()
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .boxed(),
            LogFormat::Yaml => fmt::layer()
                .with_writer(writer)
                .with_ansi(config.color)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        GLOBAL_LOGGER
            .set(Logger {
                config: config.clone(),
            })
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = config.color,
            "Logger initialized"
        );

        GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Log a message at `level`, attaching operation progress if given
    pub fn log(level: LogLevel, message: &str, context: Option<&LogContext>) {
        macro_rules! emit {
            ($mac:ident) => {
                match context {
                    Some(ctx) => tracing::$mac!(
                        operation = %ctx.operation,
                        current = ctx.current_item,
                        "{}", message
                    ),
                    None => tracing::$mac!("{}", message),
                }
            };
        }

        match level {
            LogLevel::Error => emit!(error),
            LogLevel::Warning => emit!(warn),
            LogLevel::Info => emit!(info),
            LogLevel::Debug => emit!(debug),
            LogLevel::Trace => emit!(trace),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
