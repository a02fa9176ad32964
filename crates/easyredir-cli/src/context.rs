//! CLI error type, exit codes, and app context construction.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use easyredir::{Client, Config};

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: Client,
}

impl AppContext {
    /// Build the API client from CLI flags and environment fallbacks.
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                CliError::validation("API key is required (pass --api-key or set EASYREDIR_API_KEY)")
            })?;
        let api_secret = cli
            .api_secret
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                CliError::validation(
                    "API secret is required (pass --api-secret or set EASYREDIR_API_SECRET)",
                )
            })?;

        let mut config = Config::new(api_key, api_secret).with_base_url(&cli.api_url);
        if let Some(timeout) = cli.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        tracing::debug!(base_url = config.base_url(), "building client");

        let client = Client::new(config)
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self { client })
    }
}

/// Map a library error to a CLI error, adding the operation name.
///
/// Structured API validation errors become validation failures (exit 2);
/// everything else is operational (exit 3).
pub(crate) fn classify_error(operation: &'static str, err: easyredir::Error) -> CliError {
    match err {
        easyredir::Error::Api(api) => CliError::validation(format!("{operation}: {api}")),
        other => CliError::Failure(anyhow::Error::new(other).context(operation)),
    }
}

#[cfg(test)]
mod tests {
    use easyredir::{ApiErrors, Error};

    use super::*;

    #[test]
    fn api_errors_classify_as_validation() {
        let err = classify_error(
            "unable to create rule",
            Error::Api(ApiErrors {
                kind: "invalid_request_error".to_string(),
                message: "Invalid Request".to_string(),
                errors: Vec::new(),
            }),
        );
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.display_message(),
            "unable to create rule: invalid_request_error: Invalid Request"
        );
    }

    #[test]
    fn status_errors_classify_as_failure_with_context() {
        let err = classify_error("unable to list hosts", Error::Status(503));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.display_message(),
            "unable to list hosts: received status code: 503"
        );
    }
}
