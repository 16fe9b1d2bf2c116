//! Shared client utilities and error types for the CLI.

use std::fmt::{self, Display, Formatter};

use anyhow::anyhow;
use realmlist_core::{RealmError, debug_summary};
use reqwest::{Client, StatusCode, Url};

use crate::config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR, RunConfig};

const USER_AGENT: &str = concat!("realmlist/", env!("CARGO_PKG_VERSION"));
const ERROR_SUMMARY_BYTES: usize = 160;

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
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<RealmError> for CliError {
    fn from(error: RealmError) -> Self {
        match error {
            // Keep the validation/failure split of errors raised by our own source.
            RealmError::Fetch { region, source } => match source.downcast::<Self>() {
                Ok(Self::Validation(message)) => {
                    Self::validation(format!("region {region}: {message}"))
                }
                Ok(Self::Failure(inner)) => {
                    Self::failure(inner.context(format!("fetching realm list for region {region}")))
                }
                Err(source) => Self::failure(RealmError::Fetch { region, source }),
            },
            other => Self::failure(other),
        }
    }
}

/// Dependencies constructed once from the run configuration.
#[derive(Clone)]
pub(crate) struct CliDependencies {
    pub(crate) client: Client,
}

impl CliDependencies {
    /// Construct the HTTP client shared by every request of the run.
    pub(crate) fn from_config(config: &RunConfig) -> CliResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) config: RunConfig,
}

/// Parse an endpoint override provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// URL with the `access_token` query value masked, for log lines.
#[must_use]
pub(crate) fn redact_token(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_token" {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

/// Classify a non-success HTTP response into a CLI error.
pub(crate) async fn classify_response(operation: &str, response: reqwest::Response) -> CliError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let summary = debug_summary(&bytes, ERROR_SUMMARY_BYTES);
    let detail = if summary.trim().is_empty() {
        format!("{operation} failed with status {status}")
    } else {
        format!("{operation} failed with status {status}: {}", summary.trim())
    };

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        CliError::validation(format!(
            "{detail} (check {CLIENT_ID_VAR} / {CLIENT_SECRET_VAR})"
        ))
    } else {
        CliError::failure(anyhow!(detail))
    }
}
