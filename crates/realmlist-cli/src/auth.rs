//! OAuth2 client-credentials exchange.

use realmlist_core::debug_summary;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::client::{AppContext, CliError, CliResult, classify_response, redact_token};

const ERROR_SUMMARY_BYTES: usize = 80;

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    #[serde(default)]
    pub(crate) token_type: Option<String>,
    #[serde(default)]
    pub(crate) expires_in: Option<u64>,
}

/// Failures specific to the token exchange.
#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error("token request to {url} failed")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("unable to parse token response {summary}")]
    Decode {
        summary: String,
        source: serde_json::Error,
    },
    #[error("token response carried an empty access_token")]
    EmptyToken,
}

/// Exchange the configured client credentials for a bearer token.
pub(crate) async fn fetch_token(ctx: &AppContext) -> CliResult<String> {
    let config = &ctx.config;
    let url = config.endpoints.token_url(config.auth_region)?;
    info!(url = %url, auth_region = %config.auth_region, "getting token");

    let response = ctx
        .client
        .post(url.clone())
        .basic_auth(
            &config.credentials.client_id,
            Some(&config.credentials.client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|source| {
            CliError::failure(TokenError::Transport {
                url: redact_token(&url),
                source,
            })
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(classify_response("token request", response).await);
    }
    let bytes = response.bytes().await.map_err(|source| {
        CliError::failure(TokenError::Transport {
            url: redact_token(&url),
            source,
        })
    })?;

    let token = decode_token(&bytes).map_err(CliError::failure)?;
    debug!(
        status = status.as_u16(),
        token_type = token.token_type.as_deref().unwrap_or("unknown"),
        expires_in = token.expires_in.unwrap_or_default(),
        "found token"
    );
    Ok(token.access_token)
}

fn decode_token(bytes: &[u8]) -> Result<TokenResponse, TokenError> {
    let token: TokenResponse =
        serde_json::from_slice(bytes).map_err(|source| TokenError::Decode {
            summary: debug_summary(bytes, ERROR_SUMMARY_BYTES),
            source,
        })?;
    if token.access_token.is_empty() {
        return Err(TokenError::EmptyToken);
    }
    Ok(token)
}
