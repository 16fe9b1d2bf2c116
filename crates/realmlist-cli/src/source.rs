//! HTTP realm source and raw body fetches.

use anyhow::anyhow;
use async_trait::async_trait;
use realmlist_core::{RealmSource, Region, debug_summary};
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::client::{CliError, CliResult, classify_response, redact_token};
use crate::config::Endpoints;

/// Bytes of response body shown in debug logs.
const LOG_SUMMARY_BYTES: usize = 512;

/// GET `url` once and return the body of a successful response.
pub(crate) async fn fetch_body(client: &Client, url: Url) -> CliResult<Vec<u8>> {
    let shown = redact_token(&url);
    info!(url = %shown, "using url");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| {
            CliError::failure(anyhow!("request to {shown} failed: {}", err.without_url()))
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(classify_response("realm request", response).await);
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| {
            CliError::failure(anyhow!(
                "reading response from {shown} failed: {}",
                err.without_url()
            ))
        })?;

    debug!(
        status = status.as_u16(),
        data = %debug_summary(&bytes, LOG_SUMMARY_BYTES),
        "realm response"
    );
    Ok(bytes.to_vec())
}

/// Realm-index source backed by the game-data API.
pub(crate) struct HttpRealmSource {
    client: Client,
    endpoints: Endpoints,
    token: String,
}

impl HttpRealmSource {
    pub(crate) fn new(client: Client, endpoints: Endpoints, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoints,
            token: token.into(),
        }
    }
}

#[async_trait]
impl RealmSource for HttpRealmSource {
    async fn fetch_realm_index(&self, region: Region) -> anyhow::Result<Vec<u8>> {
        // Aggregation needs every locale, so no locale filter here.
        let url = self.endpoints.realm_index_url(region, &self.token, None)?;
        Ok(fetch_body(&self.client, url).await?)
    }
}
