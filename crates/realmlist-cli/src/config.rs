//! Immutable run configuration assembled once from flags and environment.
//!
//! # Design
//! - Every handler receives the same `RunConfig`; nothing reads flags or the
//!   environment after startup.
//! - Credentials resolve through an injected lookup so precedence is testable
//!   without touching the process environment.

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use realmlist_core::Region;
use reqwest::Url;
use tracing::info;

use crate::cli::Cli;
use crate::client::{CliError, CliResult};

pub(crate) const CLIENT_ID_VAR: &str = "OAUTH_CID";
pub(crate) const CLIENT_SECRET_VAR: &str = "OAUTH_SEC";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_LOCALE: &str = "en_US";

const API_HOST_SUFFIX: &str = "api.blizzard.com";
const OAUTH_HOST_SUFFIX: &str = "battle.net";
const TOKEN_PATH: &str = "oauth/token";
const REALM_INDEX_PATH: &str = "data/wow/realm/index";
const REALM_STATUS_PATH: &str = "wow/realm/status";

/// Which raw document the JSON passthrough prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JsonView {
    Index,
    Status,
}

/// What a run produces on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    LuaTable,
    Json(JsonView),
}

impl Mode {
    pub(crate) const fn select(lua: bool, status: bool) -> Self {
        match (lua, status) {
            (true, _) => Self::LuaTable,
            (false, true) => Self::Json(JsonView::Status),
            (false, false) => Self::Json(JsonView::Index),
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::LuaTable => "lua",
            Self::Json(JsonView::Index) => "index",
            Self::Json(JsonView::Status) => "status",
        }
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct RunConfig {
    pub(crate) region: Region,
    pub(crate) auth_region: Region,
    pub(crate) locale: Option<String>,
    pub(crate) mode: Mode,
    pub(crate) timeout: Duration,
    pub(crate) endpoints: Endpoints,
    pub(crate) credentials: Credentials,
}

impl RunConfig {
    /// Build the configuration, resolving credentials for the auth region.
    pub(crate) fn from_cli<F>(cli: &Cli, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_region = Region::from(cli.auth_region);
        let credentials = Credentials::resolve(auth_region, &lookup)?;
        Ok(Self {
            region: cli.region.into(),
            auth_region,
            locale: Some(cli.locale.trim().to_string()).filter(|locale| !locale.is_empty()),
            mode: Mode::select(cli.lua, cli.status),
            timeout: Duration::from_secs(cli.timeout),
            endpoints: Endpoints::new(cli.api_url.clone(), cli.oauth_url.clone()),
            credentials,
        })
    }
}

/// OAuth2 client id and secret.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
}

impl Credentials {
    /// Resolve `OAUTH_CID` / `OAUTH_SEC`, preferring the `_<REGION>` variants.
    pub(crate) fn resolve<F>(region: Region, lookup: &F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = region_env(CLIENT_ID_VAR, region, lookup).ok_or_else(|| {
            CliError::validation(format!(
                "please specify client id as {CLIENT_ID_VAR} env var (https://develop.battle.net/access/clients)"
            ))
        })?;
        let client_secret = region_env(CLIENT_SECRET_VAR, region, lookup).ok_or_else(|| {
            CliError::validation(format!(
                "please specify client secret as {CLIENT_SECRET_VAR} env var"
            ))
        })?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Region-specific value of `key` (e.g. `OAUTH_CID_EU`) or the base value.
///
/// Empty values count as unset.
pub(crate) fn region_env<F>(key: &str, region: Region, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let regional_key = format!("{key}_{}", region.env_suffix());
    if let Some(value) = lookup(&regional_key).filter(|value| !value.is_empty()) {
        info!(variable = %regional_key, "found and using region specific credential");
        return Some(value);
    }
    lookup(key).filter(|value| !value.is_empty())
}

/// Origins for the token and game-data APIs.
///
/// Without overrides every region gets its own host; an override replaces the
/// origin for all regions while the namespace still names the region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Endpoints {
    api_base: Option<Url>,
    oauth_base: Option<Url>,
}

impl Endpoints {
    pub(crate) const fn new(api_base: Option<Url>, oauth_base: Option<Url>) -> Self {
        Self {
            api_base,
            oauth_base,
        }
    }

    /// `https://<region>.battle.net/oauth/token`.
    pub(crate) fn token_url(&self, region: Region) -> CliResult<Url> {
        let origin = match &self.oauth_base {
            Some(base) => base.clone(),
            None => region_origin(region, OAUTH_HOST_SUFFIX)?,
        };
        join_path(&origin, TOKEN_PATH)
    }

    /// Realm index in the region's dynamic namespace.
    pub(crate) fn realm_index_url(
        &self,
        region: Region,
        token: &str,
        locale: Option<&str>,
    ) -> CliResult<Url> {
        let mut url = join_path(&self.api_origin(region)?, REALM_INDEX_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("namespace", &format!("dynamic-{region}"));
            pairs.append_pair("access_token", token);
            if let Some(locale) = locale {
                pairs.append_pair("locale", locale);
            }
        }
        Ok(url)
    }

    /// Legacy realm status document.
    pub(crate) fn realm_status_url(
        &self,
        region: Region,
        token: &str,
        locale: Option<&str>,
    ) -> CliResult<Url> {
        let mut url = join_path(&self.api_origin(region)?, REALM_STATUS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", token);
            if let Some(locale) = locale {
                pairs.append_pair("locale", locale);
            }
        }
        Ok(url)
    }

    fn api_origin(&self, region: Region) -> CliResult<Url> {
        match &self.api_base {
            Some(base) => Ok(base.clone()),
            None => region_origin(region, API_HOST_SUFFIX),
        }
    }
}

fn region_origin(region: Region, suffix: &str) -> CliResult<Url> {
    let raw = format!("https://{region}.{suffix}/");
    raw.parse::<Url>()
        .map_err(|err| CliError::failure(anyhow!("invalid endpoint '{raw}': {err}")))
}

fn join_path(base: &Url, path: &str) -> CliResult<Url> {
    base.join(path)
        .map_err(|err| CliError::failure(anyhow!("invalid base URL {base}: {err}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn base(url: &str) -> Option<Url> {
        url.parse().ok()
    }

    #[test]
    fn token_host_follows_auth_region() -> CliResult<()> {
        let endpoints = Endpoints::default();
        for region in [Region::Us, Region::Eu, Region::Kr, Region::Tw, Region::Cn] {
            assert_eq!(
                endpoints.token_url(region)?.as_str(),
                format!("https://{region}.battle.net/oauth/token")
            );
        }
        Ok(())
    }

    #[test]
    fn realm_index_url_embeds_region_twice() -> CliResult<()> {
        let url = Endpoints::default().realm_index_url(Region::Eu, "tok", None)?;
        assert_eq!(
            url.as_str(),
            "https://eu.api.blizzard.com/data/wow/realm/index?namespace=dynamic-eu&access_token=tok"
        );
        Ok(())
    }

    #[test]
    fn realm_index_url_appends_locale_when_given() -> CliResult<()> {
        let url = Endpoints::default().realm_index_url(Region::Kr, "tok", Some("ko_KR"))?;
        assert_eq!(
            url.as_str(),
            "https://kr.api.blizzard.com/data/wow/realm/index?namespace=dynamic-kr&access_token=tok&locale=ko_KR"
        );
        Ok(())
    }

    #[test]
    fn realm_status_url_uses_legacy_path() -> CliResult<()> {
        let url = Endpoints::default().realm_status_url(Region::Tw, "tok", None)?;
        assert_eq!(
            url.as_str(),
            "https://tw.api.blizzard.com/wow/realm/status?access_token=tok"
        );
        Ok(())
    }

    #[test]
    fn overrides_replace_origin_but_keep_namespace() -> CliResult<()> {
        let endpoints = Endpoints::new(base("http://127.0.0.1:9000"), base("http://127.0.0.1:9001"));
        assert_eq!(
            endpoints.realm_index_url(Region::Tw, "tok", None)?.as_str(),
            "http://127.0.0.1:9000/data/wow/realm/index?namespace=dynamic-tw&access_token=tok"
        );
        assert_eq!(
            endpoints.token_url(Region::Eu)?.as_str(),
            "http://127.0.0.1:9001/oauth/token"
        );
        Ok(())
    }

    #[test]
    fn regional_credentials_take_precedence() -> CliResult<()> {
        let lookup = lookup_from(&[
            ("OAUTH_CID", "base-id"),
            ("OAUTH_SEC", "base-secret"),
            ("OAUTH_CID_EU", "eu-id"),
        ]);
        let eu = Credentials::resolve(Region::Eu, &lookup)?;
        assert_eq!(eu.client_id, "eu-id");
        assert_eq!(eu.client_secret, "base-secret");
        let us = Credentials::resolve(Region::Us, &lookup)?;
        assert_eq!(us.client_id, "base-id");
        Ok(())
    }

    #[test]
    fn empty_regional_value_falls_back_to_base() {
        let lookup = lookup_from(&[("OAUTH_SEC_KR", ""), ("OAUTH_SEC", "base-secret")]);
        assert_eq!(
            region_env("OAUTH_SEC", Region::Kr, &lookup).as_deref(),
            Some("base-secret")
        );
    }

    #[test]
    fn missing_client_id_is_a_validation_error() {
        let lookup = lookup_from(&[("OAUTH_SEC", "secret")]);
        let err = Credentials::resolve(Region::Us, &lookup).expect_err("id is required");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("OAUTH_CID"));
    }

    #[test]
    fn missing_client_secret_is_a_validation_error() {
        let lookup = lookup_from(&[("OAUTH_CID", "id"), ("OAUTH_SEC", "")]);
        let err = Credentials::resolve(Region::Us, &lookup).expect_err("secret is required");
        assert!(err.display_message().contains("OAUTH_SEC"));
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let credentials = Credentials {
            client_id: "id".into(),
            client_secret: "hunter2".into(),
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[test]
    fn run_config_keeps_locale_unless_blank() -> anyhow::Result<()> {
        let lookup = lookup_from(&[("OAUTH_CID", "id"), ("OAUTH_SEC", "secret")]);
        let defaults = RunConfig::from_cli(&Cli::try_parse_from(["realmlist"])?, &lookup)?;
        assert_eq!(defaults.locale.as_deref(), Some("en_US"));
        assert_eq!(defaults.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let blank = Cli::try_parse_from(["realmlist", "--locale", "", "--status"])?;
        let config = RunConfig::from_cli(&blank, &lookup)?;
        assert_eq!(config.locale, None);
        assert_eq!(config.mode, Mode::Json(JsonView::Status));
        Ok(())
    }

    #[test]
    fn mode_selection_prefers_lua() {
        assert_eq!(Mode::select(true, true), Mode::LuaTable);
        assert_eq!(Mode::select(false, true), Mode::Json(JsonView::Status));
        assert_eq!(Mode::select(false, false).label(), "index");
    }
}
