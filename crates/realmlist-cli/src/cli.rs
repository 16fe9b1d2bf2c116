//! Argument parsing, logging setup and mode dispatch.

use std::env;
use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use realmlist_core::Region;
use realmlist_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, run_span};
use tracing::Instrument;
use url::Url;

use crate::auth::fetch_token;
use crate::client::{AppContext, CliDependencies, CliResult, parse_url};
use crate::commands::lua::handle_generate_lua;
use crate::commands::realms::handle_realm_json;
use crate::config::{DEFAULT_LOCALE, DEFAULT_TIMEOUT_SECS, Mode, RunConfig};

/// Parses CLI arguments, runs the selected mode and reports failures on
/// stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format: cli.log_format.map_or_else(LogFormat::infer, LogFormat::from),
        version: env!("CARGO_PKG_VERSION"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: failed to initialise logging: {err:#}");
    }

    match execute(cli, |key| env::var(key).ok(), &mut io::stdout()).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub(crate) async fn execute<F, W>(cli: Cli, lookup: F, out: &mut W) -> CliResult<()>
where
    F: Fn(&str) -> Option<String>,
    W: Write + Send,
{
    let config = RunConfig::from_cli(&cli, lookup)?;
    let deps = CliDependencies::from_config(&config)?;
    let span = run_span(config.mode.label());
    let ctx = AppContext {
        client: deps.client,
        config,
    };
    dispatch(&ctx, out).instrument(span).await
}

async fn dispatch<W: Write + Send>(ctx: &AppContext, out: &mut W) -> CliResult<()> {
    let token = fetch_token(ctx).await?;
    match ctx.config.mode {
        Mode::LuaTable => handle_generate_lua(ctx, &token, out).await.map(|_| ()),
        Mode::Json(view) => handle_realm_json(ctx, &token, view, out).await,
    }
}

#[derive(Parser)]
#[command(
    name = "realmlist",
    version,
    about = "Fetch the World of Warcraft realm directory from the Battle.net API"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "REALMLIST_REGION",
        value_enum,
        ignore_case = true,
        default_value_t = RegionArg::Us,
        help = "Region to query for the JSON views"
    )]
    pub(crate) region: RegionArg,
    #[arg(
        long = "auth-region",
        alias = "authregion",
        env = "REALMLIST_AUTH_REGION",
        value_enum,
        ignore_case = true,
        default_value_t = RegionArg::Us,
        help = "Region whose OAuth host issues the token"
    )]
    pub(crate) auth_region: RegionArg,
    #[arg(
        long,
        default_value = DEFAULT_LOCALE,
        help = "Locale filter for the JSON views; pass an empty value for every locale"
    )]
    pub(crate) locale: String,
    #[arg(long, help = "Merge all regions and print the Lua realm table")]
    pub(crate) lua: bool,
    #[arg(
        long,
        conflicts_with = "lua",
        help = "Print the legacy realm status document instead of the realm index"
    )]
    pub(crate) status: bool,
    #[arg(
        long,
        env = "REALMLIST_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Per-request timeout in seconds"
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        env = "REALMLIST_API_URL",
        value_parser = parse_url,
        help = "Override the game-data API origin for every region"
    )]
    pub(crate) api_url: Option<Url>,
    #[arg(
        long,
        env = "REALMLIST_OAUTH_URL",
        value_parser = parse_url,
        help = "Override the OAuth token origin"
    )]
    pub(crate) oauth_url: Option<Url>,
    #[arg(
        long,
        env = "REALMLIST_LOG_FORMAT",
        value_enum,
        help = "Log format on stderr (defaults to pretty in debug builds, json otherwise)"
    )]
    pub(crate) log_format: Option<LogFormatArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RegionArg {
    Us,
    Eu,
    Kr,
    Tw,
    Cn,
}

impl From<RegionArg> for Region {
    fn from(value: RegionArg) -> Self {
        match value {
            RegionArg::Us => Self::Us,
            RegionArg::Eu => Self::Eu,
            RegionArg::Kr => Self::Kr,
            RegionArg::Tw => Self::Tw,
            RegionArg::Cn => Self::Cn,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormatArg {
    Json,
    Pretty,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => Self::Json,
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
        }
    }
}
