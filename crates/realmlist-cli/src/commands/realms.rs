use std::io::Write;

use realmlist_core::indent_json;

use crate::client::{AppContext, CliResult};
use crate::config::JsonView;
use crate::output::write_output;
use crate::source::fetch_body;

/// Fetch one raw document for the configured region and print it indented.
pub(crate) async fn handle_realm_json<W: Write + Send>(
    ctx: &AppContext,
    token: &str,
    view: JsonView,
    out: &mut W,
) -> CliResult<()> {
    let config = &ctx.config;
    let locale = config.locale.as_deref();
    let url = match view {
        JsonView::Index => config.endpoints.realm_index_url(config.region, token, locale)?,
        JsonView::Status => config.endpoints.realm_status_url(config.region, token, locale)?,
    };

    let body = fetch_body(&ctx.client, url).await?;
    let mut text = indent_json(&body)?;
    text.push('\n');
    write_output(out, &text)
}
