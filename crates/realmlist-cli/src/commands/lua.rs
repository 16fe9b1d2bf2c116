use std::io::Write;

use chrono::Utc;
use realmlist_core::{AGGREGATE_REGIONS, GapReport, aggregate_regions, render_lua_table};
use tracing::info;

use crate::client::{AppContext, CliResult};
use crate::output::write_output;
use crate::source::HttpRealmSource;

/// Merge every aggregate region and write the Lua realm table.
///
/// The document is rendered in memory first, so a failed region leaves `out`
/// untouched.
pub(crate) async fn handle_generate_lua<W: Write + Send>(
    ctx: &AppContext,
    token: &str,
    out: &mut W,
) -> CliResult<GapReport> {
    let source = HttpRealmSource::new(ctx.client.clone(), ctx.config.endpoints.clone(), token);
    let table = aggregate_regions(&source, &AGGREGATE_REGIONS).await?;
    let document = render_lua_table(&table, Utc::now());

    let GapReport { max, holes, valid } = document.report;
    info!(
        max,
        holes,
        valid,
        "last realm id is {max}, {holes} holes, {valid} valid realms found"
    );

    write_output(out, &document.text)?;
    Ok(document.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests_support::context_for;
    use crate::config::Mode;
    use httpmock::prelude::*;
    use realmlist_test_support::fixtures::{RealmFixture, realm_index_value};

    fn mock_region(server: &MockServer, region: &str, realms: &[RealmFixture]) {
        let body = realm_index_value(realms);
        server.mock(|when, then| {
            when.method(GET)
                .path("/data/wow/realm/index")
                .query_param("namespace", format!("dynamic-{region}"))
                .query_param("access_token", "tok");
            then.status(200).json_body(body);
        });
    }

    #[tokio::test]
    async fn merges_all_regions_into_one_table() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        mock_region(&server, "us", &[RealmFixture::uniform(1, "stormrage", "Stormrage")]);
        mock_region(&server, "eu", &[RealmFixture::uniform(2, "aegwynn", "Aegwynn")]);
        mock_region(&server, "kr", &[]);
        mock_region(
            &server,
            "tw",
            &[RealmFixture::new(5, "shadowmoon")
                .name("en_US", "Shadowmoon")
                .name("zh_TW", "暗影之月")],
        );

        let ctx = context_for(&server.base_url(), Mode::LuaTable)?;
        let mut out = Vec::new();
        let report = handle_generate_lua(&ctx, "tok", &mut out).await?;

        assert_eq!(report, GapReport { max: 5, holes: 2, valid: 3 });
        let text = String::from_utf8(out)?;
        let rows: Vec<_> = text.lines().filter(|line| line.starts_with("  [")).collect();
        assert_eq!(
            rows,
            [
                "  [1] = {\"Stormrage\", \"us\"}, -- \"Stormrage\", stormrage",
                "  [2] = {\"Aegwynn\", \"eu\"}, -- \"Aegwynn\", aegwynn",
                "  [5] = {\"暗影之月\", \"tw\"}, -- \"Shadowmoon\", shadowmoon",
            ]
        );
        assert!(text.starts_with("-- Realm list generated on "));
        assert!(text.contains("Realms = {\n"));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_ids_across_regions_write_nothing() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        mock_region(&server, "us", &[RealmFixture::uniform(7, "alpha", "Alpha")]);
        mock_region(&server, "eu", &[RealmFixture::uniform(7, "beta", "Beta")]);
        mock_region(&server, "kr", &[]);
        mock_region(&server, "tw", &[]);

        let ctx = context_for(&server.base_url(), Mode::LuaTable)?;
        let mut out = Vec::new();
        let err = handle_generate_lua(&ctx, "tok", &mut out)
            .await
            .expect_err("duplicate id must abort");

        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("duplicate entries for realm 7"));
        assert!(out.is_empty());
        Ok(())
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn failed_region_aborts_before_writing() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        mock_region(&server, "us", &[RealmFixture::uniform(1, "stormrage", "Stormrage")]);
        server.mock(|when, then| {
            when.method(GET)
                .path("/data/wow/realm/index")
                .query_param("namespace", "dynamic-eu");
            then.status(500).body("internal error");
        });
        let later = server.mock(|when, then| {
            when.method(GET)
                .path("/data/wow/realm/index")
                .query_param("namespace", "dynamic-kr");
            then.status(200).json_body(realm_index_value(&[]));
        });

        let ctx = context_for(&server.base_url(), Mode::LuaTable)?;
        let mut out = Vec::new();
        let err = handle_generate_lua(&ctx, "tok", &mut out)
            .await
            .expect_err("500 must abort");

        assert_eq!(err.exit_code(), 3);
        let message = err.display_message();
        assert!(message.contains("region eu"), "{message}");
        assert!(message.contains("status 500"), "{message}");
        assert!(out.is_empty());
        later.assert_hits(0);
        Ok(())
    }
}
