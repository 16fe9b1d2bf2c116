#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Realm directory model and aggregation engine.
//!
//! Layout: `model.rs` (realms and locale maps), `region.rs` (regions and the
//! canonical-locale table), `parse.rs` (response decoding), `aggregate.rs`
//! (cross-region merge and dense-range scan), `render.rs` (Lua table and
//! indented JSON), `source.rs` (fetch seam), `summary.rs` (payload summaries
//! for diagnostics).

pub mod aggregate;
pub mod error;
pub mod model;
pub mod parse;
pub mod region;
pub mod render;
pub mod source;
pub mod summary;

pub use aggregate::{DenseScan, GapReport, GlobalRealmTable, aggregate_regions};
pub use error::{RealmError, RealmResult};
pub use model::{CANONICAL_KEY, ENGLISH_LOCALE, LocaleNameMap, REGION_KEY, Realm, RegionResult};
pub use parse::parse_realm_list;
pub use region::{
    AGGREGATE_REGIONS, CANONICAL_LOCALES, DEFAULT_CANONICAL_LOCALE, Region, RegionLocale,
    canonical_locale,
};
pub use render::{LuaDocument, indent_json, lua_header, lua_row, render_lua_table};
pub use source::RealmSource;
pub use summary::debug_summary;
