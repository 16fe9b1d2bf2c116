//! Lua table and indented JSON renderers.
//!
//! The Lua artifact is included verbatim by addon code, so row punctuation and
//! ordering are part of its contract.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;

use crate::aggregate::{GapReport, GlobalRealmTable};
use crate::error::{RealmError, RealmResult};
use crate::model::Realm;
use crate::summary::debug_summary;

const GENERATOR: &str = concat!("realmlist ", env!("CARGO_PKG_VERSION"));
const LUA_FOOTER: &str = "}\n-- end of generated realm list\n";
const ERROR_SUMMARY_BYTES: usize = 80;

/// Rendered Lua source plus the range counts behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaDocument {
    /// Complete Lua source: header, rows, footer.
    pub text: String,
    /// Counts over the identifier range.
    pub report: GapReport,
}

/// Header comment block and table opener.
#[must_use]
pub fn lua_header(generated_at: DateTime<Utc>) -> String {
    format!(
        "-- Realm list generated on {}\n-- by {GENERATOR}\n-- realmlist --lua > Realms.lua\nRealms = {{\n",
        generated_at.format("%a %b %e %H:%M:%S UTC %Y")
    )
}

/// One table row: `  [id] = {"canonical", "region"}, -- "en_US name", slug`.
#[must_use]
pub fn lua_row(realm: &Realm) -> String {
    format!(
        "  [{}] = {{\"{}\", \"{}\"}}, -- \"{}\", {}\n",
        realm.id,
        lua_escape(realm.canonical_name()),
        lua_escape(realm.region_code()),
        comment_text(realm.english_name()),
        comment_text(&realm.slug)
    )
}

/// Render the whole table; holes produce no row.
#[must_use]
pub fn render_lua_table(table: &GlobalRealmTable, generated_at: DateTime<Utc>) -> LuaDocument {
    let scan = table.dense_scan();
    let mut text = lua_header(generated_at);
    for realm in &scan.rows {
        text.push_str(&lua_row(realm));
    }
    text.push_str(LUA_FOOTER);
    LuaDocument {
        text,
        report: scan.report,
    }
}

/// Re-indent a raw JSON body with two spaces.
///
/// Tokens are copied through untouched: key order, duplicate keys, number
/// spelling and string escapes all survive. Only whitespace between tokens
/// changes.
///
/// # Errors
///
/// Returns [`RealmError::Indent`] when `data` is not JSON.
pub fn indent_json(data: &[u8]) -> RealmResult<String> {
    let text = String::from_utf8_lossy(data);
    serde_json::from_str::<IgnoredAny>(&text).map_err(|source| RealmError::Indent {
        summary: debug_summary(data, ERROR_SUMMARY_BYTES),
        source,
    })?;

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut opened = false;
    for ch in text.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if matches!(ch, ' ' | '\t' | '\n' | '\r') {
            continue;
        }
        // First token inside a non-empty object or array.
        if opened && ch != '}' && ch != ']' {
            opened = false;
            depth += 1;
            push_newline(&mut out, depth);
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '{' | '[' => {
                out.push(ch);
                opened = true;
            }
            '}' | ']' => {
                if opened {
                    opened = false;
                } else {
                    depth = depth.saturating_sub(1);
                    push_newline(&mut out, depth);
                }
                out.push(ch);
            }
            ',' => {
                out.push(ch);
                push_newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            ch => out.push(ch),
        }
    }
    Ok(out)
}

fn push_newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn lua_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            ch if ch.is_control() => {
                let mut buf = [0; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    escaped.push_str(&format!("\\{byte:03}"));
                }
            }
            ch => escaped.push(ch),
        }
    }
    escaped
}

/// Comment-safe text: a line break would end the comment early.
fn comment_text(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}
