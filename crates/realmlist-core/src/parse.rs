//! Decoding of realm-index responses.

use serde::Deserialize;
use tracing::debug;

use crate::error::{RealmError, RealmResult};
use crate::model::Realm;
use crate::summary::debug_summary;

/// Bytes of payload quoted in decode errors.
const ERROR_SUMMARY_BYTES: usize = 80;

#[derive(Deserialize)]
struct RealmIndex {
    #[serde(alias = "Realms")]
    realms: Vec<Realm>,
}

/// Decode a realm-index body into its realms, in API order.
///
/// Unknown fields are ignored.
///
/// # Errors
///
/// Returns [`RealmError::Decode`] when the body is not JSON or lacks the
/// `realms` array, a realm `id` or a realm `slug`.
pub fn parse_realm_list(data: &[u8]) -> RealmResult<Vec<Realm>> {
    let index: RealmIndex =
        serde_json::from_slice(data).map_err(|source| RealmError::Decode {
            summary: debug_summary(data, ERROR_SUMMARY_BYTES),
            source,
        })?;
    debug!(realms = index.realms.len(), "parsed realm list");
    Ok(index.realms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use realmlist_test_support::fixtures::{RealmFixture, realm_index_payload};

    #[test]
    fn parses_realms_in_api_order() {
        let payload = realm_index_payload(&[
            RealmFixture::new(5, "bleeding-hollow").name("en_US", "Bleeding Hollow"),
            RealmFixture::new(1, "lightbringer").name("en_US", "Lightbringer"),
        ]);
        let realms = parse_realm_list(&payload).expect("payload should parse");
        let ids: Vec<_> = realms.iter().map(|realm| realm.id).collect();
        assert_eq!(ids, [5, 1]);
        assert_eq!(realms[0].english_name(), "Bleeding Hollow");
        assert_eq!(realms[1].slug, "lightbringer");
    }

    #[test]
    fn empty_realm_array_is_valid() {
        let realms = parse_realm_list(&realm_index_payload(&[])).expect("empty list");
        assert!(realms.is_empty());
    }

    #[test]
    fn capitalised_realms_key_is_accepted() {
        let realms = parse_realm_list(br#"{"Realms":[{"ID":2,"Slug":"x","Name":{}}]}"#)
            .expect("capitalised payload");
        assert_eq!(realms[0].id, 2);
    }

    #[test]
    fn missing_id_is_fatal() {
        let err = parse_realm_list(br#"{"realms":[{"slug":"nameless"}]}"#)
            .expect_err("id is required");
        assert!(matches!(err, RealmError::Decode { .. }));
    }

    #[test]
    fn missing_realms_array_is_fatal() {
        let err = parse_realm_list(br#"{"code":401,"detail":"Unauthorized"}"#)
            .expect_err("realms is required");
        match err {
            RealmError::Decode { summary, .. } => assert!(summary.contains("Unauthorized")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(parse_realm_list(b"<html>gateway timeout</html>").is_err());
    }
}
