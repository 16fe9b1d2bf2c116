//! Realm records as returned by the game-data API.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer};

use crate::region::Region;

/// Synthetic name key holding the display name chosen during aggregation.
pub const CANONICAL_KEY: &str = "canonical";
/// Synthetic name key holding the region a realm was fetched from.
pub const REGION_KEY: &str = "region";
/// Locale shown in the trailing comment of generated rows.
pub const ENGLISH_LOCALE: &str = "en_US";

/// Locale code to localized display name.
///
/// Besides real locale codes (`en_US`, `pt_BR`, ...) the map carries the
/// [`CANONICAL_KEY`] and [`REGION_KEY`] entries once a realm has been merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleNameMap(BTreeMap<String, String>);

impl LocaleNameMap {
    /// Empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Name for `locale`, if the API supplied one.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// Set the name for `locale`, returning the previous value.
    pub fn insert(&mut self, locale: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.0.insert(locale.into(), name.into())
    }

    /// Number of entries, synthetic keys included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in locale order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleNameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for LocaleNameMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A null map or a null locale entry both mean "no name".
        let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
        Ok(Self(
            raw.unwrap_or_default()
                .into_iter()
                .filter_map(|(locale, name)| name.map(|name| (locale, name)))
                .collect(),
        ))
    }
}

/// One game server entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Realm {
    /// Localized names, keyed by locale.
    #[serde(default, alias = "Name")]
    pub name: LocaleNameMap,
    /// Identifier, unique within one region only.
    #[serde(alias = "ID", alias = "Id")]
    pub id: u32,
    /// Stable URL-safe identifier.
    #[serde(alias = "Slug")]
    pub slug: String,
}

impl Realm {
    /// Stamp the synthetic canonical-name and region entries.
    ///
    /// Returns `false` when the realm has no name in `locale`, in which case
    /// the canonical name is left empty.
    pub fn canonicalize(&mut self, region: Region, locale: &str) -> bool {
        let canonical = self.name.get(locale).map(str::to_owned);
        let found = canonical.is_some();
        self.name
            .insert(CANONICAL_KEY, canonical.unwrap_or_default());
        self.name.insert(REGION_KEY, region.as_str());
        found
    }

    /// Display name picked during aggregation, empty before it.
    #[must_use]
    pub fn canonical_name(&self) -> &str {
        self.name.get(CANONICAL_KEY).unwrap_or_default()
    }

    /// Region code stamped during aggregation, empty before it.
    #[must_use]
    pub fn region_code(&self) -> &str {
        self.name.get(REGION_KEY).unwrap_or_default()
    }

    /// English name used in generated comments.
    #[must_use]
    pub fn english_name(&self) -> &str {
        self.name.get(ENGLISH_LOCALE).unwrap_or_default()
    }
}

impl Display for Realm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{id: {}, slug: {}, name: {{", self.id, self.slug)?;
        for (index, (locale, name)) in self.name.entries().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{locale}: {name}")?;
        }
        f.write_str("}}")
    }
}

/// Decoded realm list of a single region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionResult {
    /// Region the list was fetched from.
    pub region: Region,
    /// Realms in API order.
    pub realms: Vec<Realm>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_locale_entries_are_dropped() {
        let realm: Realm = serde_json::from_value(json!({
            "id": 7,
            "slug": "windrunner",
            "name": { "en_US": "Windrunner", "ko_KR": null }
        }))
        .expect("realm should decode");
        assert_eq!(realm.name.get("en_US"), Some("Windrunner"));
        assert_eq!(realm.name.get("ko_KR"), None);
        assert_eq!(realm.name.len(), 1);
    }

    #[test]
    fn missing_or_null_name_yields_empty_map() {
        let absent: Realm =
            serde_json::from_value(json!({"id": 1, "slug": "a"})).expect("absent name");
        let null: Realm =
            serde_json::from_value(json!({"id": 1, "slug": "a", "name": null})).expect("null name");
        assert!(absent.name.is_empty());
        assert!(null.name.is_empty());
    }

    #[test]
    fn capitalised_field_names_are_accepted() {
        let realm: Realm = serde_json::from_value(json!({
            "ID": 12,
            "Slug": "shadowmoon",
            "Name": { "en_US": "Shadowmoon" }
        }))
        .expect("realm should decode");
        assert_eq!(realm.id, 12);
        assert_eq!(realm.slug, "shadowmoon");
        assert_eq!(realm.english_name(), "Shadowmoon");
    }

    #[test]
    fn canonicalize_stamps_locale_and_region() {
        let mut realm = Realm {
            name: [("zh_TW", "X"), ("en_US", "Y")].into_iter().collect(),
            id: 963,
            slug: "shadowmoon".into(),
        };
        assert!(realm.canonicalize(Region::Tw, "zh_TW"));
        assert_eq!(realm.name.get(CANONICAL_KEY), Some("X"));
        assert_eq!(realm.name.get(REGION_KEY), Some("tw"));
        assert_eq!(realm.canonical_name(), "X");
        assert_eq!(realm.region_code(), "tw");
    }

    #[test]
    fn canonicalize_without_locale_leaves_empty_name() {
        let mut realm = Realm {
            name: [("en_US", "Y")].into_iter().collect(),
            id: 1,
            slug: "y".into(),
        };
        assert!(!realm.canonicalize(Region::Kr, "ko_KR"));
        assert_eq!(realm.name.get(CANONICAL_KEY), Some(""));
        assert_eq!(realm.region_code(), "kr");
    }

    #[test]
    fn display_lists_every_name() {
        let realm = Realm {
            name: [("en_US", "Aegwynn"), ("pt_BR", "Aegwynn")].into_iter().collect(),
            id: 3,
            slug: "aegwynn".into(),
        };
        assert_eq!(
            realm.to_string(),
            "{id: 3, slug: aegwynn, name: {en_US: Aegwynn, pt_BR: Aegwynn}}"
        );
    }
}
