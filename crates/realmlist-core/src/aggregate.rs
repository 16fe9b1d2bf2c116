//! Cross-region merge of realm lists into one identifier space.
//!
//! # Design
//! - Regions are folded strictly in table order; the first failure aborts.
//! - Realm identifiers must be unique across every region. A collision is a
//!   data-integrity error and neither record is kept.
//! - The dense scan walks `1..=max` so rows come out in ascending order and
//!   every identifier in the range is classified exactly once.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{info, warn};

use crate::error::{RealmError, RealmResult};
use crate::model::{Realm, RegionResult};
use crate::parse::parse_realm_list;
use crate::region::{Region, canonical_locale};
use crate::source::RealmSource;

/// Realm identifier to realm, across every merged region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalRealmTable {
    realms: BTreeMap<u32, Realm>,
    max_id: u32,
}

impl GlobalRealmTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `realm` for `region` and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::DuplicateRealm`] if the identifier is already
    /// present; the table is left unchanged.
    pub fn insert(&mut self, region: Region, locale: &str, mut realm: Realm) -> RealmResult<()> {
        self.max_id = self.max_id.max(realm.id);
        match self.realms.entry(realm.id) {
            Entry::Occupied(existing) => Err(RealmError::DuplicateRealm {
                id: realm.id,
                existing: Box::new(existing.get().clone()),
                incoming: Box::new(realm),
            }),
            Entry::Vacant(slot) => {
                if !realm.canonicalize(region, locale) {
                    warn!(
                        id = realm.id,
                        slug = %realm.slug,
                        region = %region,
                        locale,
                        "realm has no name in the canonical locale"
                    );
                }
                slot.insert(realm);
                Ok(())
            }
        }
    }

    /// Merge every realm of one region under that region's canonical locale.
    ///
    /// # Errors
    ///
    /// Stops at the first duplicate identifier.
    pub fn absorb(&mut self, result: RegionResult) -> RealmResult<usize> {
        let locale = canonical_locale(result.region);
        let count = result.realms.len();
        for realm in result.realms {
            self.insert(result.region, locale, realm)?;
        }
        Ok(count)
    }

    /// Realm stored under `id`.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Realm> {
        self.realms.get(&id)
    }

    /// Number of stored realms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.realms.len()
    }

    /// Whether nothing has been merged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.realms.is_empty()
    }

    /// Highest identifier seen so far, `0` when empty.
    #[must_use]
    pub const fn max_id(&self) -> u32 {
        self.max_id
    }

    /// Walk `1..=max`, collecting present realms and counting holes.
    #[must_use]
    pub fn dense_scan(&self) -> DenseScan<'_> {
        let mut rows = Vec::with_capacity(self.realms.len());
        let mut holes = 0;
        for id in 1..=self.max_id {
            match self.realms.get(&id) {
                Some(realm) => rows.push(realm),
                None => holes += 1,
            }
        }
        let valid = self.max_id - holes;
        DenseScan {
            rows,
            report: GapReport {
                max: self.max_id,
                holes,
                valid,
            },
        }
    }
}

/// Outcome of [`GlobalRealmTable::dense_scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseScan<'a> {
    /// Present realms in ascending identifier order.
    pub rows: Vec<&'a Realm>,
    /// Counts over `1..=max`.
    pub report: GapReport,
}

/// Classification of the identifier range `1..=max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapReport {
    /// Highest identifier seen.
    pub max: u32,
    /// Identifiers in range with no realm.
    pub holes: u32,
    /// Identifiers in range with a realm.
    pub valid: u32,
}

/// Fetch, decode and merge every region of `regions`, in order.
///
/// # Errors
///
/// The first fetch, decode or duplicate-identifier failure aborts the fold.
pub async fn aggregate_regions<S>(source: &S, regions: &[Region]) -> RealmResult<GlobalRealmTable>
where
    S: RealmSource + ?Sized,
{
    let mut table = GlobalRealmTable::new();
    for &region in regions {
        let data = source
            .fetch_realm_index(region)
            .await
            .map_err(|source| RealmError::Fetch { region, source })?;
        let realms = parse_realm_list(&data)?;
        let merged = table.absorb(RegionResult { region, realms })?;
        info!(
            region = %region,
            locale = canonical_locale(region),
            realms = merged,
            max_id = table.max_id(),
            "merged region realm list"
        );
    }
    Ok(table)
}
