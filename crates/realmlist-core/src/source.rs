//! Seam between the aggregation fold and whatever delivers raw realm lists.

use async_trait::async_trait;

use crate::region::Region;

#[async_trait]
/// Delivers the raw realm-index body for a region.
pub trait RealmSource: Send + Sync {
    /// Fetch the realm-index response body for `region`, names in every locale.
    async fn fetch_realm_index(&self, region: Region) -> anyhow::Result<Vec<u8>>;
}
