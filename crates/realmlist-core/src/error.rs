//! Error types for realm directory operations.

use thiserror::Error;

use crate::model::Realm;
use crate::region::Region;

/// Primary error type for fetching, decoding and aggregating realm lists.
#[derive(Debug, Error)]
pub enum RealmError {
    /// The source could not deliver a region's realm list.
    #[error("fetching realm list for region {region} failed")]
    Fetch {
        /// Region being fetched.
        region: Region,
        /// Underlying transport failure.
        source: anyhow::Error,
    },
    /// Response body did not decode into a realm list.
    #[error("unable to decode realm list {summary}")]
    Decode {
        /// Truncated view of the offending payload.
        summary: String,
        /// Source JSON error.
        source: serde_json::Error,
    },
    /// Response body was not JSON at all.
    #[error("unable to indent json result {summary}")]
    Indent {
        /// Truncated view of the offending payload.
        summary: String,
        /// Source JSON error.
        source: serde_json::Error,
    },
    /// Two records claimed the same realm identifier.
    #[error("duplicate entries for realm {id}: {existing} vs {incoming}")]
    DuplicateRealm {
        /// Identifier present in both records.
        id: u32,
        /// Record already held by the table.
        existing: Box<Realm>,
        /// Record that attempted to claim the identifier.
        incoming: Box<Realm>,
    },
}

/// Convenience alias for realm directory results.
pub type RealmResult<T> = Result<T, RealmError>;
