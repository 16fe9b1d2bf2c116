//! API regions and the locale each one trusts for display names.

use std::fmt::{self, Display, Formatter};

/// Locale used when a region has no entry in [`CANONICAL_LOCALES`].
///
/// `pt_BR` carries the correct name for every realm in the `us` and `eu`
/// regions, Russian-language servers included.
pub const DEFAULT_CANONICAL_LOCALE: &str = "pt_BR";

/// Battle.net API region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Americas and Oceania.
    Us,
    /// Europe, Russia included.
    Eu,
    /// Korea.
    Kr,
    /// Taiwan.
    Tw,
    /// China, served from a separate gateway.
    Cn,
}

impl Region {
    /// Lowercase code used in hosts and namespaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Kr => "kr",
            Self::Tw => "tw",
            Self::Cn => "cn",
        }
    }

    /// Uppercase suffix for region-specific environment overrides.
    #[must_use]
    pub const fn env_suffix(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
            Self::Kr => "KR",
            Self::Tw => "TW",
            Self::Cn => "CN",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region paired with its canonical locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLocale {
    /// Region the rule applies to.
    pub region: Region,
    /// Locale whose name becomes the canonical display name.
    pub locale: &'static str,
}

/// Canonical locale per region; regions not listed use
/// [`DEFAULT_CANONICAL_LOCALE`].
pub const CANONICAL_LOCALES: [RegionLocale; 4] = [
    RegionLocale {
        region: Region::Us,
        locale: DEFAULT_CANONICAL_LOCALE,
    },
    RegionLocale {
        region: Region::Eu,
        locale: DEFAULT_CANONICAL_LOCALE,
    },
    RegionLocale {
        region: Region::Kr,
        locale: "ko_KR",
    },
    RegionLocale {
        region: Region::Tw,
        locale: "zh_TW",
    },
];

/// Regions merged into the Lua table, in fetch order.
pub const AGGREGATE_REGIONS: [Region; 4] = [Region::Us, Region::Eu, Region::Kr, Region::Tw];

/// Canonical locale for `region`, falling back to [`DEFAULT_CANONICAL_LOCALE`].
#[must_use]
pub fn canonical_locale(region: Region) -> &'static str {
    CANONICAL_LOCALES
        .iter()
        .find(|entry| entry.region == region)
        .map_or(DEFAULT_CANONICAL_LOCALE, |entry| entry.locale)
}
