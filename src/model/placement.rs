//! # Placement References
//!
//! Where an item lives, at exactly one level of the storage hierarchy:
//!
//! ```text
//! Location "Warehouse"            (UB-0001)
//! └── Shelf "Rack A"              (ES-0001)
//!     └── LocationAttribute "Bin 3"
//! ```
//!
//! Older records carry up to three overlapping optional ids; they are
//! folded into a single [`PlacementRef`] that points at the most specific
//! level present.
//!
//! Shelf and location references hold the node's code (`ES-0001`,
//! `UB-0001`). Bin references are free-form ids.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::KairoError;

/// Prefix for shelf codes (`ES-0001`).
pub const SHELF_PREFIX: &str = "ES-";

/// Prefix for location codes (`UB-0001`).
pub const LOCATION_PREFIX: &str = "UB-";

static SHELF_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ES-[0-9]{4}$").expect("valid shelf pattern"));

static LOCATION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UB-[0-9]{4}$").expect("valid location pattern"));

/// Reference to one node of the storage hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum PlacementRef {
    Location(String),
    Shelf(String),
    LocationAttribute(String),
}

impl PlacementRef {
    /// Fold legacy optional ids into one reference, most specific first.
    pub fn from_legacy(
        location_id: Option<&str>,
        shelf_id: Option<&str>,
        location_attribute_id: Option<&str>,
    ) -> Option<Self> {
        let present = |id: Option<&str>| {
            id.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        present(location_attribute_id)
            .map(Self::LocationAttribute)
            .or_else(|| present(shelf_id).map(Self::Shelf))
            .or_else(|| present(location_id).map(Self::Location))
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Location(id) | Self::Shelf(id) | Self::LocationAttribute(id) => id,
        }
    }

    /// Normalize shelf and location codes (`es-0003` → `ES-0003`), rejecting
    /// ids that are not codes after normalization.
    pub fn canonical(self) -> Result<Self, KairoError> {
        match self {
            Self::Shelf(id) => {
                let code = normalize_shelf_code(&id);
                if !is_shelf_code(&code) {
                    return Err(KairoError::InvalidInput(format!(
                        "'{}' is not a shelf code",
                        id
                    )));
                }
                Ok(Self::Shelf(code))
            }
            Self::Location(id) => {
                let code = normalize_location_code(&id);
                if !is_location_code(&code) {
                    return Err(KairoError::InvalidInput(format!(
                        "'{}' is not a location code",
                        id
                    )));
                }
                Ok(Self::Location(code))
            }
            bin @ Self::LocationAttribute(_) => Ok(bin),
        }
    }
}

fn normalize(segment: &str, prefix: &str) -> String {
    let upper = segment.trim().to_ascii_uppercase();
    if upper.starts_with(prefix) {
        upper
    } else {
        format!("{}{}", prefix, upper)
    }
}

/// Whether `s` is a shelf code (`ES-` + 4 digits, upper-case).
pub fn is_shelf_code(s: &str) -> bool {
    SHELF_CODE.is_match(s)
}

/// Whether `s` is a location code (`UB-` + 4 digits, upper-case).
pub fn is_location_code(s: &str) -> bool {
    LOCATION_CODE.is_match(s)
}

/// Canonical shelf code from a URL segment: `es-0003` or `0003` → `ES-0003`.
pub fn normalize_shelf_code(segment: &str) -> String {
    normalize(segment, SHELF_PREFIX)
}

/// Canonical location code from a URL segment: `ub-0003` or `0003` → `UB-0003`.
pub fn normalize_location_code(segment: &str) -> String {
    normalize(segment, LOCATION_PREFIX)
}
