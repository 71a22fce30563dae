//! # Inventory Model
//!
//! Items, their lifecycle status, typed category attributes, and where
//! they are stored.
//!
//! ## Example
//!
//! ```
//! use kairoframe::model::{ItemDraft, ItemStatus};
//!
//! let draft: ItemDraft = serde_json::from_str(r#"{"name": "Tripod"}"#).unwrap();
//! assert_eq!(draft.status, ItemStatus::Available);
//! assert!(draft.code.is_none());
//! ```

mod attributes;
mod placement;

pub use attributes::*;
pub use placement::*;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::code::ItemCode;

/// Lifecycle status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    Repair,
    Lost,
    Retired,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 6] = [
        Self::Available,
        Self::InUse,
        Self::Maintenance,
        Self::Repair,
        Self::Lost,
        Self::Retired,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "In use",
            Self::Maintenance => "Maintenance",
            Self::Repair => "In repair",
            Self::Lost => "Lost",
            Self::Retired => "Retired",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub code: ItemCode,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an item.
///
/// Everything except the placement fields maps directly onto [`Item`].
/// Placement may be given either as a [`PlacementRef`] or through the
/// three legacy id fields, which are folded with
/// [`PlacementRef::from_legacy`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    /// Explicit code; allocated when absent.
    #[serde(default)]
    pub code: Option<String>,
    /// Explicit name; derived from the category when empty.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub placement: Option<PlacementRef>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub shelf_id: Option<String>,
    #[serde(default)]
    pub location_attribute_id: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub purchase_value: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Raw form values, type-checked against the category.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl ItemDraft {
    /// Resolved placement: the explicit reference wins over legacy ids.
    pub fn placement(&self) -> Option<PlacementRef> {
        self.placement.clone().or_else(|| {
            PlacementRef::from_legacy(
                self.location_id.as_deref(),
                self.shelf_id.as_deref(),
                self.location_attribute_id.as_deref(),
            )
        })
    }

    /// Name if one was given and is not blank.
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::InUse).unwrap(),
            "\"IN_USE\""
        );
        let s: ItemStatus = serde_json::from_str("\"MAINTENANCE\"").unwrap();
        assert_eq!(s, ItemStatus::Maintenance);
        assert!(serde_json::from_str::<ItemStatus>("\"BROKEN\"").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ItemStatus::default(), ItemStatus::Available);
        assert_eq!(ItemStatus::Repair.to_string(), "In repair");
        assert_eq!(ItemStatus::ALL.len(), 6);
    }

    #[test]
    fn test_draft_placement_prefers_explicit() {
        let draft: ItemDraft = serde_json::from_value(serde_json::json!({
            "placement": {"kind": "location", "id": "L1"},
            "shelfId": "S1",
        }))
        .unwrap();
        assert_eq!(draft.placement(), Some(PlacementRef::Location("L1".into())));

        let draft: ItemDraft = serde_json::from_value(serde_json::json!({
            "locationId": "L1",
            "shelfId": "S1",
        }))
        .unwrap();
        assert_eq!(draft.placement(), Some(PlacementRef::Shelf("S1".into())));
    }

    #[test]
    fn test_explicit_name() {
        let mut draft = ItemDraft::default();
        assert_eq!(draft.explicit_name(), None);
        draft.name = Some("   ".into());
        assert_eq!(draft.explicit_name(), None);
        draft.name = Some(" Tripod ".into());
        assert_eq!(draft.explicit_name(), Some("Tripod"));
    }
}
