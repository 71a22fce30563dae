//! # Item Store
//!
//! In-memory item and category store with optional JSON file persistence.
//!
//! Items are keyed by their lower-case code, so code uniqueness is enforced
//! at insert time and the allocator's "greatest code" query is a range scan
//! over the ordered map.
//!
//! Keys compare as strings, so `kf-10000` sorts below `kf-9999`. Once the
//! sequence passes `kf-9999` the greatest key stays `kf-9999`, and
//! allocation keeps offering `kf-10000` until callers pass explicit codes.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "categories": [{ "id": "cam", "name": "Cameras", "attributes": [] }],
//!   "items": [{ "id": "...", "code": "kf-0001", "name": "Cameras", ... }]
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::allocator::{ItemStore, next_code};
use crate::code::ItemCode;
use crate::error::{KairoError, StoreError};
use crate::model::{Category, Item, ItemDraft, PlacementRef};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    items: Vec<Item>,
}

/// Items and categories held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, Item>,
    categories: BTreeMap<String, Category>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file. A missing file yields an empty store.
    pub fn load_json(path: &Path) -> Result<Self, KairoError> {
        if !path.exists() {
            info!(path = %path.display(), "store file not found, starting empty");
            return Ok(Self::new());
        }

        let bytes = std::fs::read(path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;

        let mut store = Self::new();
        for category in snapshot.categories {
            store.add_category(category);
        }
        for item in snapshot.items {
            store.insert(item)?;
        }
        info!(
            path = %path.display(),
            items = store.items.len(),
            categories = store.categories.len(),
            "loaded store"
        );
        Ok(store)
    }

    /// Serialize the whole store in the file format above.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, KairoError> {
        let snapshot = Snapshot {
            categories: self.categories.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
        };
        Ok(serde_json::to_vec_pretty(&snapshot)?)
    }

    /// Write the whole store to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<(), KairoError> {
        std::fs::write(path, self.to_json_bytes()?)?;
        debug!(path = %path.display(), items = self.items.len(), "saved store");
        Ok(())
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.insert(category.id.clone(), category);
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Insert a fully-formed item, rejecting a code that is already taken.
    pub fn insert(&mut self, item: Item) -> Result<(), StoreError> {
        let key = item.code.as_str().to_string();
        if self.items.contains_key(&key) {
            return Err(StoreError::DuplicateCode(key));
        }
        self.items.insert(key, item);
        Ok(())
    }

    /// Look up an item by code, in any case and padding.
    pub fn get(&self, code: &str) -> Option<&Item> {
        let code = ItemCode::parse(code)?;
        self.items.get(code.as_str())
    }

    /// Remove an item, returning it if it was present.
    pub fn remove(&mut self, code: &str) -> Option<Item> {
        let code = ItemCode::parse(code)?;
        self.items.remove(code.as_str())
    }

    /// Items placed directly at `placement`, in code order.
    pub fn items_at<'a>(&'a self, placement: &'a PlacementRef) -> impl Iterator<Item = &'a Item> {
        self.items
            .values()
            .filter(move |item| item.placement.as_ref() == Some(placement))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Create an item from a draft.
    ///
    /// Allocates the next code when the draft has none, type-checks
    /// attributes against the draft's category, and derives the name from
    /// the category when none is given.
    pub fn create(&mut self, draft: ItemDraft) -> Result<Item, KairoError> {
        let code = match draft.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(raw) => ItemCode::parse(raw)
                .ok_or_else(|| KairoError::InvalidInput(format!("invalid item code '{}'", raw)))?,
            None => next_code(&*self)?,
        };

        let category = match draft.category_id.as_deref() {
            Some(id) => Some(self.categories.get(id).ok_or_else(|| {
                KairoError::InvalidInput(format!("unknown category '{}'", id))
            })?),
            None => None,
        };

        let attributes = match category {
            Some(category) => category.coerce_attributes(&draft.attributes)?,
            None if draft.attributes.is_empty() => BTreeMap::new(),
            None => {
                return Err(KairoError::InvalidInput(
                    "attributes require a category".to_string(),
                ));
            }
        };

        let name = match (draft.explicit_name(), category) {
            (Some(name), _) => name.to_string(),
            (None, Some(category)) => category.auto_name(&attributes),
            (None, None) => {
                return Err(KairoError::InvalidInput(
                    "an item needs a name or a category".to_string(),
                ));
            }
        };

        let placement = draft.placement().map(PlacementRef::canonical).transpose()?;

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            code,
            name,
            placement,
            description: draft.description,
            category_id: draft.category_id,
            status: draft.status,
            brand: draft.brand,
            model: draft.model,
            serial_number: draft.serial_number,
            purchase_date: draft.purchase_date,
            purchase_value: draft.purchase_value,
            notes: draft.notes,
            attributes,
            created_at: now,
            updated_at: now,
        };

        self.insert(item.clone())?;
        info!(code = %item.code, name = %item.name, "created item");
        Ok(item)
    }
}

impl ItemStore for MemoryStore {
    fn find_max_code(&self, prefix: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .items
            .range(prefix.to_string()..)
            .take_while(|(code, _)| code.starts_with(prefix))
            .last()
            .map(|(code, _)| code.clone()))
    }
}
