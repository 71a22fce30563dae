//! # Sequential Code Allocator
//!
//! Computes the next free item code by asking the store for the greatest
//! existing code and incrementing its numeric suffix.
//!
//! ```text
//! store max = "kf-0042"  ──►  next_code() = "kf-0043"
//! store empty            ──►  next_code() = "kf-0001"
//! store max = "kf-junk"  ──►  next_code() = "kf-0001"  (logged at warn)
//! ```
//!
//! Allocation is read-only. Two concurrent callers can compute the same
//! code; the store rejects the second insert with
//! [`StoreError::DuplicateCode`] and the caller decides whether to retry.

use tracing::{debug, warn};

use crate::code::{CODE_PREFIX, ItemCode};
use crate::error::StoreError;

/// Query capability the allocator needs from an item store.
pub trait ItemStore {
    /// Lexicographically greatest stored code starting with `prefix`.
    fn find_max_code(&self, prefix: &str) -> Result<Option<String>, StoreError>;
}

/// Next code in the sequence.
///
/// Store failures propagate. A stored code that does not parse falls back
/// to the first code in the sequence.
pub fn next_code<S: ItemStore + ?Sized>(store: &S) -> Result<ItemCode, StoreError> {
    let Some(last) = store.find_max_code(CODE_PREFIX)? else {
        debug!("no existing codes, starting sequence");
        return Ok(ItemCode::first());
    };

    let next = ItemCode::parse(&last).and_then(|code| code.next());
    match next {
        Some(code) => {
            debug!(last = %last, next = %code, "allocated item code");
            Ok(code)
        }
        None => {
            warn!(last = %last, "highest stored code is malformed, restarting at first code");
            Ok(ItemCode::first())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStore(Option<&'static str>);

    impl ItemStore for FixedStore {
        fn find_max_code(&self, _prefix: &str) -> Result<Option<String>, StoreError> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct BrokenStore;

    impl ItemStore for BrokenStore {
        fn find_max_code(&self, _prefix: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        assert_eq!(next_code(&FixedStore(None)).unwrap().as_str(), "kf-0001");
    }

    #[test]
    fn test_increments_highest() {
        assert_eq!(next_code(&FixedStore(Some("kf-0042"))).unwrap().as_str(), "kf-0043");
        assert_eq!(next_code(&FixedStore(Some("kf-0999"))).unwrap().as_str(), "kf-1000");
        assert_eq!(next_code(&FixedStore(Some("kf-9999"))).unwrap().as_str(), "kf-10000");
    }

    #[test]
    fn test_upper_case_stored_code_still_increments() {
        assert_eq!(next_code(&FixedStore(Some("KF-0007"))).unwrap().as_str(), "kf-0008");
    }

    #[test]
    fn test_malformed_falls_back_to_first() {
        assert_eq!(next_code(&FixedStore(Some("kf-legacy"))).unwrap().as_str(), "kf-0001");
        assert_eq!(next_code(&FixedStore(Some("kf-4294967295"))).unwrap().as_str(), "kf-0001");
    }

    #[test]
    fn test_store_error_propagates() {
        let err = next_code(&BrokenStore).unwrap_err();
        assert_eq!(err, StoreError::Unavailable("disk on fire".into()));
    }

    #[test]
    fn test_is_idempotent() {
        let store = FixedStore(Some("kf-0010"));
        assert_eq!(next_code(&store).unwrap(), next_code(&store).unwrap());
    }
}
