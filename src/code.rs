//! # Item Codes
//!
//! Every inventory item carries a human-readable code of the form `kf-NNNN`.
//! Codes are allocated once (see [`crate::allocator`]) and never change.
//!
//! ## Format
//!
//! ```text
//! kf-0042
//! ├┘ └──┴── numeric suffix, zero-padded to 4 digits
//! └──────── fixed prefix (lower-case)
//! ```
//!
//! Suffixes above 9999 render unpadded (`kf-12345`). Such codes are valid
//! items but are not recognized by the scanner, which only accepts the
//! canonical 4-digit form.
//!
//! ## Example
//!
//! ```
//! use kairoframe::code::ItemCode;
//!
//! let code = ItemCode::from_number(42);
//! assert_eq!(code.as_str(), "kf-0042");
//! assert_eq!(code.caption(), "KF-0042");
//! assert_eq!(
//!     code.public_url("https://inventory.example"),
//!     "https://inventory.example/kf-0042"
//! );
//! ```

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Fixed prefix shared by all item codes.
pub const CODE_PREFIX: &str = "kf-";

/// Zero-padding width of the numeric suffix.
pub const CODE_DIGITS: usize = 4;

/// Public site that item QR codes point at.
pub const DEFAULT_BASE_URL: &str = "https://kairoframe.lobo99.info";

/// A whole payload that is exactly one canonical code.
static CANONICAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)^(kf-[0-9]{4})$").expect("valid code pattern"));

/// A canonical code closing a URL path.
static SCAN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)/(kf-[0-9]{4})$").expect("valid scan pattern"));

/// A validated, normalized (lower-case, zero-padded) item code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    /// Render a sequence number as a code.
    pub fn from_number(n: u32) -> Self {
        Self(format!("{}{:0width$}", CODE_PREFIX, n, width = CODE_DIGITS))
    }

    /// The first code in the sequence (`kf-0001`).
    pub fn first() -> Self {
        Self::from_number(1)
    }

    /// Parse a code, accepting any case and any suffix width.
    ///
    /// Returns `None` unless the input is the prefix followed by one or more
    /// ASCII digits whose value fits in a `u32`. The suffix is re-padded, so
    /// `KF-5`, `kf-05` and `kf-0005` all parse to `kf-0005`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = strip_prefix_ignore_case(s, CODE_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self::from_number)
    }

    /// Numeric suffix.
    pub fn number(&self) -> u32 {
        // Constructors guarantee a u32-sized digit suffix.
        self.0[CODE_PREFIX.len()..].parse().unwrap_or(0)
    }

    /// The following code in the sequence, re-padded to 4 digits.
    ///
    /// Returns `None` on suffix overflow.
    pub fn next(&self) -> Option<Self> {
        self.number().checked_add(1).map(Self::from_number)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case text printed under the QR code.
    pub fn caption(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// URL embedded in the item's QR code: `<base>/<code>`.
    pub fn public_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Whether `s` is exactly a canonical 4-digit code (any case).
    pub fn is_canonical(s: &str) -> bool {
        CANONICAL_CODE.is_match(s)
    }

    /// Recover an item code from a scanned QR payload.
    ///
    /// Accepts either a bare canonical code or any string ending in
    /// `/<canonical code>` (typically the public URL). The result is
    /// lower-cased.
    ///
    /// ```
    /// use kairoframe::code::ItemCode;
    ///
    /// let code = ItemCode::from_scan("https://kairoframe.lobo99.info/KF-0007").unwrap();
    /// assert_eq!(code.as_str(), "kf-0007");
    /// assert!(ItemCode::from_scan("https://example.com/kf-7").is_none());
    /// ```
    pub fn from_scan(payload: &str) -> Option<Self> {
        let caps = SCAN_URL
            .captures(payload)
            .or_else(|| CANONICAL_CODE.captures(payload))?;
        Self::parse(caps.get(1)?.as_str())
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ItemCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ItemCode::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid item code '{}'", raw)))
    }
}

/// Case-insensitive ASCII prefix strip.
pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
