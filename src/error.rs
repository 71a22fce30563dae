//! # Error Types
//!
//! This module defines error types used throughout the kairoframe library.
//! Each area (store, range parsing, layout, attributes) has its own enum;
//! all of them fold into [`KairoError`].

use thiserror::Error;

/// Main error type for kairoframe operations
#[derive(Debug, Error)]
pub enum KairoError {
    /// Item store failures (lookup, insert, load)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Code range input could not be parsed
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// Label sheet cannot be laid out
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Attribute or item validation failure
    #[error("Validation error: {0}")]
    Validation(#[from] AttributeError),

    /// QR code generation error
    #[error("QR error: {0}")]
    Qr(String),

    /// Image loading or conversion error
    #[error("Image error: {0}")]
    Image(String),

    /// PDF assembly error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Invalid user input that has no narrower category
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by an [`ItemStore`](crate::allocator::ItemStore).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Another item already holds this code
    #[error("item code already exists: {0}")]
    DuplicateCode(String),

    /// No item with this code
    #[error("item not found: {0}")]
    NotFound(String),

    /// Backend failure (poisoned lock, unreadable file, ...)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from strict range parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range input is empty")]
    Empty,

    #[error("'{0}' is not a number or a-b range")]
    Malformed(String),

    #[error("range '{token}' is reversed (start {start} > end {end})")]
    Reversed { token: String, start: u32, end: u32 },
}

/// Errors from label sheet layout.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The label is larger than the printable area of the page
    #[error(
        "label {label_width}x{label_height}mm does not fit the printable area \
         {printable_width}x{printable_height}mm"
    )]
    LabelDoesNotFit {
        label_width: f32,
        label_height: f32,
        printable_width: f32,
        printable_height: f32,
    },

    /// Label dimensions outside the accepted bounds
    #[error("invalid label size: {0}")]
    InvalidSize(String),
}

/// Errors from category attribute validation.
#[derive(Debug, Error, PartialEq)]
pub enum AttributeError {
    #[error("attribute '{0}' is required")]
    Missing(String),

    #[error("attribute '{key}' expects {expected}")]
    WrongKind { key: String, expected: &'static str },

    #[error("attribute '{key}': '{value}' is not one of the allowed options")]
    UnknownOption { key: String, value: String },

    #[error("attribute '{key}': invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { key: String, value: String },

    #[error("attribute '{0}' is not defined for this category")]
    Unknown(String),

    #[error("select attribute '{0}' has no options")]
    NoOptions(String),
}
