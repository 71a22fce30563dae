//! # Kairoframe - Inventory Codes and QR Label Sheets
//!
//! Kairoframe tracks audiovisual equipment by short item codes (`kf-0001`)
//! and prints sheets of adhesive labels carrying a logo, a QR code linking
//! to the item's public page, and the code as a caption. It provides:
//!
//! - **Code allocation**: next sequential code from the store's maximum
//! - **Range parsing**: `"1-10,15,20-22"` into label batches
//! - **Sheet layout**: row-major grid placement across A4 pages
//! - **PDF output**: components compiled to IR, optimized, rendered
//! - **Scanning**: recovering a code from a scanned QR payload
//!
//! ## Quick Start
//!
//! ```
//! use kairoframe::{
//!     components::{ComponentExt, LabelSheet},
//!     ir::Assets,
//!     media::{LabelSize, PageSpec},
//!     range,
//! };
//!
//! let ranges = range::parse("1-10,15,20-22");
//! assert_eq!(range::total_count(&ranges), 14);
//!
//! let codes = range::expand(&ranges);
//! let sheet = LabelSheet::new(&codes, LabelSize::SMALL, PageSpec::A4)?;
//! let pdf = sheet.build(PageSpec::A4, "labels", &Assets::default())?;
//! assert!(pdf.starts_with(b"%PDF"));
//!
//! # Ok::<(), kairoframe::error::KairoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`code`] | Item code format, parsing, scan extraction |
//! | [`allocator`] | Next sequential code |
//! | [`range`] | Range list parsing and summaries |
//! | [`media`] | Label presets, page and grid geometry |
//! | [`layout`] | Grid placement and per-label geometry |
//! | [`components`] | Label and sheet components |
//! | [`ir`] | Drawing ops, optimizer, PDF codegen |
//! | [`qr`] | QR code rasterization |
//! | [`labels`] | End-to-end label jobs |
//! | [`model`] | Items, status, typed attributes, placement |
//! | [`store`] | In-memory store with JSON persistence |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod allocator;
pub mod code;
pub mod components;
pub mod config;
pub mod error;
pub mod ir;
pub mod labels;
pub mod layout;
pub mod media;
pub mod metrics;
pub mod model;
pub mod qr;
pub mod range;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use code::ItemCode;
pub use error::KairoError;
