#![forbid(unsafe_code)]
//! Android string resources from a translation spreadsheet.
//!
//! Reads a translation sheet maintained outside the code base, and either generates
//! one `strings.xml` per language or checks that the checked-in files still match
//! the sheet.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetloc::{Localizer, config::load_configs};
//!
//! let localizer = Localizer::new();
//! for config in load_configs("localize.toml", None)? {
//!     localizer.localize(&config)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Sheet layout
//!
//! Row 0 of every worksheet is a header naming its columns:
//!
//! - `Identifier iOS`, `Identifier Android`, `Identifier Web`: per-platform keys
//! - one column per language title, e.g. `en`, `de`
//! - `Comment` or `Kommentar`: optional translator note
//!
//! Each value cell is sniffed to decide what it becomes:
//!
//! - lines like `one|%d apple` form a `<plurals>` element
//! - a JSON string array such as `["Mon","Tue"]` forms a `<string-array>`
//! - anything else is a plain `<string>`

pub mod config;
pub mod drift;
pub mod error;
pub mod formats;
pub mod localize;
pub mod parser;
pub mod sources;
pub mod traits;
pub mod transform;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::{LocalizationConfig, load_configs},
    error::Error,
    formats::{RenderOptions, render},
    localize::Localizer,
    parser::SheetParser,
    sources::open_source,
    traits::SheetSource,
    transform::ValueTransformer,
    types::{
        LocalizationEntry, ParsedSheet, Platform, QuantityKeyword, RawDocument, RawTable,
        TargetValue,
    },
};
