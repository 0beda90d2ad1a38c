// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]

//! # PDF Assembly
//!
//! Self-contained PDF document assembly in Rust.
//!
//! ## Core Features
//!
//! - **Object Graph**: Indirect objects numbered in allocation order, one body per id
//! - **Page Tree**: Flat `/Pages` root with per-page MediaBox and resources
//! - **Standard Fonts**: The 14 base Type1 fonts with WinAnsi text encoding
//! - **Templates**: Pages imported from other documents, stored as Form XObjects
//!   under a caller key and drawn on any number of output pages
//! - **Deterministic Output**: Sorted dictionaries, xref table with exact byte
//!   offsets, identical bytes for identical call sequences
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_assembly::writer::{Orientation, PaperSize, PdfDocument};
//!
//! # fn main() -> pdf_assembly::Result<()> {
//! let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
//! doc.add_blank_page();
//! doc.set_font("Helvetica", "", 12.0)?;
//! doc.text(72.0, 720.0, "Hello")?;
//! doc.save("hello.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// PDF object model
pub mod geometry;
pub mod object;

// Configuration
pub mod config;

// PDF writing/assembly
pub mod writer;

// Re-exports
pub use config::WriterConfig;
pub use error::{Error, Result};
pub use geometry::Rect;
pub use object::{Object, ObjectRef};
pub use writer::{DocumentWriter, Orientation, PaperSize, PdfDocument};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
