//! Cached source documents, the transform pipeline and persistence.
//!
//! This crate provides:
//! - [`SourceDocument`]: a file plus cached raw bytes, XML classification
//!   and per-method canonical output
//! - [`DigestPipeline`]: source + method + digest table
//! - [`save_bytes`]: whole-buffer writes with optional fsync
//! - [`format_size`]: scaled, human-readable byte lengths
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xmldigest_canonical::C14nMethod;
//! use xmldigest_source::{DigestPipeline, SaveOptions, SourceDocument};
//!
//! let mut pipeline = DigestPipeline::new();
//! pipeline.set_source(SourceDocument::new("invoice.xml"));
//! pipeline.set_method(C14nMethod::C14nOmitComments);
//!
//! for row in pipeline.calculate()? {
//!     println!("{:<10} {}", row.algorithm, row.base64());
//! }
//! pipeline.save("invoice.c14n.xml", &SaveOptions::default())?;
//! # Ok::<(), xmldigest_source::SourceError>(())
//! ```
#![deny(missing_docs)]

mod cache;
mod errors;
/// Writing bytes to disk.
pub mod persist;
/// Digest pipeline composition.
pub mod pipeline;
mod size;
/// Source documents and their cached state.
pub mod source;

pub use errors::SourceError;
pub use persist::{save_bytes, SaveOptions};
pub use pipeline::DigestPipeline;
pub use size::format_size;
pub use source::{SourceDocument, SourceInfo, DEFAULT_CAUTION_THRESHOLD};
