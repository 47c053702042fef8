//! Canonicalization and digest primitives for xmldigest.
//!
//! This crate holds the fixed algorithm catalog (digest algorithms and W3C
//! XML canonicalization methods with their names, OIDs and URIs), the XML
//! canonicalizer, and the digest engine that turns a byte sequence into a
//! table of message digests.
//!
//! ```rust
//! use xmldigest_canonical::{compute_digests, C14nMethod, Canonicalizer};
//!
//! let result = Canonicalizer::new(C14nMethod::C14nOmitComments)
//!     .canonicalize(b"<a><!--c--><b/></a>")?;
//! assert_eq!(result.bytes, b"<a><b></b></a>");
//!
//! let rows = compute_digests(&result.bytes);
//! assert_eq!(rows.len(), 13);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// Digest algorithm catalog and reverse lookups.
pub mod algorithms;
/// XML canonicalization engine.
pub mod canonicalizer;
/// Internal DTD subset attribute declarations.
mod dtd;
/// Digest engine and result rows.
pub mod digest;
/// Identifier newtypes used to classify lookup keys.
pub mod identifiers;
/// Canonicalization method catalog and reverse lookups.
pub mod methods;
/// Transform reports.
pub mod report;
/// Validation and lookup errors.
pub mod validation;
/// XML decoding and parsing helpers.
pub mod xml;

pub use algorithms::DigestAlgorithm;
pub use canonicalizer::{CanonicalizationError, CanonicalizationResult, Canonicalizer};
pub use digest::{compute_digest, compute_digests, DigestError, DigestRow, DigestValue, NOT_SUPPORTED};
pub use identifiers::{AlgorithmUri, LookupKey, Oid};
pub use methods::C14nMethod;
pub use report::TransformReport;
pub use validation::ValidationError;
pub use xml::XmlError;
