use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use xmldigest_canonical::{C14nMethod, CanonicalizationError};

/// Errors that can occur while loading, transforming or saving a source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be opened or fully read. Cached for the lifetime of
    /// the [`SourceDocument`](crate::SourceDocument).
    #[error("could not read \"{path}\": {source}")]
    Read {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure, shared by every repeated call.
        #[source]
        source: Arc<io::Error>,
    },
    /// The chosen transform could not be applied.
    #[error("cannot canonicalize \"{path}\" with {method}: {source}")]
    Canonicalization {
        /// Path of the source document.
        path: PathBuf,
        /// Method that was requested.
        method: C14nMethod,
        /// Failure reported by the canonicalizer.
        #[source]
        source: CanonicalizationError,
    },
    /// The destination could not be written.
    #[error("unable to save to \"{path}\": {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// No transformed output exists for the requested method.
    #[error("no transformed output for {0}")]
    NothingToSave(C14nMethod),
}
