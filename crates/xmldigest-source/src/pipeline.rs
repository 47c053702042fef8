//! Source + method + digest table composition.

use crate::errors::SourceError;
use crate::persist::SaveOptions;
use crate::source::SourceDocument;
use std::path::Path;
use xmldigest_canonical::{compute_digests, C14nMethod, DigestRow};

/// Holds the selected source, the selected method and the last digest table.
///
/// Changing the source drops the table; [`DigestPipeline::calculate`]
/// replaces it wholesale.
#[derive(Debug, Default)]
pub struct DigestPipeline {
    source: Option<SourceDocument>,
    method: C14nMethod,
    rows: Vec<DigestRow>,
}

impl DigestPipeline {
    /// Creates an empty pipeline using [`C14nMethod::None`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the source and clears the digest table.
    pub fn set_source(&mut self, source: SourceDocument) {
        self.source = Some(source);
        self.rows.clear();
    }

    /// Currently selected source.
    pub fn source(&self) -> Option<&SourceDocument> {
        self.source.as_ref()
    }

    /// Mutable access to the selected source.
    pub fn source_mut(&mut self) -> Option<&mut SourceDocument> {
        self.source.as_mut()
    }

    /// Selects the method used by the next [`calculate`](Self::calculate).
    pub fn set_method(&mut self, method: C14nMethod) {
        self.method = method;
    }

    /// Currently selected method.
    pub fn method(&self) -> C14nMethod {
        self.method
    }

    /// Transforms the source with the selected method and digests the output.
    ///
    /// Without a source the table is simply cleared. On failure the table
    /// is cleared and the error returned.
    pub fn calculate(&mut self) -> Result<&[DigestRow], SourceError> {
        self.rows.clear();
        let Some(source) = self.source.as_mut() else {
            return Ok(&self.rows);
        };

        let bytes = source.canonicalize(self.method)?;
        self.rows = compute_digests(bytes);
        tracing::debug!(
            path = %source.path().display(),
            method = self.method.name(),
            rows = self.rows.len(),
            "digest table computed"
        );
        Ok(&self.rows)
    }

    /// Rows from the last successful calculation.
    pub fn rows(&self) -> &[DigestRow] {
        &self.rows
    }

    /// Output of the selected method, if it has been computed.
    pub fn transformed_bytes(&self) -> Option<&[u8]> {
        self.source.as_ref()?.transformed_bytes(self.method)
    }

    /// Saves the output of the selected method to `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NothingToSave`] if nothing has been computed
    /// for the selected method, or [`SourceError::Write`].
    pub fn save<P: AsRef<Path>>(&self, dest: P, options: &SaveOptions) -> Result<(), SourceError> {
        match &self.source {
            Some(source) => source.save_transformed(self.method, dest, options),
            None => Err(SourceError::NothingToSave(self.method)),
        }
    }
}
