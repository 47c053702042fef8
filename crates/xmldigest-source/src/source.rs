//! Source documents with cached raw bytes, XML classification and
//! per-method transform output.

use crate::cache::CacheState;
use crate::errors::SourceError;
use crate::persist::{save_bytes, SaveOptions};
use crate::size::format_size;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xmldigest_canonical::{xml, C14nMethod, CanonicalizationResult, Canonicalizer, TransformReport};

/// Default length above which [`SourceInfo::caution`] is set (10 MiB).
pub const DEFAULT_CAUTION_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Summary of a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    /// Path the document was created with.
    pub path: PathBuf,
    /// Whether the path is a plain file that can be opened for reading.
    pub readable: bool,
    /// Whether the loaded bytes are well-formed XML.
    pub is_xml: bool,
    /// Number of loaded bytes, absent when loading failed.
    pub length: Option<u64>,
    /// Length formatted with a scaled unit.
    pub size: String,
    /// Set when the length exceeds the caution threshold.
    pub caution: bool,
}

/// A file on disk plus lazily computed, cached derived state.
///
/// The file is read at most once. A failed read is remembered and replayed
/// on every later call. Transformed output is cached per method, so
/// requesting one method never discards the output of another.
///
/// # Example
///
/// ```rust,no_run
/// use xmldigest_canonical::C14nMethod;
/// use xmldigest_source::SourceDocument;
///
/// let mut source = SourceDocument::new("signed.xml");
/// if source.is_well_formed_xml() {
///     let canonical = source.canonicalize(C14nMethod::C14nExclOmitComments)?;
///     println!("{} canonical bytes", canonical.len());
/// }
/// # Ok::<(), xmldigest_source::SourceError>(())
/// ```
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    raw: CacheState<Vec<u8>, Arc<io::Error>>,
    is_xml: Option<bool>,
    transformed: HashMap<C14nMethod, CanonicalizationResult>,
    last_method: Option<C14nMethod>,
}

impl SourceDocument {
    /// Creates a document for `path` without touching the filesystem.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            raw: CacheState::default(),
            is_xml: None,
            transformed: HashMap::new(),
            last_method: None,
        }
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file's bytes, reading from disk only on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`] if the file cannot be opened or read.
    /// The same error is returned by every later call.
    pub fn load_raw_bytes(&mut self) -> Result<&[u8], SourceError> {
        let path = &self.path;
        match self.raw.get_or_try_init(|| read_file(path)) {
            Ok(bytes) => Ok(bytes.as_slice()),
            Err(source) => Err(SourceError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Number of loaded bytes.
    pub fn len(&mut self) -> Result<u64, SourceError> {
        Ok(self.load_raw_bytes()?.len() as u64)
    }

    /// Returns `true` if the loaded bytes are empty.
    pub fn is_empty(&mut self) -> Result<bool, SourceError> {
        Ok(self.len()? == 0)
    }

    /// Whether the loaded bytes parse as well-formed XML.
    ///
    /// A load failure or parse error yields `false`. The verdict is cached.
    pub fn is_well_formed_xml(&mut self) -> bool {
        if let Some(verdict) = self.is_xml {
            return verdict;
        }

        let checked = match self.load_raw_bytes() {
            Ok(bytes) => xml::check_well_formed(bytes).map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        let verdict = match checked {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(path = %self.path.display(), %reason, "not well-formed XML");
                false
            }
        };
        tracing::info!(path = %self.path.display(), is_xml = verdict, "classified source");
        self.is_xml = Some(verdict);
        verdict
    }

    /// Methods that may be offered for this document.
    ///
    /// Only [`C14nMethod::None`] unless the document is well-formed XML.
    pub fn available_methods(&mut self) -> &'static [C14nMethod] {
        let all = C14nMethod::all();
        if self.is_well_formed_xml() {
            all
        } else {
            &all[..1]
        }
    }

    /// Transforms the loaded bytes with `method`.
    ///
    /// [`C14nMethod::None`] passes the raw bytes through. Output is cached
    /// per method and the method becomes the most recently used one.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Read`] if the file cannot be loaded
    /// - [`SourceError::Canonicalization`] if the transform fails, including
    ///   any real method applied to input that is not well-formed XML
    pub fn canonicalize(&mut self, method: C14nMethod) -> Result<&[u8], SourceError> {
        if !self.transformed.contains_key(&method) {
            let raw = self.load_raw_bytes()?;
            let result = Canonicalizer::new(method).canonicalize(raw).map_err(|source| {
                tracing::error!(
                    path = %self.path.display(),
                    method = method.name(),
                    error = %source,
                    "canonicalization failed"
                );
                SourceError::Canonicalization {
                    path: self.path.clone(),
                    method,
                    source,
                }
            })?;
            tracing::info!(
                path = %self.path.display(),
                method = method.name(),
                bytes = result.bytes.len(),
                "transformed source"
            );
            self.transformed.insert(method, result);
        }

        self.last_method = Some(method);
        Ok(self.transformed[&method].bytes.as_slice())
    }

    /// Cached output for `method`, if it has been computed.
    pub fn transformed_bytes(&self, method: C14nMethod) -> Option<&[u8]> {
        self.transformed
            .get(&method)
            .map(|result| result.bytes.as_slice())
    }

    /// Report collected while computing the output for `method`.
    pub fn transform_report(&self, method: C14nMethod) -> Option<&TransformReport> {
        self.transformed.get(&method).map(|result| &result.report)
    }

    /// The most recently requested method and its output.
    pub fn last_transformed(&self) -> Option<(C14nMethod, &[u8])> {
        let method = self.last_method?;
        self.transformed_bytes(method).map(|bytes| (method, bytes))
    }

    /// Writes the cached output for `method` to `dest`.
    ///
    /// # Errors
    ///
    /// - [`SourceError::NothingToSave`] if `method` has not been computed
    /// - [`SourceError::Write`] if the destination cannot be written
    pub fn save_transformed<P: AsRef<Path>>(
        &self,
        method: C14nMethod,
        dest: P,
        options: &SaveOptions,
    ) -> Result<(), SourceError> {
        let bytes = self
            .transformed_bytes(method)
            .ok_or(SourceError::NothingToSave(method))?;
        save_bytes(bytes, dest, options)
    }

    /// Whether the path is a plain file that can be opened for reading.
    pub fn is_readable(&self) -> bool {
        let is_file = fs::metadata(&self.path)
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        is_file && File::open(&self.path).is_ok()
    }

    /// The file's current length on disk, formatted with a scaled unit.
    ///
    /// Falls back to the loaded length when the file can no longer be
    /// inspected; an unknown length formats as `0 B`.
    pub fn human_readable_size(&self) -> String {
        let len = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => self.raw.get().map_or(0, |bytes| bytes.len() as u64),
        };
        format_size(len)
    }

    /// Loads and classifies the document and summarizes it.
    pub fn info(&mut self, caution_threshold: u64) -> SourceInfo {
        let length = self.len().ok();
        let is_xml = self.is_well_formed_xml();
        SourceInfo {
            path: self.path.clone(),
            readable: self.is_readable(),
            is_xml,
            length,
            size: self.human_readable_size(),
            caution: length.is_some_and(|len| len > caution_threshold),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, Arc<io::Error>> {
    match fs::read(path) {
        Ok(bytes) => {
            tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded source");
            Ok(bytes)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load source");
            Err(Arc::new(err))
        }
    }
}
