use thiserror::Error;

/// Validation errors for registry lookups and identifier shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When no registered entry matches the lookup key.
    #[error("unsupported {kind}: {key}")]
    NotFound {
        /// Kind of registry entry that was looked up.
        kind: &'static str,
        /// Key that did not match any entry.
        key: String,
    },
}
