use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    Oid,
    "ISO/ITU object identifier in dotted decimal form (e.g. `2.16.840.1.101.3.4.2.1`).",
    r"^[0-2](\.(0|[1-9][0-9]*))+$"
);
newtype!(
    AlgorithmUri,
    "Absolute `http`/`https` URI naming an XML-DSig algorithm.",
    r"^https?://[^\s]+$"
);

/// A free-form registry key, classified by its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Dotted decimal object identifier.
    Oid(Oid),
    /// Algorithm URI.
    Uri(AlgorithmUri),
    /// Anything else is treated as a name.
    Name(String),
}

impl LookupKey {
    /// Classifies `key`; OIDs win over URIs, which win over names.
    pub fn classify(key: &str) -> Self {
        let key = key.trim();
        if let Ok(oid) = Oid::parse(key) {
            return LookupKey::Oid(oid);
        }
        if let Ok(uri) = AlgorithmUri::parse(key) {
            return LookupKey::Uri(uri);
        }
        LookupKey::Name(key.to_string())
    }
}
