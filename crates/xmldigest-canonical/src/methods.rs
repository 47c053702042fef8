use crate::algorithms::{index_by, lookup};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// XML canonicalization methods, including the identity "no transform".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum C14nMethod {
    /// No transform; bytes are digested as read.
    #[default]
    #[serde(rename = "NONE")]
    None,
    /// Canonical XML 1.0, comments removed.
    #[serde(rename = "C14N_OMIT_COMMENTS")]
    C14nOmitComments,
    /// Canonical XML 1.0, comments kept.
    #[serde(rename = "C14N_WITH_COMMENTS")]
    C14nWithComments,
    /// Exclusive XML Canonicalization 1.0, comments removed.
    #[serde(rename = "C14N_EXCL_OMIT_COMMENTS")]
    C14nExclOmitComments,
    /// Exclusive XML Canonicalization 1.0, comments kept.
    #[serde(rename = "C14N_EXCL_WITH_COMMENTS")]
    C14nExclWithComments,
    /// Canonical XML 1.1, comments removed.
    #[serde(rename = "C14N11_OMIT_COMMENTS")]
    C14n11OmitComments,
    /// Canonical XML 1.1, comments kept.
    #[serde(rename = "C14N11_WITH_COMMENTS")]
    C14n11WithComments,
}

impl C14nMethod {
    const ALL: [C14nMethod; 7] = [
        C14nMethod::None,
        C14nMethod::C14nOmitComments,
        C14nMethod::C14nWithComments,
        C14nMethod::C14nExclOmitComments,
        C14nMethod::C14nExclWithComments,
        C14nMethod::C14n11OmitComments,
        C14nMethod::C14n11WithComments,
    ];

    /// All methods in declaration order.
    pub fn all() -> &'static [C14nMethod] {
        &Self::ALL
    }

    /// Canonical name, e.g. `C14N_OMIT_COMMENTS`.
    pub fn name(&self) -> &'static str {
        self.descriptor().0
    }

    /// Short human-facing label.
    pub fn text(&self) -> &'static str {
        self.descriptor().1
    }

    /// W3C algorithm URI; empty for [`C14nMethod::None`].
    pub fn uri(&self) -> &'static str {
        self.descriptor().2
    }

    /// Whether this method changes the input at all.
    pub fn is_transform(&self) -> bool {
        !matches!(self, C14nMethod::None)
    }

    /// Whether comment nodes survive the transform.
    pub fn with_comments(&self) -> bool {
        matches!(
            self,
            C14nMethod::C14nWithComments
                | C14nMethod::C14nExclWithComments
                | C14nMethod::C14n11WithComments
        )
    }

    /// Whether namespace rendering follows the exclusive rules.
    pub fn is_exclusive(&self) -> bool {
        matches!(
            self,
            C14nMethod::C14nExclOmitComments | C14nMethod::C14nExclWithComments
        )
    }

    fn descriptor(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            C14nMethod::None => ("NONE", "No XML canonicalization", ""),
            C14nMethod::C14nOmitComments => (
                "C14N_OMIT_COMMENTS",
                "XML c14n omit comments",
                "http://www.w3.org/TR/2001/REC-xml-c14n-20010315",
            ),
            C14nMethod::C14nWithComments => (
                "C14N_WITH_COMMENTS",
                "XML c14n with comments",
                "http://www.w3.org/TR/2001/REC-xml-c14n-20010315#WithComments",
            ),
            C14nMethod::C14nExclOmitComments => (
                "C14N_EXCL_OMIT_COMMENTS",
                "XML exclusive c14n omit comments",
                "http://www.w3.org/2001/10/xml-exc-c14n#",
            ),
            C14nMethod::C14nExclWithComments => (
                "C14N_EXCL_WITH_COMMENTS",
                "XML exclusive c14n with comments",
                "http://www.w3.org/2001/10/xml-exc-c14n#WithComments",
            ),
            C14nMethod::C14n11OmitComments => (
                "C14N11_OMIT_COMMENTS",
                "XML c14n11 omit comments",
                "http://www.w3.org/2006/12/xml-c14n11",
            ),
            C14nMethod::C14n11WithComments => (
                "C14N11_WITH_COMMENTS",
                "XML c14n11 with comments",
                "http://www.w3.org/2006/12/xml-c14n11#WithComments",
            ),
        }
    }

    /// Looks up a method by canonical name.
    pub fn for_name(name: &str) -> Result<Self, ValidationError> {
        lookup(&method_index().by_name, "canonicalization method", name)
    }

    /// Looks up a method by canonical name, falling back to `default`.
    pub fn for_name_or(name: &str, default: Self) -> Self {
        Self::for_name(name).unwrap_or(default)
    }

    /// Returns whether `name` is a registered canonical name.
    pub fn is_supported_name(name: &str) -> bool {
        method_index().by_name.contains_key(name)
    }

    /// Looks up a method by its short label.
    pub fn for_text(text: &str) -> Result<Self, ValidationError> {
        lookup(&method_index().by_text, "canonicalization method", text)
    }

    /// Looks up a method by W3C URI. The empty URI maps to [`C14nMethod::None`].
    pub fn for_uri(uri: &str) -> Result<Self, ValidationError> {
        lookup(&method_index().by_uri, "canonicalization method", uri)
    }

    /// Looks up a method by W3C URI, falling back to `default`.
    pub fn for_uri_or(uri: &str, default: Self) -> Self {
        Self::for_uri(uri).unwrap_or(default)
    }

    /// Resolves a method by name, URI or label, in that order.
    ///
    /// A blank key is rejected; only [`C14nMethod::for_uri`] maps the empty
    /// URI to [`C14nMethod::None`].
    pub fn resolve(key: &str) -> Result<Self, ValidationError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ValidationError::NotFound {
                kind: "canonicalization method",
                key: key.to_string(),
            });
        }
        Self::for_name(key)
            .or_else(|_| Self::for_uri(key))
            .or_else(|_| Self::for_text(key))
    }
}

impl fmt::Display for C14nMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

struct MethodIndex {
    by_name: HashMap<&'static str, C14nMethod>,
    by_text: HashMap<&'static str, C14nMethod>,
    by_uri: HashMap<&'static str, C14nMethod>,
}

fn method_index() -> &'static MethodIndex {
    static INDEX: OnceLock<MethodIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        let all = C14nMethod::all();
        MethodIndex {
            by_name: index_by(all, C14nMethod::name),
            by_text: index_by(all, C14nMethod::text),
            by_uri: index_by(all, C14nMethod::uri),
        }
    })
}
