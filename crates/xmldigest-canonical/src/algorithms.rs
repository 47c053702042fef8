use crate::identifiers::LookupKey;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Supported message digest algorithms, in table order.
///
/// Every algorithm carries four identifiers, each unique across the catalog:
/// the canonical name (`SHA256`), the library name (`SHA-256`), the ISO/ITU
/// OID and the XML-DSig URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-1.
    #[serde(rename = "SHA1")]
    Sha1,
    /// SHA-224.
    #[serde(rename = "SHA224")]
    Sha224,
    /// SHA-256.
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA-384.
    #[serde(rename = "SHA384")]
    Sha384,
    /// SHA-512.
    #[serde(rename = "SHA512")]
    Sha512,
    /// SHA3-224.
    #[serde(rename = "SHA3-224")]
    Sha3_224,
    /// SHA3-256.
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    /// SHA3-384.
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    /// SHA3-512.
    #[serde(rename = "SHA3-512")]
    Sha3_512,
    /// RIPEMD-160.
    #[serde(rename = "RIPEMD160")]
    Ripemd160,
    /// MD2 (legacy).
    #[serde(rename = "MD2")]
    Md2,
    /// MD5.
    #[serde(rename = "MD5")]
    Md5,
    /// Whirlpool (legacy).
    #[serde(rename = "WHIRLPOOL")]
    Whirlpool,
}

impl DigestAlgorithm {
    const ALL: [DigestAlgorithm; 13] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Sha3_224,
        DigestAlgorithm::Sha3_256,
        DigestAlgorithm::Sha3_384,
        DigestAlgorithm::Sha3_512,
        DigestAlgorithm::Ripemd160,
        DigestAlgorithm::Md2,
        DigestAlgorithm::Md5,
        DigestAlgorithm::Whirlpool,
    ];

    /// All registered algorithms in declaration order.
    pub fn all() -> &'static [DigestAlgorithm] {
        &Self::ALL
    }

    /// Canonical name, e.g. `SHA256`.
    pub fn name(&self) -> &'static str {
        self.descriptor().0
    }

    /// Name used by hashing libraries, e.g. `SHA-256`.
    pub fn library_name(&self) -> &'static str {
        self.descriptor().1
    }

    /// ISO/ITU object identifier.
    pub fn oid(&self) -> &'static str {
        self.descriptor().2
    }

    /// XML-DSig algorithm URI.
    pub fn uri(&self) -> &'static str {
        self.descriptor().3
    }

    /// Length of the finalized digest in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Md2 | DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 | DigestAlgorithm::Ripemd160 => 20,
            DigestAlgorithm::Sha224 | DigestAlgorithm::Sha3_224 => 28,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Sha3_256 => 32,
            DigestAlgorithm::Sha384 | DigestAlgorithm::Sha3_384 => 48,
            DigestAlgorithm::Sha512 | DigestAlgorithm::Sha3_512 | DigestAlgorithm::Whirlpool => {
                64
            }
        }
    }

    fn descriptor(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            DigestAlgorithm::Sha1 => (
                "SHA1",
                "SHA-1",
                "1.3.14.3.2.26",
                "http://www.w3.org/2000/09/xmldsig#sha1",
            ),
            DigestAlgorithm::Sha224 => (
                "SHA224",
                "SHA-224",
                "2.16.840.1.101.3.4.2.4",
                "http://www.w3.org/2001/04/xmldsig-more#sha224",
            ),
            DigestAlgorithm::Sha256 => (
                "SHA256",
                "SHA-256",
                "2.16.840.1.101.3.4.2.1",
                "http://www.w3.org/2001/04/xmlenc#sha256",
            ),
            DigestAlgorithm::Sha384 => (
                "SHA384",
                "SHA-384",
                "2.16.840.1.101.3.4.2.2",
                "http://www.w3.org/2001/04/xmldsig-more#sha384",
            ),
            DigestAlgorithm::Sha512 => (
                "SHA512",
                "SHA-512",
                "2.16.840.1.101.3.4.2.3",
                "http://www.w3.org/2001/04/xmlenc#sha512",
            ),
            DigestAlgorithm::Sha3_224 => (
                "SHA3-224",
                "SHA3-224",
                "2.16.840.1.101.3.4.2.7",
                "http://www.w3.org/2007/05/xmldsig-more#sha3-224",
            ),
            DigestAlgorithm::Sha3_256 => (
                "SHA3-256",
                "SHA3-256",
                "2.16.840.1.101.3.4.2.8",
                "http://www.w3.org/2007/05/xmldsig-more#sha3-256",
            ),
            DigestAlgorithm::Sha3_384 => (
                "SHA3-384",
                "SHA3-384",
                "2.16.840.1.101.3.4.2.9",
                "http://www.w3.org/2007/05/xmldsig-more#sha3-384",
            ),
            DigestAlgorithm::Sha3_512 => (
                "SHA3-512",
                "SHA3-512",
                "2.16.840.1.101.3.4.2.10",
                "http://www.w3.org/2007/05/xmldsig-more#sha3-512",
            ),
            DigestAlgorithm::Ripemd160 => (
                "RIPEMD160",
                "RIPEMD160",
                "1.3.36.3.2.1",
                "http://www.w3.org/2001/04/xmlenc#ripemd160",
            ),
            DigestAlgorithm::Md2 => (
                "MD2",
                "MD2",
                "1.2.840.113549.2.2",
                "http://www.w3.org/2001/04/xmldsig-more#md2",
            ),
            DigestAlgorithm::Md5 => (
                "MD5",
                "MD5",
                "1.2.840.113549.2.5",
                "http://www.w3.org/2001/04/xmldsig-more#md5",
            ),
            DigestAlgorithm::Whirlpool => (
                "WHIRLPOOL",
                "WHIRLPOOL",
                "1.0.10118.3.0.55",
                "http://www.w3.org/2007/05/xmldsig-more#whirlpool",
            ),
        }
    }

    /// Looks up an algorithm by canonical name.
    pub fn for_name(name: &str) -> Result<Self, ValidationError> {
        lookup(&digest_index().by_name, "algorithm", name)
    }

    /// Looks up an algorithm by canonical name, falling back to `default`.
    pub fn for_name_or(name: &str, default: Self) -> Self {
        Self::for_name(name).unwrap_or(default)
    }

    /// Returns whether `name` is a registered canonical name.
    pub fn is_supported_name(name: &str) -> bool {
        digest_index().by_name.contains_key(name)
    }

    /// Looks up an algorithm by library name (e.g. `SHA-256`).
    pub fn for_library_name(name: &str) -> Result<Self, ValidationError> {
        lookup(&digest_index().by_library_name, "algorithm", name)
    }

    /// Looks up an algorithm by object identifier.
    pub fn for_oid(oid: &str) -> Result<Self, ValidationError> {
        lookup(&digest_index().by_oid, "algorithm", oid)
    }

    /// Looks up an algorithm by object identifier, falling back to `default`.
    pub fn for_oid_or(oid: &str, default: Self) -> Self {
        Self::for_oid(oid).unwrap_or(default)
    }

    /// Looks up an algorithm by XML-DSig URI.
    pub fn for_uri(uri: &str) -> Result<Self, ValidationError> {
        lookup(&digest_index().by_uri, "algorithm", uri)
    }

    /// Looks up an algorithm by XML-DSig URI, falling back to `default`.
    pub fn for_uri_or(uri: &str, default: Self) -> Self {
        Self::for_uri(uri).unwrap_or(default)
    }

    /// Resolves a free-form key: OIDs and URIs by shape, anything else by
    /// canonical name and then library name.
    pub fn resolve(key: &str) -> Result<Self, ValidationError> {
        match LookupKey::classify(key) {
            LookupKey::Oid(oid) => Self::for_oid(oid.as_ref()),
            LookupKey::Uri(uri) => Self::for_uri(uri.as_ref()),
            LookupKey::Name(name) => {
                Self::for_name(&name).or_else(|_| Self::for_library_name(&name))
            }
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.library_name())
    }
}

struct DigestIndex {
    by_name: HashMap<&'static str, DigestAlgorithm>,
    by_library_name: HashMap<&'static str, DigestAlgorithm>,
    by_oid: HashMap<&'static str, DigestAlgorithm>,
    by_uri: HashMap<&'static str, DigestAlgorithm>,
}

fn digest_index() -> &'static DigestIndex {
    static INDEX: OnceLock<DigestIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        let all = DigestAlgorithm::all();
        DigestIndex {
            by_name: index_by(all, DigestAlgorithm::name),
            by_library_name: index_by(all, DigestAlgorithm::library_name),
            by_oid: index_by(all, DigestAlgorithm::oid),
            by_uri: index_by(all, DigestAlgorithm::uri),
        }
    })
}

/// Builds a reverse lookup map over a fixed table.
pub(crate) fn index_by<T: Copy>(
    items: &[T],
    key: impl Fn(&T) -> &'static str,
) -> HashMap<&'static str, T> {
    items.iter().map(|item| (key(item), *item)).collect()
}

pub(crate) fn lookup<T: Copy>(
    map: &HashMap<&'static str, T>,
    kind: &'static str,
    key: &str,
) -> Result<T, ValidationError> {
    map.get(key).copied().ok_or_else(|| ValidationError::NotFound {
        kind,
        key: key.to_string(),
    })
}
