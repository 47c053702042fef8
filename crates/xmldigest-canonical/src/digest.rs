use crate::algorithms::DigestAlgorithm;
use base64::Engine;
use digest::DynDigest;
use serde::{Serialize, Serializer};

/// Text shown in place of a digest the build cannot compute.
pub const NOT_SUPPORTED: &str = "not supported";

/// Error returned when a digest cannot be computed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The algorithm is registered but not compiled into this build.
    #[error("message digest algorithm {0} is not provided")]
    Unavailable(DigestAlgorithm),
}

/// Digest bytes, or the marker for an algorithm this build lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestValue {
    /// Finalized digest bytes.
    Computed(Vec<u8>),
    /// The algorithm is not available.
    NotSupported,
}

/// One row of the digest table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestRow {
    /// Algorithm that produced the value.
    pub algorithm: DigestAlgorithm,
    /// Base64 (standard alphabet, padded) digest, or `null` when unsupported.
    #[serde(rename = "b64", serialize_with = "serialize_b64")]
    pub value: DigestValue,
}

impl DigestRow {
    /// Raw digest bytes, if computed.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.value {
            DigestValue::Computed(bytes) => Some(bytes),
            DigestValue::NotSupported => None,
        }
    }

    /// Whether the digest was computed.
    pub fn is_supported(&self) -> bool {
        self.bytes().is_some()
    }

    /// Base64 encoding of the digest, or [`NOT_SUPPORTED`].
    pub fn base64(&self) -> String {
        match self.bytes() {
            Some(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
            None => NOT_SUPPORTED.to_string(),
        }
    }

    /// Lowercase hex encoding of the digest, or [`NOT_SUPPORTED`].
    pub fn hex(&self) -> String {
        match self.bytes() {
            Some(bytes) => hex::encode(bytes),
            None => NOT_SUPPORTED.to_string(),
        }
    }
}

fn serialize_b64<S: Serializer>(value: &DigestValue, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        DigestValue::Computed(bytes) => {
            serializer.serialize_some(&base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        DigestValue::NotSupported => serializer.serialize_none(),
    }
}

/// Creates a fresh hashing context for `algorithm`.
pub fn hasher(algorithm: DigestAlgorithm) -> Result<Box<dyn DynDigest>, DigestError> {
    let hasher: Box<dyn DynDigest> = match algorithm {
        DigestAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
        DigestAlgorithm::Sha224 => Box::new(sha2::Sha224::default()),
        DigestAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
        DigestAlgorithm::Sha384 => Box::new(sha2::Sha384::default()),
        DigestAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
        DigestAlgorithm::Sha3_224 => Box::new(sha3::Sha3_224::default()),
        DigestAlgorithm::Sha3_256 => Box::new(sha3::Sha3_256::default()),
        DigestAlgorithm::Sha3_384 => Box::new(sha3::Sha3_384::default()),
        DigestAlgorithm::Sha3_512 => Box::new(sha3::Sha3_512::default()),
        DigestAlgorithm::Ripemd160 => Box::new(ripemd::Ripemd160::default()),
        DigestAlgorithm::Md5 => Box::new(md5::Md5::default()),
        #[cfg(feature = "legacy-digests")]
        DigestAlgorithm::Md2 => Box::new(md2::Md2::default()),
        #[cfg(feature = "legacy-digests")]
        DigestAlgorithm::Whirlpool => Box::new(whirlpool::Whirlpool::default()),
        #[cfg(not(feature = "legacy-digests"))]
        DigestAlgorithm::Md2 | DigestAlgorithm::Whirlpool => {
            return Err(DigestError::Unavailable(algorithm))
        }
    };
    Ok(hasher)
}

/// Computes a single digest over `bytes`.
pub fn compute_digest(algorithm: DigestAlgorithm, bytes: &[u8]) -> Result<Vec<u8>, DigestError> {
    let mut hasher = hasher(algorithm)?;
    hasher.update(bytes);
    Ok(hasher.finalize().into_vec())
}

/// Computes one row per registered algorithm, in declaration order.
///
/// Algorithms missing from the build produce [`DigestValue::NotSupported`]
/// rows; the remaining rows are still computed.
pub fn compute_digests(bytes: &[u8]) -> Vec<DigestRow> {
    DigestAlgorithm::all()
        .iter()
        .map(|&algorithm| {
            let value = match compute_digest(algorithm, bytes) {
                Ok(digest) => DigestValue::Computed(digest),
                Err(err) => {
                    tracing::warn!(algorithm = algorithm.library_name(), "{}", err);
                    DigestValue::NotSupported
                }
            };
            DigestRow { algorithm, value }
        })
        .collect()
}
