use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use roxmltree::{Document, ParsingOptions};
use std::borrow::Cow;
use std::sync::OnceLock;
use thiserror::Error;

/// The encoding declaration must sit inside the XML declaration, which is
/// ASCII and short.
const DECLARATION_SCAN_LIMIT: usize = 200;

/// Error returned when bytes cannot be read as an XML document.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Input is treated as UTF-8 but is not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Input contains byte sequences that are malformed in its encoding.
    #[error("input is not valid {0}")]
    Encoding(&'static str),
    /// The XML declaration names an encoding that has no decoder.
    #[error("unsupported document encoding: {0}")]
    UnsupportedEncoding(String),
    /// Markup is not well-formed.
    #[error("malformed XML: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// Decodes raw bytes into document text.
///
/// A byte order mark decides the encoding and is dropped. Without one the
/// `encoding` pseudo-attribute of the XML declaration is honored, and
/// documents that declare nothing are read as UTF-8.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, XmlError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return transcode(&bytes[bom_len..], encoding);
    }
    match declared_encoding(bytes) {
        Some(label) => {
            let encoding = Encoding::for_label(label.as_bytes())
                .ok_or_else(|| XmlError::UnsupportedEncoding(label.clone()))?;
            tracing::trace!(label = %label, encoding = encoding.name(), "using declared encoding");
            transcode(bytes, encoding)
        }
        None => Ok(Cow::Borrowed(std::str::from_utf8(bytes)?)),
    }
}

fn transcode<'b>(bytes: &'b [u8], encoding: &'static Encoding) -> Result<Cow<'b, str>, XmlError> {
    if encoding == UTF_8 {
        return Ok(Cow::Borrowed(std::str::from_utf8(bytes)?));
    }
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(XmlError::Encoding(encoding.name()))
}

/// Label from `<?xml ... encoding="..."?>` at the very start of `bytes`.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    static DECLARATION: OnceLock<Regex> = OnceLock::new();
    let re = DECLARATION.get_or_init(|| {
        Regex::new(r#"^<\?xml\s[^?>]*?\bencoding\s*=\s*["']([A-Za-z][A-Za-z0-9._\-]*)["']"#)
            .expect("invalid regex")
    });
    let head = &bytes[..bytes.len().min(DECLARATION_SCAN_LIMIT)];
    let label = re.captures(head)?.get(1)?;
    std::str::from_utf8(label.as_bytes()).ok().map(str::to_string)
}

/// Parses document text into a DOM. Internal DTD subsets are accepted.
pub fn parse(text: &str) -> Result<Document<'_>, XmlError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Checks that `bytes` decode and parse as a well-formed document.
pub fn check_well_formed(bytes: &[u8]) -> Result<(), XmlError> {
    let text = decode(bytes)?;
    parse(&text)?;
    Ok(())
}
