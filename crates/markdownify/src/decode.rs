//! Decoding of HTML file bytes.

use std::borrow::Cow;

use encoding_rs::Encoding;
use log::debug;
use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// How far into the document a `<meta charset>` declaration is looked for
const SNIFF_LIMIT: usize = 1024;

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// Decode HTML bytes to a string.
///
/// 1. UTF-8, honoring a byte order mark
/// 2. If malformed, the encoding declared by `<meta charset>` or
///    `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 3. Otherwise Windows-1252, which accepts any byte sequence
pub fn decode_html(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let encoding = declared_encoding(bytes).unwrap_or(encoding_rs::WINDOWS_1252);
    debug!("input is not UTF-8, decoding as {}", encoding.name());
    let (result, _, _) = encoding.decode(bytes);
    result
}

/// Encoding named by a `<meta>` charset declaration near the start of the document
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LIMIT)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}
