use crate::errors::{AppError, AppResult};
use encoding_rs::Encoding;
use std::borrow::Cow;

/// Resolves a WHATWG encoding label such as `"utf-8"`, `"latin1"` or `"cp1252"`.
pub fn lookup_encoding(label: &str) -> AppResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| AppError::UnknownEncoding(label.to_string()))
}

/// Decodes `bytes` strictly: a malformed sequence is a `Decode` error, never a
/// replacement character. A byte order mark is kept as content.
pub fn decode(bytes: &[u8], label: &str) -> AppResult<String> {
    let encoding = lookup_encoding(label)?;
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| AppError::Decode {
            encoding: encoding.name().to_string(),
        })
}
