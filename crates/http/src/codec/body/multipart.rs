//! `multipart/form-data` decoding.
//!
//! The payload is split on `--boundary`. Each part is split once on the blank
//! line into a header block and content. Only the `Content-Disposition` header
//! is consulted: its `name` keys the field, and a `filename` turns the field
//! into a [`FilePart`]. Parts without a `name` are dropped.

use std::collections::HashMap;

use bytes::Bytes;
use memchr::memmem;
use tracing::trace;

use crate::protocol::body::{FilePart, MultipartField};

const CRLF: &[u8] = b"\r\n";
const BLANK_LINE: &[u8] = b"\r\n\r\n";

pub fn decode_multipart(payload: &[u8], boundary: &str) -> HashMap<String, MultipartField> {
    let delimiter = format!("--{boundary}");
    let mut fields = HashMap::new();

    for part in split_all(payload, delimiter.as_bytes()) {
        // the preamble is empty and the closing delimiter leaves a trailing `--`
        if part.trim_ascii().is_empty() || part.starts_with(b"--") {
            continue;
        }

        let Some((head, content)) = split_once(part, BLANK_LINE) else {
            trace!(part_len = part.len(), "multipart part without header separator, skipped");
            continue;
        };

        let head = String::from_utf8_lossy(head);
        let Some(disposition) = content_disposition(&head) else {
            trace!("multipart part without content-disposition, skipped");
            continue;
        };

        let Some(name) = disposition.get("name") else {
            trace!("multipart part without name, skipped");
            continue;
        };

        let field = match disposition.get("filename") {
            Some(filename) => {
                let content = content.strip_suffix(CRLF).unwrap_or(content);
                MultipartField::File(FilePart::new(filename.clone(), Bytes::copy_from_slice(content)))
            }
            None => MultipartField::Text(String::from_utf8_lossy(content).trim().to_owned()),
        };

        fields.insert(name.clone(), field);
    }

    fields
}

/// Finds the `Content-Disposition` header (case-insensitive) and parses its
/// `;`-separated parameters, with surrounding quotes stripped from values.
fn content_disposition(head: &str) -> Option<HashMap<String, String>> {
    let value = head.split("\r\n").find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim().eq_ignore_ascii_case("content-disposition").then_some(value)
    })?;

    let params = value
        .split(';')
        .filter_map(|param| param.split_once('='))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), unquote(value.trim()).to_owned()))
        .collect();

    Some(params)
}

fn unquote(value: &str) -> &str {
    value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value)
}

fn split_all<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    for position in memmem::find_iter(haystack, needle) {
        parts.push(&haystack[start..position]);
        start = position + needle.len();
    }
    parts.push(&haystack[start..]);
    parts
}

fn split_once<'a>(haystack: &'a [u8], needle: &[u8]) -> Option<(&'a [u8], &'a [u8])> {
    let position = memmem::find(haystack, needle)?;
    Some((&haystack[..position], &haystack[position + needle.len()..]))
}
