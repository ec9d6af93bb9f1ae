//! `application/x-www-form-urlencoded` and query string decoding.

use std::collections::HashMap;

use super::percent::percent_decode;

/// Splits `text` on `&`, then each field on its first `=`.
///
/// Keys and values are percent-decoded separately. Fields without `=` are
/// ignored, and a repeated key keeps its last value.
pub fn decode_form(text: &str) -> HashMap<String, String> {
    text.split('&')
        .filter_map(|field| field.split_once('='))
        .map(|(key, value)| (percent_decode(key), percent_decode(value)))
        .collect()
}
