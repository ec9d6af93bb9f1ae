//! `Content-Type` parsing and decoder selection.

use std::collections::HashMap;

/// Media type used internally to decode a query string with the urlencoded rules.
pub const QUERY_MEDIA_TYPE: &str = "inlink";

/// A `Content-Type` value split into its media type and parameters.
///
/// `multipart/form-data; boundary=X` parses to media type `multipart/form-data`
/// and parameters `{boundary: X}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeSpec {
    media_type: String,
    parameters: HashMap<String, String>,
}

impl ContentTypeSpec {
    /// Splits `raw` on `;`. The first segment is the media type; every later
    /// segment containing `=` is a parameter, with key and value left-trimmed.
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split(';');
        let media_type = segments.next().unwrap_or_default().trim().to_owned();

        let parameters = segments
            .filter_map(|segment| segment.split_once('='))
            .map(|(key, value)| (key.trim_start().to_owned(), value.trim_start().to_owned()))
            .collect();

        Self { media_type, parameters }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    /// Selects the decoder for this media type.
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::lookup(&self.media_type)
    }
}

/// The payload decoders this server knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Query,
    UrlEncoded,
    Json,
    Multipart,
}

impl MediaKind {
    /// Maps a media type to its decoder; `None` for anything unrecognized.
    pub fn lookup(media_type: &str) -> Option<Self> {
        const TABLE: [(&str, MediaKind); 4] = [
            (QUERY_MEDIA_TYPE, MediaKind::Query),
            ("application/x-www-form-urlencoded", MediaKind::UrlEncoded),
            ("application/json", MediaKind::Json),
            ("multipart/form-data", MediaKind::Multipart),
        ];

        TABLE.iter().find(|(name, _)| name.eq_ignore_ascii_case(media_type)).map(|(_, kind)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_only() {
        let spec = ContentTypeSpec::parse("application/json");
        assert_eq!(spec.media_type(), "application/json");
        assert!(spec.parameters().is_empty());
        assert_eq!(spec.kind(), Some(MediaKind::Json));
    }

    #[test]
    fn with_parameters() {
        let spec = ContentTypeSpec::parse("multipart/form-data; boundary=----abc; charset=utf-8");
        assert_eq!(spec.media_type(), "multipart/form-data");
        assert_eq!(spec.parameter("boundary"), Some("----abc"));
        assert_eq!(spec.parameter("charset"), Some("utf-8"));
        assert_eq!(spec.kind(), Some(MediaKind::Multipart));
    }

    #[test]
    fn parameter_value_keeps_inner_equals() {
        let spec = ContentTypeSpec::parse("multipart/form-data;boundary=a=b");
        assert_eq!(spec.parameter("boundary"), Some("a=b"));
    }

    #[test]
    fn unknown_media_type() {
        assert_eq!(ContentTypeSpec::parse("text/csv").kind(), None);
        assert_eq!(ContentTypeSpec::parse("").kind(), None);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(MediaKind::lookup("Application/X-WWW-Form-Urlencoded"), Some(MediaKind::UrlEncoded));
        assert_eq!(MediaKind::lookup(QUERY_MEDIA_TYPE), Some(MediaKind::Query));
    }
}
