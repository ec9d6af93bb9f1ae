//! Percent-decoding for url-encoded text.
//!
//! `+` decodes to a space and `%XX` to the byte `0xXX`. A malformed escape
//! (bad hex digits, or fewer than two characters left) is kept as a literal
//! `%`, so decoding never fails.

use percent_encoding::percent_decode_str;

/// Decodes `%XX` escapes and `+` in `input`.
///
/// Decoded bytes that do not form valid UTF-8 are replaced with `U+FFFD`.
pub fn percent_decode(input: &str) -> String {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::percent_decode;

    #[test]
    fn plus_is_space() {
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("+++"), "   ");
    }

    #[test]
    fn escapes() {
        assert_eq!(percent_decode("100%25"), "100%");
        assert_eq!(percent_decode("a%20b%2Fc"), "a b/c");
        assert_eq!(percent_decode("%e4%bd%a0%E5%A5%BD"), "你好");
        assert_eq!(percent_decode("a%2Bb"), "a+b");
    }

    #[test]
    fn malformed_escapes_are_literal() {
        assert_eq!(percent_decode("bad%"), "bad%");
        assert_eq!(percent_decode("bad%4"), "bad%4");
        assert_eq!(percent_decode("%zz1"), "%zz1");
        assert_eq!(percent_decode("%%41"), "%A");
    }

    #[test]
    fn plain_ascii_is_unchanged() {
        let text = "already-decoded_text.123";
        assert_eq!(percent_decode(text), text);
        assert_eq!(percent_decode(&percent_decode(text)), text);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(percent_decode("%FFok"), "\u{FFFD}ok");
    }
}
