//! Parameter codec for the two urlencoded wire variants
//!
//! Parameter sets are ordered sequences of string key/value pairs. Two
//! encodings exist: the form variant (`application/x-www-form-urlencoded`,
//! used for POST bodies) encodes spaces as `+`, while the query variant
//! (used for URL query strings) encodes spaces as `%20`. Everything else
//! reserved is percent-escaped in both.
//!
//! Decoding is strict: a token without exactly one `=`, a truncated or
//! non-hex percent escape, or percent-decoded bytes that are not valid
//! UTF-8 all fail with [`RedditError::Decode`]. Decoded values are always
//! strings, so numeric values survive a round-trip only as their string
//! representation.

use crate::error::RedditError;
use std::fmt::Display;

/// Empty parameter set, for requests that take no parameters
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// Encode a parameter set in the form variant (spaces as `+`)
///
/// Values are coerced to their string representation before encoding.
///
/// # Example
///
/// ```
/// use reddit_http_client::encode_form;
///
/// let encoded = encode_form(&[("alpha", "1"), ("BETA", "two"), ("gam+ma", "thr ee")]);
/// assert_eq!(encoded, "alpha=1&BETA=two&gam%2Bma=thr+ee");
/// ```
pub fn encode_form<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: Display,
{
    join_pairs(params, form_escape)
}

/// Encode a parameter set in the query variant (spaces as `%20`)
pub fn encode_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: Display,
{
    join_pairs(params, query_escape)
}

/// Decode a form-encoded string back into an ordered parameter set
///
/// `+` decodes to a space. Inverse of [`encode_form`] for the key/value
/// content.
///
/// # Errors
///
/// Returns `RedditError::Decode` on malformed token structure or invalid
/// percent escapes.
pub fn decode_form(input: &str) -> Result<Vec<(String, String)>, RedditError> {
    split_pairs(input, true)
}

/// Decode a query-encoded string back into an ordered parameter set
///
/// `+` is a literal plus here. Inverse of [`encode_query`].
///
/// # Errors
///
/// Returns `RedditError::Decode` on malformed token structure or invalid
/// percent escapes.
pub fn decode_query(input: &str) -> Result<Vec<(String, String)>, RedditError> {
    split_pairs(input, false)
}

fn join_pairs<K, V>(params: &[(K, V)], escape: fn(&str) -> String) -> String
where
    K: AsRef<str>,
    V: Display,
{
    params
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key.as_ref()), escape(&value.to_string())))
        .collect::<Vec<_>>()
        .join("&")
}

fn form_escape(text: &str) -> String {
    // urlencoding always emits %20; the form variant wants +
    urlencoding::encode(text).replace("%20", "+")
}

fn query_escape(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

fn split_pairs(input: &str, plus_is_space: bool) -> Result<Vec<(String, String)>, RedditError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    input
        .split('&')
        .map(|token| {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| RedditError::Decode(format!("token without '=': {token:?}")))?;
            if value.contains('=') {
                return Err(RedditError::Decode(format!(
                    "token with more than one '=': {token:?}"
                )));
            }
            Ok((
                unescape(key, plus_is_space)?,
                unescape(value, plus_is_space)?,
            ))
        })
        .collect()
}

/// Strict percent-decoding of a single token
///
/// The lenient ecosystem decoders pass malformed escapes through untouched;
/// here they are decode errors.
fn unescape(text: &str, plus_is_space: bool) -> Result<String, RedditError> {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let (high, low) = match (bytes.get(i + 1), bytes.get(i + 2)) {
                    (Some(&high), Some(&low)) => (hex_nibble(high), hex_nibble(low)),
                    _ => {
                        return Err(RedditError::Decode(format!(
                            "truncated percent escape in {text:?}"
                        )));
                    }
                };
                match (high, low) {
                    (Some(high), Some(low)) => decoded.push(high << 4 | low),
                    _ => {
                        return Err(RedditError::Decode(format!(
                            "invalid percent escape in {text:?}"
                        )));
                    }
                }
                i += 3;
            }
            b'+' if plus_is_space => {
                decoded.push(b' ');
                i += 1;
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded)
        .map_err(|_| RedditError::Decode(format!("invalid UTF-8 after decoding {text:?}")))
}

fn hex_nibble(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_form_mixed_keys() {
        let encoded = encode_form(&[("alpha", "1"), ("BETA", "two"), ("gam+ma", "thr ee")]);
        assert_eq!(encoded, "alpha=1&BETA=two&gam%2Bma=thr+ee");
    }

    #[test]
    fn test_encode_form_coerces_numbers() {
        assert_eq!(encode_form(&[("count", 42)]), "count=42");
        assert_eq!(encode_form(&[("offset", -3)]), "offset=-3");
    }

    #[test]
    fn test_decode_form_mixed_keys() {
        let decoded = decode_form("alpha=1&BETA=two&gam%2Bma=thr+ee").unwrap();
        assert_eq!(
            decoded,
            vec![
                ("alpha".to_string(), "1".to_string()),
                ("BETA".to_string(), "two".to_string()),
                ("gam+ma".to_string(), "thr ee".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_query_uses_percent_twenty() {
        let encoded = encode_query(&[("alpha", "1"), ("BETA", "two"), ("gam+ma", "thr ee")]);
        assert_eq!(encoded, "alpha=1&BETA=two&gam%2Bma=thr%20ee");
    }

    #[test]
    fn test_decode_query_inverts_encode_query() {
        let decoded = decode_query("alpha=1&BETA=two&gam%2Bma=thr%20ee").unwrap();
        assert_eq!(
            decoded,
            decode_form("alpha=1&BETA=two&gam%2Bma=thr+ee").unwrap()
        );
    }

    #[test]
    fn test_decode_query_keeps_literal_plus() {
        let decoded = decode_query("a=b+c").unwrap();
        assert_eq!(decoded, vec![("a".to_string(), "b+c".to_string())]);
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(encode_form(NO_PARAMS), "");
        assert_eq!(decode_form("").unwrap(), Vec::new());
    }

    #[test]
    fn test_decode_token_without_separator() {
        let result = decode_form("alpha");
        assert!(matches!(result, Err(RedditError::Decode(_))));
    }

    #[test]
    fn test_decode_token_with_extra_separator() {
        let result = decode_form("a=b=c");
        assert!(matches!(result, Err(RedditError::Decode(_))));
    }

    #[test]
    fn test_decode_invalid_percent_escape() {
        let result = decode_form("a=%zz");
        assert!(matches!(result, Err(RedditError::Decode(_))));
    }

    #[test]
    fn test_decode_truncated_percent_escape() {
        let result = decode_form("a=%2");
        assert!(matches!(result, Err(RedditError::Decode(_))));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = decode_form("a=%FF%FE");
        assert!(matches!(result, Err(RedditError::Decode(_))));
    }

    proptest! {
        #[test]
        fn prop_form_round_trip(
            params in proptest::collection::vec((".{0,12}", ".{0,12}"), 0..6),
        ) {
            let encoded = encode_form(&params);
            let decoded = decode_form(&encoded).unwrap();
            prop_assert_eq!(decoded, params);
        }

        #[test]
        fn prop_query_round_trip(
            params in proptest::collection::vec((".{0,12}", ".{0,12}"), 0..6),
        ) {
            let encoded = encode_query(&params);
            let decoded = decode_query(&encoded).unwrap();
            prop_assert_eq!(decoded, params);
        }

        #[test]
        fn prop_form_and_query_agree_without_spaces(
            params in proptest::collection::vec(("[a-zA-Z0-9_]{1,8}", "[a-zA-Z0-9_.~-]{0,8}"), 0..6),
        ) {
            // The two variants only diverge on whitespace encoding
            prop_assert_eq!(encode_form(&params), encode_query(&params));
        }
    }
}
