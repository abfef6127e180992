//! API response envelope inspection
//!
//! Most endpoints wrap their payload as
//! `{ "json": { "errors": [[code, message], ...], "data": {...} } }`.
//! Both `json` and its fields are optional; bodies with another shape
//! (listings, raw objects) pass through untouched.

use crate::error::{ApiErrorEntry, RedditError};
use crate::session::Session;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct LoginData {
    cookie: Option<String>,
    modhash: Option<String>,
}

/// Fail if the envelope's `errors` array has any entries
///
/// Every entry is collected into the resulting [`RedditError::Api`]; the
/// first entry is the primary one.
pub(crate) fn check_errors(body: &Value) -> Result<(), RedditError> {
    let Some(raw) = body.pointer("/json/errors") else {
        return Ok(());
    };

    let pairs = Vec::<(String, String)>::deserialize(raw)?;
    if pairs.is_empty() {
        return Ok(());
    }

    let errors = pairs
        .into_iter()
        .map(|(code, message)| ApiErrorEntry {
            code: normalize_code(&code),
            message,
        })
        .collect();
    Err(RedditError::Api { errors })
}

/// Extract the session credentials from a login response envelope
pub(crate) fn login_session(body: &Value) -> Result<Session, RedditError> {
    let data = body
        .pointer("/json/data")
        .ok_or(RedditError::MissingField("data"))?;
    let data = LoginData::deserialize(data)?;

    let cookie = data.cookie.ok_or(RedditError::MissingField("cookie"))?;
    let modhash = data.modhash.ok_or(RedditError::MissingField("modhash"))?;
    Ok(Session::new(cookie, modhash))
}

/// Normalize a machine error code: lowercase, underscores become hyphens
fn normalize_code(code: &str) -> String {
    code.to_ascii_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("WRONG_PASSWORD"), "wrong-password");
        assert_eq!(normalize_code("RATELIMIT"), "ratelimit");
        assert_eq!(normalize_code("already_lowercase"), "already-lowercase");
    }

    #[test]
    fn test_check_errors_surfaces_first_entry_as_primary() {
        let body = json!({
            "json": { "errors": [["WRONG_PASSWORD", "invalid password"]] }
        });

        match check_errors(&body) {
            Err(RedditError::Api { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code, "wrong-password");
                assert_eq!(errors[0].message, "invalid password");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_errors_collects_all_entries() {
        let body = json!({
            "json": {
                "errors": [
                    ["BAD_CAPTCHA", "care to try these again?"],
                    ["RATELIMIT", "you are doing that too much"]
                ]
            }
        });

        match check_errors(&body) {
            Err(RedditError::Api { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].code, "bad-captcha");
                assert_eq!(errors[1].code, "ratelimit");
                assert_eq!(errors[1].message, "you are doing that too much");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_errors_passes_clean_envelopes() {
        assert!(check_errors(&json!({ "json": { "errors": [] } })).is_ok());
        assert!(check_errors(&json!({ "json": {} })).is_ok());
        assert!(check_errors(&json!({ "kind": "Listing", "data": {} })).is_ok());
        assert!(check_errors(&json!([1, 2, 3])).is_ok());
    }

    #[test]
    fn test_login_session_extracts_credentials() {
        let body = json!({
            "json": {
                "errors": [],
                "data": { "cookie": "12345,abcdef", "modhash": "f00dcafe" }
            }
        });

        let session = login_session(&body).unwrap();
        assert_eq!(session.cookie(), "12345,abcdef");
        assert_eq!(session.modhash(), "f00dcafe");
    }

    #[test]
    fn test_login_session_missing_data() {
        let body = json!({ "json": { "errors": [] } });
        assert!(matches!(
            login_session(&body),
            Err(RedditError::MissingField("data"))
        ));
    }

    #[test]
    fn test_login_session_missing_cookie() {
        let body = json!({ "json": { "data": { "modhash": "f00dcafe" } } });
        assert!(matches!(
            login_session(&body),
            Err(RedditError::MissingField("cookie"))
        ));
    }

    #[test]
    fn test_login_session_missing_modhash() {
        let body = json!({ "json": { "data": { "cookie": "12345,abcdef" } } });
        assert!(matches!(
            login_session(&body),
            Err(RedditError::MissingField("modhash"))
        ));
    }
}
