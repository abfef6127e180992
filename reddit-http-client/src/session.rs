//! Session credentials and authentication headers

use crate::error::RedditError;
use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use zeroize::Zeroize;

/// Anti-forgery token header reddit expects on authenticated calls
const MODHASH_HEADER: HeaderName = HeaderName::from_static("x-modhash");

/// Credentials of an authenticated session
///
/// Holds the session cookie and the modhash returned by a successful login.
/// A `Session` is immutable after creation and carries no expiry; validity
/// is structural only — possessing one means a login succeeded at some
/// point, not that the server still honors it.
///
/// Requests are authenticated by passing `Some(&session)` to
/// [`RedditClient::get`](crate::RedditClient::get) and
/// [`RedditClient::post`](crate::RedditClient::post); passing `None` sends
/// the request unauthenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    cookie: String,
    modhash: String,
}

impl Session {
    /// Create a session from a cookie and modhash
    ///
    /// No validation is performed beyond holding the values; only
    /// [`RedditClient::login`](crate::RedditClient::login) produces sessions
    /// the server will accept.
    pub fn new(cookie: impl Into<String>, modhash: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            modhash: modhash.into(),
        }
    }

    /// The raw session cookie value
    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    /// The raw modhash value
    pub fn modhash(&self) -> &str {
        &self.modhash
    }

    /// Build the authentication headers for this session
    ///
    /// Returns exactly two headers: `Cookie: reddit_session=<escaped cookie>`
    /// and `X-Modhash: <raw modhash>`.
    ///
    /// # Errors
    ///
    /// Returns `RedditError::ClientInit` if the cookie or modhash contains
    /// bytes that cannot appear in an HTTP header value.
    pub fn auth_headers(&self) -> Result<HeaderMap, RedditError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(COOKIE, self.cookie_header()?);
        headers.insert(
            MODHASH_HEADER,
            HeaderValue::from_str(&self.modhash)
                .map_err(|_| RedditError::ClientInit("Invalid modhash format".to_string()))?,
        );
        Ok(headers)
    }

    /// Create a secure cookie header value from the session cookie
    ///
    /// The header value is marked sensitive and the temporary string is
    /// zeroized after use.
    fn cookie_header(&self) -> Result<HeaderValue, RedditError> {
        let mut cookie_string = format!("reddit_session={}", urlencoding::encode(&self.cookie));
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| RedditError::ClientInit("Invalid session cookie format".to_string()))?;

        let mut sensitive_header = header_value;
        sensitive_header.set_sensitive(true);
        cookie_string.zeroize();

        Ok(sensitive_header)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookie", &"<redacted>")
            .field("modhash", &self.modhash)
            .finish()
    }
}
