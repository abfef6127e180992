//! reddit HTTP client implementation

use crate::codec;
use crate::envelope;
use crate::error::RedditError;
use crate::session::Session;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::fmt::Display;
use tracing::debug;

/// Identifying client name/version, sent as the User-Agent on every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fixed login endpoint path
const LOGIN_PATH: &str = "api/login";

/// The main reddit HTTP client
///
/// Dispatches GET and POST requests against a fixed base URL, form/query
/// encodes parameters, parses JSON responses, and surfaces envelope errors.
/// Sessions are passed explicitly per call; there is no implicit shared
/// login state.
///
/// Calls are blocking and synchronous. The client configures no timeout of
/// its own; supply one through [`RedditClientBuilder::client_builder`] if
/// needed.
///
/// # Example
///
/// ```no_run
/// use reddit_http_client::RedditClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RedditClient::new()?;
/// let session = client.login("spez", "hunter2")?;
///
/// let saved = client.get("saved.json", &[("limit", "25")], Some(&session))?;
/// println!("{saved}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RedditClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl RedditClient {
    /// Create a new client with rustls-tls configuration and the default
    /// base URL
    ///
    /// # Errors
    ///
    /// Returns `RedditError::ClientInit` if the HTTP client cannot be
    /// initialized.
    pub fn new() -> Result<Self, RedditError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reddit_http_client::RedditClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RedditClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> RedditClientBuilder {
        RedditClientBuilder::new()
    }

    /// Issue a GET request against `base_url + path`
    ///
    /// Parameters are serialized into the URL query string with the query
    /// encoding variant; an empty parameter set produces no query string.
    /// Authentication headers are attached when `session` is given.
    ///
    /// Returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// * `RedditError::Request` - network failure
    /// * `RedditError::InvalidStatus` - transport status was not 200
    /// * `RedditError::Json` - response body was not valid JSON
    /// * `RedditError::Api` - the response envelope reported errors
    pub fn get<K, V>(
        &self,
        path: &str,
        params: &[(K, V)],
        session: Option<&Session>,
    ) -> Result<Value, RedditError>
    where
        K: AsRef<str>,
        V: Display,
    {
        let mut url = self.endpoint(path)?;
        if !params.is_empty() {
            url.set_query(Some(&codec::encode_query(params)));
        }

        debug!(url = %url, authenticated = session.is_some(), "sending GET request");
        let request = Self::authorize(self.client.get(url), session)?;
        Self::read_response(request.send()?)
    }

    /// Issue a POST request against `base_url + path`
    ///
    /// Parameters are form-encoded into the request body, with
    /// `api_type=json` always appended to the outgoing parameter set so the
    /// server answers in the JSON envelope shape. Authentication headers are
    /// attached when `session` is given.
    ///
    /// Returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`RedditClient::get`].
    pub fn post<K, V>(
        &self,
        path: &str,
        params: &[(K, V)],
        session: Option<&Session>,
    ) -> Result<Value, RedditError>
    where
        K: AsRef<str>,
        V: Display,
    {
        let url = self.endpoint(path)?;

        let mut body = codec::encode_form(params);
        if !body.is_empty() {
            body.push('&');
        }
        body.push_str("api_type=json");

        debug!(url = %url, authenticated = session.is_some(), "sending POST request");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        let request = Self::authorize(request, session)?;
        Self::read_response(request.send()?)
    }

    /// Log in with a username and password, producing a [`Session`]
    ///
    /// POSTs the credentials to the login endpoint unauthenticated and
    /// extracts the session cookie and modhash from the response envelope's
    /// `json.data` object.
    ///
    /// There is no login-specific error kind: a wrong password surfaces as
    /// `RedditError::Api` with code `wrong-password`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reddit_http_client::RedditClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RedditClient::new()?;
    /// let session = client.login("spez", "hunter2")?;
    /// println!("modhash: {}", session.modhash());
    /// # Ok(())
    /// # }
    /// ```
    pub fn login(&self, user: &str, passwd: &str) -> Result<Session, RedditError> {
        debug!(user, "logging in");
        let response = self.post(LOGIN_PATH, &[("user", user), ("passwd", passwd)], None)?;
        envelope::login_session(&response)
    }

    /// Construct the request URL from the base URL and an API path
    fn endpoint(&self, path: &str) -> Result<reqwest::Url, RedditError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RedditError::ClientInit("Cannot modify base URL path".to_string()))?
            .pop_if_empty()
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }

    fn authorize(
        request: reqwest::blocking::RequestBuilder,
        session: Option<&Session>,
    ) -> Result<reqwest::blocking::RequestBuilder, RedditError> {
        match session {
            Some(session) => Ok(request.headers(session.auth_headers()?)),
            None => Ok(request),
        }
    }

    /// Check transport status, parse the JSON body, and surface envelope
    /// errors
    ///
    /// A non-200 status fails before any body parsing is attempted.
    fn read_response(response: reqwest::blocking::Response) -> Result<Value, RedditError> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RedditError::InvalidStatus { status });
        }

        let body: Value = serde_json::from_str(&response.text()?)?;
        envelope::check_errors(&body)?;
        Ok(body)
    }
}

/// Builder for configuring a reddit HTTP client
///
/// Allows customization of the base URL (useful for testing against mock
/// servers) and of the underlying HTTP client (timeouts, proxies). The
/// identifying User-Agent is always applied by [`build`](Self::build)
/// regardless of the supplied configuration.
#[derive(Debug)]
pub struct RedditClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl RedditClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// The URL is parsed and validated at builder time, catching errors
    /// early.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, RedditError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder
    ///
    /// Allows full customization of the HTTP client. The User-Agent will
    /// always be overridden with the crate's identifying name/version pair.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reddit_http_client::RedditClient;
    /// use std::time::Duration;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RedditClient::builder()
    ///     .client_builder(
    ///         reqwest::blocking::Client::builder()
    ///             .timeout(Duration::from_secs(30))
    ///             .use_rustls_tls(),
    ///     )
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<RedditClient, RedditError> {
        let base_url = self.base_url.unwrap_or_else(|| {
            reqwest::Url::parse("https://www.reddit.com")
                .expect("Default base URL should always be valid")
        });

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        // Always apply the identifying User-Agent
        let client = builder
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RedditError::ClientInit(e.to_string()))?;

        Ok(RedditClient { client, base_url })
    }
}

impl Default for RedditClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A client bound to an established session
///
/// Convenience wrapper that threads the same session into every request, for
/// callers that work with a single login rather than passing sessions
/// explicitly.
///
/// # Example
///
/// ```no_run
/// use reddit_http_client::{AuthedClient, NO_PARAMS, RedditClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let authed = AuthedClient::login(RedditClient::new()?, "spez", "hunter2")?;
/// let inbox = authed.get("message/inbox.json", NO_PARAMS)?;
/// println!("{inbox}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AuthedClient {
    client: RedditClient,
    session: Session,
}

impl AuthedClient {
    /// Bind an existing session to a client
    pub fn new(client: RedditClient, session: Session) -> Self {
        Self { client, session }
    }

    /// Log in and bind the resulting session
    ///
    /// # Errors
    ///
    /// Fails with whatever error [`RedditClient::login`] would raise.
    pub fn login(client: RedditClient, user: &str, passwd: &str) -> Result<Self, RedditError> {
        let session = client.login(user, passwd)?;
        Ok(Self { client, session })
    }

    /// Issue an authenticated GET request with the bound session
    pub fn get<K, V>(&self, path: &str, params: &[(K, V)]) -> Result<Value, RedditError>
    where
        K: AsRef<str>,
        V: Display,
    {
        self.client.get(path, params, Some(&self.session))
    }

    /// Issue an authenticated POST request with the bound session
    pub fn post<K, V>(&self, path: &str, params: &[(K, V)]) -> Result<Value, RedditError>
    where
        K: AsRef<str>,
        V: Display,
    {
        self.client.post(path, params, Some(&self.session))
    }

    /// The bound session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The underlying client
    pub fn client(&self) -> &RedditClient {
        &self.client
    }
}
