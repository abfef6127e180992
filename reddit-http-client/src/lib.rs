//! reddit HTTP Client Library
//!
//! A thin client for reddit's HTTP API: it authenticates a user, holds the
//! resulting session credentials, and dispatches form-encoded and
//! JSON-answered requests.
//!
//! # Features
//!
//! - Login flow producing an explicit [`Session`] (cookie + modhash)
//! - Authenticated GET/POST dispatch with JSON envelope error surfacing
//! - Form and query parameter codecs with strict decoding
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use reddit_http_client::{NO_PARAMS, RedditClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = RedditClient::new()?;
//!
//! // Log in; the session is an explicit value, not hidden state
//! let session = client.login("spez", "hunter2")?;
//!
//! // Authenticated request: pass the session in
//! let me = client.get("api/me.json", NO_PARAMS, Some(&session))?;
//! println!("{me}");
//!
//! // Unauthenticated request: pass None
//! let about = client.get("r/rust/about.json", &[("raw_json", "1")], None)?;
//! println!("{about}");
//! # Ok(())
//! # }
//! ```
//!
//! Sessions carry no expiry and there is no logout; dropping the [`Session`]
//! is the only way back to the unauthenticated state.

mod client;
mod codec;
mod envelope;
mod error;
mod session;

pub use client::{AuthedClient, RedditClient, RedditClientBuilder};
pub use codec::{NO_PARAMS, decode_form, decode_query, encode_form, encode_query};
pub use error::{ApiErrorEntry, RedditError};
pub use session::Session;
