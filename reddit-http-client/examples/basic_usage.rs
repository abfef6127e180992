//! Basic usage example for the reddit HTTP client
//!
//! This example demonstrates how to:
//! - Create a client with default settings
//! - Create a client with custom base URL (for testing)
//! - Log in and obtain a session
//! - Issue authenticated and unauthenticated requests
//!
//! Note: This example requires real account credentials to run. Pass them
//! via the REDDIT_USER and REDDIT_PASSWD environment variables.

use reddit_http_client::{AuthedClient, NO_PARAMS, RedditClient};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let user = std::env::var("REDDIT_USER").expect("REDDIT_USER environment variable not set");
    let passwd =
        std::env::var("REDDIT_PASSWD").expect("REDDIT_PASSWD environment variable not set");

    // Example 1: Create a client with default settings
    println!("=== Example 1: Default Client ===");
    let client = RedditClient::new()?;
    println!("✓ Client created with default base URL (https://www.reddit.com)");

    // Example 2: Create a client with custom base URL (useful for testing)
    println!("\n=== Example 2: Custom Base URL ===");
    let _custom_client = RedditClient::builder()
        .base_url("https://www.reddit.com")? // Could be a mock server URL for testing
        .build()?;
    println!("✓ Client created with custom base URL");

    // Example 3: Create a client with custom HTTP configuration
    println!("\n=== Example 3: Custom HTTP Configuration ===");
    let _configured_client = RedditClient::builder()
        .client_builder(
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .use_rustls_tls(),
        )
        .build()?;
    println!("✓ Client created with custom timeout (30s)");

    // Unauthenticated request: no session needed
    println!("\n=== Unauthenticated Request ===");
    match client.get("r/rust/about.json", NO_PARAMS, None) {
        Ok(about) => {
            println!("✓ Fetched subreddit info");
            if let Some(title) = about.pointer("/data/title") {
                println!("Title: {title}");
            }
        }
        Err(e) => println!("✗ Request failed: {e}"),
    }

    // Log in and issue authenticated requests
    println!("\n=== Login ===");
    let session = match client.login(&user, &passwd) {
        Ok(session) => {
            println!("✓ Logged in, modhash: {}", session.modhash());
            session
        }
        Err(e) => {
            println!("✗ Login failed: {e}");
            return Ok(());
        }
    };

    println!("\n=== Authenticated Request ===");
    match client.get("api/me.json", NO_PARAMS, Some(&session)) {
        Ok(me) => println!("✓ Fetched account info: {me}"),
        Err(e) => println!("✗ Request failed: {e}"),
    }

    // The session can also be bound once instead of passed per call
    println!("\n=== Bound Session ===");
    let authed = AuthedClient::new(client, session);
    match authed.get("message/inbox.json", &[("limit", "5")]) {
        Ok(inbox) => println!("✓ Fetched inbox: {inbox}"),
        Err(e) => println!("✗ Request failed: {e}"),
    }

    Ok(())
}
