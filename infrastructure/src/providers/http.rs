//! Shared HTTP plumbing for provider adapters

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tux_application::ProviderFailure;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Longest error body echoed into a failure message
const ERROR_BODY_LIMIT: usize = 300;

pub(crate) fn build_client(request_timeout: Duration) -> Result<Client, ProviderFailure> {
    let mut builder = Client::builder().connect_timeout(CONNECT_TIMEOUT);
    if !request_timeout.is_zero() {
        builder = builder.timeout(request_timeout);
    }
    builder
        .build()
        .map_err(|e| ProviderFailure::Unavailable(format!("Failed to create HTTP client: {}", e)))
}

/// First non-empty value of the direct key or the named environment variable
pub fn resolve_api_key(direct: Option<&str>, env: &str) -> Option<String> {
    direct
        .map(str::to_string)
        .or_else(|| std::env::var(env).ok())
        .filter(|key| !key.trim().is_empty())
}

pub(crate) fn map_status(status: StatusCode, body: &str) -> ProviderFailure {
    let detail = format!("status {}: {}", status.as_u16(), truncate(body));
    match status.as_u16() {
        401 | 403 => ProviderFailure::AuthError(detail),
        429 => ProviderFailure::RateLimited(detail),
        408 | 504 => ProviderFailure::Timeout,
        _ => ProviderFailure::Unavailable(detail),
    }
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> ProviderFailure {
    if error.is_timeout() {
        ProviderFailure::Timeout
    } else if error.is_connect() {
        ProviderFailure::Unavailable(format!("Connection error: {}", error))
    } else if error.is_decode() {
        ProviderFailure::Malformed(format!("Undecodable body: {}", error))
    } else {
        ProviderFailure::Unavailable(format!("HTTP error: {}", error))
    }
}

/// Check the status, then decode the body as `T`
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderFailure> {
    let status = response.status();
    let body = response.text().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status(status, &body));
    }
    serde_json::from_str(&body)
        .map_err(|e| ProviderFailure::Malformed(format!("Failed to parse response: {}", e)))
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
