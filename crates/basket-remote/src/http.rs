//! Shared HTTP plumbing for the remote service clients.

use std::time::Duration;

use basket_core::error::RemoteError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Builds the client shared by every remote adapter. Every request carries
/// JSON `Accept` and `Content-Type` headers and is bounded by `timeout`.
///
/// # Errors
///
/// Returns `RemoteError::Transport` if the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client, RemoteError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|err| RemoteError::Transport(err.to_string()))
}

/// Error body returned by the product and stock services.
#[derive(Debug, Deserialize)]
struct ErrorBag {
    code: Option<u32>,
    message: Option<String>,
}

pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

pub(crate) fn transport_error(err: &reqwest::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

/// Decodes a success body into `T`, or turns a non-success answer into
/// `RemoteError::Status` carrying whatever the error bag said.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|err| transport_error(&err))?;

    if !status.is_success() {
        let bag = serde_json::from_slice::<ErrorBag>(&body).ok();
        let code = bag.as_ref().and_then(|b| b.code);
        let message = bag
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_owned());
        return Err(RemoteError::Status {
            status: status.as_u16(),
            code,
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|err| RemoteError::Decode(err.to_string()))
}
