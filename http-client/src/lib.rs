//! Private HTTP command helpers for LinkPlay device communication
//!
//! This crate provides the stateless request helpers used to talk to
//! LinkPlay-based audio devices. Commands are encoded in the URL
//! (`<base>/httpapi.asp?command=<command>`) and answered with either a bare
//! `"OK"` acknowledgement or a JSON payload. The helpers share a pooled
//! `reqwest::Client` supplied by the caller; no connection state lives here.

mod error;

pub use error::HttpError;

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;

/// URL path and query prefix for the device command API
pub const API_COMMAND_PATH: &str = "httpapi.asp?command=";

/// Exact body a device returns to acknowledge a verified command
pub const OK_RESPONSE: &str = "OK";

/// Vendor-documented per-command timeout; not imposed by default, available
/// to callers that want tighter deadlines on the raw path
pub const API_TIMEOUT: Duration = Duration::from_secs(2);

/// Create a pooled HTTP client configured for LinkPlay devices
///
/// Devices serve their `https` endpoint with self-signed certificates, so
/// certificate validation is disabled. Callers that require strict TLS can
/// build their own client; every helper takes the client from outside.
pub fn create_client() -> Result<Client, HttpError> {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| HttpError::Network(e.to_string()))
}

/// Issue a command and return the response body verbatim
///
/// Builds the command URL, performs a GET through the shared client, and
/// returns the body of a 2xx response without interpreting it. A `timeout`
/// of `None` inherits the client's default; `Some` overrides it for this
/// request only.
///
/// # Errors
/// Returns `HttpError::Network` on connect failures or timeout expiry and
/// `HttpError::Status` on a non-2xx response.
pub async fn call_api(
    base_url: &str,
    client: &Client,
    command: &str,
    timeout: Option<Duration>,
) -> Result<String, HttpError> {
    let url = format!("{}/{}{}", base_url, API_COMMAND_PATH, command);
    tracing::debug!(url = %url, "sending device command");

    let mut request = client.get(&url);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HttpError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))
}

/// Issue a command and parse the response body as a JSON string map
///
/// # Errors
/// Returns `HttpError::Parse` if the body is not a JSON object of string
/// values; network and status failures propagate from [`call_api`].
pub async fn call_api_json(
    base_url: &str,
    client: &Client,
    command: &str,
) -> Result<HashMap<String, String>, HttpError> {
    let body = call_api(base_url, client, command, None).await?;
    serde_json::from_str(&body).map_err(|e| HttpError::Parse(e.to_string()))
}

/// Issue a command and verify the device acknowledged it
///
/// Succeeds only if the response body equals [`OK_RESPONSE`] exactly.
///
/// # Errors
/// Returns `HttpError::UnexpectedResponse` carrying the actual body when the
/// device answers with anything else; network and status failures propagate
/// from [`call_api`].
pub async fn call_api_ok(
    base_url: &str,
    client: &Client,
    command: &str,
) -> Result<(), HttpError> {
    let body = call_api(base_url, client, command, None).await?;
    if body == OK_RESPONSE {
        Ok(())
    } else {
        Err(HttpError::UnexpectedResponse(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Instant;

    #[test]
    fn test_create_client() {
        let _client = create_client().expect("client should build");
    }

    #[tokio::test]
    async fn test_call_api_returns_body_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/httpapi.asp?command=getMetaInfo")
            .with_status(200)
            .with_body("not json, not OK, still returned")
            .create_async()
            .await;

        let client = Client::new();
        let body = call_api(&server.url(), &client, "getMetaInfo", None)
            .await
            .unwrap();

        assert_eq!(body, "not json, not OK, still returned");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_api_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/httpapi.asp?command=getStatusEx")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = Client::new();
        let result = call_api(&server.url(), &client, "getStatusEx", None).await;

        match result.unwrap_err() {
            HttpError::Status(code) => assert_eq!(code, 500),
            other => panic!("Expected HttpError::Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_api_connection_refused() {
        // Bind and drop to get a port with no listener.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = Client::new();
        let result = call_api(
            &format!("http://127.0.0.1:{}", port),
            &client,
            "getStatusEx",
            None,
        )
        .await;

        match result.unwrap_err() {
            HttpError::Network(_) => {}
            other => panic!("Expected HttpError::Network, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_api_timeout_override() {
        // Accepts connections into the backlog but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = Client::new();
        let start = Instant::now();
        let result = call_api(
            &format!("http://{}", addr),
            &client,
            "getMetaInfo",
            Some(Duration::from_millis(100)),
        )
        .await;

        match result.unwrap_err() {
            HttpError::Network(_) => {}
            other => panic!("Expected HttpError::Network, got {:?}", other),
        }
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "override should fire well before any default timeout"
        );
    }

    #[tokio::test]
    async fn test_call_api_json_well_formed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/httpapi.asp?command=getStatusEx")
            .with_status(200)
            .with_body(r#"{"status":"play","vol":"50"}"#)
            .create_async()
            .await;

        let client = Client::new();
        let data = call_api_json(&server.url(), &client, "getStatusEx")
            .await
            .unwrap();

        assert_eq!(data.get("status").map(|s| s.as_str()), Some("play"));
        assert_eq!(data.get("vol").map(|s| s.as_str()), Some("50"));
    }

    #[tokio::test]
    async fn test_call_api_json_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/httpapi.asp?command=getStatusEx")
            .with_status(200)
            .with_body("<html>device setup page</html>")
            .create_async()
            .await;

        let client = Client::new();
        let result = call_api_json(&server.url(), &client, "getStatusEx").await;

        match result.unwrap_err() {
            HttpError::Parse(_) => {}
            other => panic!("Expected HttpError::Parse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_api_ok_accepts_marker() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/httpapi.asp?command=setPlayerCmd:pause")
            .with_status(200)
            .with_body("OK")
            .create_async()
            .await;

        let client = Client::new();
        call_api_ok(&server.url(), &client, "setPlayerCmd:pause")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    // The acknowledgement check is an exact match; near-misses must fail.
    #[rstest]
    #[case("ERROR")]
    #[case("ok")]
    #[case("OK\n")]
    #[case("Failed")]
    #[tokio::test]
    async fn test_call_api_ok_rejects_other_bodies(#[case] body: &'static str) {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/httpapi.asp?command=setPlayerCmd:pause")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = Client::new();
        let result = call_api_ok(&server.url(), &client, "setPlayerCmd:pause").await;

        match result.unwrap_err() {
            HttpError::UnexpectedResponse(got) => assert_eq!(got, body),
            other => panic!("Expected HttpError::UnexpectedResponse, got {:?}", other),
        }
    }
}
