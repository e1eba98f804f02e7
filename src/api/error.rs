//! Failure taxonomy and envelope decoding for API calls.
//!
//! Every call either yields the success envelope or fails with the
//! server-reported error payload. Transport failures pass through untouched.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::WebResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The `errors` payload from a non-2xx response envelope.
    /// Displays as the bare server message.
    #[error("{0}")]
    Server(String),

    /// Network or transport failure from the underlying HTTP client.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected envelope shape.
    #[error("failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx envelope arrived without its `data` payload.
    #[error("response envelope is missing the data payload")]
    MissingData,
}

impl<T> WebResponse<T> {
    /// Take the inner `data` payload out of a success envelope.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }
}

/// Read a response body and decode it as an envelope of `T`.
///
/// Non-2xx statuses are decoded as an error envelope and raised as
/// `ApiError::Server` carrying exactly the `errors` value.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<WebResponse<T>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    decode_envelope(status, &body)
}

/// Status-aware envelope decoding, split out from the network read so the
/// unwrap behavior is testable against raw bodies.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<WebResponse<T>, ApiError> {
    if !status.is_success() {
        let envelope: WebResponse<serde_json::Value> = serde_json::from_slice(body)?;
        return Err(ApiError::Server(envelope.errors.unwrap_or_default()));
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let body = br#"{"data":"OK"}"#;
        let envelope: WebResponse<String> =
            decode_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(envelope.data.as_deref(), Some("OK"));
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn test_decode_error_envelope_raises_server_payload() {
        let body = br#"{"errors":"not found"}"#;
        let err = decode_envelope::<String>(StatusCode::NOT_FOUND, body).unwrap_err();

        match err {
            ApiError::Server(message) => assert_eq!(message, "not found"),
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[test]
    fn test_server_error_displays_bare_message() {
        let err = ApiError::Server("not found".to_string());
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn test_decode_error_envelope_without_errors_field() {
        let body = br#"{"data":null}"#;
        let err = decode_envelope::<String>(StatusCode::UNAUTHORIZED, body).unwrap_err();

        match err {
            ApiError::Server(message) => assert_eq!(message, ""),
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_unparseable_error_body() {
        let body = b"<html>Bad Gateway</html>";
        let err = decode_envelope::<String>(StatusCode::BAD_GATEWAY, body).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_into_data_missing_payload() {
        let envelope: WebResponse<String> =
            serde_json::from_str(r#"{"data":null}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
    }
}
