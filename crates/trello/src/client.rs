//! Trello REST client.
//!
//! Implements the [`BoardApi`] port over `https://api.trello.com/1`.
//! Construction is pure binding — no network I/O happens until one of the
//! port operations is awaited. All transport detail, including the upstream
//! `invalid id` sentinel, is confined to this module.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use connector::{ApiError, ApiResult, Board, BoardApi, BoardId, ConnectorError};

use crate::credentials::OAuthCredentials;

const BASE_URL: &str = "https://api.trello.com/1";

/// The literal body the Trello API returns in place of a structured error
/// when a path references an identifier it does not know.
const INVALID_ID_SENTINEL: &str = "invalid id";

/// Longest slice of an upstream error body carried into error messages.
const ERROR_BODY_LIMIT: usize = 500;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Authenticated, stateless-per-call Trello client handle.
pub struct TrelloApi {
    client: reqwest::Client,
    app_key: String,
    access_token: String,
}

impl TrelloApi {
    /// Binds a client to the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Session`] when the underlying HTTP client
    /// cannot be constructed (e.g. TLS backend initialisation failure).
    pub fn new(credentials: &OAuthCredentials) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ConnectorError::Session {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            app_key: credentials.app_key().to_owned(),
            access_token: credentials.access_token().to_owned(),
        })
    }

    /// Issues one authenticated GET and returns the classified response body.
    async fn get_text(&self, path: &str) -> ApiResult<String> {
        let url = format!("{BASE_URL}/{path}");
        debug!(%url, "issuing request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.app_key.as_str()),
                ("token", self.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|err| upstream(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| upstream(format!("failed to read response body from {url}: {err}")))?;

        classify_response(status, body).map_err(|err| {
            error!(%url, %err, "request failed");
            err
        })
    }

    /// GET a path and decode the response as a JSON array.
    async fn get_array(&self, path: &str) -> ApiResult<Vec<Value>> {
        let body = self.get_text(path).await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|err| upstream(format!("unexpected response from {path}: {err}")))?;
        match value {
            Value::Array(items) => Ok(items),
            other => Err(upstream(format!(
                "unexpected response from {path}: expected an array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

#[async_trait]
impl BoardApi for TrelloApi {
    async fn member_boards(&self, member: &str) -> ApiResult<Vec<Board>> {
        let items = self.get_array(&format!("members/{member}/boards")).await?;
        items.into_iter().map(parse_board).collect()
    }

    async fn lists_on_board(&self, board: &BoardId) -> ApiResult<Vec<Value>> {
        self.get_array(&format!("boards/{board}/lists")).await
    }

    async fn cards_on_board(&self, board: &BoardId) -> ApiResult<Vec<Value>> {
        self.get_array(&format!("boards/{board}/cards")).await
    }
}

/// Single boundary between the upstream wire contract and [`ApiError`].
///
/// The `invalid id` sentinel is recognised here and nowhere else; the raw
/// string never propagates inward. Everything else non-2xx becomes an
/// upstream error carrying the status and a truncated body.
fn classify_response(status: StatusCode, body: String) -> ApiResult<String> {
    if body.trim() == INVALID_ID_SENTINEL {
        return Err(ApiError::InvalidId);
    }
    if !status.is_success() {
        return Err(upstream(format!(
            "HTTP {}: {}",
            status.as_u16(),
            truncate(&body, ERROR_BODY_LIMIT)
        )));
    }
    Ok(body)
}

fn parse_board(value: Value) -> ApiResult<Board> {
    #[derive(Deserialize)]
    struct RawBoard {
        id: String,
        name: String,
    }

    let raw: RawBoard = serde_json::from_value(value.clone())
        .map_err(|err| upstream(format!("malformed board object in listing: {err}")))?;
    let id = BoardId::new(raw.id)
        .ok_or_else(|| upstream("malformed board object in listing: empty id".to_owned()))?;
    Ok(Board {
        id,
        name: raw.name,
        raw: value,
    })
}

fn upstream(message: String) -> ApiError {
    ApiError::Upstream { message }
}

fn truncate(body: &str, limit: usize) -> String {
    if body.chars().count() > limit {
        let head: String = body.chars().take(limit).collect();
        format!("{head}... (truncated)")
    } else {
        body.to_owned()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn sentinel_body_classifies_as_invalid_id() {
        // Trello surfaces an unknown id as a 400 with this literal body.
        let err = classify_response(StatusCode::BAD_REQUEST, "invalid id".to_owned()).unwrap_err();
        assert_eq!(err, ApiError::InvalidId);

        // Whitespace around the sentinel still counts.
        let err = classify_response(StatusCode::OK, "invalid id\n".to_owned()).unwrap_err();
        assert_eq!(err, ApiError::InvalidId);
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED, "invalid token")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, "oops")]
    fn non_success_status_classifies_as_upstream(#[case] status: StatusCode, #[case] body: &str) {
        let err = classify_response(status, body.to_owned()).unwrap_err();
        match err {
            ApiError::Upstream { message } => {
                assert!(message.starts_with(&format!("HTTP {}", status.as_u16())));
                assert!(message.contains(body));
            }
            ApiError::InvalidId => panic!("expected Upstream"),
        }
    }

    #[test]
    fn successful_body_passes_through() {
        let body = classify_response(StatusCode::OK, "[]".to_owned()).unwrap();
        assert_eq!(body, "[]");
    }

    #[test]
    fn oversized_error_bodies_are_truncated() {
        let body = "x".repeat(2_000);
        let err = classify_response(StatusCode::BAD_GATEWAY, body).unwrap_err();
        match err {
            ApiError::Upstream { message } => {
                assert!(message.ends_with("... (truncated)"));
                assert!(message.len() < 600);
            }
            ApiError::InvalidId => panic!("expected Upstream"),
        }
    }

    #[test]
    fn board_objects_keep_their_full_payload() {
        let value = json!({"id": "abc123", "name": "Roadmap", "closed": false});
        let board = parse_board(value.clone()).unwrap();
        assert_eq!(board.id.as_str(), "abc123");
        assert_eq!(board.name, "Roadmap");
        assert_eq!(board.raw, value);
    }

    #[test]
    fn malformed_board_objects_are_rejected() {
        assert!(parse_board(json!({"name": "no id"})).is_err());
        assert!(parse_board(json!({"id": "", "name": "empty id"})).is_err());
    }
}
