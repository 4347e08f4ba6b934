//! HTTP client for the cloudfns API.

pub mod checks;
pub mod items;

use reqwest::Url;

use crate::error::{ClientError, Result};

/// HTTP client for the cloudfns API.
#[derive(Debug, Clone)]
pub struct CloudfnsClient {
    client: reqwest::Client,
    base_url: String,
}

impl CloudfnsClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a URL from path segments, percent-encoding each one.
    fn segments_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        if response.status().is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(error_from_response(response, resource).await)
        }
    }

    /// Handle responses with no body expected.
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response, resource).await)
        }
    }
}

async fn error_from_response(response: reqwest::Response, resource: &str) -> ClientError {
    let status = response.status().as_u16();
    if status == 404 {
        return ClientError::NotFound {
            resource: resource.to_string(),
        };
    }
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    ClientError::ServerError {
        status,
        message: error_message(&text),
    }
}

/// Extracts the message from an error body.
///
/// Handlers answer with either `{"error": "..."}` or a bare JSON string;
/// anything else is returned as-is.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("error") {
            Some(serde_json::Value::String(message)) => message.clone(),
            _ => body.to_string(),
        },
        Ok(serde_json::Value::String(message)) => message,
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_object() {
        assert_eq!(
            error_message(r#"{"error":"Method not allowed"}"#),
            "Method not allowed"
        );
    }

    #[test]
    fn test_error_message_from_json_string() {
        assert_eq!(error_message(r#""Error: timed out""#), "Error: timed out");
    }

    #[test]
    fn test_error_message_falls_back_to_text() {
        assert_eq!(
            error_message("Error: DB_HOST is not configured"),
            "Error: DB_HOST is not configured"
        );
        assert_eq!(error_message(r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = CloudfnsClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/livez"), "http://localhost:3000/livez");
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let client = CloudfnsClient::new("http://localhost:3000");
        let url = client.segments_url(&["items", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/items/a%20b%2Fc");
    }

    #[test]
    fn test_segments_keep_base_path() {
        let client = CloudfnsClient::new("http://localhost:3000/prod/");
        let url = client.segments_url(&["items", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/prod/items/abc");
    }
}
