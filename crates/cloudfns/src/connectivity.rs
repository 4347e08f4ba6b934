//! Outbound connectivity check.
//!
//! Sends a single `HEAD` request to a fixed URL and reports the status code.
//! Redirects are not followed so the first hop's status is what callers see.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Errors raised by the connectivity check.
#[derive(Debug, Error)]
pub enum ConnectivityError {
    #[error("invalid connectivity URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Request(#[source] reqwest::Error),
}

/// HTTP `HEAD` check against an external host.
#[derive(Debug, Clone)]
pub struct ConnectivityCheck {
    client: reqwest::Client,
    target: Url,
    timeout: Duration,
}

impl ConnectivityCheck {
    /// Creates a check for `target`, failing on malformed URLs.
    pub fn new(target: &str, timeout: Duration) -> Result<Self, ConnectivityError> {
        let target = Url::parse(target).map_err(|source| ConnectivityError::InvalidUrl {
            url: target.to_string(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(ConnectivityError::Client)?;

        Ok(Self {
            client,
            target,
            timeout,
        })
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Sends `HEAD` to the target and returns the response status code.
    pub async fn check(&self) -> Result<u16, ConnectivityError> {
        tracing::debug!(url = %self.target, "Sending connectivity check");

        let response = self
            .client
            .head(self.target.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ConnectivityError::Timeout(self.timeout)
                } else {
                    ConnectivityError::Request(e)
                }
            })?;

        let status = response.status().as_u16();
        tracing::info!(url = %self.target, status, "Connectivity check completed");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::Redirect, routing::get, Router};
    use tokio::net::TcpListener;

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_check_returns_upstream_status() {
        let url = spawn_server(Router::new().route("/", get(|| async { StatusCode::NO_CONTENT })))
            .await;
        let check = ConnectivityCheck::new(&url, Duration::from_secs(5)).unwrap();

        assert_eq!(check.check().await.unwrap(), 204);
    }

    #[tokio::test]
    async fn test_check_does_not_follow_redirects() {
        let url = spawn_server(
            Router::new().route("/", get(|| async { Redirect::permanent("/elsewhere") })),
        )
        .await;
        let check = ConnectivityCheck::new(&url, Duration::from_secs(5)).unwrap();

        assert_eq!(check.check().await.unwrap(), 308);
    }

    #[tokio::test]
    async fn test_check_fails_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let check =
            ConnectivityCheck::new(&format!("http://{addr}/"), Duration::from_secs(5)).unwrap();

        assert!(matches!(
            check.check().await,
            Err(ConnectivityError::Request(_))
        ));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = ConnectivityCheck::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ConnectivityError::InvalidUrl { .. }));
        assert!(err.to_string().starts_with("invalid connectivity URL 'not a url'"));
    }
}
