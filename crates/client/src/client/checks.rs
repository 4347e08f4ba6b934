//! Connectivity, RLS demo and liveness client methods.

use cloudfns_core::rls::RlsReport;
use serde::{Deserialize, Serialize};

use super::{error_message, CloudfnsClient};
use crate::error::Result;

/// Outcome of the server's outbound connectivity check.
///
/// The server relays the upstream status code, so a non-2xx status is still
/// a completed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityResult {
    pub status: u16,
    pub message: String,
}

impl CloudfnsClient {
    /// Liveness check.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response, "livez").await
    }

    /// Ask the server to check its outbound connectivity.
    pub async fn connectivity(&self) -> Result<ConnectivityResult> {
        let response = self.client.get(self.url("/connectivity")).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ConnectivityResult {
            status,
            message: error_message(&body),
        })
    }

    /// Run the RLS demo and return the structured report.
    pub async fn rls_report(&self) -> Result<RlsReport> {
        let response = self
            .client
            .get(self.url("/rls-demo"))
            .query(&[("format", "json")])
            .send()
            .await?;
        self.handle_response(response, "rls-demo").await
    }
}
