//! Application state shared by all handlers.

use std::sync::Arc;

use cloudfns_core::storage::ItemRepository;

use crate::{connectivity::ConnectivityCheck, rls::RlsDemo};

/// Shared application state.
///
/// This is cloned for each request handler. Each handler family owns one
/// field and the three never interact.
#[derive(Clone)]
pub struct AppState {
    /// Item storage backend.
    pub item_repo: Arc<dyn ItemRepository>,
    /// Outbound HEAD check.
    pub connectivity: Arc<ConnectivityCheck>,
    /// Row-level security demo runner.
    pub rls: Arc<RlsDemo>,
}

impl AppState {
    pub fn new(
        item_repo: Arc<dyn ItemRepository>,
        connectivity: ConnectivityCheck,
        rls: RlsDemo,
    ) -> Self {
        Self {
            item_repo,
            connectivity: Arc::new(connectivity),
            rls: Arc::new(rls),
        }
    }
}
