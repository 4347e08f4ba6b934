//! cloudfns_client - CLI client for the cloudfns handlers.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::CloudfnsClient;
pub use error::{ClientError, Result};
