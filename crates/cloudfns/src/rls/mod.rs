//! Row-level security demo against PostgreSQL.
//!
//! Provisions the `users` table, its tenant isolation policy and one role
//! per tenant, then reads the table back as each role.

mod error;
mod runner;
mod secrets;

pub use error::RlsError;
pub use runner::{DbTarget, RlsDemo};
pub use secrets::{SecretProvider, SecretsManagerProvider};
