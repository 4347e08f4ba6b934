//! Multi-tenant row-level security demo: SQL, tenants and result evaluation.
//!
//! The statements here are executed by the `cloudfns` binary against a
//! PostgreSQL database. Policy enforcement itself is done by the database.

mod report;
mod secret;
pub mod sql;
mod tenants;

pub use report::{format_rows, RlsReport, UserRow};
pub use secret::{DbSecret, SecretError};
pub use tenants::{SampleUser, TenantAccount, DEMO_TENANTS, SAMPLE_USERS};
