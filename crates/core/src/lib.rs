//! Functional core for the cloudfns handlers.
//!
//! Everything in this crate is pure: request dispatch, validation, SQL text,
//! report evaluation and error-to-status mapping. The `cloudfns` binary wires
//! these to DynamoDB, PostgreSQL and the network.

pub mod items;
pub mod rls;
pub mod storage;
