//! DynamoDB storage backend.
//!
//! Items live in a single table whose hash key is `ItemId`. Every other
//! attribute is converted from JSON as-is.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbItemRepository;
