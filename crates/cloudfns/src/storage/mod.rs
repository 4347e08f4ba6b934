//! Item storage backends.
//!
//! This module provides concrete implementations of the `ItemRepository`
//! trait defined in `cloudfns_core::storage`. The backend is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): DynamoDB table using `aws-sdk-dynamodb`
//! - `inmemory`: process-local map, for local runs without AWS
//!
//! These features are mutually exclusive.
//!
//! # Examples
//!
//! Build with DynamoDB (default):
//! ```bash
//! cargo build -p cloudfns
//! ```
//!
//! Build with the in-memory backend:
//! ```bash
//! cargo build -p cloudfns --no-default-features --features inmemory
//! ```

#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!(
    "Features 'dynamodb' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "dynamodb", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'dynamodb' or 'inmemory' feature. \
    Example: cargo build -p cloudfns --features dynamodb"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbItemRepository;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::InMemoryItemRepository;
