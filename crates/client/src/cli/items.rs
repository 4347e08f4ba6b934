//! Item CLI commands.

use clap::{Parser, Subcommand};

/// Item management commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Available item actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// Store an item.
    Put {
        /// Item as a JSON object with a string `ItemId`.
        item: String,
    },
    /// Get item by ID.
    Get {
        /// Item ID.
        id: String,
    },
    /// Delete item by ID.
    Delete {
        /// Item ID.
        id: String,
    },
}
