//! Items CRUD: item model, request validation and dispatch.

mod dispatch;
mod error;
mod types;

pub use dispatch::{dispatch, error_body, ItemAction, ItemRequest, ITEM_NOT_FOUND};
pub use error::ItemRequestError;
pub use types::{Item, ItemId, ITEM_KEY};
