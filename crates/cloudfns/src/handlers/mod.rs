pub mod connectivity;
pub mod error;
pub mod health;
pub mod items;
pub mod rls;

pub use error::AppError;
