use thiserror::Error;

/// Errors produced while turning a request into an [`super::ItemAction`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemRequestError {
    #[error("Method not allowed")]
    MethodNotAllowed(String),
    #[error("Missing item id in path")]
    MissingId,
    #[error("Invalid item id: {0}")]
    InvalidId(String),
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

impl ItemRequestError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed(_) => 405,
            Self::MissingId | Self::InvalidId(_) | Self::InvalidItem(_) => 400,
        }
    }
}
