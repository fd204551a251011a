use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}
