use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("failed to parse selector schema: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("selector schema declares no candidate fields")]
    NoFields,
    #[error("'{0}' is not a valid hex color")]
    InvalidColor(String),
    #[error("choice {index} has no stored option")]
    NoActiveOption { index: usize },
}
