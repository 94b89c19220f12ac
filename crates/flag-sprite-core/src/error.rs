use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagSpriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Packing failed: {0}")]
    Packing(String),
    #[error("No source images to pack")]
    Empty,
}

pub type Result<T> = std::result::Result<T, FlagSpriteError>;
