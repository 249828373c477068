use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The markup could not be read from its source.
    #[error("failed to read html: {0}")]
    Read(#[from] std::io::Error),
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
