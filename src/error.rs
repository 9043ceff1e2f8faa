use std::fmt::{Debug, Display, Error, Formatter};
use std::path::PathBuf;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EmblemError {
    // Input boundary
    ResourceNotFound(PathBuf),
    DecodeError(PathBuf, String),
    InvalidConfig(String),

    // Encoding
    EncodingError(String),

    // Output boundary
    IOWriteError(PathBuf, String),

    // Post-hoc scan check, advisory only
    ValidationMismatch { expected: String, found: Option<String> },
}

impl Display for EmblemError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::ResourceNotFound(path) => {
                write!(f, "Resource not found: {}", path.display())
            }
            Self::DecodeError(path, reason) => {
                write!(f, "Failed to decode image {}: {reason}", path.display())
            }
            Self::InvalidConfig(reason) => write!(f, "Invalid configuration: {reason}"),
            Self::EncodingError(reason) => write!(f, "Failed to encode QR symbol: {reason}"),
            Self::IOWriteError(path, reason) => {
                write!(f, "Failed to write {}: {reason}", path.display())
            }
            Self::ValidationMismatch { expected, found } => match found {
                Some(found) => {
                    write!(f, "Scan check mismatch: expected {expected:?}, found {found:?}")
                }
                None => write!(f, "Scan check found no decodable symbol, expected {expected:?}"),
            },
        }
    }
}

impl std::error::Error for EmblemError {}

pub type EmblemResult<T> = Result<T, EmblemError>;
