use std::fmt;

#[derive(Debug)]
pub enum HashError {
    KdfUnavailable,
    EntropySource,
    MalformedHash(String),
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::KdfUnavailable => write!(f, "no usable scrypt implementation available"),
            HashError::EntropySource => write!(f, "OS random generator unavailable"),
            HashError::MalformedHash(reason) => write!(f, "malformed password hash: {reason}"),
        }
    }
}

impl std::error::Error for HashError {}
