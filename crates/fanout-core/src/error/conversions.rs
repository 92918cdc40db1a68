//! From trait implementations for FanoutError conversions

use super::types::FanoutError;

impl From<std::io::Error> for FanoutError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}
