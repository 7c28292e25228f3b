//! Error types for the relay core.

use thiserror::Error;

/// Result type alias for relay-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the relay core.
#[derive(Error, Debug)]
pub enum Error {
    /// Entropy source still failing after the bounded retry schedule
    #[error("entropy source unavailable after {0} retries")]
    EntropyExhausted(usize),

    /// Invalid AEAD key length (must be 16, 24, or 32 bytes)
    #[error("invalid key length: {0} bytes")]
    KeyLength(usize),

    /// AEAD tag verification failed (tampering, wrong key, or wrong nonce)
    #[error("authentication failed")]
    Authentication,

    /// Internal cipher failure
    #[error("cryptographic error: {0}")]
    Crypto(String),

    /// Declared record length exceeds the destination buffer
    #[error("record needs {required} bytes, buffer holds {capacity}")]
    BufferTooSmall {
        /// Total bytes the record occupies, header included.
        required: usize,
        /// Capacity of the buffer the caller supplied.
        capacity: usize,
    },

    /// Network I/O error, including short reads on premature close
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),
}

impl Error {
    /// Check if this error is unrecoverable by design.
    ///
    /// An unrecoverable error means the environment is broken; the
    /// embedding application is expected to terminate.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Error::EntropyExhausted(_))
    }

    /// Check if this error indicates an integrity failure.
    ///
    /// Callers should treat the peer or session as compromised and abort it.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Authentication;
        assert_eq!(err.to_string(), "authentication failed");

        let err = Error::BufferTooSmall {
            required: 105,
            capacity: 50,
        };
        assert_eq!(err.to_string(), "record needs 105 bytes, buffer holds 50");

        let err = Error::KeyLength(10);
        assert_eq!(err.to_string(), "invalid key length: 10 bytes");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::EntropyExhausted(10).is_unrecoverable());
        assert!(!Error::Authentication.is_unrecoverable());

        assert!(Error::Authentication.is_auth_failure());
        assert!(!Error::KeyLength(10).is_auth_failure());
    }
}
