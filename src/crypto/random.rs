//! Secure random number generation.
//!
//! Wraps the operating system's entropy source (e.g., /dev/urandom on Unix,
//! BCryptGenRandom on Windows) with a bounded retry-and-backoff schedule.
//! Entropy failure is rare and almost always transient (resource contention
//! at boot, for instance); the schedule tolerates brief unavailability
//! without masking a genuinely broken environment.

use std::time::Duration;

use rand::RngCore;
use rand_core::OsRng;

use crate::error::{Error, Result};

/// Backoff applied after each failed retry, in order.
const RETRY_BACKOFF: [Duration; 10] = [
    Duration::from_millis(5),
    Duration::from_millis(10),
    Duration::from_millis(30),
    Duration::from_millis(50),
    Duration::from_millis(100),
    Duration::from_millis(300),
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(3),
    Duration::from_secs(5),
];

/// Cryptographically secure random number generator.
pub struct SecureRandom;

impl SecureRandom {
    /// Fill a buffer with cryptographically secure random bytes.
    ///
    /// Retries transient entropy failures per the backoff schedule. If the
    /// source is still failing after the schedule is exhausted the process
    /// terminates: there is no meaningful way to continue without entropy.
    pub fn fill(dest: &mut [u8]) {
        if let Err(e) = Self::try_fill(dest) {
            tracing::error!("cannot get cryptographic random bytes: {e}");
            std::process::exit(1);
        }
    }

    /// Fill a buffer, surfacing permanent entropy exhaustion to the caller.
    ///
    /// Each failed attempt is logged and retried up to 10 times with
    /// increasing backoff. Returns [`Error::EntropyExhausted`] once the
    /// schedule runs out; callers must treat that as fatal.
    pub fn try_fill(dest: &mut [u8]) -> Result<()> {
        let mut err = match OsRng.try_fill_bytes(dest) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        for backoff in RETRY_BACKOFF {
            tracing::error!("failed to get cryptographic random bytes: {err}, retrying");
            match OsRng.try_fill_bytes(dest) {
                Ok(()) => return Ok(()),
                Err(e) => err = e,
            }
            std::thread::sleep(backoff);
        }

        Err(Error::EntropyExhausted(RETRY_BACKOFF.len()))
    }

    /// Generate a fixed-size array of random bytes.
    pub fn bytes<const N: usize>() -> [u8; N] {
        let mut buf = [0u8; N];
        Self::fill(&mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill() {
        let mut buf1 = [0u8; 32];
        let mut buf2 = [0u8; 32];

        SecureRandom::fill(&mut buf1);
        SecureRandom::fill(&mut buf2);

        // Should not produce all zeros
        assert!(!buf1.iter().all(|&b| b == 0));
        assert!(!buf2.iter().all(|&b| b == 0));

        // Should produce different values each time
        assert_ne!(buf1, buf2);
    }

    #[test]
    fn test_try_fill() {
        let mut buf = [0u8; 64];
        SecureRandom::try_fill(&mut buf).unwrap();
        assert!(!buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bytes() {
        let bytes1: [u8; 16] = SecureRandom::bytes();
        let bytes2: [u8; 16] = SecureRandom::bytes();

        assert_ne!(bytes1, bytes2);
    }
}
