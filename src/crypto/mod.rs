//! Cryptographic primitives for the relay core.
//!
//! This module provides:
//! - AES-GCM AEAD encryption over caller-supplied keys and nonces
//! - Hardened secure random number generation with bounded retry
//!
//! Key material held in owned form is zeroized on drop to prevent memory
//! leakage. Nonce uniqueness per key is the caller's invariant; nothing here
//! tracks or enforces it.

mod aead;
mod random;

pub use aead::{decrypt, encrypt, AeadKey, Cipher, Nonce};
pub use random::SecureRandom;

/// Size of the AEAD nonce in bytes (96 bits, standard for GCM)
pub const NONCE_SIZE: usize = 12;

/// Size of the AEAD authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Key lengths accepted by the AEAD codec (AES-128, AES-192, AES-256)
pub const KEY_SIZES: [usize; 3] = [16, 24, 32];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_key_material_round_trip() {
        // Key and nonce material the way an outer handshake would mint it
        let key = AeadKey::random(32).unwrap();
        let nonce = Nonce::random();

        let plaintext = b"session payload";
        let ciphertext = encrypt(&nonce, key.as_bytes(), plaintext).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);

        let decrypted = decrypt(&nonce, key.as_bytes(), &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}
