//! Authenticated Encryption with Associated Data (AEAD).
//!
//! AES in Galois/Counter Mode over caller-supplied keys and nonces, with no
//! associated data. The key length selects the AES variant (16, 24, or 32
//! bytes for AES-128/192/256); any other length is a [`Error::KeyLength`].
//! The nonce must never repeat for the same key; that uniqueness is the
//! caller's contract, not enforced here.
//!
//! Tag verification happens inside the underlying primitive in constant
//! time; a failed tag, a wrong key, a wrong nonce, and a truncated
//! ciphertext are all surfaced as the same [`Error::Authentication`].

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead as AeadTrait, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce as GcmNonce};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{SecureRandom, KEY_SIZES, NONCE_SIZE, TAG_SIZE};
use crate::error::{Error, Result};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// A symmetric key for AEAD operations.
///
/// Owned convenience wrapper for callers that hold key material across
/// calls; automatically zeroized when dropped. The codec itself accepts any
/// `&[u8]` of valid length and never stores it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AeadKey(Vec<u8>);

impl AeadKey {
    /// Create a key from raw bytes; the length must be 16, 24, or 32.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !KEY_SIZES.contains(&bytes.len()) {
            return Err(Error::KeyLength(bytes.len()));
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Generate a fresh random key of the given length.
    pub fn random(len: usize) -> Result<Self> {
        if !KEY_SIZES.contains(&len) {
            return Err(Error::KeyLength(len));
        }
        let mut bytes = vec![0u8; len];
        SecureRandom::fill(&mut bytes);
        Ok(Self(bytes))
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    ///
    /// Handle with care - this is secret key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for AeadKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A nonce (number used once) for AEAD operations.
///
/// Must be unique for each encryption with the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Create a nonce from raw bytes.
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random nonce.
    pub fn random() -> Self {
        Self(SecureRandom::bytes())
    }

    /// Get the raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

enum Inner {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// AES-GCM cipher bound to one key.
pub struct Cipher {
    inner: Inner,
}

impl Cipher {
    /// Create a cipher; the key length selects AES-128, AES-192, or AES-256.
    pub fn new(key: &[u8]) -> Result<Self> {
        let inner = match key.len() {
            16 => Inner::Aes128(
                Aes128Gcm::new_from_slice(key).map_err(|_| Error::KeyLength(key.len()))?,
            ),
            24 => Inner::Aes192(
                Aes192Gcm::new_from_slice(key).map_err(|_| Error::KeyLength(key.len()))?,
            ),
            32 => Inner::Aes256(
                Aes256Gcm::new_from_slice(key).map_err(|_| Error::KeyLength(key.len()))?,
            ),
            n => return Err(Error::KeyLength(n)),
        };
        Ok(Self { inner })
    }

    /// Encrypt plaintext, appending the 16-byte authentication tag.
    ///
    /// Deterministic for identical nonce/key/plaintext; the non-determinism
    /// security requires comes from the caller supplying a fresh nonce.
    pub fn encrypt(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce = GcmNonce::<U12>::from_slice(nonce.as_bytes());
        match &self.inner {
            Inner::Aes128(c) => c.encrypt(nonce, plaintext),
            Inner::Aes192(c) => c.encrypt(nonce, plaintext),
            Inner::Aes256(c) => c.encrypt(nonce, plaintext),
        }
        .map_err(|_| Error::Crypto("encryption failed".into()))
    }

    /// Decrypt ciphertext, verifying the authentication tag.
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] if verification fails for any reason:
    /// tampered data, wrong key, wrong nonce, or a ciphertext shorter than
    /// the tag itself.
    pub fn decrypt(&self, nonce: &Nonce, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < TAG_SIZE {
            return Err(Error::Authentication);
        }
        let nonce = GcmNonce::<U12>::from_slice(nonce.as_bytes());
        match &self.inner {
            Inner::Aes128(c) => c.decrypt(nonce, ciphertext),
            Inner::Aes192(c) => c.decrypt(nonce, ciphertext),
            Inner::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
        .map_err(|_| Error::Authentication)
    }
}

/// One-shot encrypt with a caller-supplied nonce and key.
pub fn encrypt(nonce: &Nonce, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    Cipher::new(key)?.encrypt(nonce, plaintext)
}

/// One-shot decrypt with a caller-supplied nonce and key.
pub fn decrypt(nonce: &Nonce, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    Cipher::new(key)?.decrypt(nonce, ciphertext)
}
