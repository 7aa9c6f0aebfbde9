use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{Error, Result};

const NONCE_LEN: usize = 12;

/// Placeholder returned when a stored ciphertext cannot be decrypted.
/// One corrupt row must not fail a whole thread listing.
pub const UNREADABLE_MESSAGE: &str = "[unreadable message]";

/// AES-256-GCM wrapper for message bodies. The key comes from config at
/// startup, never from source.
#[derive(Clone)]
pub struct MessageCipher {
    key: [u8; 32],
}

impl MessageCipher {
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let raw = BASE64
            .decode(encoded)
            .map_err(|e| Error::Config(format!("MESSAGE_KEY is not valid base64: {}", e)))?;
        let key: [u8; 32] = raw
            .try_into()
            .map_err(|_| Error::Config("MESSAGE_KEY must decode to 32 bytes".to_string()))?;
        Ok(Self { key })
    }

    /// Encrypt plaintext into base64(nonce || ciphertext).
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| Error::Internal(format!("Message encryption failed: {}", e)))?;

        let mut combined = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(combined))
    }

    pub fn decrypt(&self, stored: &str) -> Result<String> {
        let combined = BASE64
            .decode(stored)
            .map_err(|e| Error::Internal(format!("Stored message is not valid base64: {}", e)))?;
        if combined.len() <= NONCE_LEN {
            return Err(Error::Internal("Stored message is truncated".to_string()));
        }
        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| Error::Internal(format!("Message decryption failed: {}", e)))?;

        String::from_utf8(plaintext)
            .map_err(|e| Error::Internal(format!("Decrypted message is not UTF-8: {}", e)))
    }

    /// Decrypt for display: a bad row degrades to the sentinel instead
    /// of propagating.
    pub fn decrypt_or_placeholder(&self, stored: &str) -> String {
        match self.decrypt(stored) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::warn!(error = %e, "failed to decrypt stored message");
                UNREADABLE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> MessageCipher {
        MessageCipher {
            key: *b"0123456789abcdef0123456789abcdef",
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let c = cipher();
        let stored = c.encrypt("Hello").unwrap();
        assert_ne!(stored, "Hello");
        assert_eq!(c.decrypt(&stored).unwrap(), "Hello");
    }

    #[test]
    fn each_encryption_uses_a_fresh_nonce() {
        let c = cipher();
        assert_ne!(c.encrypt("same").unwrap(), c.encrypt("same").unwrap());
    }

    #[test]
    fn corrupt_row_degrades_to_placeholder() {
        let c = cipher();
        assert_eq!(c.decrypt_or_placeholder("@@not-base64@@"), UNREADABLE_MESSAGE);
        let stored = c.encrypt("Hello").unwrap();
        let mut raw = BASE64.decode(&stored).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        assert_eq!(
            c.decrypt_or_placeholder(&BASE64.encode(raw)),
            UNREADABLE_MESSAGE
        );
    }

    #[test]
    fn wrong_key_fails() {
        let stored = cipher().encrypt("secret").unwrap();
        let other = MessageCipher {
            key: *b"ffffffffffffffffffffffffffffffff",
        };
        assert!(other.decrypt(&stored).is_err());
    }

    #[test]
    fn key_must_be_32_bytes_of_base64() {
        assert!(MessageCipher::from_base64("c2hvcnQ=").is_err());
        assert!(MessageCipher::from_base64("!!!").is_err());
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(b"0123456789abcdef0123456789abcdef");
        assert!(MessageCipher::from_base64(&encoded).is_ok());
    }
}
