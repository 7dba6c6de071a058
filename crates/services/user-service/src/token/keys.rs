//! RSA key material for signing session tokens.

use std::fmt;
use std::path::Path;

use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use thiserror::Error;

use common::TokenConfig;

/// Failure to set up token signing
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("RSA key generation failed: {0}")]
    Generate(#[from] rsa::Error),

    #[error("Failed to read private key: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid private key PEM: {0}")]
    Pem(String),

    #[error("Rejected RSA key: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token TTL must be a positive number of minutes, got {0}")]
    InvalidTtl(i64),
}

/// Immutable RSA key pair: the private half signs, the public half verifies.
#[derive(Clone)]
pub struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeys")
            .field("encoding", &"[hidden]")
            .field("decoding", &"[hidden]")
            .finish()
    }
}

impl SigningKeys {
    /// Generate a fresh key pair.
    pub fn generate(bits: usize) -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::new(&mut OsRng, bits)?;
        Self::from_private_key(&private_key)
    }

    /// Parse a PKCS#1 or PKCS#8 PEM private key.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map_err(|e| KeyError::Pem(e.to_string()))?;
        Self::from_private_key(&private_key)
    }

    /// Read a PEM private key from disk.
    pub fn load(path: &Path) -> Result<Self, KeyError> {
        let pem = std::fs::read_to_string(path)?;
        Self::from_pem(&pem)
    }

    /// Load the configured key, or generate one when no path is set.
    pub fn from_config(config: &TokenConfig) -> Result<Self, KeyError> {
        match &config.private_key_path {
            Some(path) => {
                tracing::info!("Loading token signing key from {}", path.display());
                Self::load(path)
            }
            None => {
                tracing::info!("Generating {}-bit token signing key", config.rsa_key_bits);
                Self::generate(config.rsa_key_bits)
            }
        }
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    fn from_private_key(private_key: &RsaPrivateKey) -> Result<Self, KeyError> {
        let private_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| KeyError::Pem(e.to_string()))?;
        let public_pem = private_key
            .to_public_key()
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| KeyError::Pem(e.to_string()))?;

        Ok(Self {
            encoding: EncodingKey::from_rsa_pem(private_pem.as_bytes())?,
            decoding: DecodingKey::from_rsa_pem(public_pem.as_bytes())?,
        })
    }
}
