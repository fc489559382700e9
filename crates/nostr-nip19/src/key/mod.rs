// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! Keys
//!
//! Secret and public key material. The codec itself treats keys as opaque 32-byte values:
//! checks against the secp256k1 curve only happen here.

use core::fmt;
use core::str::FromStr;

pub mod public_key;
pub mod secret_key;

pub use self::public_key::PublicKey;
pub use self::secret_key::SecretKey;

/// [`Keys`] error
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Invalid secret key
    InvalidSecretKey,
    /// Invalid public key
    InvalidPublicKey,
    /// Hex error
    Hex(hex::FromHexError),
    /// Secp256k1 error
    Secp256k1(secp256k1::Error),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSecretKey => write!(f, "Invalid secret key"),
            Self::InvalidPublicKey => write!(f, "Invalid public key"),
            Self::Hex(e) => write!(f, "Hex: {e}"),
            Self::Secp256k1(e) => write!(f, "Secp256k1: {e}"),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Self::Hex(e)
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        Self::Secp256k1(e)
    }
}

/// Secret key with its derived public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keys {
    public_key: PublicKey,
    secret_key: SecretKey,
}

impl Keys {
    /// Initialize from secret key.
    pub fn new(secret_key: SecretKey) -> Self {
        Self {
            public_key: secret_key.public_key(),
            secret_key,
        }
    }

    /// Parse secret key from `hex` or `bech32`
    #[inline]
    pub fn parse(secret_key: &str) -> Result<Self, Error> {
        Ok(Self::new(SecretKey::parse(secret_key)?))
    }

    /// Generate new random [`Keys`]
    #[cfg(feature = "rand")]
    pub fn generate() -> Self {
        Self::new(SecretKey::generate())
    }

    /// Get public key
    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Get secret key
    #[inline]
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

impl FromStr for Keys {
    type Err = Error;

    /// Try to parse [Keys] from **secret key** `hex` or `bech32`
    #[inline]
    fn from_str(secret_key: &str) -> Result<Self, Self::Err> {
        Self::parse(secret_key)
    }
}
