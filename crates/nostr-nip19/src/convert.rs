// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! Conversions between identifier formats
//!
//! Results derive [`Serialize`] so they can be printed as JSON.

use core::fmt;

use serde::Serialize;

use crate::event::EventId;
use crate::key::{self, Keys, PublicKey, SecretKey};
use crate::nips::nip19::{self, decode_nevent, DecodedNevent, FromBech32, ToBech32};

/// Convert error
#[derive(Debug, PartialEq)]
pub enum Error {
    /// NIP19 error
    NIP19(nip19::Error),
    /// Keys error
    Keys(key::Error),
    /// Neither `npub` nor 64-char hex
    UnknownFormat,
    /// `nevent` has no author hint
    MissingAuthor,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NIP19(e) => write!(f, "NIP19: {e}"),
            Self::Keys(e) => write!(f, "Keys: {e}"),
            Self::UnknownFormat => write!(
                f,
                "Invalid format: expected either npub1... or 64-character hex string"
            ),
            Self::MissingAuthor => write!(f, "nevent does not contain author information"),
        }
    }
}

impl From<nip19::Error> for Error {
    fn from(e: nip19::Error) -> Self {
        Self::NIP19(e)
    }
}

impl From<key::Error> for Error {
    fn from(e: key::Error) -> Self {
        Self::Keys(e)
    }
}

/// Key pair in hex and bech32
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    /// Secret key hex
    pub private_key_hex: String,
    /// `nsec`
    pub private_key_bech32: String,
    /// Public key hex
    pub public_key_hex: String,
    /// `npub`
    pub public_key_bech32: String,
}

impl KeyInfo {
    /// Describe [`Keys`]
    pub fn from_keys(keys: &Keys) -> Result<Self, Error> {
        let secret_key: &SecretKey = keys.secret_key();
        let public_key: PublicKey = keys.public_key();
        Ok(Self {
            private_key_hex: secret_key.to_secret_hex(),
            private_key_bech32: secret_key.to_bech32()?,
            public_key_hex: public_key.to_hex(),
            public_key_bech32: public_key.to_bech32()?,
        })
    }
}

/// Decode `nsec` and derive its public key
///
/// The input must be a valid secp256k1 scalar.
pub fn nsec_info(nsec: &str) -> Result<KeyInfo, Error> {
    let secret_key: SecretKey = SecretKey::from_bech32(nsec.trim())?;
    KeyInfo::from_keys(&Keys::new(secret_key))
}

/// Generate a new key pair
#[cfg(feature = "rand")]
pub fn generate_keys() -> Result<KeyInfo, Error> {
    KeyInfo::from_keys(&Keys::generate())
}

/// Public key format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PubkeyFormat {
    /// `npub` bech32
    Npub,
    /// 64-char hex
    Hex,
}

/// Result of [`convert_public_key`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PubkeyConversion {
    /// Input, trimmed
    pub input: String,
    /// Detected input format
    pub input_format: PubkeyFormat,
    /// Converted key
    pub output: String,
    /// Output format
    pub output_format: PubkeyFormat,
}

/// Convert `npub` to hex, or hex to `npub`
pub fn convert_public_key(public_key: &str) -> Result<PubkeyConversion, Error> {
    let input: &str = public_key.trim();

    if nip19::has_prefix(input, nip19::PREFIX_BECH32_PUBLIC_KEY) {
        let public_key: PublicKey = PublicKey::from_bech32(input)?;
        return Ok(PubkeyConversion {
            input: input.to_string(),
            input_format: PubkeyFormat::Npub,
            output: public_key.to_hex(),
            output_format: PubkeyFormat::Hex,
        });
    }

    if input.len() == 64 && input.bytes().all(|b| b.is_ascii_hexdigit()) {
        let public_key: PublicKey = PublicKey::from_hex(input)?;
        return Ok(PubkeyConversion {
            input: input.to_string(),
            input_format: PubkeyFormat::Hex,
            output: public_key.to_bech32()?,
            output_format: PubkeyFormat::Npub,
        });
    }

    Err(Error::UnknownFormat)
}

/// Get the `note` ID of a `nevent`, `note` or hex event ID
pub fn note_id(s: &str) -> Result<String, Error> {
    let decoded: DecodedNevent = decode_nevent(s)?;
    Ok(decoded.note_id()?)
}

/// Get the recipient and event of a zap from a `nevent`
pub fn zap_target(s: &str) -> Result<(PublicKey, EventId), Error> {
    let decoded: DecodedNevent = decode_nevent(s)?;
    let author: PublicKey = decoded.event.author.ok_or(Error::MissingAuthor)?;
    Ok((author, decoded.event.event_id))
}
