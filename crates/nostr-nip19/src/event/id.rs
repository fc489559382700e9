// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! Event Id

use core::fmt;
use core::str::FromStr;

use bitcoin_hashes::sha256::Hash as Sha256Hash;
use bitcoin_hashes::Hash;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::key::PublicKey;
use crate::nips::nip19::FromBech32;
use crate::nips::nip21;

/// [`EventId`] error
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Hex error
    Hex(hex::FromHexError),
    /// Wrong number of bytes
    InvalidLength {
        /// Expected len
        expected: usize,
        /// Found len
        found: usize,
    },
    /// Not a hex, `note` or `nostr:note` event id
    InvalidEventId,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(e) => write!(f, "Hex: {e}"),
            Self::InvalidLength { expected, found } => {
                write!(f, "Invalid length: expected {expected} bytes, found {found}")
            }
            Self::InvalidEventId => write!(f, "Invalid event ID"),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Self::Hex(e)
    }
}

/// Event Id
///
/// 32-bytes lowercase hex-encoded sha256 of the the serialized event data
///
/// <https://github.com/nostr-protocol/nips/blob/master/01.md>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId([u8; Self::LEN]);

impl EventId {
    /// Event ID len
    pub const LEN: usize = 32;

    /// Compute the [`EventId`] of an event from its fields
    pub fn new(
        public_key: &PublicKey,
        created_at: u64,
        kind: u16,
        tags: &[Vec<String>],
        content: &str,
    ) -> Self {
        let serialized: String = Self::serialize_canonical(public_key, created_at, kind, tags, content);
        let hash: Sha256Hash = Sha256Hash::hash(serialized.as_bytes());
        Self(hash.to_byte_array())
    }

    /// `[0, pubkey, created_at, kind, tags, content]` without whitespace
    pub(crate) fn serialize_canonical(
        public_key: &PublicKey,
        created_at: u64,
        kind: u16,
        tags: &[Vec<String>],
        content: &str,
    ) -> String {
        let json: Value = json!([0, public_key.to_hex(), created_at, kind, tags, content]);
        json.to_string()
    }

    /// Construct from owned bytes
    #[inline]
    pub const fn from_byte_array(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from `bytes`
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        if slice.len() != Self::LEN {
            return Err(Error::InvalidLength {
                expected: Self::LEN,
                found: slice.len(),
            });
        }

        let mut bytes: [u8; Self::LEN] = [0u8; Self::LEN];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Parse from `hex` string (case-insensitive)
    pub fn from_hex<S>(hex: S) -> Result<Self, Error>
    where
        S: AsRef<[u8]>,
    {
        let mut bytes: [u8; Self::LEN] = [0u8; Self::LEN];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Parse from `hex`, `note` bech32 or [NIP21](https://github.com/nostr-protocol/nips/blob/master/21.md) uri
    pub fn parse<S>(id: S) -> Result<Self, Error>
    where
        S: AsRef<str>,
    {
        let id: &str = id.as_ref();

        // Try from hex
        if let Ok(id) = Self::from_hex(id) {
            return Ok(id);
        }

        // Try from bech32, with or without the `nostr:` scheme
        if let Ok(id) = Self::from_bech32(nip21::strip_scheme(id)) {
            return Ok(id);
        }

        Err(Error::InvalidEventId)
    }

    /// Get as bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Consume and get bytes
    #[inline]
    pub fn to_bytes(self) -> [u8; Self::LEN] {
        self.0
    }

    /// Get as lowercase hex string
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for EventId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::parse(id)
    }
}

impl AsRef<[u8]> for EventId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id: String = String::deserialize(deserializer)?;
        Self::from_hex(id).map_err(serde::de::Error::custom)
    }
}
