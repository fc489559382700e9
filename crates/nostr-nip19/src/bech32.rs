// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! Bech32
//!
//! Conversion between bech32 text, `(hrp, 5-bit groups)` pairs and 8-bit bytes.
//!
//! Checksum and charset handling come from the [`bech32`](::bech32) crate. Regrouping from
//! 5 to 8 bits is always strict: leftover bits must be fewer than the source width and all
//! zero, otherwise [`Error::InvalidPadding`] is returned.
//!
//! <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>

use core::fmt;

use ::bech32::{self as inner, ToBase32, Variant};
pub use ::bech32::u5;

/// Bech32 separator between the human-readable part and the data part
pub const SEPARATOR: char = '1';

/// Bech32 error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Char outside of the bech32 charset (or non-ASCII)
    InvalidCharacter(char),
    /// Checksum mismatch, or a bech32m checksum
    InvalidChecksum,
    /// Missing separator, empty human-readable part or data shorter than the checksum
    InvalidStructure,
    /// Upper and lower case chars mixed in the same string
    MixedCase,
    /// Non-zero or too many leftover bits after regrouping
    InvalidPadding,
    /// Value wider than the source bit width
    InvalidData(u8),
    /// Bit widths must be in `1..=8`
    InvalidBitWidth {
        /// Source width
        from: u32,
        /// Target width
        to: u32,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter(c) => write!(f, "Invalid character: {c:?}"),
            Self::InvalidChecksum => write!(f, "Invalid checksum"),
            Self::InvalidStructure => write!(f, "Invalid bech32 structure"),
            Self::MixedCase => write!(f, "Mixed-case string"),
            Self::InvalidPadding => write!(f, "Invalid padding"),
            Self::InvalidData(v) => write!(f, "Invalid data: {v}"),
            Self::InvalidBitWidth { from, to } => {
                write!(f, "Invalid bit width: from {from} to {to}")
            }
        }
    }
}

impl From<inner::Error> for Error {
    fn from(e: inner::Error) -> Self {
        match e {
            inner::Error::MissingSeparator => Self::InvalidStructure,
            inner::Error::InvalidChecksum => Self::InvalidChecksum,
            inner::Error::InvalidLength => Self::InvalidStructure,
            inner::Error::InvalidChar(c) => Self::InvalidCharacter(c),
            inner::Error::InvalidData(v) => Self::InvalidData(v),
            inner::Error::InvalidPadding => Self::InvalidPadding,
            inner::Error::MixedCase => Self::MixedCase,
        }
    }
}

/// Decode a bech32 string into its lowercase human-readable part and 5-bit groups.
///
/// Strings using the bech32m checksum are rejected.
pub fn decode(s: &str) -> Result<(String, Vec<u5>), Error> {
    let (hrp, data, variant) = inner::decode(s)?;

    if variant != Variant::Bech32 {
        return Err(Error::InvalidChecksum);
    }

    Ok((hrp, data))
}

/// Encode 5-bit groups with a bech32 checksum.
///
/// The case of `hrp` is preserved: an uppercase hrp gives an uppercase string.
pub fn encode(hrp: &str, data: &[u5]) -> Result<String, Error> {
    let encoded: String = inner::encode(hrp, data, Variant::Bech32)?;

    if hrp.bytes().any(|b| b.is_ascii_uppercase()) {
        Ok(encoded.to_ascii_uppercase())
    } else {
        Ok(encoded)
    }
}

/// Regroup `data` from `from`-bit values into `to`-bit values.
///
/// With `pad`, the last group is zero-filled. Without it, the conversion fails if the
/// leftover bits could form a whole source value or are not all zero.
pub fn convert_bits<T>(data: &[T], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error>
where
    T: Into<u8> + Copy,
{
    if !(1..=8).contains(&from) || !(1..=8).contains(&to) {
        return Err(Error::InvalidBitWidth { from, to });
    }

    Ok(inner::convert_bits(data, from, to, pad)?)
}

/// Wrap 5-bit values into [`u5`]
pub fn to_groups(values: &[u8]) -> Result<Vec<u5>, Error> {
    values
        .iter()
        .map(|v| u5::try_from_u8(*v).map_err(Error::from))
        .collect()
}

/// Decode a bech32 string and regroup its data into bytes
pub fn decode_bytes(s: &str) -> Result<(String, Vec<u8>), Error> {
    let (hrp, data) = decode(s)?;
    let bytes: Vec<u8> = convert_bits(&data, 5, 8, false)?;
    Ok((hrp, bytes))
}

/// Regroup bytes into 5-bit groups and encode them
pub fn encode_bytes(hrp: &str, bytes: &[u8]) -> Result<String, Error> {
    encode(hrp, &bytes.to_base32())
}
