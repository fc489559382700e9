// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! NIP19
//!
//! <https://github.com/nostr-protocol/nips/blob/master/19.md>

#![allow(missing_docs)]

use core::fmt;

mod nevent;
pub mod tlv;

pub use self::nevent::{
    decode_nevent, decode_nevent_with_opts, DecodeOptions, DecodedNevent, NeventFormat,
    Nip19Event,
};
use crate::bech32;
use crate::event::{self, EventId};
use crate::key::{self, PublicKey, SecretKey};

pub const PREFIX_BECH32_SECRET_KEY: &str = "nsec";
pub const PREFIX_BECH32_PUBLIC_KEY: &str = "npub";
pub const PREFIX_BECH32_NOTE_ID: &str = "note";
pub const PREFIX_BECH32_EVENT: &str = "nevent";

const ANY_PREFIX: &str = "nsec, npub, note or nevent";

/// Payload size of `nsec`, `npub` and `note`
pub const FIXED_PAYLOAD_LEN: usize = 32;

/// `NIP19` error
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Bech32 error
    Bech32(bech32::Error),
    /// Wrong or missing human-readable part
    InvalidPrefix {
        /// Accepted prefix(es)
        expected: &'static str,
        /// Decoded prefix, if the input got that far
        found: Option<String>,
    },
    /// Payload len doesn't match the identifier kind
    InvalidLength {
        /// Expected len
        expected: usize,
        /// Found len
        found: usize,
    },
    /// Required TLV field missing
    MissingField(&'static str),
    /// TLV header or value runs past the end of the payload
    TruncatedTlv {
        /// Offset of the truncated entry
        offset: usize,
    },
    /// TLV values are limited to 255 bytes
    TlvValueTooLong {
        /// Value len
        len: usize,
    },
    /// Keys error
    Keys(key::Error),
    /// Event ID error
    EventId(event::id::Error),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bech32(e) => write!(f, "Bech32: {e}"),
            Self::InvalidPrefix { expected, found } => match found {
                Some(found) => write!(f, "Invalid prefix: expected {expected}, found {found}"),
                None => write!(f, "Invalid prefix: must start with {expected}1"),
            },
            Self::InvalidLength { expected, found } => {
                write!(f, "Invalid length: expected {expected} bytes, found {found}")
            }
            Self::MissingField(name) => write!(f, "Field missing: {name}"),
            Self::TruncatedTlv { offset } => write!(f, "Truncated TLV entry at offset {offset}"),
            Self::TlvValueTooLong { len } => {
                write!(f, "TLV value too long: {len} bytes (max 255)")
            }
            Self::Keys(e) => write!(f, "Keys: {e}"),
            Self::EventId(e) => write!(f, "Event ID: {e}"),
        }
    }
}

impl From<bech32::Error> for Error {
    fn from(e: bech32::Error) -> Self {
        Self::Bech32(e)
    }
}

impl From<key::Error> for Error {
    fn from(e: key::Error) -> Self {
        Self::Keys(e)
    }
}

impl From<event::id::Error> for Error {
    fn from(e: event::id::Error) -> Self {
        Self::EventId(e)
    }
}

/// To ensure total matching on prefixes when decoding a [`Nip19`] object
enum Nip19Prefix {
    /// nsec
    NSec,
    /// npub
    NPub,
    /// note
    Note,
    /// nevent
    NEvent,
}

impl TryFrom<&str> for Nip19Prefix {
    type Error = Error;

    fn try_from(hrp: &str) -> Result<Self, Self::Error> {
        match hrp {
            PREFIX_BECH32_SECRET_KEY => Ok(Self::NSec),
            PREFIX_BECH32_PUBLIC_KEY => Ok(Self::NPub),
            PREFIX_BECH32_NOTE_ID => Ok(Self::Note),
            PREFIX_BECH32_EVENT => Ok(Self::NEvent),
            other => Err(Error::InvalidPrefix {
                expected: ANY_PREFIX,
                found: Some(other.to_string()),
            }),
        }
    }
}

/// A representation any `NIP19` bech32 nostr object. Useful for decoding
/// `NIP19` bech32 strings without necessarily knowing what you're decoding
/// ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip19 {
    /// nsec, raw 32 bytes
    ///
    /// Not checked against the curve order: use [`SecretKey::from_slice`] to validate.
    Secret([u8; FIXED_PAYLOAD_LEN]),
    /// npub
    Pubkey(PublicKey),
    /// note
    EventId(EventId),
    /// nevent
    Event(Nip19Event),
}

pub trait FromBech32: Sized {
    type Err;
    fn from_bech32(s: &str) -> Result<Self, Self::Err>;
}

pub trait ToBech32 {
    type Err;
    fn to_bech32(&self) -> Result<String, Self::Err>;
}

/// Check that `s` starts with `<hrp>1`, ignoring case
pub(crate) fn has_prefix(s: &str, hrp: &str) -> bool {
    let s: &[u8] = s.as_bytes();
    s.len() > hrp.len()
        && s[..hrp.len()].eq_ignore_ascii_case(hrp.as_bytes())
        && s[hrp.len()] == bech32::SEPARATOR as u8
}

fn to_fixed(bytes: &[u8]) -> Result<[u8; FIXED_PAYLOAD_LEN], Error> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: FIXED_PAYLOAD_LEN,
        found: bytes.len(),
    })
}

fn decode_fixed(s: &str, prefix: &'static str) -> Result<[u8; FIXED_PAYLOAD_LEN], Error> {
    if !has_prefix(s, prefix) {
        return Err(Error::InvalidPrefix {
            expected: prefix,
            found: None,
        });
    }

    let (hrp, data) = bech32::decode(s)?;

    if hrp != prefix {
        return Err(Error::InvalidPrefix {
            expected: prefix,
            found: Some(hrp),
        });
    }

    let bytes: Vec<u8> = bech32::convert_bits(&data, 5, 8, false)?;
    to_fixed(&bytes)
}

fn encode_fixed(prefix: &str, bytes: &[u8]) -> Result<String, Error> {
    let bytes: [u8; FIXED_PAYLOAD_LEN] = to_fixed(bytes)?;
    Ok(bech32::encode_bytes(prefix, &bytes)?)
}

/// Decode `nsec` into the raw 32-byte secret
///
/// The bytes are not checked against the secp256k1 curve order: see [`SecretKey::from_bech32`].
#[inline]
pub fn decode_nsec(s: &str) -> Result<[u8; FIXED_PAYLOAD_LEN], Error> {
    decode_fixed(s, PREFIX_BECH32_SECRET_KEY)
}

/// Decode `npub` into the raw 32-byte public key
#[inline]
pub fn decode_npub(s: &str) -> Result<[u8; FIXED_PAYLOAD_LEN], Error> {
    decode_fixed(s, PREFIX_BECH32_PUBLIC_KEY)
}

/// Decode `note` into the raw 32-byte event ID
#[inline]
pub fn decode_note(s: &str) -> Result<[u8; FIXED_PAYLOAD_LEN], Error> {
    decode_fixed(s, PREFIX_BECH32_NOTE_ID)
}

/// Encode a 32-byte secret as `nsec`
#[inline]
pub fn encode_nsec(bytes: &[u8]) -> Result<String, Error> {
    encode_fixed(PREFIX_BECH32_SECRET_KEY, bytes)
}

/// Encode a 32-byte public key as `npub`
#[inline]
pub fn encode_npub(bytes: &[u8]) -> Result<String, Error> {
    encode_fixed(PREFIX_BECH32_PUBLIC_KEY, bytes)
}

/// Encode a 32-byte event ID as `note`
#[inline]
pub fn encode_note(bytes: &[u8]) -> Result<String, Error> {
    encode_fixed(PREFIX_BECH32_NOTE_ID, bytes)
}

/// Decode any supported `NIP19` string
pub fn decode(s: &str) -> Result<Nip19, Error> {
    let (hrp, data) = bech32::decode(s)?;
    let prefix: Nip19Prefix = Nip19Prefix::try_from(hrp.as_str())?;
    let bytes: Vec<u8> = bech32::convert_bits(&data, 5, 8, false)?;

    match prefix {
        Nip19Prefix::NSec => Ok(Nip19::Secret(to_fixed(&bytes)?)),
        Nip19Prefix::NPub => Ok(Nip19::Pubkey(PublicKey::from_byte_array(to_fixed(&bytes)?))),
        Nip19Prefix::Note => Ok(Nip19::EventId(EventId::from_byte_array(to_fixed(&bytes)?))),
        Nip19Prefix::NEvent => Ok(Nip19::Event(Nip19Event::from_tlv_bytes(&bytes)?)),
    }
}

impl FromBech32 for Nip19 {
    type Err = Error;

    #[inline]
    fn from_bech32(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl ToBech32 for Nip19 {
    type Err = Error;

    fn to_bech32(&self) -> Result<String, Self::Err> {
        match self {
            Nip19::Secret(sec) => encode_nsec(sec),
            Nip19::Pubkey(pubkey) => pubkey.to_bech32(),
            Nip19::EventId(event_id) => event_id.to_bech32(),
            Nip19::Event(event) => event.to_bech32(),
        }
    }
}

impl FromBech32 for SecretKey {
    type Err = Error;

    fn from_bech32(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_nsec(s)?;
        Ok(Self::from_slice(&bytes)?)
    }
}

impl ToBech32 for SecretKey {
    type Err = Error;

    #[inline]
    fn to_bech32(&self) -> Result<String, Self::Err> {
        encode_nsec(&self.to_secret_bytes())
    }
}

impl FromBech32 for PublicKey {
    type Err = Error;

    #[inline]
    fn from_bech32(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_byte_array(decode_npub(s)?))
    }
}

impl ToBech32 for PublicKey {
    type Err = Error;

    #[inline]
    fn to_bech32(&self) -> Result<String, Self::Err> {
        encode_npub(self.as_bytes())
    }
}

impl FromBech32 for EventId {
    type Err = Error;

    #[inline]
    fn from_bech32(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_byte_array(decode_note(s)?))
    }
}

// Note ID
impl ToBech32 for EventId {
    type Err = Error;

    #[inline]
    fn to_bech32(&self) -> Result<String, Self::Err> {
        encode_note(self.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NSEC: &str = "nsec1rfm0pj9apnrpk9xzz7symsa2nh3xauer9e843qcpm3gaujr28xds6ujqmt";
    const SECRET_HEX: &str = "1a76f0c8bd0cc61b14c217a04dc3aa9de26ef3232e4f588301dc51de486a399b";
    const NPUB: &str = "npub1wus7l5zl7esgawjgs7c9xcdvklfyr342t453njryt825c2nup5fq2nn0fn";
    const PUBKEY_HEX: &str = "7721efd05ff6608eba4887b05361acb7d241c6aa5d6919c86459d54c2a7c0d12";

    #[test]
    fn test_decode_nsec() {
        let secret = decode_nsec(NSEC).unwrap();
        assert_eq!(hex::encode(secret), SECRET_HEX);
        assert_eq!(encode_nsec(&secret).unwrap(), NSEC);
    }

    #[test]
    fn test_decode_npub() {
        let public_key = decode_npub(NPUB).unwrap();
        assert_eq!(hex::encode(public_key), PUBKEY_HEX);
        assert_eq!(encode_npub(&public_key).unwrap(), NPUB);
    }

    #[test]
    fn test_fixed_round_trips() {
        for bytes in [[0u8; 32], [0x7f; 32], [0xff; 32]] {
            assert_eq!(decode_nsec(&encode_nsec(&bytes).unwrap()).unwrap(), bytes);
            assert_eq!(decode_npub(&encode_npub(&bytes).unwrap()).unwrap(), bytes);
            assert_eq!(decode_note(&encode_note(&bytes).unwrap()).unwrap(), bytes);
        }
    }

    #[test]
    fn test_bare_hex_id_round_trips_through_note() {
        let event_id = EventId::from_hex("1".repeat(64)).unwrap();
        let note = event_id.to_bech32().unwrap();
        assert!(note.starts_with("note1"));
        assert_eq!(EventId::from_bech32(&note).unwrap(), event_id);
    }

    #[test]
    fn test_encode_wrong_len() {
        assert_eq!(
            encode_nsec(&[1u8; 31]).unwrap_err(),
            Error::InvalidLength {
                expected: 32,
                found: 31
            }
        );
        assert_eq!(
            encode_note(&[1u8; 33]).unwrap_err(),
            Error::InvalidLength {
                expected: 32,
                found: 33
            }
        );
    }

    #[test]
    fn test_decode_wrong_payload_len() {
        let encoded = bech32::encode_bytes("nsec", &[1u8; 33]).unwrap();
        assert_eq!(
            decode_nsec(&encoded).unwrap_err(),
            Error::InvalidLength {
                expected: 32,
                found: 33
            }
        );
    }

    #[test]
    fn test_decode_nsec_invalid_prefix() {
        for input in ["invalid_nsec", "", "nsec", NPUB] {
            assert_eq!(
                decode_nsec(input).unwrap_err(),
                Error::InvalidPrefix {
                    expected: "nsec",
                    found: None
                }
            );
        }
    }

    #[test]
    fn test_decode_nsec_too_short() {
        assert_eq!(
            decode_nsec("nsec1").unwrap_err(),
            Error::Bech32(bech32::Error::InvalidStructure)
        );
    }

    #[test]
    fn test_decode_nsec_tampered() {
        let mut tampered = NSEC[..NSEC.len() - 1].to_string();
        tampered.push('q');
        assert_eq!(
            decode_nsec(&tampered).unwrap_err(),
            Error::Bech32(bech32::Error::InvalidChecksum)
        );

        let bad_char = NSEC.replacen("nsec1r", "nsec1b", 1);
        assert_eq!(
            decode_nsec(&bad_char).unwrap_err(),
            Error::Bech32(bech32::Error::InvalidCharacter('b'))
        );
    }

    #[test]
    fn test_decode_case() {
        let upper = NSEC.to_ascii_uppercase();
        assert_eq!(hex::encode(decode_nsec(&upper).unwrap()), SECRET_HEX);

        let mixed = NSEC.replacen("nsec1r", "nsec1R", 1);
        assert_eq!(
            decode_nsec(&mixed).unwrap_err(),
            Error::Bech32(bech32::Error::MixedCase)
        );
    }

    #[test]
    fn to_bech32_public_key() {
        let public_key = PublicKey::from_hex(
            "aa4fc8665f5696e33db7e1a572e3b0f5b3d615837b0f362dcb1c8068b098c7b4",
        )
        .unwrap();
        assert_eq!(
            "npub14f8usejl26twx0dhuxjh9cas7keav9vr0v8nvtwtrjqx3vycc76qqh9nsy".to_string(),
            public_key.to_bech32().unwrap()
        );
    }

    #[test]
    fn to_bech32_note() {
        let event_id =
            EventId::from_hex("d94a3f4dd87b9a3b0bed183b32e916fa29c8020107845d1752d72697fe5309a5")
                .unwrap();
        assert_eq!(
            "note1m99r7nwc0wdrkzldrqan96gklg5usqspq7z9696j6unf0ljnpxjspqfw99".to_string(),
            event_id.to_bech32().unwrap()
        );
    }

    #[test]
    fn from_bech32_nip19() {
        let expected_event_id =
            EventId::from_hex("d94a3f4dd87b9a3b0bed183b32e916fa29c8020107845d1752d72697fe5309a5")
                .unwrap();
        let nip19 =
            Nip19::from_bech32("note1m99r7nwc0wdrkzldrqan96gklg5usqspq7z9696j6unf0ljnpxjspqfw99")
                .unwrap();
        assert_eq!(Nip19::EventId(expected_event_id), nip19);

        let nip19 = Nip19::from_bech32(NPUB).unwrap();
        assert_eq!(
            nip19,
            Nip19::Pubkey(PublicKey::from_hex(PUBKEY_HEX).unwrap())
        );
        assert_eq!(nip19.to_bech32().unwrap(), NPUB);

        match Nip19::from_bech32(NSEC).unwrap() {
            Nip19::Secret(secret) => assert_eq!(hex::encode(secret), SECRET_HEX),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_bech32_unsupported_prefix() {
        let nprofile = "nprofile1qqsr9cvzwc652r4m83d86ykplrnm9dg5gwdvzzn8ameanlvut35wy3gpz3mhxue69uhhyetvv9ujuerpd46hxtnfduyu75sw";
        assert_eq!(
            Nip19::from_bech32(nprofile).unwrap_err(),
            Error::InvalidPrefix {
                expected: ANY_PREFIX,
                found: Some(String::from("nprofile"))
            }
        );
    }

    #[test]
    fn from_bech32_nsec_is_opaque() {
        for bytes in [[0u8; 32], [0xff; 32]] {
            let nsec = encode_nsec(&bytes).unwrap();
            assert_eq!(decode_nsec(&nsec).unwrap(), bytes);

            let nip19 = Nip19::from_bech32(&nsec).unwrap();
            assert_eq!(nip19, Nip19::Secret(bytes));
            assert_eq!(nip19.to_bech32().unwrap(), nsec);

            // Curve order is only checked by the key types
            assert!(SecretKey::from_bech32(&nsec).is_err());
        }
    }

    #[test]
    fn from_bech32_nevent_errors() {
        let mut payload = Vec::new();
        tlv::write_entry(&mut payload, tlv::RELAY, b"wss://relay.damus.io").unwrap();
        let nevent = bech32::encode_bytes(PREFIX_BECH32_EVENT, &payload).unwrap();
        assert_eq!(
            Nip19::from_bech32(&nevent).unwrap_err(),
            Error::MissingField("event id")
        );

        let note = bech32::encode_bytes(PREFIX_BECH32_NOTE_ID, &[1u8; 33]).unwrap();
        assert_eq!(
            Nip19::from_bech32(&note).unwrap_err(),
            Error::InvalidLength {
                expected: 32,
                found: 33
            }
        );

        // 7 groups leave 3 non-zero bits after regrouping
        let groups = bech32::to_groups(&[0, 0, 0, 0, 0, 0, 1]).unwrap();
        let padded = bech32::encode(PREFIX_BECH32_EVENT, &groups).unwrap();
        assert_eq!(
            Nip19::from_bech32(&padded).unwrap_err(),
            Error::Bech32(bech32::Error::InvalidPadding)
        );
    }

    #[test]
    fn test_has_prefix() {
        assert!(has_prefix("nevent1abc", "nevent"));
        assert!(has_prefix("NEVENT1ABC", "nevent"));
        assert!(!has_prefix("nevent", "nevent"));
        assert!(!has_prefix("neventx", "nevent"));
        assert!(!has_prefix("nev", "nevent"));
    }
}

#[cfg(bench)]
mod benches {
    use test::{black_box, Bencher};

    use super::*;

    const NSEC: &str = "nsec1rfm0pj9apnrpk9xzz7symsa2nh3xauer9e843qcpm3gaujr28xds6ujqmt";

    #[bench]
    pub fn bench_decode_nsec(bh: &mut Bencher) {
        bh.iter(|| {
            black_box(decode_nsec(NSEC)).unwrap();
        });
    }

    #[bench]
    pub fn bench_encode_note(bh: &mut Bencher) {
        bh.iter(|| {
            black_box(encode_note(&[0x11; 32])).unwrap();
        });
    }
}
