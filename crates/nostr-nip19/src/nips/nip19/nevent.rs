// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! `nevent` identifiers

use core::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::tlv::{self, Tlv};
use super::{has_prefix, Error, FromBech32, ToBech32, PREFIX_BECH32_EVENT};
use crate::bech32;
use crate::event::EventId;
use crate::key::PublicKey;
use crate::nips::nip21;

/// Leftmost run of 64 lowercase hex chars inside a `nevent1` string
static EMBEDDED_HEX_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9a-f]{64}").expect("Failed to compile regex"));

/// Event pointer with relay hints
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nip19Event {
    /// Event ID
    pub event_id: EventId,
    /// Relay URLs, in order
    pub relays: Vec<String>,
    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<PublicKey>,
    /// Kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u32>,
}

impl Nip19Event {
    /// New event pointer without hints
    #[inline]
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            relays: Vec::new(),
            author: None,
            kind: None,
        }
    }

    /// Add relay hints
    pub fn relays<I, S>(mut self, relays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relays.extend(relays.into_iter().map(|u| u.into()));
        self
    }

    /// Set author
    #[inline]
    pub fn author(mut self, author: PublicKey) -> Self {
        self.author = Some(author);
        self
    }

    /// Set kind
    #[inline]
    pub fn kind(mut self, kind: u32) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Parse from a TLV payload
    pub fn from_tlv_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::try_from(tlv::decode_tlv(bytes))
    }

    /// Serialize as TLV payload
    pub fn to_tlv_bytes(&self) -> Result<Vec<u8>, Error> {
        Tlv::from(self.clone()).to_bytes()
    }
}

impl TryFrom<Tlv> for Nip19Event {
    type Error = Error;

    fn try_from(tlv: Tlv) -> Result<Self, Self::Error> {
        Ok(Self {
            event_id: tlv.event_id.ok_or(Error::MissingField("event id"))?,
            relays: tlv.relays,
            author: tlv.author,
            kind: tlv.kind,
        })
    }
}

impl From<Nip19Event> for Tlv {
    fn from(event: Nip19Event) -> Self {
        Self {
            event_id: Some(event.event_id),
            relays: event.relays,
            author: event.author,
            kind: event.kind,
        }
    }
}

impl FromBech32 for Nip19Event {
    type Err = Error;

    fn from_bech32(s: &str) -> Result<Self, Self::Err> {
        if !has_prefix(s, PREFIX_BECH32_EVENT) {
            return Err(Error::InvalidPrefix {
                expected: PREFIX_BECH32_EVENT,
                found: None,
            });
        }

        let (hrp, bytes) = bech32::decode_bytes(s)?;

        if hrp != PREFIX_BECH32_EVENT {
            return Err(Error::InvalidPrefix {
                expected: PREFIX_BECH32_EVENT,
                found: Some(hrp),
            });
        }

        Self::from_tlv_bytes(&bytes)
    }
}

impl ToBech32 for Nip19Event {
    type Err = Error;

    fn to_bech32(&self) -> Result<String, Self::Err> {
        let bytes: Vec<u8> = self.to_tlv_bytes()?;
        Ok(bech32::encode_bytes(PREFIX_BECH32_EVENT, &bytes)?)
    }
}

/// Strategy that produced a [`DecodedNevent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeventFormat {
    /// `nevent1` string with an embedded 64-char hex ID
    ComplexNeventWithHexId,
    /// Bech32 `nevent` with TLV payload
    Nip19Nevent,
    /// `nevent1` string that isn't valid bech32 but parses as an event ID
    ///
    /// Never produced in practice: no `nevent1` string is a valid hex or `note` ID.
    /// Kept so serialized tags cover every fallback of the decoder.
    SimpleNevent,
    /// Hex or `note` event ID
    SimpleEventId,
}

impl NeventFormat {
    /// Get as `&str`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComplexNeventWithHexId => "complex_nevent_with_hex_id",
            Self::Nip19Nevent => "nip19_nevent",
            Self::SimpleNevent => "simple_nevent",
            Self::SimpleEventId => "simple_event_id",
        }
    }
}

impl fmt::Display for NeventFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of [`decode_nevent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedNevent {
    /// Event pointer
    pub event: Nip19Event,
    /// How the input was decoded
    pub format: NeventFormat,
}

impl DecodedNevent {
    fn new(event: Nip19Event, format: NeventFormat) -> Self {
        Self { event, format }
    }

    /// Event ID
    #[inline]
    pub fn event_id(&self) -> EventId {
        self.event.event_id
    }

    /// Event ID as `note` bech32
    #[inline]
    pub fn note_id(&self) -> Result<String, Error> {
        self.event.event_id.to_bech32()
    }
}

/// Options for [`decode_nevent_with_opts`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    legacy_hex_scan: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            legacy_hex_scan: true,
        }
    }
}

impl DecodeOptions {
    /// New default options
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for a 64-char hex event ID inside `nevent1` strings before decoding them as bech32 (default: true)
    ///
    /// This matches legacy, malformed identifiers. A genuine TLV payload whose bech32 text
    /// happens to contain such a run is decoded as that run instead.
    pub fn legacy_hex_scan(mut self, enable: bool) -> Self {
        self.legacy_hex_scan = enable;
        self
    }
}

/// Decode a `nevent`, `note` or hex event ID with default [`DecodeOptions`]
///
/// An optional `nostr:` scheme is stripped first.
#[inline]
pub fn decode_nevent(s: &str) -> Result<DecodedNevent, Error> {
    decode_nevent_with_opts(s, &DecodeOptions::default())
}

/// Decode a `nevent`, `note` or hex event ID
pub fn decode_nevent_with_opts(s: &str, opts: &DecodeOptions) -> Result<DecodedNevent, Error> {
    let s: &str = nip21::strip_scheme(s);

    if !has_prefix(s, PREFIX_BECH32_EVENT) {
        let event_id: EventId = EventId::parse(s)?;
        return Ok(DecodedNevent::new(
            Nip19Event::new(event_id),
            NeventFormat::SimpleEventId,
        ));
    }

    if opts.legacy_hex_scan {
        if let Some(m) = EMBEDDED_HEX_ID.find(s) {
            tracing::debug!(offset = m.start(), "Found embedded hex event ID in nevent.");
            let event_id: EventId = EventId::from_hex(m.as_str())?;
            return Ok(DecodedNevent::new(
                Nip19Event::new(event_id),
                NeventFormat::ComplexNeventWithHexId,
            ));
        }
    }

    match Nip19Event::from_bech32(s) {
        Ok(event) => Ok(DecodedNevent::new(event, NeventFormat::Nip19Nevent)),
        Err(e @ (Error::Bech32(..) | Error::InvalidPrefix { .. })) => {
            tracing::debug!(error = %e, "Can't decode nevent as bech32, trying as event ID.");
            match EventId::parse(s) {
                Ok(event_id) => Ok(DecodedNevent::new(
                    Nip19Event::new(event_id),
                    NeventFormat::SimpleNevent,
                )),
                Err(..) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT_ID: &str = "d94a3f4dd87b9a3b0bed183b32e916fa29c8020107845d1752d72697fe5309a5";
    const AUTHOR: &str = "7721efd05ff6608eba4887b05361acb7d241c6aa5d6919c86459d54c2a7c0d12";

    fn sample() -> Nip19Event {
        Nip19Event::new(EventId::from_hex(EVENT_ID).unwrap())
            .relays(["wss://relay.damus.io", "wss://nos.lol"])
            .author(PublicKey::from_hex(AUTHOR).unwrap())
            .kind(1)
    }

    #[test]
    fn test_nevent_round_trip() {
        let event = sample();
        let encoded = event.to_bech32().unwrap();
        assert!(encoded.starts_with("nevent1"));
        assert_eq!(Nip19Event::from_bech32(&encoded).unwrap(), event);

        let decoded = decode_nevent_with_opts(&encoded, &DecodeOptions::new().legacy_hex_scan(false))
            .unwrap();
        assert_eq!(decoded.format, NeventFormat::Nip19Nevent);
        assert_eq!(decoded.event, event);
        assert_eq!(decoded.event.relays, vec!["wss://relay.damus.io", "wss://nos.lol"]);
    }

    #[test]
    fn test_decode_nevent_with_scheme() {
        let event = Nip19Event::new(EventId::from_hex(EVENT_ID).unwrap()).relays(["wss://a"]);
        let uri = format!("nostr:{}", event.to_bech32().unwrap());

        let decoded = decode_nevent_with_opts(&uri, &DecodeOptions::new().legacy_hex_scan(false))
            .unwrap();
        assert_eq!(decoded.format, NeventFormat::Nip19Nevent);
        assert_eq!(decoded.event_id().to_hex(), EVENT_ID);
    }

    #[test]
    fn test_decode_nevent_embedded_hex() {
        let input = format!("nevent1{}", "1".repeat(64));
        let decoded = decode_nevent(&input).unwrap();
        assert_eq!(decoded.format, NeventFormat::ComplexNeventWithHexId);
        assert_eq!(decoded.event_id().as_bytes(), &[0x11; 32]);
        assert!(decoded.event.relays.is_empty());

        let input = format!("nevent1qqq{EVENT_ID}xyz");
        let decoded = decode_nevent(&input).unwrap();
        assert_eq!(decoded.format, NeventFormat::ComplexNeventWithHexId);
        assert_eq!(decoded.event_id().to_hex(), EVENT_ID);
    }

    #[test]
    fn test_decode_nevent_embedded_hex_disabled() {
        let input = format!("nevent1{}", "1".repeat(64));
        let err = decode_nevent_with_opts(&input, &DecodeOptions::new().legacy_hex_scan(false))
            .unwrap_err();
        assert!(matches!(err, Error::Bech32(..) | Error::InvalidPrefix { .. }));
    }

    #[test]
    fn test_decode_bare_event_id() {
        let hex = "1".repeat(64);
        let decoded = decode_nevent(&hex).unwrap();
        assert_eq!(decoded.format, NeventFormat::SimpleEventId);
        assert_eq!(decoded.event_id().to_hex(), hex);

        let note = decoded.note_id().unwrap();
        assert!(note.starts_with("note1"));
        assert_eq!(decode_nevent(&note).unwrap().event_id(), decoded.event_id());

        let upper = decode_nevent(&EVENT_ID.to_ascii_uppercase()).unwrap();
        assert_eq!(upper.format, NeventFormat::SimpleEventId);
        assert_eq!(upper.event_id().to_hex(), EVENT_ID);
    }

    #[test]
    fn test_decode_invalid_event_id() {
        assert!(matches!(
            decode_nevent("not an id").unwrap_err(),
            Error::EventId(..)
        ));
    }

    #[test]
    fn test_nevent_missing_event_id() {
        let mut payload = Vec::new();
        tlv::write_entry(&mut payload, tlv::RELAY, b"wss://relay.damus.io").unwrap();
        let encoded = bech32::encode_bytes(PREFIX_BECH32_EVENT, &payload).unwrap();

        assert_eq!(
            Nip19Event::from_bech32(&encoded).unwrap_err(),
            Error::MissingField("event id")
        );
        assert_eq!(
            decode_nevent_with_opts(&encoded, &DecodeOptions::new().legacy_hex_scan(false))
                .unwrap_err(),
            Error::MissingField("event id")
        );
    }

    #[test]
    fn test_nevent_truncated_tlv() {
        let mut payload = Nip19Event::new(EventId::from_hex(EVENT_ID).unwrap())
            .to_tlv_bytes()
            .unwrap();
        payload.extend([tlv::RELAY, 30]);
        payload.extend(b"wss://");
        let encoded = bech32::encode_bytes(PREFIX_BECH32_EVENT, &payload).unwrap();

        let event = Nip19Event::from_bech32(&encoded).unwrap();
        assert_eq!(event.event_id.to_hex(), EVENT_ID);
        assert!(event.relays.is_empty());
    }

    #[test]
    fn test_nevent_tampered_checksum() {
        let encoded = sample().to_bech32().unwrap();
        let last = encoded.chars().last().unwrap();
        let mut tampered = encoded[..encoded.len() - 1].to_string();
        tampered.push(if last == 'q' { 'p' } else { 'q' });

        assert_eq!(
            Nip19Event::from_bech32(&tampered).unwrap_err(),
            Error::Bech32(bech32::Error::InvalidChecksum)
        );
    }

    #[test]
    fn test_decode_nevent_mixed_case() {
        let encoded = sample().to_bech32().unwrap();

        let pos = encoded[7..]
            .find(|c: char| c.is_ascii_lowercase())
            .map(|i| i + 7)
            .unwrap();
        let mut mixed = encoded.clone();
        mixed.replace_range(pos..pos + 1, &encoded[pos..pos + 1].to_ascii_uppercase());

        assert_eq!(
            decode_nevent(&mixed).unwrap_err(),
            Error::Bech32(bech32::Error::MixedCase)
        );

        // All-uppercase is valid bech32
        let decoded = decode_nevent(&encoded.to_ascii_uppercase()).unwrap();
        assert_eq!(decoded.format, NeventFormat::Nip19Nevent);
        assert_eq!(decoded.event, sample());
    }

    #[test]
    fn test_nevent_garbage() {
        assert!(decode_nevent("nevent1zzz").is_err());
        assert!(Nip19Event::from_bech32("note1zzz").is_err());
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(NeventFormat::Nip19Nevent.to_string(), "nip19_nevent");
        assert_eq!(
            serde_json::to_string(&NeventFormat::ComplexNeventWithHexId).unwrap(),
            "\"complex_nevent_with_hex_id\""
        );

        let decoded = decode_nevent(&"1".repeat(64)).unwrap();
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["format"], "simple_event_id");
        assert_eq!(json["event"]["event_id"], "1".repeat(64));
        assert!(json["event"].get("author").is_none());
    }
}
