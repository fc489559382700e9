// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! TLV (type-length-value) records of composite identifiers
//!
//! Each entry is a 1-byte type, a 1-byte length and `length` value bytes.

use super::Error;
use crate::event::EventId;
use crate::key::PublicKey;

/// Event ID (`nevent`)
pub const SPECIAL: u8 = 0;
/// Relay URL, may repeat
pub const RELAY: u8 = 1;
/// Author public key
pub const AUTHOR: u8 = 2;
/// Event kind, 4-byte big-endian
pub const KIND: u8 = 3;

const HEADER_LEN: usize = 2;

/// Single TLV entry, borrowing its value from the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvEntry<'a> {
    /// Type
    pub tag: u8,
    /// Value
    pub value: &'a [u8],
}

/// Iterator over the entries of a TLV payload
///
/// A header or value running past the end of the payload yields a single
/// [`Error::TruncatedTlv`] and ends the iteration.
#[derive(Debug, Clone)]
pub struct TlvReader<'a> {
    buf: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> TlvReader<'a> {
    /// New reader
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            done: false,
        }
    }

    /// Offset of the next entry
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn truncated(&mut self) -> Option<Result<TlvEntry<'a>, Error>> {
        self.done = true;
        Some(Err(Error::TruncatedTlv {
            offset: self.offset,
        }))
    }
}

impl<'a> Iterator for TlvReader<'a> {
    type Item = Result<TlvEntry<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.buf.len() {
            return None;
        }

        let (tag, len) = match self.buf.get(self.offset..self.offset + HEADER_LEN) {
            Some(&[tag, len]) => (tag, len as usize),
            _ => return self.truncated(),
        };

        let start: usize = self.offset + HEADER_LEN;
        let value: &'a [u8] = match self.buf.get(start..start + len) {
            Some(value) => value,
            None => return self.truncated(),
        };

        self.offset = start + len;

        Some(Ok(TlvEntry { tag, value }))
    }
}

/// Decoded TLV fields
///
/// Relays keep their order and duplicates. Other types are last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tlv {
    /// Event ID
    pub event_id: Option<EventId>,
    /// Relay URLs
    pub relays: Vec<String>,
    /// Author
    pub author: Option<PublicKey>,
    /// Kind
    pub kind: Option<u32>,
}

impl Tlv {
    /// Serialize as TLV payload
    ///
    /// Entries are written in type order: event ID, relays, author, kind.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf: Vec<u8> = Vec::new();

        if let Some(event_id) = &self.event_id {
            write_entry(&mut buf, SPECIAL, event_id.as_bytes())?;
        }

        for relay in self.relays.iter() {
            write_entry(&mut buf, RELAY, relay.as_bytes())?;
        }

        if let Some(author) = &self.author {
            write_entry(&mut buf, AUTHOR, author.as_bytes())?;
        }

        if let Some(kind) = self.kind {
            write_entry(&mut buf, KIND, &kind.to_be_bytes())?;
        }

        Ok(buf)
    }
}

/// Append a single entry to `buf`
pub fn write_entry(buf: &mut Vec<u8>, tag: u8, value: &[u8]) -> Result<(), Error> {
    let len: u8 = u8::try_from(value.len())
        .map_err(|_| Error::TlvValueTooLong { len: value.len() })?;
    buf.push(tag);
    buf.push(len);
    buf.extend_from_slice(value);
    Ok(())
}

/// Decode a TLV payload
///
/// Never fails: a truncated trailing entry is dropped and everything read before it is kept.
/// Unknown types, and known types with a value of the wrong size, are skipped.
pub fn decode_tlv(bytes: &[u8]) -> Tlv {
    let mut tlv: Tlv = Tlv::default();

    for entry in TlvReader::new(bytes) {
        let entry: TlvEntry<'_> = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "Dropping truncated TLV entry.");
                break;
            }
        };

        match entry.tag {
            SPECIAL => match EventId::from_slice(entry.value) {
                Ok(event_id) => tlv.event_id = Some(event_id),
                Err(e) => tracing::trace!(error = %e, "Skipping TLV event ID."),
            },
            RELAY => tlv.relays.push(ascii_lossy(entry.value)),
            AUTHOR => match PublicKey::from_slice(entry.value) {
                Ok(author) => tlv.author = Some(author),
                Err(e) => tracing::trace!(error = %e, "Skipping TLV author."),
            },
            KIND => match <[u8; 4]>::try_from(entry.value) {
                Ok(kind) => tlv.kind = Some(u32::from_be_bytes(kind)),
                Err(..) => tracing::trace!(len = entry.value.len(), "Skipping TLV kind."),
            },
            tag => tracing::trace!(tag, "Skipping unknown TLV type."),
        }
    }

    tlv
}

/// Keep only the ASCII bytes
fn ascii_lossy(value: &[u8]) -> String {
    value
        .iter()
        .filter(|b| b.is_ascii())
        .map(|b| *b as char)
        .collect()
}
