// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! NIP21: `nostr:` URI scheme
//!
//! <https://github.com/nostr-protocol/nips/blob/master/21.md>

use core::fmt;

use super::nip19::{self, FromBech32, Nip19, Nip19Event, ToBech32};
use crate::event::EventId;
use crate::key::PublicKey;

/// URI scheme
pub const SCHEME: &str = "nostr";

/// NIP21 error
#[derive(Debug, PartialEq)]
pub enum Error {
    /// NIP19 error
    NIP19(nip19::Error),
    /// Invalid nostr URI
    InvalidURI,
    /// Secret keys must never be shared as URI
    UnsupportedBech32Type,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NIP19(e) => write!(f, "NIP19: {e}"),
            Self::InvalidURI => write!(f, "Invalid nostr URI"),
            Self::UnsupportedBech32Type => write!(f, "Unsupported bech32 type: secret key"),
        }
    }
}

impl From<nip19::Error> for Error {
    fn from(e: nip19::Error) -> Self {
        Self::NIP19(e)
    }
}

fn split_uri(uri: &str) -> Result<&str, Error> {
    let (scheme, data) = uri.split_once(':').ok_or(Error::InvalidURI)?;

    if scheme != SCHEME || data.is_empty() {
        return Err(Error::InvalidURI);
    }

    Ok(data)
}

/// Remove the `nostr:` scheme, if any
#[inline]
pub fn strip_scheme(s: &str) -> &str {
    split_uri(s).unwrap_or(s)
}

/// Nostr URI trait
pub trait NostrURI:
    Sized + ToBech32<Err = nip19::Error> + FromBech32<Err = nip19::Error>
{
    /// Get nostr URI
    #[inline]
    fn to_nostr_uri(&self) -> Result<String, Error> {
        Ok(format!("{SCHEME}:{}", self.to_bech32()?))
    }

    /// From `nostr` URI
    #[inline]
    fn from_nostr_uri<S>(uri: S) -> Result<Self, Error>
    where
        S: AsRef<str>,
    {
        let data: &str = split_uri(uri.as_ref())?;
        Ok(Self::from_bech32(data)?)
    }
}

impl NostrURI for PublicKey {}
impl NostrURI for EventId {}
impl NostrURI for Nip19Event {}

/// A representation any `NIP21` object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip21 {
    /// nostr:npub
    Pubkey(PublicKey),
    /// nostr:note
    EventId(EventId),
    /// nostr:nevent
    Event(Nip19Event),
}

impl From<Nip21> for Nip19 {
    fn from(value: Nip21) -> Self {
        match value {
            Nip21::Pubkey(val) => Self::Pubkey(val),
            Nip21::EventId(val) => Self::EventId(val),
            Nip21::Event(val) => Self::Event(val),
        }
    }
}

impl TryFrom<Nip19> for Nip21 {
    type Error = Error;

    fn try_from(value: Nip19) -> Result<Self, Self::Error> {
        match value {
            Nip19::Secret(..) => Err(Error::UnsupportedBech32Type),
            Nip19::Pubkey(val) => Ok(Self::Pubkey(val)),
            Nip19::EventId(val) => Ok(Self::EventId(val)),
            Nip19::Event(val) => Ok(Self::Event(val)),
        }
    }
}

impl Nip21 {
    /// Parse NIP21 string
    #[inline]
    pub fn parse<S>(uri: S) -> Result<Self, Error>
    where
        S: AsRef<str>,
    {
        let data: &str = split_uri(uri.as_ref())?;
        let nip19: Nip19 = Nip19::from_bech32(data)?;
        Self::try_from(nip19)
    }

    /// Serialize to NIP21 nostr URI
    pub fn to_nostr_uri(&self) -> Result<String, Error> {
        match self {
            Self::Pubkey(val) => val.to_nostr_uri(),
            Self::EventId(val) => val.to_nostr_uri(),
            Self::Event(val) => val.to_nostr_uri(),
        }
    }

    /// Get [EventId] if exists
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Self::EventId(id) => Some(*id),
            Self::Event(e) => Some(e.event_id),
            Self::Pubkey(..) => None,
        }
    }
}
