// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]
#![cfg_attr(bench, feature(test))]

//! NIP-19 bech32 identifier codec for the Nostr protocol.

#![doc = include_str!("../README.md")]

#[cfg(bench)]
extern crate test;

use once_cell::sync::Lazy;
pub use secp256k1::{self, All, Secp256k1};
pub use serde_json;

pub mod bech32;
pub mod convert;
pub mod event;
pub mod key;
pub mod nips;
pub mod prelude;

pub use self::event::EventId;
pub use self::key::{Keys, PublicKey, SecretKey};
pub use self::nips::nip19::{
    DecodeOptions, DecodedNevent, FromBech32, NeventFormat, Nip19, Nip19Event, ToBech32,
};
pub use self::nips::nip21::NostrURI;

/// Result
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;

/// Global secp256k1 context
pub static SECP256K1: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);
