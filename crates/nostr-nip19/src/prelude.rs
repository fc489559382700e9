// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

//! Prelude

#![allow(unknown_lints)]
#![allow(ambiguous_glob_reexports)]

// External crates
pub use secp256k1;
pub use serde_json;

// Internal modules
pub use crate::bech32;
pub use crate::convert::{self, *};
pub use crate::event::id::*;
pub use crate::event::*;
pub use crate::key::*;
pub use crate::{Result, SECP256K1};

// NIPs
pub use crate::nips::nip19::{self, *};
pub use crate::nips::nip21::{self, *};
