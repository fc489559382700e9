// Copyright (c) 2022-2023 Yuki Kishimoto
// Copyright (c) 2023-2024 Rust Nostr Developers
// Distributed under the MIT software license

use nostr_nip19::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Random keys
    let keys = Keys::generate();
    let info = KeyInfo::from_keys(&keys)?;
    println!("{}", serde_json::to_string_pretty(&info)?);

    // Bech32 keys
    let keys = Keys::parse("nsec1j4c6269y9w0q2er2xjw8sv2ehyrtfxq3jwgdlxj6qfn8z4gjsq5qfvfk99")?;
    println!("Public key: {}", keys.public_key().to_bech32()?);

    let conversion =
        convert_public_key("npub14f8usejl26twx0dhuxjh9cas7keav9vr0v8nvtwtrjqx3vycc76qqh9nsy")?;
    println!("Public key hex: {}", conversion.output);

    // Event pointer
    let event_id =
        EventId::from_hex("d94a3f4dd87b9a3b0bed183b32e916fa29c8020107845d1752d72697fe5309a5")?;
    let nevent = Nip19Event::new(event_id)
        .relays(["wss://relay.damus.io"])
        .author(keys.public_key())
        .kind(1)
        .to_bech32()?;
    println!("{nevent}");

    let decoded = decode_nevent(&nevent)?;
    println!("Format: {}", decoded.format);
    println!("Note ID: {}", decoded.note_id()?);
    println!("Relays: {:?}", decoded.event.relays);

    Ok(())
}
