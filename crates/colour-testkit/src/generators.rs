//! Proptest generators for property-based testing.

use proptest::prelude::*;

use colour_core::{
    Canvas, ColourMode, Ed25519PublicKey, Keypair, Record, RecordBuilder, RecordHash,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random RecordHash.
pub fn record_hash() -> impl Strategy<Value = RecordHash> {
    any::<[u8; 32]>().prop_map(RecordHash::from_bytes)
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// Generate a ColourMode.
pub fn colour_mode() -> impl Strategy<Value = ColourMode> {
    prop_oneof![
        Just(ColourMode::Unknown),
        Just(ColourMode::Grayscale),
        Just(ColourMode::GrayscaleAlpha),
        Just(ColourMode::Indexed),
        Just(ColourMode::Rgb),
        Just(ColourMode::Rgba),
    ]
}

/// Generate a canvas name.
pub fn canvas_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Generate a canvas with plausible dimensions.
pub fn canvas() -> impl Strategy<Value = Canvas> {
    (canvas_name(), 1u32..=4096, 1u32..=4096, 1u32..=64, colour_mode()).prop_map(
        |(name, width, height, depth, mode)| Canvas {
            name,
            width,
            height,
            depth,
            mode,
        },
    )
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a signed record with arbitrary payload.
pub fn record() -> impl Strategy<Value = Record> {
    (keypair(), timestamp(), payload(256)).prop_map(|(keypair, timestamp, payload)| {
        RecordBuilder::new(keypair.public_key())
            .timestamp(timestamp)
            .payload(payload)
            .sign(&keypair)
    })
}
