// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Whole-stack integration tests.

use serial_test::serial;

use crate::{locked_bytes, ChainKey, EcKey, SecureBytes};

#[test]
#[serial(ledger)]
fn test_wallet_lifecycle_releases_all_secure_memory() {
    let baseline = locked_bytes();

    {
        let master = ChainKey::master_from_seed(&[0x10; 16]).expect("Failed to master_from_seed()");
        let spend = master
            .derive_hardened(44)
            .expect("Failed to derive_hardened()")
            .derive_child(0)
            .expect("Failed to derive_child()");

        let hash = [0xA5u8; 32];
        let signature = spend.key().sign(&hash).expect("Failed to sign()");
        assert!(spend.key().verify(&signature, &hash));

        assert!(locked_bytes() > baseline, "live keys hold locked pages");
    }

    // Every scalar, chain code, and scratch buffer is gone.
    assert_eq!(locked_bytes(), baseline);
}

#[test]
#[serial(ledger)]
fn test_watch_only_wallet_follows_spending_wallet() {
    let master = ChainKey::master_from_seed(&[0x22; 32]).expect("Failed to master_from_seed()");
    let watch = ChainKey::from_public_key(
        master.key().public_key(),
        master.chain_code().try_clone().expect("Failed to try_clone()"),
    )
    .expect("Failed to from_public_key()");

    for index in 0..4 {
        let spend_child = master.derive_child(index).expect("Failed to derive_child()");
        let watch_child = watch.derive_child(index).expect("Failed to derive_child()");

        assert_eq!(
            spend_child.key().public_key(),
            watch_child.key().public_key()
        );

        let hash = [index as u8; 32];
        let signature = spend_child.key().sign(&hash).expect("Failed to sign()");
        assert!(watch_child.key().verify(&signature, &hash));
    }
}

#[test]
#[serial(ledger)]
fn test_signature_travels_through_public_encoding() {
    let key = EcKey::generate().expect("Failed to generate()");
    let hash = [0x3Cu8; 32];
    let signature = key.sign(&hash).expect("Failed to sign()");

    // A verifier rebuilt from either wire encoding accepts the signature.
    for encoding in [
        key.public_key().to_vec(),
        key.public_key_uncompressed().to_vec(),
    ] {
        let verifier = EcKey::from_public_key(&encoding).expect("Failed to from_public_key()");
        assert!(verifier.verify(&signature, &hash));
    }
}

#[test]
#[serial(ledger)]
fn test_secure_bytes_roundtrip_through_key() {
    let mut secret = SecureBytes::with_len(32).expect("Failed to with_len()");
    secret.as_mut_slice()[31] = 0x07;

    let key = EcKey::from_private_key(secret).expect("Failed to from_private_key()");
    let exported = key.export_private_key().expect("Failed to export_private_key()");

    assert_eq!(exported.as_slice()[31], 0x07);
    assert!(exported.as_slice()[..31].iter().all(|&b| b == 0));
}
