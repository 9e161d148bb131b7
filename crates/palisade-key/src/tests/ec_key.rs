// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tests for EcKey: construction, signing, and verification.

use serial_test::serial;

use palisade_buffer::SecureBytes;
use palisade_num::BigInt;
use palisade_rand::test_utils::{FixedEntropySource, FlakyEntropySource};

use crate::curve::Secp256k1;
use crate::error::KeyError;
use crate::hashes::sha256;
use crate::tests::hex;
use crate::EcKey;

fn key_from_hex_scalar(scalar_hex: &str) -> EcKey {
    let secret = SecureBytes::from_slice(&hex(scalar_hex)).expect("Failed to from_slice()");
    EcKey::from_private_key(secret).expect("Failed to from_private_key()")
}

fn key_of_one() -> EcKey {
    key_from_hex_scalar("0000000000000000000000000000000000000000000000000000000000000001")
}

// =============================================================================
// from_private_key()
// =============================================================================

#[test]
#[serial(ledger)]
fn test_scalar_one_yields_generator() {
    let key = key_of_one();

    assert_eq!(
        key.public_key().to_vec(),
        hex("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
    );
    assert_eq!(
        key.public_key_uncompressed().to_vec(),
        hex(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        )
    );
}

#[test]
#[serial(ledger)]
fn test_known_scalar_yields_known_public_key() {
    // Master key of the BIP32 test-vector-1 tree.
    let key = key_from_hex_scalar("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35");

    assert_eq!(
        key.public_key().to_vec(),
        hex("0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2")
    );
}

#[test]
#[serial(ledger)]
fn test_public_key_derivation_is_deterministic() {
    let first = key_from_hex_scalar("00000000000000000000000000000000000000000000000000000000deadbeef");
    let second = key_from_hex_scalar("00000000000000000000000000000000000000000000000000000000deadbeef");

    assert_eq!(first.public_key(), second.public_key());
    assert_eq!(first.public_key_uncompressed(), second.public_key_uncompressed());
}

#[test]
#[serial(ledger)]
fn test_compressed_and_uncompressed_agree() {
    let key = key_from_hex_scalar("00000000000000000000000000000000000000000000000000000000cafebabe");

    let from_compressed =
        EcKey::from_public_key(key.public_key()).expect("Failed to from_public_key()");
    let from_uncompressed =
        EcKey::from_public_key(key.public_key_uncompressed()).expect("Failed to from_public_key()");

    assert_eq!(from_compressed.public_key(), from_uncompressed.public_key());
    assert_eq!(
        from_compressed.public_key_uncompressed(),
        from_uncompressed.public_key_uncompressed()
    );
}

#[test]
#[serial(ledger)]
fn test_zero_scalar_is_rejected() {
    let secret = SecureBytes::with_len(32).expect("Failed to with_len()");

    let result = EcKey::from_private_key(secret);

    assert!(matches!(result, Err(KeyError::InvalidPrivateKey)));
}

#[test]
#[serial(ledger)]
fn test_scalar_at_order_is_rejected() {
    let order = SecureBytes::from_slice(&hex(
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    ))
    .expect("Failed to from_slice()");

    let result = EcKey::from_private_key(order);

    assert!(matches!(result, Err(KeyError::InvalidPrivateKey)));
}

#[test]
#[serial(ledger)]
fn test_export_private_key_is_padded() {
    let key = key_of_one();

    let exported = key.export_private_key().expect("Failed to export_private_key()");

    assert_eq!(exported.len(), 32);
    assert_eq!(exported.as_slice()[31], 0x01);
    assert!(exported.as_slice()[..31].iter().all(|&b| b == 0));
}

// =============================================================================
// from_public_key()
// =============================================================================

#[test]
#[serial(ledger)]
fn test_public_only_key_cannot_sign() {
    let signer = key_of_one();
    let verifier = EcKey::from_public_key(signer.public_key()).expect("Failed to from_public_key()");

    assert!(!verifier.has_private_key());
    assert!(verifier.private_key().is_none());
    assert!(matches!(
        verifier.export_private_key(),
        Err(KeyError::MissingPrivateKey)
    ));
    assert!(matches!(
        verifier.sign(&[0u8; 32]),
        Err(KeyError::MissingPrivateKey)
    ));
}

#[test]
#[serial(ledger)]
fn test_malformed_public_keys_are_rejected() {
    assert!(matches!(
        EcKey::from_public_key(&[]),
        Err(KeyError::InvalidPublicKey)
    ));
    assert!(matches!(
        EcKey::from_public_key(&[0x02; 16]),
        Err(KeyError::InvalidPublicKey)
    ));

    let mut off_curve = [0u8; 65];
    off_curve[0] = 0x04;
    off_curve[32] = 0x01;
    off_curve[64] = 0x01;
    assert!(matches!(
        EcKey::from_public_key(&off_curve),
        Err(KeyError::InvalidPublicKey)
    ));
}

// =============================================================================
// generate()
// =============================================================================

#[test]
#[serial(ledger)]
fn test_generated_keys_are_unique() {
    let first = EcKey::generate().expect("Failed to generate()");
    let second = EcKey::generate().expect("Failed to generate()");

    assert_ne!(first.public_key(), second.public_key());
}

#[test]
#[serial(ledger)]
fn test_generate_with_fixed_entropy_is_deterministic() {
    let first = EcKey::generate_with(&FixedEntropySource::new(&[0x42]))
        .expect("Failed to generate_with()");
    let second = EcKey::generate_with(&FixedEntropySource::new(&[0x42]))
        .expect("Failed to generate_with()");

    assert_eq!(first.public_key(), second.public_key());
    assert!(first.has_private_key());
}

#[test]
#[serial(ledger)]
fn test_generate_surfaces_entropy_failure() {
    let result = EcKey::generate_with(&FlakyEntropySource::new(1));

    assert!(matches!(result, Err(KeyError::RandomSourceUnavailable)));
}

// =============================================================================
// sign() / verify()
// =============================================================================

#[test]
#[serial(ledger)]
fn test_sign_verify_roundtrip() {
    let key = EcKey::generate().expect("Failed to generate()");
    let hash = sha256(&[0x01, 0x02, 0x03]);

    let signature = key.sign(&hash).expect("Failed to sign()");

    assert!(key.verify(&signature, &hash));
}

#[test]
#[serial(ledger)]
fn test_verify_with_public_only_key() {
    let signer = key_from_hex_scalar("00000000000000000000000000000000000000000000000000000000000012ef");
    let verifier = EcKey::from_public_key(signer.public_key()).expect("Failed to from_public_key()");
    let hash = sha256(b"payment");

    let signature = signer.sign(&hash).expect("Failed to sign()");

    assert!(verifier.verify(&signature, &hash));
}

#[test]
#[serial(ledger)]
fn test_signatures_are_deterministic() {
    let key = key_from_hex_scalar("0000000000000000000000000000000000000000000000000000000000001234");
    let hash = sha256(b"deterministic");

    let first = key.sign(&hash).expect("Failed to sign()");
    let second = key.sign(&hash).expect("Failed to sign()");

    assert_eq!(first, second);
}

#[test]
#[serial(ledger)]
fn test_rfc6979_known_signature() {
    // Deterministic-nonce vector: scalar 1, message "Satoshi Nakamoto".
    let key = key_of_one();
    let hash = sha256(b"Satoshi Nakamoto");

    let signature = key.sign(&hash).expect("Failed to sign()");

    assert_eq!(
        signature,
        hex(
            "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8\
             02202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"
        )
    );
}

#[test]
#[serial(ledger)]
fn test_signature_is_low_s() {
    let curve = Secp256k1::new();
    let half_order = curve.n.shr(1);
    let key = key_from_hex_scalar("0000000000000000000000000000000000000000000000000000000000005678");

    for message in [
        &b"a"[..],
        &b"b"[..],
        &b"c"[..],
        &b"d"[..],
        &b"e"[..],
        &b"f"[..],
        &b"g"[..],
        &b"h"[..],
    ] {
        let signature = key.sign(&sha256(message)).expect("Failed to sign()");

        // [0x30, total, 0x02, r_len, r.., 0x02, s_len, s..]
        let r_len = signature[3] as usize;
        let s_len = signature[5 + r_len] as usize;
        let s_bytes = &signature[6 + r_len..6 + r_len + s_len];
        let s = BigInt::from_unsigned_bytes(s_bytes);

        assert!(s <= half_order, "s exceeded half order for {message:?}");
    }
}

#[test]
#[serial(ledger)]
fn test_corrupted_signature_fails_verification() {
    let key = EcKey::generate().expect("Failed to generate()");
    let hash = sha256(b"corruption");
    let signature = key.sign(&hash).expect("Failed to sign()");

    // Sampled positions cover the header, both length bytes, and spread
    // across the r and s bodies.
    for position in (0..signature.len()).step_by(7).chain([1, 3, signature.len() - 1]) {
        let mut corrupted = signature.clone();
        corrupted[position] ^= 0x01;

        assert!(
            !key.verify(&corrupted, &hash),
            "corrupt byte {position} still verified"
        );
    }
}

#[test]
#[serial(ledger)]
fn test_verify_rejects_other_key_and_other_hash() {
    let key = EcKey::generate().expect("Failed to generate()");
    let other = EcKey::generate().expect("Failed to generate()");
    let hash = sha256(&[0x01, 0x02, 0x03]);
    let other_hash = sha256(&[0x01, 0x02, 0x03, 0x04]);

    let signature = key.sign(&hash).expect("Failed to sign()");

    assert!(!other.verify(&signature, &hash));
    assert!(!key.verify(&signature, &other_hash));
}

#[test]
#[serial(ledger)]
fn test_sign_rejects_wrong_hash_length() {
    let key = key_of_one();

    assert!(matches!(key.sign(&[0u8; 31]), Err(KeyError::InvalidHashLength)));
    assert!(matches!(key.sign(&[0u8; 33]), Err(KeyError::InvalidHashLength)));
    assert!(matches!(key.sign(&[]), Err(KeyError::InvalidHashLength)));
}

#[test]
#[serial(ledger)]
fn test_verify_is_false_for_garbage() {
    let key = key_of_one();
    let hash = sha256(b"x");

    assert!(!key.verify(&[], &hash));
    assert!(!key.verify(&[0x30, 0x00], &hash));
    assert!(!key.verify(&[0xFF; 72], &hash));

    let signature = key.sign(&hash).expect("Failed to sign()");
    assert!(!key.verify(&signature, &[0u8; 31]));
}

// =============================================================================
// Debug
// =============================================================================

#[test]
#[serial(ledger)]
fn test_debug_does_not_print_scalar() {
    let key = key_of_one();

    let printed = format!("{:?}", key);

    assert!(printed.contains("has_private"));
    assert!(!printed.to_lowercase().contains("secure"));
}
