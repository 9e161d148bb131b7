// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tests for SecureBytes construction, growth, and views.

use serial_test::serial;

use palisade_alloc::locked_bytes;

use crate::error::BufferError;
use crate::secure_bytes::SecureBytes;

// =============================================================================
// Construction
// =============================================================================

#[test]
#[serial(ledger)]
fn test_new_is_empty() {
    let buffer = SecureBytes::new().expect("Failed to new()");

    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert!(buffer.as_slice().is_empty());
}

#[test]
#[serial(ledger)]
fn test_with_len_is_zero_filled() {
    let buffer = SecureBytes::with_len(48).expect("Failed to with_len()");

    assert_eq!(buffer.len(), 48);
    assert!(buffer.as_slice().iter().all(|&b| b == 0));
}

#[test]
#[serial(ledger)]
fn test_from_slice_copies() {
    let source = [0x01u8, 0x02, 0x03, 0x04];
    let buffer = SecureBytes::from_slice(&source).expect("Failed to from_slice()");

    assert_eq!(buffer.as_slice(), &source);
}

// =============================================================================
// append_slice() / append()
// =============================================================================

#[test]
#[serial(ledger)]
fn test_append_slice_grows() {
    let mut buffer = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");

    buffer.append_slice(&[0x03, 0x04]).expect("Failed to append_slice()");

    assert_eq!(buffer.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
}

#[test]
#[serial(ledger)]
fn test_append_empty_slice_is_noop() {
    let mut buffer = SecureBytes::from_slice(&[0x01]).expect("Failed to from_slice()");

    buffer.append_slice(&[]).expect("Failed to append_slice()");

    assert_eq!(buffer.as_slice(), &[0x01]);
}

#[test]
#[serial(ledger)]
fn test_append_from_empty() {
    let mut buffer = SecureBytes::new().expect("Failed to new()");

    buffer.append_slice(&[0xAA, 0xBB]).expect("Failed to append_slice()");

    assert_eq!(buffer.as_slice(), &[0xAA, 0xBB]);
}

#[test]
#[serial(ledger)]
fn test_append_secure_buffer() {
    let mut left = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");
    let right = SecureBytes::from_slice(&[0x03, 0x04]).expect("Failed to from_slice()");

    left.append(&right).expect("Failed to append()");

    assert_eq!(left.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(right.as_slice(), &[0x03, 0x04], "source unchanged");
}

#[test]
#[serial(ledger)]
fn test_growth_releases_budget_of_old_block() {
    let baseline = locked_bytes();

    let mut buffer = SecureBytes::from_slice(&[0u8; 64]).expect("Failed to from_slice()");
    for _ in 0..8 {
        buffer.append_slice(&[1u8; 64]).expect("Failed to append_slice()");
    }

    drop(buffer);
    assert_eq!(locked_bytes(), baseline, "no block leaked by growth");
}

// =============================================================================
// subrange()
// =============================================================================

#[test]
#[serial(ledger)]
fn test_subrange_copies_window() {
    let buffer = SecureBytes::from_slice(&[0x01, 0x02, 0x03, 0x04]).expect("Failed to from_slice()");

    let left = buffer.subrange(0..2).expect("Failed to subrange()");
    let right = buffer.subrange(2..4).expect("Failed to subrange()");
    let all = buffer.subrange(0..4).expect("Failed to subrange()");

    assert_eq!(left.as_slice(), &[0x01, 0x02]);
    assert_eq!(right.as_slice(), &[0x03, 0x04]);
    assert_eq!(all, buffer);
}

#[test]
#[serial(ledger)]
fn test_subrange_out_of_bounds() {
    let buffer = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");

    let result = buffer.subrange(1..3);

    assert!(matches!(result, Err(BufferError::OutOfRange)));
}

#[test]
#[serial(ledger)]
fn test_subrange_empty_window() {
    let buffer = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");

    let empty = buffer.subrange(1..1).expect("Failed to subrange()");

    assert!(empty.is_empty());
}

// =============================================================================
// Equality / Debug
// =============================================================================

#[test]
#[serial(ledger)]
fn test_eq_compares_contents() {
    let a = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");
    let b = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");
    let c = SecureBytes::from_slice(&[0x01, 0x03]).expect("Failed to from_slice()");
    let d = SecureBytes::from_slice(&[0x01]).expect("Failed to from_slice()");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}

#[test]
#[serial(ledger)]
fn test_try_clone_is_independent_copy() {
    let mut original = SecureBytes::from_slice(&[0x01, 0x02]).expect("Failed to from_slice()");
    let copy = original.try_clone().expect("Failed to try_clone()");

    original.as_mut_slice()[0] = 0xFF;

    assert_eq!(copy.as_slice(), &[0x01, 0x02]);
}

#[test]
#[serial(ledger)]
fn test_debug_does_not_print_contents() {
    let buffer = SecureBytes::from_slice(&[0x5A; 8]).expect("Failed to from_slice()");

    let printed = format!("{:?}", buffer);

    assert!(printed.contains("SecureBytes"));
    assert!(!printed.contains("5A"));
    assert!(!printed.contains("90"));
}
