// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! DER encoding of ECDSA (r, s) pairs.
//!
//! `SEQUENCE { INTEGER r, INTEGER s }` with minimal positive integers.
//! Parsing is strict; anything malformed decodes to `None` so signature
//! verification can report `false` instead of erroring.

use alloc::vec::Vec;

use palisade_num::BigInt;

/// Encodes `(r, s)`; both must be positive.
pub(crate) fn encode(r: &BigInt, s: &BigInt) -> Vec<u8> {
    // Canonical signed bytes of a positive value are exactly a minimal
    // DER INTEGER body (0x00 pad when the top bit is set).
    let r_body = r.to_bytes();
    let s_body = s.to_bytes();

    let mut out = Vec::with_capacity(6 + r_body.len() + s_body.len());
    out.push(0x30);
    out.push((4 + r_body.len() + s_body.len()) as u8);
    out.push(0x02);
    out.push(r_body.len() as u8);
    out.extend_from_slice(&r_body);
    out.push(0x02);
    out.push(s_body.len() as u8);
    out.extend_from_slice(&s_body);
    out
}

/// Strictly parses a DER `(r, s)` sequence; `None` on any malformation.
pub(crate) fn decode(signature: &[u8]) -> Option<(BigInt, BigInt)> {
    let [0x30, body_len, body @ ..] = signature else {
        return None;
    };
    if *body_len as usize != body.len() || *body_len >= 0x80 {
        return None;
    }

    let (r, rest) = parse_integer(body)?;
    let (s, rest) = parse_integer(rest)?;
    if !rest.is_empty() {
        return None;
    }

    Some((r, s))
}

/// Parses one minimal, non-negative DER INTEGER; returns it and the rest.
fn parse_integer(input: &[u8]) -> Option<(BigInt, &[u8])> {
    let [0x02, len, rest @ ..] = input else {
        return None;
    };
    let len = *len as usize;
    if len == 0 || len >= 0x80 || len > rest.len() {
        return None;
    }

    let body = &rest[..len];
    // Reject negative values and non-minimal padding.
    if body[0] & 0x80 != 0 {
        return None;
    }
    if body[0] == 0x00 && len > 1 && body[1] & 0x80 == 0 {
        return None;
    }

    Some((BigInt::from_unsigned_bytes(body), &rest[len..]))
}
