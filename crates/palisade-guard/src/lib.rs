// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! palisade_guard - One-time process hardening before secrets enter memory
//!
//! Disables core dumps via `prctl(PR_SET_DUMPABLE, 0)` and
//! `setrlimit(RLIMIT_CORE, 0)` so that page-locked key material can never be
//! written to a dump file. The secure allocator calls [`harden_process`]
//! before its first allocation; a spin lock ensures only one thread performs
//! the initialization.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]


use core::sync::atomic::{AtomicU8, Ordering};

/// Hardening status returned by [`harden_process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardenStatus {
    /// Whether `prctl(PR_SET_DUMPABLE, 0)` succeeded.
    ///
    /// Blocks ptrace attachment and core dump generation. Reversible by
    /// other code calling `prctl(PR_SET_DUMPABLE, 1)`.
    pub dumpable_cleared: bool,

    /// Whether `setrlimit(RLIMIT_CORE, 0)` succeeded.
    ///
    /// Redundant core dump prevention (limits dump size to 0 bytes).
    /// Does NOT block ptrace.
    pub core_limit_cleared: bool,
}

impl HardenStatus {
    /// Returns `true` if at least one protection is active.
    pub fn is_hardened(&self) -> bool {
        self.dumpable_cleared || self.core_limit_cleared
    }
}

/// Initialization state: not yet attempted
const STATE_UNINIT: u8 = 0;
/// Initialization state: in progress by another thread
const STATE_IN_PROGRESS: u8 = 1;
/// Initialization state: completed
const STATE_DONE: u8 = 2;

static INIT_STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);
static DUMPABLE_CLEARED: AtomicU8 = AtomicU8::new(0);
static CORE_LIMIT_CLEARED: AtomicU8 = AtomicU8::new(0);

/// Returns the process hardening status.
///
/// **Side effect on first call:** attempts both protections. Subsequent
/// calls return the cached result without side effects.
///
/// Thread-safe: if multiple threads call simultaneously, one performs the
/// syscalls while the others spin-wait.
#[inline]
pub fn harden_process() -> HardenStatus {
    // Fast path: already initialized
    if INIT_STATE.load(Ordering::Acquire) == STATE_DONE {
        return HardenStatus {
            dumpable_cleared: DUMPABLE_CLEARED.load(Ordering::Relaxed) != 0,
            core_limit_cleared: CORE_LIMIT_CLEARED.load(Ordering::Relaxed) != 0,
        };
    }

    init_slow();
    harden_process()
}

#[cold]
#[inline(never)]
fn init_slow() {
    match INIT_STATE.compare_exchange(
        STATE_UNINIT,
        STATE_IN_PROGRESS,
        Ordering::Acquire,
        Ordering::Relaxed,
    ) {
        Ok(_) => {
            let dumpable = clear_dumpable();
            let core_limit = clear_core_limit();

            DUMPABLE_CLEARED.store(dumpable as u8, Ordering::Relaxed);
            CORE_LIMIT_CLEARED.store(core_limit as u8, Ordering::Relaxed);

            INIT_STATE.store(STATE_DONE, Ordering::Release);
        }
        Err(_) => {
            // Another thread is initializing, spin until done
            while INIT_STATE.load(Ordering::Acquire) != STATE_DONE {
                core::hint::spin_loop();
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn clear_dumpable() -> bool {
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0, 0, 0, 0) == 0 }
}

#[cfg(not(target_os = "linux"))]
fn clear_dumpable() -> bool {
    // prctl is Linux-only
    false
}

#[cfg(unix)]
fn clear_core_limit() -> bool {
    let limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    unsafe { libc::setrlimit(libc::RLIMIT_CORE, &limit) == 0 }
}

#[cfg(not(unix))]
fn clear_core_limit() -> bool {
    false
}
