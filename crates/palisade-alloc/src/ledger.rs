// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Page ledger - reference-counted page locks and the locked-byte budget.
//!
//! Blocks handed out by the system allocator may share OS pages, so a page
//! is locked when the first block touches it and unlocked only when the
//! last block referencing it is released. The ledger holds the per-page
//! reference counts and the locked-byte total for the whole process.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::AllocError;
use crate::spin::SpinLock;

/// Ceiling on locked secure memory for the whole process: 64 KiB.
pub const SECURE_MEMORY_CEILING: usize = 64 * 1024;

struct PageLedger {
    /// Page base address -> number of live allocations touching the page.
    pages: BTreeMap<usize, usize>,
    /// Bytes of currently locked pages, metered against the ceiling.
    locked_bytes: usize,
}

static LEDGER: SpinLock<PageLedger> = SpinLock::new(PageLedger {
    pages: BTreeMap::new(),
    locked_bytes: 0,
});

static PAGE_SIZE: AtomicUsize = AtomicUsize::new(0);

/// Returns the bytes of pages currently pinned by live secure allocations.
///
/// Reads zero when no [`SecureAlloc`](crate::SecureAlloc) is live; a clean
/// shutdown requires exactly that.
pub fn locked_bytes() -> usize {
    LEDGER.lock().locked_bytes
}

pub(crate) fn page_size() -> usize {
    let cached = PAGE_SIZE.load(Ordering::Relaxed);
    if cached != 0 {
        return cached;
    }

    let size = query_page_size();
    PAGE_SIZE.store(size, Ordering::Relaxed);
    size
}

/// Locks and reference-counts every page in `[start, start + len)`.
///
/// Checks the budget before locking anything: on `OutOfSecureMemory` no
/// page has been touched. A failing `mlock` rolls back the pages already
/// locked for this range.
pub(crate) fn register_range(start: usize, len: usize) -> Result<(), AllocError> {
    debug_assert!(len > 0);

    let size = page_size();
    let mut guard = LEDGER.lock();

    let new_pages: Vec<usize> = range_pages(start, len, size)
        .filter(|page| !guard.pages.contains_key(page))
        .collect();

    let additional = new_pages.len() * size;
    if guard.locked_bytes + additional > SECURE_MEMORY_CEILING {
        return Err(AllocError::OutOfSecureMemory);
    }

    for (locked_so_far, page) in new_pages.iter().enumerate() {
        if !lock_page(*page, size) {
            for unlock in &new_pages[..locked_so_far] {
                unlock_page(*unlock, size);
            }
            return Err(AllocError::LockFailed);
        }
    }

    for page in range_pages(start, len, size) {
        *guard.pages.entry(page).or_insert(0) += 1;
    }
    guard.locked_bytes += additional;

    Ok(())
}

/// Drops one reference from every page in `[start, start + len)`, unlocking
/// pages whose count reaches zero.
///
/// A page shared with another live allocation keeps its lock.
pub(crate) fn release_range(start: usize, len: usize) {
    debug_assert!(len > 0);

    let size = page_size();
    let mut guard = LEDGER.lock();

    for page in range_pages(start, len, size) {
        let count = guard
            .pages
            .get_mut(&page)
            .expect("released range was never registered");

        *count -= 1;
        if *count == 0 {
            guard.pages.remove(&page);
            unlock_page(page, size);
            guard.locked_bytes -= size;
        }
    }
}

fn range_pages(start: usize, len: usize, size: usize) -> impl Iterator<Item = usize> {
    let first = start & !(size - 1);
    let last = (start + len - 1) & !(size - 1);
    (first..=last).step_by(size)
}

#[cfg(unix)]
fn query_page_size() -> usize {
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}

#[cfg(not(unix))]
fn query_page_size() -> usize {
    4096
}

#[cfg(unix)]
fn lock_page(page: usize, size: usize) -> bool {
    unsafe { libc::mlock(page as *const libc::c_void, size) == 0 }
}

#[cfg(not(unix))]
fn lock_page(_page: usize, _size: usize) -> bool {
    // No page locking available; blocks are still wiped on release.
    true
}

#[cfg(unix)]
fn unlock_page(page: usize, size: usize) {
    unsafe { libc::munlock(page as *const libc::c_void, size) };
}

#[cfg(not(unix))]
fn unlock_page(_page: usize, _size: usize) {}
