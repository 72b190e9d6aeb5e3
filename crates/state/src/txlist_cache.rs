//! Short-lived cache of previously submitted tx-list blobs, keyed by content
//! hash.  Entries are never removed on the validation path; staleness is
//! judged at read time against the deployment's expiry window.

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};

use inlet_primitives::buf::Buf32;

/// Cache metadata for one blob.
#[derive(Copy, Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct TxListInfo {
    /// Timestamp the blob was first accepted at.
    valid_since: u64,

    /// Exact byte length of the blob that produced the cache key.
    size: u64,
}

impl TxListInfo {
    pub fn new(valid_since: u64, size: u64) -> Self {
        Self { valid_since, size }
    }

    pub fn valid_since(&self) -> u64 {
        self.valid_since
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read-time staleness check, inclusive at the boundary.
    pub fn is_live(&self, expiry: u64, now: u64) -> bool {
        self.valid_since.saturating_add(expiry) >= now
    }
}

#[derive(Clone, Debug, Default, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct TxListCache {
    entries: HashMap<Buf32, TxListInfo>,
}

impl TxListCache {
    pub fn new_empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Unconditionally overwrites (or creates) the entry for `hash`.
    pub fn put(&mut self, hash: Buf32, size: u64, now: u64) {
        self.entries.insert(hash, TxListInfo::new(now, size));
    }

    pub fn get(&self, hash: &Buf32) -> Option<&TxListInfo> {
        self.entries.get(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries that already fail the read-time expiry check.  This is
    /// purely a memory-reclamation sweep and cannot change validation
    /// outcomes, since expired entries are rejected at lookup anyway.
    ///
    /// Returns how many entries were removed.
    pub fn evict_expired(&mut self, expiry: u64, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, info| info.is_live(expiry, now));
        before - self.entries.len()
    }
}
