//! Global protocol parameters for the block-intake engine.

use serde::{Deserialize, Serialize};

/// Deployment parameters that don't change for the lifetime of the network
/// (unless there's some weird hard fork).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Capacity of the proposed-block ring buffer.  MUST be nonzero.
    pub block_ring_buffer_size: u64,

    /// Max number of blocks allowed between the latest proposal and the last
    /// verified block.  Bounds how far proposing may outrun verification.
    pub block_max_proposals: u64,

    /// Upper bound on a proposed block's gas limit.
    pub block_max_gas_limit: u64,

    /// Upper bound on a tx-list blob's byte length.
    pub block_max_txlist_bytes: u64,

    /// Seconds a cached tx-list blob stays reusable.  Zero disables the
    /// tx-list cache entirely.
    pub block_txlist_expiry: u64,

    /// Chain id used for service address resolution.
    pub chain_id: u64,
}

impl ProtocolParams {
    pub fn block_ring_buffer_size(&self) -> u64 {
        self.block_ring_buffer_size
    }

    pub fn block_max_proposals(&self) -> u64 {
        self.block_max_proposals
    }

    pub fn block_max_gas_limit(&self) -> u64 {
        self.block_max_gas_limit
    }

    pub fn block_max_txlist_bytes(&self) -> u64 {
        self.block_max_txlist_bytes
    }

    pub fn block_txlist_expiry(&self) -> u64 {
        self.block_txlist_expiry
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Whether tx-list caching is enabled at all.
    pub fn txlist_caching_enabled(&self) -> bool {
        self.block_txlist_expiry > 0
    }
}
