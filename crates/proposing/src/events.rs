use borsh::{BorshDeserialize, BorshSerialize};

use inlet_state::block::BlockMetadata;

/// Emitted once per accepted proposal.  Carries the full metadata so the
/// canonical chain can be reconstructed off-chain; only the metadata's hash
/// is kept in the ring buffer.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct BlockProposedEvent {
    id: u64,
    meta: BlockMetadata,
    fee: u64,
}

impl BlockProposedEvent {
    pub fn new(id: u64, meta: BlockMetadata, fee: u64) -> Self {
        Self { id, meta, fee }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn meta(&self) -> &BlockMetadata {
        &self.meta
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }
}
