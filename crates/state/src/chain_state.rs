use borsh::{BorshDeserialize, BorshSerialize};
use tracing::debug;

use inlet_primitives::params::ProtocolParams;

use crate::{ring_buffer::BlockRingBuffer, txlist_cache::TxListCache};

/// Global proposal counters.  Single shared instance, mutated only inside
/// the serialized proposal execution.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct GlobalCounters {
    /// Count of proposals ever accepted; the next accepted block's id.
    num_blocks: u64,

    /// Highest block id confirmed final.  Written by the verification
    /// collaborator, read-only for proposing.
    last_verified_block_id: u64,

    /// Running sum of fees charged to proposers.
    acc_block_fees: u64,

    /// Running sum of accepted-proposal timestamps.
    acc_proposed_at: u64,

    /// Fee charged per proposal.  Mutated by the fee-market collaborator.
    block_fee: u64,
}

impl GlobalCounters {
    pub fn num_blocks(&self) -> u64 {
        self.num_blocks
    }

    pub fn last_verified_block_id(&self) -> u64 {
        self.last_verified_block_id
    }

    pub fn acc_block_fees(&self) -> u64 {
        self.acc_block_fees
    }

    pub fn acc_proposed_at(&self) -> u64 {
        self.acc_proposed_at
    }

    pub fn block_fee(&self) -> u64 {
        self.block_fee
    }

    /// Commits one accepted proposal's bookkeeping: counter advance plus the
    /// reward aggregates.
    pub fn note_proposal_accepted(&mut self, fee: u64, proposed_at: u64) {
        self.acc_block_fees += fee;
        self.acc_proposed_at += proposed_at;
        self.num_blocks += 1;
    }

    /// Fee-market-side write.
    pub fn set_block_fee(&mut self, fee: u64) {
        self.block_fee = fee;
    }

    /// Verification-side write, advancing the watermark.
    pub fn set_last_verified_block_id(&mut self, id: u64) {
        debug!(%id, "advancing verified watermark");
        self.last_verified_block_id = id;
    }
}

/// Aggregate state the proposing engine operates on.  Exclusive `&mut`
/// access per operation is what enforces the single-writer execution model.
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct ChainState {
    counters: GlobalCounters,
    ring_buffer: BlockRingBuffer,
    txlist_cache: TxListCache,
}

impl ChainState {
    /// Builds the state as of genesis.  `genesis_block_id` is the id the
    /// first proposal will take (>= 1, id 0 is the genesis block itself).
    pub fn from_genesis(params: &ProtocolParams, genesis_block_id: u64, block_fee: u64) -> Self {
        if genesis_block_id == 0 {
            panic!("chain_state: genesis block id must be nonzero");
        }

        Self {
            counters: GlobalCounters {
                num_blocks: genesis_block_id,
                last_verified_block_id: genesis_block_id - 1,
                acc_block_fees: 0,
                acc_proposed_at: 0,
                block_fee,
            },
            ring_buffer: BlockRingBuffer::new_empty(params.block_ring_buffer_size()),
            txlist_cache: TxListCache::new_empty(),
        }
    }

    pub fn counters(&self) -> &GlobalCounters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut GlobalCounters {
        &mut self.counters
    }

    pub fn ring_buffer(&self) -> &BlockRingBuffer {
        &self.ring_buffer
    }

    pub fn ring_buffer_mut(&mut self) -> &mut BlockRingBuffer {
        &mut self.ring_buffer
    }

    pub fn txlist_cache(&self) -> &TxListCache {
        &self.txlist_cache
    }

    pub fn txlist_cache_mut(&mut self) -> &mut TxListCache {
        &mut self.txlist_cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProtocolParams {
        ProtocolParams {
            block_ring_buffer_size: 8,
            block_max_proposals: 6,
            block_max_gas_limit: 6_000_000,
            block_max_txlist_bytes: 10_000,
            block_txlist_expiry: 0,
            chain_id: 167,
        }
    }

    #[test]
    fn test_genesis_counters() {
        let state = ChainState::from_genesis(&params(), 1, 10);
        let c = state.counters();

        assert_eq!(c.num_blocks(), 1);
        assert_eq!(c.last_verified_block_id(), 0);
        assert_eq!(c.acc_block_fees(), 0);
        assert_eq!(c.acc_proposed_at(), 0);
        assert_eq!(c.block_fee(), 10);
        assert_eq!(state.ring_buffer().capacity(), 8);
        assert!(state.txlist_cache().is_empty());
    }

    #[test]
    fn test_note_proposal_accepted() {
        let mut state = ChainState::from_genesis(&params(), 1, 10);

        state.counters_mut().note_proposal_accepted(10, 5000);
        state.counters_mut().note_proposal_accepted(10, 5012);

        let c = state.counters();
        assert_eq!(c.num_blocks(), 3);
        assert_eq!(c.acc_block_fees(), 20);
        assert_eq!(c.acc_proposed_at(), 10012);
    }
}
