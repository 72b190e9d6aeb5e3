//! Pure validation of a block proposal's metadata and tx-list payload.
//!
//! Checks run in a fixed order and every failure is a hard rejection with no
//! side effects anywhere; the caller applies the cache decision afterwards.

use inlet_primitives::{hash, params::ProtocolParams};
use inlet_state::{
    block::{ProposalInput, PROPOSAL_INPUT_VERSION},
    chain_state::GlobalCounters,
    txlist_cache::{TxListCache, TxListInfo},
};

use crate::errors::ProposalError;

/// Whether the submitted tx-list blob should be recorded in the cache.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CacheDecision {
    Store,
    Skip,
}

impl CacheDecision {
    pub fn should_store(&self) -> bool {
        matches!(self, CacheDecision::Store)
    }
}

/// Validates a proposal against the current counters and tx-list cache.
///
/// Returns the cache decision for the submitted blob on acceptance.  Reads
/// only; never mutates anything.
pub fn validate_proposal(
    params: &ProtocolParams,
    counters: &GlobalCounters,
    cache: &TxListCache,
    input: &ProposalInput,
    txlist: &[u8],
    now: u64,
) -> Result<CacheDecision, ProposalError> {
    if input.version() != PROPOSAL_INPUT_VERSION
        || input.beneficiary().is_zero()
        || input.gas_limit() == 0
        || input.gas_limit() > params.block_max_gas_limit()
    {
        return Err(ProposalError::InvalidMetadata);
    }

    // Flow control: bounds the unverified backlog to the ring buffer's
    // usable window so writes never land on an undrained slot.
    let backlog_limit = counters
        .last_verified_block_id()
        .saturating_add(params.block_max_proposals())
        .saturating_add(1);
    if counters.num_blocks() >= backlog_limit {
        return Err(ProposalError::TooManyBlocks);
    }

    let len = txlist.len() as u64;
    if len > params.block_max_txlist_bytes() {
        return Err(ProposalError::TxListTooLarge);
    }

    let start = input.txlist_byte_start();
    let end = input.txlist_byte_end();
    if start > end {
        return Err(ProposalError::TxListRangeInvalid);
    }

    if !params.txlist_caching_enabled() {
        // Caching disabled: the full blob comes inline and the range must
        // cover it exactly.
        if start != 0 || end != len {
            return Err(ProposalError::TxListRangeInvalid);
        }
        return Ok(CacheDecision::Skip);
    }

    if txlist.is_empty() {
        // Empty submission reuses a previously cached blob.  A missing entry
        // reads as zero-size, which also covers the recorded-size-0 case:
        // both are "not found", never repaired.
        let info = cache
            .get(&input.txlist_hash())
            .copied()
            .unwrap_or(TxListInfo::new(0, 0));

        if end > info.size() {
            return Err(ProposalError::TxListRangeInvalid);
        }
        if info.size() == 0 || !info.is_live(params.block_txlist_expiry(), now) {
            return Err(ProposalError::TxListNotFound);
        }

        Ok(CacheDecision::Skip)
    } else {
        if end > len {
            return Err(ProposalError::TxListRangeInvalid);
        }
        if hash::raw(txlist) != input.txlist_hash() {
            return Err(ProposalError::TxListHashMismatch);
        }

        if input.cache_txlist() {
            Ok(CacheDecision::Store)
        } else {
            Ok(CacheDecision::Skip)
        }
    }
}

#[cfg(test)]
mod tests {
    use inlet_primitives::buf::{Buf20, Buf32};

    use super::*;

    const EXPIRY: u64 = 3600;

    fn params(expiry: u64) -> ProtocolParams {
        ProtocolParams {
            block_ring_buffer_size: 8,
            block_max_proposals: 6,
            block_max_gas_limit: 6_000_000,
            block_max_txlist_bytes: 100,
            block_txlist_expiry: expiry,
            chain_id: 167,
        }
    }

    fn counters() -> GlobalCounters {
        let state = inlet_state::chain_state::ChainState::from_genesis(&params(0), 1, 0);
        state.counters().clone()
    }

    fn beneficiary() -> Buf20 {
        Buf20::from([7u8; 20])
    }

    fn input_for(txlist: &[u8]) -> ProposalInput {
        ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            hash::raw(txlist),
            0,
            txlist.len() as u64,
            false,
        )
    }

    #[test]
    fn test_rejects_bad_metadata() {
        let txlist = vec![1u8; 10];
        let p = params(0);
        let c = counters();
        let cache = TxListCache::new_empty();

        let zero_bene = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            Buf20::zero(),
            1_000_000,
            hash::raw(&txlist),
            0,
            10,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &zero_bene, &txlist, 0),
            Err(ProposalError::InvalidMetadata)
        );

        let zero_gas = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            0,
            hash::raw(&txlist),
            0,
            10,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &zero_gas, &txlist, 0),
            Err(ProposalError::InvalidMetadata)
        );

        let over_gas = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            p.block_max_gas_limit() + 1,
            hash::raw(&txlist),
            0,
            10,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &over_gas, &txlist, 0),
            Err(ProposalError::InvalidMetadata)
        );

        let bad_version = ProposalInput::new(
            PROPOSAL_INPUT_VERSION + 1,
            beneficiary(),
            1_000_000,
            hash::raw(&txlist),
            0,
            10,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &bad_version, &txlist, 0),
            Err(ProposalError::InvalidMetadata)
        );
    }

    #[test]
    fn test_backlog_boundary() {
        let p = params(0);
        let cache = TxListCache::new_empty();
        let txlist = vec![1u8; 10];
        let input = input_for(&txlist);

        // genesis: num_blocks = 1, last_verified = 0, limit = 0 + 6 + 1 = 7
        let mut state = inlet_state::chain_state::ChainState::from_genesis(&p, 1, 0);
        for _ in 0..5 {
            state.counters_mut().note_proposal_accepted(0, 0);
        }
        // num_blocks = 6 < 7, still accepted
        assert!(validate_proposal(&p, state.counters(), &cache, &input, &txlist, 0).is_ok());

        state.counters_mut().note_proposal_accepted(0, 0);
        // num_blocks = 7 >= 7, rejected
        assert_eq!(
            validate_proposal(&p, state.counters(), &cache, &input, &txlist, 0),
            Err(ProposalError::TooManyBlocks)
        );

        // verification advancing the watermark reopens the window
        state.counters_mut().set_last_verified_block_id(1);
        assert!(validate_proposal(&p, state.counters(), &cache, &input, &txlist, 0).is_ok());
    }

    #[test]
    fn test_txlist_size_and_range() {
        let p = params(0);
        let c = counters();
        let cache = TxListCache::new_empty();

        // max 100 bytes, 101 submitted
        let big = vec![0u8; 101];
        assert_eq!(
            validate_proposal(&p, &c, &cache, &input_for(&big), &big, 0),
            Err(ProposalError::TxListTooLarge)
        );

        // 50 bytes with exact cover is fine under disabled caching
        let blob = vec![2u8; 50];
        assert!(validate_proposal(&p, &c, &cache, &input_for(&blob), &blob, 0).is_ok());

        // same blob with a short range is not
        let short = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            hash::raw(&blob),
            0,
            40,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &short, &blob, 0),
            Err(ProposalError::TxListRangeInvalid)
        );

        // inverted range
        let inverted = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            hash::raw(&blob),
            40,
            10,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &inverted, &blob, 0),
            Err(ProposalError::TxListRangeInvalid)
        );
    }

    #[test]
    fn test_cached_reuse_and_expiry() {
        let p = params(EXPIRY);
        let c = counters();
        let blob = vec![3u8; 64];
        let blob_hash = hash::raw(&blob);

        let mut cache = TxListCache::new_empty();
        cache.put(blob_hash, blob.len() as u64, 1000);

        let reuse = |end| {
            ProposalInput::new(
                PROPOSAL_INPUT_VERSION,
                beneficiary(),
                1_000_000,
                blob_hash,
                0,
                end,
                false,
            )
        };

        // in-window reuse with a sub-range
        assert!(validate_proposal(&p, &c, &cache, &reuse(40), &[], 1000 + EXPIRY / 2).is_ok());

        // boundary is inclusive
        assert!(validate_proposal(&p, &c, &cache, &reuse(64), &[], 1000 + EXPIRY).is_ok());

        // one second past the window
        assert_eq!(
            validate_proposal(&p, &c, &cache, &reuse(64), &[], 1001 + EXPIRY),
            Err(ProposalError::TxListNotFound)
        );

        // range past the cached size
        assert_eq!(
            validate_proposal(&p, &c, &cache, &reuse(65), &[], 1000),
            Err(ProposalError::TxListRangeInvalid)
        );

        // unknown hash reads as size zero
        let unknown = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            Buf32::from([9u8; 32]),
            0,
            0,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &unknown, &[], 1000),
            Err(ProposalError::TxListNotFound)
        );

        // a recorded zero-size entry is treated as not found, not repaired
        let zeroed = Buf32::from([8u8; 32]);
        cache.put(zeroed, 0, 1000);
        let zero_reuse = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            zeroed,
            0,
            0,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &zero_reuse, &[], 1000),
            Err(ProposalError::TxListNotFound)
        );
    }

    #[test]
    fn test_fresh_blob_checks() {
        let p = params(EXPIRY);
        let c = counters();
        let cache = TxListCache::new_empty();
        let blob = vec![4u8; 32];

        // declared hash must match the content
        let wrong_hash = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            Buf32::from([1u8; 32]),
            0,
            32,
            true,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &wrong_hash, &blob, 0),
            Err(ProposalError::TxListHashMismatch)
        );

        // range past the blob's actual length
        let over = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            hash::raw(&blob),
            0,
            33,
            true,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &over, &blob, 0),
            Err(ProposalError::TxListRangeInvalid)
        );

        // cache decision follows the opt-in flag
        let opt_in = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            hash::raw(&blob),
            0,
            32,
            true,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &opt_in, &blob, 0),
            Ok(CacheDecision::Store)
        );

        let opt_out = ProposalInput::new(
            PROPOSAL_INPUT_VERSION,
            beneficiary(),
            1_000_000,
            hash::raw(&blob),
            0,
            32,
            false,
        );
        assert_eq!(
            validate_proposal(&p, &c, &cache, &opt_out, &blob, 0),
            Ok(CacheDecision::Skip)
        );
    }
}
