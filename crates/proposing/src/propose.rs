//! Proposal orchestration.  Composes validation, the tx-list cache, the
//! block ring buffer, and the fee/deposit accounting into the single
//! `propose_block` operation.

use alloy_primitives::U256;
use tracing::{debug, warn};

use inlet_primitives::{buf::Buf32, params::ProtocolParams};
use inlet_state::{
    block::{BlockMetadata, BlockRecord, ProposalInput},
    chain_state::ChainState,
};

use crate::{
    context::{AddressResolver, DepositProvider, EventSink, HostContext, ServiceKey, TokenLedger},
    errors::ProposalError,
    events::BlockProposedEvent,
    validation::validate_proposal,
};

/// Orchestrator for block intake.  Owns the handles to the engine's
/// collaborators; all chain state is passed in exclusively per call.
pub struct ProposingEngine<D, R, L, S> {
    deposits: D,
    resolver: R,
    ledger: L,
    events: S,
}

impl<D, R, L, S> ProposingEngine<D, R, L, S>
where
    D: DepositProvider,
    R: AddressResolver,
    L: TokenLedger,
    S: EventSink,
{
    pub fn new(deposits: D, resolver: R, ledger: L, events: S) -> Self {
        Self {
            deposits,
            resolver,
            ledger,
            events,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    /// Processes one block proposal.  Either every side effect lands (cache
    /// entry, ring-buffer slot, fee debit, aggregates, event, counter
    /// advance) or none does.
    pub fn propose_block(
        &mut self,
        state: &mut ChainState,
        host: &impl HostContext,
        params: &ProtocolParams,
        input: &ProposalInput,
        txlist: &[u8],
    ) -> Result<BlockMetadata, ProposalError> {
        let now = host.timestamp();

        let decision = validate_proposal(
            params,
            state.counters(),
            state.txlist_cache(),
            input,
            txlist,
            now,
        )?;

        // The fee check runs before any mutation so a poor proposer aborts
        // the whole operation with nothing staged.
        let caller = host.caller();
        let fee = state.counters().block_fee();
        if self.ledger.balance_of(caller) < fee {
            warn!(?caller, %fee, "proposer cannot cover block fee");
            return Err(ProposalError::InsufficientBalance);
        }

        if decision.should_store() {
            state
                .txlist_cache_mut()
                .put(input.txlist_hash(), txlist.len() as u64, now);
        }

        let id = state.counters().num_blocks();
        let treasury = self.resolver.resolve(params.chain_id(), ServiceKey::Treasury);
        let deposits_processed = self.deposits.process_deposits(input.beneficiary());

        let l1_height = host.l1_number().saturating_sub(1);
        let meta = BlockMetadata::new(
            id,
            input.beneficiary(),
            treasury,
            input.gas_limit(),
            input.txlist_hash(),
            input.txlist_byte_start(),
            input.txlist_byte_end(),
            deposits_processed,
            now,
            l1_height,
            host.l1_hash(l1_height),
            compute_mix_hash(host.randomness(), id),
        );

        let record = BlockRecord::new_proposed(id, now, meta.compute_hash(), caller);
        state.ring_buffer_mut().write(id, record);

        self.ledger.debit(caller, fee);
        state.counters_mut().note_proposal_accepted(fee, now);

        let event = BlockProposedEvent::new(id, meta.clone(), fee);
        self.events.block_proposed(&event);
        debug!(%id, %fee, "accepted block proposal");

        Ok(meta)
    }

    /// Looks up a proposed block's record by id.
    pub fn get_block<'s>(
        &self,
        state: &'s ChainState,
        id: u64,
    ) -> Result<&'s BlockRecord, ProposalError> {
        state
            .ring_buffer()
            .get(id)
            .ok_or(ProposalError::BlockNotFound(id))
    }
}

/// Salts the host randomness with the proposal counter so several blocks
/// proposed within one L1 block still get distinct mix values.
fn compute_mix_hash(randomness: Buf32, num_blocks: u64) -> Buf32 {
    let mix = U256::from_be_bytes::<32>(randomness.into()).wrapping_mul(U256::from(num_blocks));
    Buf32::from(mix.to_be_bytes::<32>())
}
