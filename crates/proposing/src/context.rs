//! Interfaces to expose the context a proposal is being processed in.
//!
//! Everything the engine touches outside its own chain state comes through
//! these traits, so the transition logic stays testable in isolation.

use inlet_primitives::buf::{Buf20, Buf32};
use inlet_state::block::Deposit;

use crate::events::BlockProposedEvent;

/// Provider for context about the enclosing L1 execution: who is calling,
/// what time it is, and where the host chain currently stands.
pub trait HostContext {
    /// Account submitting the proposal, charged the block fee.
    fn caller(&self) -> Buf20;

    /// Unix seconds timestamp of the enclosing execution.
    fn timestamp(&self) -> u64;

    /// Current L1 block number.
    fn l1_number(&self) -> u64;

    /// Hash of the L1 block at `height`.
    fn l1_hash(&self, height: u64) -> Buf32;

    /// Host randomness source (difficulty/prevrandao style).  Best effort,
    /// not cryptographically secure.
    fn randomness(&self) -> Buf32;
}

/// Provider computing the L1->L2 value transfers bundled into a block.
/// Called exactly once per accepted proposal.
pub trait DepositProvider {
    fn process_deposits(&mut self, beneficiary: Buf20) -> Vec<Deposit>;
}

/// Logical service accounts the engine resolves per deployment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ServiceKey {
    Treasury,
}

/// Pure lookup from a logical service name to a concrete account address.
pub trait AddressResolver {
    fn resolve(&self, chain_id: u64, key: ServiceKey) -> Buf20;
}

/// Token balance ledger.  Updates are atomic within the serialized proposal
/// execution; the engine checks the balance before it debits.
pub trait TokenLedger {
    fn balance_of(&self, account: Buf20) -> u64;

    fn debit(&mut self, account: Buf20, amount: u64);
}

/// Receiver for accepted-proposal events.
pub trait EventSink {
    fn block_proposed(&mut self, event: &BlockProposedEvent);
}
