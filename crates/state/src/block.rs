use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};

use inlet_primitives::{
    buf::{Buf20, Buf32},
    hash::compute_borsh_hash,
};

/// Current proposal input schema version.  Older callers encoded the
/// cache-opt-in flag by reinterpreting spare metadata bytes; the explicit
/// version tag replaces that.
pub const PROPOSAL_INPUT_VERSION: u8 = 1;

/// Caller-supplied metadata for a block proposal.  Ephemeral, only its
/// derived [`BlockMetadata`] is committed.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct ProposalInput {
    /// Input schema version.
    pub(crate) version: u8,

    /// Account credited with the block's reward on L2.
    pub(crate) beneficiary: Buf20,

    /// Gas limit the proposer claims for the block.
    pub(crate) gas_limit: u64,

    /// Content hash of the tx-list blob the block commits to.
    pub(crate) txlist_hash: Buf32,

    /// Start of the byte range of the blob the block actually uses.
    pub(crate) txlist_byte_start: u64,

    /// End (exclusive) of the byte range of the blob the block uses.
    pub(crate) txlist_byte_end: u64,

    /// Whether a freshly submitted blob should be recorded in the tx-list
    /// cache for later reuse.  Only meaningful for non-empty submissions.
    pub(crate) cache_txlist: bool,
}

impl ProposalInput {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: u8,
        beneficiary: Buf20,
        gas_limit: u64,
        txlist_hash: Buf32,
        txlist_byte_start: u64,
        txlist_byte_end: u64,
        cache_txlist: bool,
    ) -> Self {
        Self {
            version,
            beneficiary,
            gas_limit,
            txlist_hash,
            txlist_byte_start,
            txlist_byte_end,
            cache_txlist,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn beneficiary(&self) -> Buf20 {
        self.beneficiary
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn txlist_hash(&self) -> Buf32 {
        self.txlist_hash
    }

    pub fn txlist_byte_start(&self) -> u64 {
        self.txlist_byte_start
    }

    pub fn txlist_byte_end(&self) -> u64 {
        self.txlist_byte_end
    }

    pub fn cache_txlist(&self) -> bool {
        self.cache_txlist
    }
}

/// A single L1->L2 value transfer bundled into a proposed block.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct Deposit {
    /// L2 account the value is credited to.
    recipient: Buf20,

    /// Amount transferred.
    amount: u64,
}

impl Deposit {
    pub fn new(recipient: Buf20, amount: u64) -> Self {
        Self { recipient, amount }
    }

    pub fn recipient(&self) -> Buf20 {
        self.recipient
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Full metadata of an accepted proposal.  Only its hash is persisted in the
/// ring buffer; the full struct is carried by the proposal event so it can be
/// reconstructed off-chain.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct BlockMetadata {
    /// Logical block id, equal to the proposal counter at acceptance.
    pub(crate) id: u64,

    /// Reward beneficiary, copied from the input.
    pub(crate) beneficiary: Buf20,

    /// Treasury address resolved for the deployment's chain id.
    pub(crate) treasury: Buf20,

    /// Gas limit, copied from the input.
    pub(crate) gas_limit: u64,

    /// Tx-list blob content hash.
    pub(crate) txlist_hash: Buf32,

    /// Tx-list byte range, start.
    pub(crate) txlist_byte_start: u64,

    /// Tx-list byte range, end (exclusive).
    pub(crate) txlist_byte_end: u64,

    /// Deposits the deposit-processing collaborator bundled into the block.
    pub(crate) deposits_processed: Vec<Deposit>,

    /// Proposal timestamp.
    pub(crate) timestamp: u64,

    /// Height of the L1 block the proposal anchors to.
    pub(crate) l1_height: u64,

    /// Hash of the L1 block at `l1_height`.
    pub(crate) l1_hash: Buf32,

    /// Best-effort entropy, salted per proposal so blocks proposed within
    /// one L1 block still get distinct values.  Not cryptographically secure.
    pub(crate) mix_hash: Buf32,
}

impl BlockMetadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        beneficiary: Buf20,
        treasury: Buf20,
        gas_limit: u64,
        txlist_hash: Buf32,
        txlist_byte_start: u64,
        txlist_byte_end: u64,
        deposits_processed: Vec<Deposit>,
        timestamp: u64,
        l1_height: u64,
        l1_hash: Buf32,
        mix_hash: Buf32,
    ) -> Self {
        Self {
            id,
            beneficiary,
            treasury,
            gas_limit,
            txlist_hash,
            txlist_byte_start,
            txlist_byte_end,
            deposits_processed,
            timestamp,
            l1_height,
            l1_hash,
            mix_hash,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn beneficiary(&self) -> Buf20 {
        self.beneficiary
    }

    pub fn treasury(&self) -> Buf20 {
        self.treasury
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn txlist_hash(&self) -> Buf32 {
        self.txlist_hash
    }

    pub fn txlist_byte_start(&self) -> u64 {
        self.txlist_byte_start
    }

    pub fn txlist_byte_end(&self) -> u64 {
        self.txlist_byte_end
    }

    pub fn deposits_processed(&self) -> &[Deposit] {
        &self.deposits_processed
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn l1_height(&self) -> u64 {
        self.l1_height
    }

    pub fn l1_hash(&self) -> Buf32 {
        self.l1_hash
    }

    pub fn mix_hash(&self) -> Buf32 {
        self.mix_hash
    }

    /// Computes the commitment stored in the block record.
    pub fn compute_hash(&self) -> Buf32 {
        compute_borsh_hash(self)
    }
}

/// Record of an accepted proposal as stored in the ring buffer.
#[derive(Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize)]
pub struct BlockRecord {
    /// Logical id at the time the slot was written.  A lookup whose id does
    /// not match this field means the slot has been recycled.
    pub(crate) block_id: u64,

    /// Timestamp the proposal was accepted at.
    pub(crate) proposed_at: u64,

    /// Commitment to the full [`BlockMetadata`].
    pub(crate) meta_hash: Buf32,

    /// Account that proposed the block and paid the fee.
    pub(crate) proposer: Buf20,

    /// Counter seed handed to the fork-choice collaborator.
    pub(crate) next_fork_choice_id: u64,

    /// Fork choice the verification collaborator settled on, 0 while the
    /// block is unverified.
    pub(crate) verified_fork_choice_id: u64,
}

impl BlockRecord {
    /// Builds the record for a freshly accepted proposal.
    pub fn new_proposed(block_id: u64, proposed_at: u64, meta_hash: Buf32, proposer: Buf20) -> Self {
        Self {
            block_id,
            proposed_at,
            meta_hash,
            proposer,
            next_fork_choice_id: 1,
            verified_fork_choice_id: 0,
        }
    }

    pub fn block_id(&self) -> u64 {
        self.block_id
    }

    pub fn proposed_at(&self) -> u64 {
        self.proposed_at
    }

    pub fn meta_hash(&self) -> Buf32 {
        self.meta_hash
    }

    pub fn proposer(&self) -> Buf20 {
        self.proposer
    }

    pub fn next_fork_choice_id(&self) -> u64 {
        self.next_fork_choice_id
    }

    pub fn verified_fork_choice_id(&self) -> u64 {
        self.verified_fork_choice_id
    }

    /// Hands out the next fork-choice id and advances the seed.
    pub fn take_next_fork_choice_id(&mut self) -> u64 {
        let id = self.next_fork_choice_id;
        self.next_fork_choice_id += 1;
        id
    }

    /// Verification-side write.  The collaborator never touches `block_id`,
    /// `meta_hash`, or `proposer`.
    pub fn set_verified_fork_choice_id(&mut self, fc_id: u64) {
        self.verified_fork_choice_id = fc_id;
    }
}
