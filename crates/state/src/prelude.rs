pub use crate::{
    block::{BlockMetadata, BlockRecord, Deposit, ProposalInput},
    chain_state::{ChainState, GlobalCounters},
    ring_buffer::BlockRingBuffer,
    txlist_cache::{TxListCache, TxListInfo},
};
