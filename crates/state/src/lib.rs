//! State types for the block-intake engine: proposed-block records, the
//! fixed-capacity block ring buffer, the tx-list blob cache, and the global
//! proposal counters.

pub mod block;
pub mod chain_state;
pub mod ring_buffer;
pub mod txlist_cache;

pub mod prelude;
