//! Fixed-capacity circular store for proposed-block records.
//!
//! Block `id` occupies slot `id % capacity`.  Writes overwrite
//! unconditionally; the proposal flow-control check is what guarantees an
//! overwritten slot's block has already been verified and drained.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::block::BlockRecord;

#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct BlockRingBuffer {
    /// Slot array, `capacity` entries, all `None` at genesis.
    slots: Vec<Option<BlockRecord>>,
}

impl BlockRingBuffer {
    /// Creates an empty buffer.  Panics if `capacity` is zero.
    pub fn new_empty(capacity: u64) -> Self {
        if capacity == 0 {
            panic!("ring_buffer: zero capacity");
        }

        Self {
            slots: vec![None; capacity as usize],
        }
    }

    pub fn capacity(&self) -> u64 {
        self.slots.len() as u64
    }

    fn slot_idx(&self, id: u64) -> usize {
        (id % self.capacity()) as usize
    }

    /// Stores `record` at slot `id % capacity`, overwriting whatever was
    /// there.  Panics if the record's own id disagrees with `id`.
    pub fn write(&mut self, id: u64, record: BlockRecord) {
        if record.block_id() != id {
            panic!("ring_buffer: record id mismatch");
        }

        let idx = self.slot_idx(id);
        self.slots[idx] = Some(record);
    }

    /// Returns the record for `id`, or `None` if the id was never proposed
    /// or its slot has since been recycled by a later wraparound.
    pub fn get(&self, id: u64) -> Option<&BlockRecord> {
        let idx = self.slot_idx(id);
        self.slots[idx].as_ref().filter(|r| r.block_id() == id)
    }

    /// Mutable lookup with the same staleness check, used by the
    /// verification side to update a record's fork-choice fields.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut BlockRecord> {
        let idx = self.slot_idx(id);
        self.slots[idx].as_mut().filter(|r| r.block_id() == id)
    }
}
