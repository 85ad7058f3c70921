//! Allocation of ids for newly created quest resources.
//!
//! Reward tables and spawn lists are addressed by numeric ids baked
//! into their paths. New resources draw random ids from ranges well
//! above the ones used by the game's own content, and retry when an
//! id is already taken in the archive at hand. This makes clashes
//! with existing content unlikely, not impossible.

use std::ops::RangeInclusive;

use mtquest_arc::{Container, EntryData};
use rand::{rngs::ThreadRng, Rng};

use crate::{
    link::{LinkResource, ResourceKind},
    validate_payload, QuestArc, QuestError,
};

/// Ids handed out for new reward tables.
pub const REM_ID_RANGE: RangeInclusive<u32> = 900_000..=999_999;

/// Ids handed out for new spawn lists.
pub const ESL_ID_RANGE: RangeInclusive<u32> = 500..=999;

/// How many candidate ids are tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 64;

/// Draws ids for new resources and attaches them to link slots.
#[derive(Debug)]
pub struct IdAllocator<R = ThreadRng> {
    rng: R,
}

impl IdAllocator {
    /// Creates an allocator backed by the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> IdAllocator<R> {
    /// Creates an allocator backed by the given generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a candidate reward table id.
    pub fn next_rem_id(&mut self) -> u32 {
        self.rng.gen_range(REM_ID_RANGE)
    }

    /// Draws a candidate spawn list id.
    pub fn next_esl_id(&mut self) -> u32 {
        self.rng.gen_range(ESL_ID_RANGE)
    }

    fn allocate<F>(&mut self, kind: ResourceKind, mut add: F) -> Result<(u32, usize), QuestError>
    where
        F: FnMut(&mut Self) -> (u32, Result<usize, QuestError>),
    {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            match add(self) {
                (id, Ok(index)) => {
                    log::debug!("Allocated {kind} id {id}");
                    return Ok((id, index));
                }
                (id, Err(QuestError::Duplicate(_))) => {
                    log::debug!("{kind} id {id} is taken, retrying");
                }
                (_, Err(e)) => return Err(e),
            }
        }

        Err(QuestError::AllocationExhausted(kind, MAX_ALLOCATION_ATTEMPTS))
    }

    /// Adds a reward table under a fresh id.
    ///
    /// Returns the id and the index of the new entry.
    pub fn add_rem(
        &mut self,
        arc: &mut QuestArc,
        data: EntryData<'_>,
    ) -> Result<(u32, usize), QuestError> {
        self.allocate(ResourceKind::Rem, |this| {
            let id = this.next_rem_id();
            (id, arc.add_rem(id, data))
        })
    }

    /// Adds a spawn list of map `map_id` under a fresh id.
    ///
    /// Returns the id and the index of the new entry.
    pub fn add_esl(
        &mut self,
        arc: &mut QuestArc,
        map_id: u32,
        data: EntryData<'_>,
    ) -> Result<(u32, usize), QuestError> {
        self.allocate(ResourceKind::EmSetList, |this| {
            let id = this.next_esl_id();
            (id, arc.add_esl(map_id, id, data))
        })
    }

    /// Stores `payload` as the reward table linked through `slot`.
    ///
    /// When the slot already names a reward table present in the
    /// archive, that entry is overwritten in place. Otherwise a new
    /// table is added under a fresh id and the slot is pointed at
    /// it. Returns the index of the entry holding the payload.
    ///
    /// Payloads with a bad header are rejected before the archive
    /// or the slot are touched.
    pub fn attach_rem(
        &mut self,
        arc: &mut QuestArc,
        slot: &mut LinkResource,
        payload: &[u8],
    ) -> Result<usize, QuestError> {
        validate_payload(ResourceKind::Rem, payload)?;

        if let Some(index) = live_entry(arc, slot, ResourceKind::Rem) {
            arc.entry_mut(index).set_data(payload, true)?;
            return Ok(index);
        }

        let (id, index) = self.add_rem(arc, EntryData::Raw(payload))?;
        slot.set_rem_id(id);

        Ok(index)
    }

    /// Stores `payload` as the spawn list linked through `slot`.
    ///
    /// New spawn lists are created on map `map_id`. See
    /// [`IdAllocator::attach_rem`] for the full protocol.
    pub fn attach_esl(
        &mut self,
        arc: &mut QuestArc,
        slot: &mut LinkResource,
        map_id: u32,
        payload: &[u8],
    ) -> Result<usize, QuestError> {
        validate_payload(ResourceKind::EmSetList, payload)?;

        if let Some(index) = live_entry(arc, slot, ResourceKind::EmSetList) {
            arc.entry_mut(index).set_data(payload, true)?;
            return Ok(index);
        }

        let (id, index) = self.add_esl(arc, map_id, EntryData::Raw(payload))?;
        slot.set_esl_id(map_id, id);

        Ok(index)
    }
}

fn live_entry(arc: &QuestArc, slot: &LinkResource, kind: ResourceKind) -> Option<usize> {
    if slot.is_empty_resource() || slot.kind() != Some(kind) {
        return None;
    }

    arc.find_entry_index(&kind.entry_path(&slot.file_name()))
}
