//! Open addressing with linear probing.
//!
//! All records live in a single slot array. A record is placed in the first
//! non-occupied slot found by scanning forward (wrapping) from its home index
//! `id mod capacity`.
//!
//! # Deletion
//!
//! Lookups stop at the first *empty* slot on the probe path, so a removed
//! record cannot simply be cleared: any record placed further along the same
//! cluster would become unreachable. Two strategies are supported:
//!
//! - [`DeletionStrategy::Tombstone`]: the slot becomes a tombstone. Lookups
//!   probe past it, inserts may reuse it. Tombstones are dropped on resize,
//!   and the table is rehashed in place once they make up more than half of
//!   the non-live slots, so a lookup miss always meets an empty slot.
//! - [`DeletionStrategy::BackwardShift`]: the slot is cleared and the rest of
//!   the cluster is shifted back so that every record stays reachable from
//!   its home index. No markers are left behind.
//!
//! ```text
//! capacity 10, ids 3, 13, 23 all hash to 3:
//!
//!   [3]=3  [4]=13  [5]=23  [6]=empty
//!
//! delete(13), tombstone:       [3]=3  [4]=†   [5]=23  [6]=empty
//! delete(13), backward shift:  [3]=3  [4]=23  [5]=empty
//! ```

use log::{debug, warn};

use super::Table;
use crate::config::{DeletionStrategy, StoreConfig};
use crate::error::{Result, StoreError};
use crate::hash::{HashPolicy, ModuloHash};
use crate::product::ProductRecord;

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Empty,
    Tombstone,
    Occupied(ProductRecord),
}

impl Slot {
    fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }
}

/// Observable state of a single slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlotState {
    Empty,
    Tombstone,
    Occupied(i64),
}

/// Linear-probing table.
#[derive(Debug, Clone)]
pub struct OpenTable<H = ModuloHash> {
    slots: Vec<Slot>,
    len: usize,
    tombstones: usize,
    deletion: DeletionStrategy,
    hasher: H,
}

impl<H> OpenTable<H>
where
    H: HashPolicy + Default,
{
    pub fn new(capacity: usize, deletion: DeletionStrategy) -> Self {
        assert!(capacity > 0, "Capacity should be positive");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::default);

        Self {
            slots,
            len: 0,
            tombstones: 0,
            deletion,
            hasher: H::default(),
        }
    }
}

impl<H> OpenTable<H>
where
    H: HashPolicy,
{
    pub fn deletion(&self) -> DeletionStrategy {
        self.deletion
    }

    /// State of the slot at `index`.
    pub fn slot_state(&self, index: usize) -> SlotState {
        match &self.slots[index] {
            Slot::Empty => SlotState::Empty,
            Slot::Tombstone => SlotState::Tombstone,
            Slot::Occupied(record) => SlotState::Occupied(record.id()),
        }
    }

    fn home(&self, id: i64) -> usize {
        self.hasher.index(id, self.slots.len())
    }

    /// Slot indices visited when probing for `id`, one full cycle.
    fn probe(&self, id: i64) -> impl Iterator<Item = usize> {
        let capacity = self.slots.len();
        let start = self.home(id);
        (0..capacity).map(move |i| (start + i) % capacity)
    }

    /// Slot index of the first record reachable under `id`.
    pub fn position(&self, id: i64) -> Option<usize> {
        for index in self.probe(id) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => continue,
                Slot::Occupied(record) if record.id() == id => return Some(index),
                Slot::Occupied(_) => continue,
            }
        }
        None
    }

    /// Refill the gap at `hole` by shifting back the rest of its cluster.
    fn shift_back(&mut self, hole: usize) {
        let capacity = self.slots.len();
        let mut hole = hole;
        let mut index = hole;

        loop {
            index = (index + 1) % capacity;
            if index == hole {
                break;
            }

            let home = match &self.slots[index] {
                Slot::Empty => break,
                Slot::Tombstone => continue,
                Slot::Occupied(record) => self.home(record.id()),
            };

            // A record may only move back if the hole still lies on its probe path,
            // i.e. its home is not cyclically within `(hole, index]`.
            let stays = if hole <= index {
                hole < home && home <= index
            } else {
                hole < home || home <= index
            };
            if !stays {
                debug!("shift_back: moving slot {} -> {}", index, hole);
                self.slots[hole] = std::mem::take(&mut self.slots[index]);
                hole = index;
            }
        }
    }

    /// Place `record` in the first non-occupied slot on its probe path.
    fn place(&mut self, record: ProductRecord) -> Result<usize> {
        let free = self.probe(record.id()).find(|&i| !self.slots[i].is_occupied());

        let Some(index) = free else {
            warn!("insert(id = {}): no free slot among {}", record.id(), self.slots.len());
            return Err(StoreError::CapacityExhausted {
                capacity: self.slots.len(),
            });
        };

        if matches!(self.slots[index], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(record);
        self.len += 1;
        Ok(index)
    }

    /// Take every record out, ordered by distance from its home slot.
    ///
    /// Placing the result again keeps records that share an id in the same
    /// lookup order, whatever the capacity.
    fn drain_records(&mut self) -> Vec<ProductRecord> {
        let capacity = self.slots.len();
        let mut records = Vec::with_capacity(self.len);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Slot::Occupied(record) = std::mem::take(slot) {
                let home = self.hasher.index(record.id(), capacity);
                records.push(((index + capacity - home) % capacity, record));
            }
        }
        self.len = 0;
        self.tombstones = 0;

        records.sort_by_key(|(distance, _)| *distance);
        records.into_iter().map(|(_, record)| record).collect()
    }

    fn too_many_tombstones(&self) -> bool {
        self.tombstones > 0 && self.tombstones * 2 > self.slots.len() - self.len
    }

    /// Rehash every record at the current capacity, dropping all tombstones.
    fn purge_tombstones(&mut self) -> Result<()> {
        let purged = self.tombstones;
        for record in self.drain_records() {
            self.place(record)?;
        }
        debug!(
            "purged {} tombstones ({} records, capacity {})",
            purged,
            self.len,
            self.slots.len()
        );
        Ok(())
    }
}

impl<H> Table for OpenTable<H>
where
    H: HashPolicy + Default,
{
    const KIND: &'static str = "open-addressing";

    fn with_capacity(capacity: usize, config: &StoreConfig) -> Self {
        Self::new(capacity, config.deletion)
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn tombstones(&self) -> usize {
        self.tombstones
    }

    fn insert(&mut self, record: ProductRecord) -> Result<()> {
        let id = record.id();
        let index = self.place(record)?;
        debug!("insert(id = {}) -> slot {}", id, index);
        if self.too_many_tombstones() {
            self.purge_tombstones()?;
        }
        Ok(())
    }

    fn search(&self, id: i64) -> Option<&ProductRecord> {
        match &self.slots[self.position(id)?] {
            Slot::Occupied(record) => Some(record),
            _ => None,
        }
    }

    fn search_mut(&mut self, id: i64) -> Option<&mut ProductRecord> {
        let index = self.position(id)?;
        match &mut self.slots[index] {
            Slot::Occupied(record) => Some(record),
            _ => None,
        }
    }

    fn delete(&mut self, id: i64) -> Result<ProductRecord> {
        let index = self.position(id).ok_or(StoreError::NotFound { id })?;

        let marker = match self.deletion {
            DeletionStrategy::Tombstone => Slot::Tombstone,
            DeletionStrategy::BackwardShift => Slot::Empty,
        };
        let Slot::Occupied(record) = std::mem::replace(&mut self.slots[index], marker) else {
            unreachable!("position() only returns occupied slots");
        };
        self.len -= 1;
        debug!("delete(id = {}) <- slot {}", id, index);

        match self.deletion {
            DeletionStrategy::Tombstone => {
                self.tombstones += 1;
                if self.too_many_tombstones() {
                    self.purge_tombstones()?;
                }
            }
            DeletionStrategy::BackwardShift => self.shift_back(index),
        }

        Ok(record)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &ProductRecord> + '_> {
        Box::new(self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(record) => Some(record),
            _ => None,
        }))
    }

    fn into_records(mut self) -> Vec<ProductRecord> {
        self.drain_records()
    }
}
