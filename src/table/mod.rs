//! Hash table backends for the catalog.
//!
//! Two collision-resolution strategies sit behind the [`Table`] trait:
//!
//! | Backend | Collisions | Deletion | Fails when full |
//! |---------|------------|----------|-----------------|
//! | [`OpenTable`] | Linear probing in one slot array | Tombstone or backward shift | Yes (`CapacityExhausted`) |
//! | [`ChainedTable`] | Singly linked buckets in a node arena | Unlink | No |
//!
//! Backends know nothing about load factors: growth is decided by
//! [`CatalogStore`][crate::store::CatalogStore], which builds a larger table
//! and moves every record into it (see [`Table::into_records`]).
//!
//! # Default
//!
//! The type alias [`DefaultTable`] points to [`OpenTable`], the layout of the
//! reference catalog.

mod chained;
mod open;

pub use chained::ChainedTable;
pub use open::{OpenTable, SlotState};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::product::ProductRecord;

/// Default table backend.
pub type DefaultTable = OpenTable;

/// A fixed-capacity table of product records keyed by id.
pub trait Table {
    /// Short backend name, used in logs.
    const KIND: &'static str;

    /// Create an empty table with `capacity` slots (or buckets).
    fn with_capacity(capacity: usize, config: &StoreConfig) -> Self
    where
        Self: Sized;

    /// Number of slots (or buckets).
    fn capacity(&self) -> usize;

    /// Number of live records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tombstones currently in the table.
    fn tombstones(&self) -> usize {
        0
    }

    /// Store a record. No uniqueness check is done on the id.
    fn insert(&mut self, record: ProductRecord) -> Result<()>;

    /// Find the first record reachable under `id`.
    fn search(&self, id: i64) -> Option<&ProductRecord>;

    /// Mutable variant of [`search`][Table::search].
    fn search_mut(&mut self, id: i64) -> Option<&mut ProductRecord>;

    /// Remove the first record reachable under `id` and return it.
    fn delete(&mut self, id: i64) -> Result<ProductRecord>;

    /// Iterate over live records in storage order.
    fn iter(&self) -> Box<dyn Iterator<Item = &ProductRecord> + '_>;

    /// Consume the table, yielding every live record in storage order.
    fn into_records(self) -> Vec<ProductRecord>
    where
        Self: Sized;
}
