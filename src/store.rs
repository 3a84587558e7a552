//! The product catalog.
//!
//! [`CatalogStore`] owns one [`Table`] backend and adds the policies on top
//! of it: record validation, optional duplicate rejection and automatic
//! growth.
//!
//! # Growth
//!
//! Before every insert the store checks the load factor of the table *as it
//! is before the insert*:
//!
//! ```text
//! if len / capacity >= load_factor_threshold { resize() }
//! ```
//!
//! With the default configuration (capacity 20, threshold 0.7, factor 2) the
//! first 14 inserts fit into 20 slots and the 15th insert grows the table to
//! 40 before placing its record. Deletes never shrink the table.
//!
//! Resizing builds a fresh table of the new capacity, moves every live record
//! into it using the backend's own insert (so home indices are recomputed
//! against the new capacity) and then replaces the old table.

use std::fmt::{Debug, Formatter};

use log::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::product::ProductRecord;
use crate::table::{ChainedTable, DefaultTable, OpenTable, Table};

/// Catalog backed by linear probing.
pub type OpenCatalog = CatalogStore<OpenTable>;
/// Catalog backed by separate chaining.
pub type ChainedCatalog = CatalogStore<ChainedTable>;

/// Counters kept by the store.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct StoreStats {
    /// Number of resizes performed so far.
    pub resizes: usize,
    /// Successful inserts.
    pub inserts: usize,
    /// Successful deletes.
    pub deletes: usize,
}

pub struct CatalogStore<T: Table = DefaultTable> {
    table: T,
    config: StoreConfig,
    stats: StoreStats,
}

impl<T: Table> CatalogStore<T> {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        let config = StoreConfig::default();
        Self {
            table: T::with_capacity(config.initial_capacity, &config),
            config,
            stats: StoreStats::default(),
        }
    }

    /// Create a store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table: T::with_capacity(config.initial_capacity, &config),
            config,
            stats: StoreStats::default(),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
    pub fn stats(&self) -> StoreStats {
        self.stats
    }
    /// Direct access to the underlying table.
    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn load_factor(&self) -> f64 {
        self.table.len() as f64 / self.table.capacity() as f64
    }

    /// Insert a new product.
    ///
    /// Grows the table first if the load factor has reached the threshold.
    /// Duplicate ids are stored side by side unless the store was configured
    /// with [`reject_duplicates`][StoreConfig::reject_duplicates].
    ///
    /// # Errors
    ///
    /// - [`StoreError::NameTooLong`] / [`StoreError::InvalidPrice`] for an invalid record
    /// - [`StoreError::DuplicateId`] if duplicates are rejected and `id` is present
    /// - [`StoreError::CapacityExhausted`] if an open-addressing table has no free slot
    pub fn insert(&mut self, id: i64, name: &str, price: f64, stock: u32) -> Result<()> {
        debug!("insert(id = {}, name = {:?}, price = {}, stock = {})", id, name, price, stock);
        let record = ProductRecord::new(id, name, price, stock)?;
        self.insert_record(record)
    }

    /// Insert an already built record.
    pub fn insert_record(&mut self, record: ProductRecord) -> Result<()> {
        if self.config.reject_duplicates && self.table.search(record.id()).is_some() {
            return Err(StoreError::DuplicateId { id: record.id() });
        }

        if self.load_factor() >= self.config.load_factor_threshold {
            self.resize()?;
        }

        self.table.insert(record)?;
        self.stats.inserts += 1;
        Ok(())
    }

    /// Find the first product reachable under `id`.
    pub fn search(&self, id: i64) -> Option<&ProductRecord> {
        debug!("search(id = {})", id);
        self.table.search(id)
    }

    /// Mutable variant of [`search`][Self::search].
    pub fn search_mut(&mut self, id: i64) -> Option<&mut ProductRecord> {
        self.table.search_mut(id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.table.search(id).is_some()
    }

    /// Set the stock of product `id`.
    pub fn update_stock(&mut self, id: i64, stock: u32) -> Result<()> {
        debug!("update_stock(id = {}, stock = {})", id, stock);
        let product = self.table.search_mut(id).ok_or(StoreError::NotFound { id })?;
        product.set_stock(stock);
        Ok(())
    }

    /// Set the price of product `id`.
    pub fn update_price(&mut self, id: i64, price: f64) -> Result<()> {
        debug!("update_price(id = {}, price = {})", id, price);
        let product = self.table.search_mut(id).ok_or(StoreError::NotFound { id })?;
        product.set_price(price)
    }

    /// Remove product `id` and return it.
    pub fn delete(&mut self, id: i64) -> Result<ProductRecord> {
        debug!("delete(id = {})", id);
        let record = self.table.delete(id)?;
        self.stats.deletes += 1;
        Ok(record)
    }

    /// Grow the table by the configured factor and rehash every record.
    pub fn resize(&mut self) -> Result<()> {
        let old_capacity = self.table.capacity();
        let new_capacity = old_capacity * self.config.growth_factor;

        let fresh = T::with_capacity(new_capacity, &self.config);
        let old = std::mem::replace(&mut self.table, fresh);
        let dropped_tombstones = old.tombstones();
        for record in old.into_records() {
            self.table.insert(record)?;
        }

        self.stats.resizes += 1;
        info!(
            "resized {} table: {} -> {} ({} records, {} tombstones dropped)",
            T::KIND,
            old_capacity,
            new_capacity,
            self.table.len(),
            dropped_tombstones
        );
        Ok(())
    }

    /// Iterate over all products in storage order.
    ///
    /// The order follows slot (or bucket) position, not insertion order.
    pub fn list_all(&self) -> impl Iterator<Item = &ProductRecord> + '_ {
        self.table.iter()
    }

    /// Remove every product, keeping the current capacity.
    pub fn clear(&mut self) {
        self.table = T::with_capacity(self.table.capacity(), &self.config);
    }
}

impl<T: Table> Default for CatalogStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> Debug for CatalogStore<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("kind", &T::KIND)
            .field("capacity", &self.table.capacity())
            .field("len", &self.table.len())
            .field("tombstones", &self.table.tombstones())
            .field("resizes", &self.stats.resizes)
            .finish()
    }
}
