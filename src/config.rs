use crate::error::{Result, StoreError};

/// How the open-addressing backend removes a record.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum DeletionStrategy {
    /// Leave a tombstone: lookups probe past it, inserts may reuse it.
    #[default]
    Tombstone,
    /// Shift the rest of the cluster back into the gap, leaving no marker.
    BackwardShift,
}

/// Configuration for [`CatalogStore`][crate::store::CatalogStore].
///
/// # Examples
///
/// ```
/// use catalog_rs::config::{DeletionStrategy, StoreConfig};
///
/// let config = StoreConfig::default()
///     .with_initial_capacity(10)
///     .with_deletion(DeletionStrategy::BackwardShift);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Number of slots/buckets the table starts with (default: 20)
    pub initial_capacity: usize,
    /// Resize when `len / capacity` reaches this value before an insert (default: 0.7)
    pub load_factor_threshold: f64,
    /// Capacity multiplier on resize (default: 2)
    pub growth_factor: usize,
    /// Open-addressing deletion strategy (default: tombstones)
    pub deletion: DeletionStrategy,
    /// Refuse to insert an id that is already stored (default: false)
    pub reject_duplicates: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 20,
            load_factor_threshold: 0.7,
            growth_factor: 2,
            deletion: DeletionStrategy::Tombstone,
            reject_duplicates: false,
        }
    }
}

impl StoreConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor_threshold(mut self, threshold: f64) -> Self {
        self.load_factor_threshold = threshold;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn with_deletion(mut self, deletion: DeletionStrategy) -> Self {
        self.deletion = deletion;
        self
    }

    pub fn with_reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }

    /// Check that the configuration describes a usable table.
    ///
    /// The threshold is only required to be positive: values above `1.0`
    /// are accepted and let an open-addressing table fill up completely.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(StoreError::InvalidConfig("initial capacity must be positive".into()));
        }
        if self.load_factor_threshold.is_nan() || self.load_factor_threshold <= 0.0 {
            return Err(StoreError::InvalidConfig(format!(
                "load factor threshold must be positive, got {}",
                self.load_factor_threshold
            )));
        }
        if self.growth_factor < 2 {
            return Err(StoreError::InvalidConfig(format!(
                "growth factor must be at least 2, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}
