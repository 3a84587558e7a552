use thiserror::Error;

/// Errors returned by [`CatalogStore`][crate::store::CatalogStore] and the table backends.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No record with this id is reachable.
    #[error("product {id} not found")]
    NotFound { id: i64 },

    /// Open-addressing table has no free slot left.
    #[error("hash table is full (capacity {capacity})")]
    CapacityExhausted { capacity: usize },

    /// The id is already stored and duplicates are rejected.
    #[error("product {id} already exists")]
    DuplicateId { id: i64 },

    /// Product name exceeds the maximum length.
    #[error("product name is {len} characters long, at most {max} allowed")]
    NameTooLong { len: usize, max: usize },

    /// Price is negative, NaN or infinite.
    #[error("invalid price: {price}")]
    InvalidPrice { price: f64 },

    /// Rejected store configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors returned by [`CartLedger`][crate::cart::CartLedger].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("insufficient stock for product {id}: requested {requested}, available {available}")]
    InsufficientStock { id: i64, requested: u32, available: u32 },

    #[error("product {id} is not in the cart")]
    NotInCart { id: i64 },

    #[error("quantity for product {id} must be positive")]
    ZeroQuantity { id: i64 },

    #[error("reservation for product {id} would overflow: {reserved} reserved, {requested} requested")]
    ReservationOverflow { id: i64, reserved: u32, requested: u32 },
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
