//! # catalog-rs: a hash-table product catalog
//!
//! **`catalog-rs`** is an in-memory product catalog keyed by integer id. Products are kept in a
//! hash table that grows on its own as it fills, and a small shopping-cart ledger reserves and
//! releases stock against the catalog.
//!
//! ## Collision Strategies
//!
//! The catalog can run on either of two table backends, selected by type:
//!
//! - **Open addressing** ([`OpenTable`][crate::table::OpenTable]): one slot array, collisions are
//!   resolved by linear probing. Deletion leaves tombstones (default) or shifts the cluster back.
//! - **Separate chaining** ([`ChainedTable`][crate::table::ChainedTable]): an array of bucket
//!   heads, each the start of a singly linked list of nodes stored in an index-linked arena.
//!
//! Both hash with `id mod capacity` and grow by doubling when the load factor reaches `0.7`
//! right before an insert.
//!
//! ## Basic Usage
//!
//! ```rust
//! use catalog_rs::cart::CartLedger;
//! use catalog_rs::store::OpenCatalog;
//!
//! let mut store = OpenCatalog::new();
//! store.insert(1, "Regata Básica", 49.90, 1000).unwrap();
//! store.insert(2, "Camiseta Básica", 59.90, 1000).unwrap();
//!
//! let mut cart = CartLedger::new();
//! cart.reserve(&mut store, 2, 3).unwrap();
//! assert_eq!(store.search(2).unwrap().stock(), 997);
//!
//! cart.release(&mut store, 2, 3).unwrap();
//! assert_eq!(store.search(2).unwrap().stock(), 1000);
//! ```
//!
//! ## Core Components
//!
//! - **[`store`]**: [`CatalogStore`][crate::store::CatalogStore], the growth policy and the public catalog API.
//! - **[`table`]**: the [`Table`][crate::table::Table] trait and both backends.
//! - **[`cart`]**: the [`CartLedger`][crate::cart::CartLedger].
//! - **[`config`]**: [`StoreConfig`][crate::config::StoreConfig] with the default constants.

pub mod cart;
pub mod config;
pub mod error;
pub mod hash;
pub mod product;
pub mod store;
pub mod table;
