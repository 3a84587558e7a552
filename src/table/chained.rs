//! Separate chaining over a node arena.
//!
//! Nodes are stored in a single `Vec` and linked by index: each bucket holds
//! the index of its first node, each node holds the index of the next node in
//! the same bucket. Index `0` is a reserved sentry cell meaning "no node",
//! so an empty bucket is `0` and the last node of a chain has `next == 0`.
//!
//! ```text
//! buckets: [0] [5] [0] [2] ...
//!               |       |
//! nodes:        5 -> 1  2 -> 0
//!               |
//!               1 -> 0
//! ```
//!
//! New records are prepended to their bucket. Freed cells are reused by later
//! allocations, starting from the lowest possibly-free index.

use std::cmp::min;

use log::debug;

use super::Table;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::hash::{HashPolicy, ModuloHash};
use crate::product::ProductRecord;

#[derive(Debug, Clone, Default)]
struct Node {
    record: Option<ProductRecord>,
    next: usize,
}

impl Node {
    fn occupied(&self) -> bool {
        self.record.is_some()
    }
}

/// Chained hash table.
#[derive(Debug, Clone)]
pub struct ChainedTable<H = ModuloHash> {
    nodes: Vec<Node>,
    buckets: Vec<usize>,
    /// Index of the first *possibly* free node cell.
    min_free: usize,
    /// Number of live records.
    len: usize,
    hasher: H,
}

impl<H> ChainedTable<H>
where
    H: HashPolicy + Default,
{
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity should be positive");

        Self {
            nodes: vec![Node::default()], // 0th cell is the sentry.
            buckets: vec![0; capacity],
            min_free: 1,
            len: 0,
            hasher: H::default(),
        }
    }
}

impl<H> ChainedTable<H>
where
    H: HashPolicy,
{
    fn bucket_index(&self, id: i64) -> usize {
        self.hasher.index(id, self.buckets.len())
    }

    /// Number of records chained in bucket `bucket`.
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).count()
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        (0..self.buckets.len()).map(|b| self.chain_len(b)).max().unwrap_or(0)
    }

    /// Ids chained in bucket `bucket`, head first.
    pub fn bucket_ids(&self, bucket: usize) -> Vec<i64> {
        self.chain(bucket).map(|p| p.id()).collect()
    }

    fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            nodes: &self.nodes,
            index: self.buckets[bucket],
        }
    }

    /// Arena index of the first node holding `id`.
    fn find(&self, id: i64) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(id)];
        while index != 0 {
            let node = &self.nodes[index];
            if node.record.as_ref().is_some_and(|r| r.id() == id) {
                return Some(index);
            }
            index = node.next;
        }
        None
    }

    /// Allocate a node cell for `record` and return its index.
    fn alloc(&mut self, record: ProductRecord) -> usize {
        let index = (self.min_free..self.nodes.len())
            .find(|&i| !self.nodes[i].occupied())
            .unwrap_or_else(|| {
                self.nodes.push(Node::default());
                self.nodes.len() - 1
            });

        self.nodes[index] = Node {
            record: Some(record),
            next: 0,
        };
        self.min_free = index + 1;

        index
    }

    /// Release the node cell at `index`, returning its record.
    fn free(&mut self, index: usize) -> Option<ProductRecord> {
        assert_ne!(index, 0, "Index is 0");

        let node = std::mem::take(&mut self.nodes[index]);
        self.min_free = min(self.min_free, index);
        node.record
    }
}

impl<H> Table for ChainedTable<H>
where
    H: HashPolicy + Default,
{
    const KIND: &'static str = "chaining";

    fn with_capacity(capacity: usize, _config: &StoreConfig) -> Self {
        Self::new(capacity)
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, record: ProductRecord) -> Result<()> {
        let bucket = self.bucket_index(record.id());
        let id = record.id();

        let index = self.alloc(record);
        self.nodes[index].next = self.buckets[bucket];
        self.buckets[bucket] = index;
        self.len += 1;

        debug!("insert(id = {}) -> bucket {}, node {}", id, bucket, index);
        Ok(())
    }

    fn search(&self, id: i64) -> Option<&ProductRecord> {
        self.nodes[self.find(id)?].record.as_ref()
    }

    fn search_mut(&mut self, id: i64) -> Option<&mut ProductRecord> {
        let index = self.find(id)?;
        self.nodes[index].record.as_mut()
    }

    fn delete(&mut self, id: i64) -> Result<ProductRecord> {
        let bucket = self.bucket_index(id);

        let mut prev = 0;
        let mut index = self.buckets[bucket];
        while index != 0 {
            let next = self.nodes[index].next;
            if self.nodes[index].record.as_ref().is_some_and(|r| r.id() == id) {
                if prev == 0 {
                    self.buckets[bucket] = next;
                } else {
                    self.nodes[prev].next = next;
                }
                debug!("delete(id = {}) <- bucket {}, node {}", id, bucket, index);
                let record = self.free(index).ok_or(StoreError::NotFound { id })?;
                self.len -= 1;
                return Ok(record);
            }
            prev = index;
            index = next;
        }

        Err(StoreError::NotFound { id })
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &ProductRecord> + '_> {
        Box::new((0..self.buckets.len()).flat_map(move |b| self.chain(b)))
    }

    /// Records come out tail-first per bucket, so prepending them again
    /// rebuilds every chain in its current order.
    fn into_records(self) -> Vec<ProductRecord> {
        let mut nodes = self.nodes;
        let mut records = Vec::with_capacity(self.len);
        for &head in &self.buckets {
            let start = records.len();
            let mut index = head;
            while index != 0 {
                let node = std::mem::take(&mut nodes[index]);
                records.extend(node.record);
                index = node.next;
            }
            records[start..].reverse();
        }
        records
    }
}

/// Iterator over the records of one bucket.
struct Chain<'a> {
    nodes: &'a [Node],
    index: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ProductRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index != 0 {
            let node = &self.nodes[self.index];
            self.index = node.next;
            if let Some(record) = &node.record {
                return Some(record);
            }
        }
        None
    }
}
