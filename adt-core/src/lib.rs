//! Classic data structures: randomized chained hashtable, binary search
//! tree, and binary max-heap
//!
//! Provides:
//! - Chained hashtable with a randomized universal hash family, re-drawn
//!   every time the table doubles
//! - Unbalanced binary search tree with parent links, ordered queries, and
//!   iterative traversals
//! - Binary max-heap with linear-time construction
//! - Deterministic key normalization (fixed-seed xxh3) for hashing
//!   arbitrary keys
//!
//! Both container types are single-threaded, synchronous ADTs; callers that
//! need shared access provide their own synchronization.

pub mod bst;
pub mod hash;
pub mod hashtable;
pub mod heap;

pub use bst::{BinarySearchTree, NodeId, TraverseOrder, TreeError};
pub use hash::{Normalize, UniversalHasher};
pub use hashtable::{ChainedHashTable, TableError};
pub use heap::MaxHeap;

#[cfg(test)]
mod tests;
