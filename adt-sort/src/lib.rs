//! Sorting routines over the adt-core structures
//!
//! Provides:
//! - In-place comparison sorts: insertion sort, quicksort
//! - Out-of-place merge sort
//! - Non-comparison sorts: counting sort, radix sort
//! - Structure-draining helpers: `bst_sort` and `heap_sort`

pub mod sort;

pub use sort::{
    bst_sort, counting_sort, heap_sort, insertion_sort, merge_sort, quicksort, radix_sort,
};
