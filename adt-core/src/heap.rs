//! Binary max-heap
//!
//! Array-backed heap with the usual index arithmetic: children of `i` sit at
//! `2i + 1` and `2i + 2`. Construction is the bottom-up linear-time build;
//! sift-down is iterative.

/// Binary max-heap over a `Vec`.
pub struct MaxHeap<T> {
    array: Vec<T>,
}

impl<T: Ord> MaxHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        MaxHeap { array: Vec::new() }
    }

    /// Heapify an existing vector in place.
    ///
    /// Panics if the heap-order invariant does not hold afterwards; that
    /// would be a construction bug, not a user error.
    pub fn from_vec(array: Vec<T>) -> Self {
        let mut heap = MaxHeap { array };
        heap.build();
        assert!(heap.is_max_heap(), "heap order violated after build");
        heap
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// `true` if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// The maximum element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.array.first()
    }

    /// Remove and return the maximum element.
    pub fn pop(&mut self) -> Option<T> {
        if self.array.is_empty() {
            return None;
        }
        let last = self.array.len() - 1;
        self.array.swap(0, last);
        let max = self.array.pop();
        self.sift_down(0);
        max
    }

    /// Verify the heap-order invariant: every parent is >= both children.
    pub fn is_max_heap(&self) -> bool {
        (1..self.array.len()).all(|i| self.array[(i - 1) / 2] >= self.array[i])
    }

    fn build(&mut self) {
        for i in (0..self.array.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = index * 2 + 1;
            let right = index * 2 + 2;
            let mut largest = index;
            if left < self.array.len() && self.array[left] > self.array[largest] {
                largest = left;
            }
            if right < self.array.len() && self.array[right] > self.array[largest] {
                largest = right;
            }
            if largest == index {
                return;
            }
            self.array.swap(index, largest);
            index = largest;
        }
    }
}

impl<T: Ord> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_peek() {
        let heap = MaxHeap::from_vec(vec![3, 6, 5, 4, 1, 9, 8, 7]);
        assert_eq!(heap.peek(), Some(&9));
        assert_eq!(heap.len(), 8);
        assert!(heap.is_max_heap());
    }

    #[test]
    fn test_pop_descends() {
        let mut heap = MaxHeap::from_vec(vec![3, 6, 5, 4, 1, 9, 8, 7, 6, 5, 3, 2, 1]);
        let mut drained = Vec::new();
        while let Some(max) = heap.pop() {
            drained.push(max);
        }
        assert_eq!(drained, vec![9, 8, 7, 6, 6, 5, 5, 4, 3, 3, 2, 1, 1]);
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: MaxHeap<i64> = MaxHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
        assert!(heap.is_max_heap());
    }

    #[test]
    fn test_pop_keeps_invariant() {
        let mut heap = MaxHeap::from_vec((0..100i64).rev().collect());
        for _ in 0..50 {
            heap.pop();
        }
        assert!(heap.is_max_heap());
        assert_eq!(heap.peek(), Some(&49));
    }
}
