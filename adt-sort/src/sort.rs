//! Comparison and non-comparison sorting routines

use adt_core::{BinarySearchTree, MaxHeap};

/// Sort the slice in place in O(n²) time by adjacent swaps.
pub fn insertion_sort<T: Ord>(list: &mut [T]) {
    for i in 1..list.len() {
        let mut j = i;
        while j > 0 && list[j] < list[j - 1] {
            list.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Divide-and-conquer merge sort. Does not sort in place.
pub fn merge_sort<T: Ord + Clone>(list: &[T]) -> Vec<T> {
    if list.len() <= 1 {
        return list.to_vec();
    }
    let mid = list.len() / 2;
    let lower_half = merge_sort(&list[..mid]);
    let upper_half = merge_sort(&list[mid..]);
    merge(&lower_half, &upper_half)
}

/// Merge two sorted halves into one sorted list.
fn merge<T: Ord + Clone>(lower_half: &[T], upper_half: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(lower_half.len() + upper_half.len());
    let mut i = 0;
    let mut j = 0;

    while i < lower_half.len() && j < upper_half.len() {
        if lower_half[i] < upper_half[j] {
            merged.push(lower_half[i].clone());
            i += 1;
        } else {
            merged.push(upper_half[j].clone());
            j += 1;
        }
    }
    merged.extend_from_slice(&lower_half[i..]);
    merged.extend_from_slice(&upper_half[j..]);
    merged
}

/// Recursive in-place quicksort, partitioning around the last element.
///
/// Worst case O(n²) on already-sorted input, as with any fixed-position
/// pivot.
pub fn quicksort<T: Ord>(list: &mut [T]) {
    if list.len() <= 1 {
        return;
    }
    let pivot = partition(list);
    let (lower, upper) = list.split_at_mut(pivot);
    quicksort(lower);
    quicksort(&mut upper[1..]);
}

/// Lomuto partition around the last element; returns the pivot's final
/// index.
fn partition<T: Ord>(list: &mut [T]) -> usize {
    let last = list.len() - 1;
    let mut store = 0;
    for i in 0..last {
        if list[i] <= list[last] {
            list.swap(i, store);
            store += 1;
        }
    }
    list.swap(store, last);
    store
}

/// Stable linear-time sort for items whose key maps into `0..=k`.
///
/// O(n + k) time and space. Panics if any key exceeds `k`.
pub fn counting_sort<T, F>(list: &[T], k: usize, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> usize,
{
    let mut buckets: Vec<Vec<T>> = vec![Vec::new(); k + 1];
    for item in list {
        let slot = key(item);
        assert!(slot <= k, "key {} out of range 0..={}", slot, k);
        buckets[slot].push(item.clone());
    }

    let mut output = Vec::with_capacity(list.len());
    for bucket in buckets {
        output.extend(bucket);
    }
    output
}

/// Radix sort: repeated stable counting sort on successive base-`base`
/// digits, least significant first.
///
/// `digits` must cover the largest input; `base.pow(digits)` has to fit in a
/// `u64`.
pub fn radix_sort(list: &[u64], base: u64, digits: u32) -> Vec<u64> {
    assert!(base >= 2, "base must be at least 2");

    let mut sorted = list.to_vec();
    for i in 0..digits {
        let place = base.pow(i);
        sorted = counting_sort(&sorted, (base - 1) as usize, |x| {
            ((x / place) % base) as usize
        });
    }
    sorted
}

/// Sort by building a binary search tree and draining it in order.
pub fn bst_sort<T: Ord>(list: Vec<T>) -> Vec<T> {
    let mut tree = BinarySearchTree::new();
    for element in list {
        tree.insert(element);
    }
    tree.into_sorted_vec()
}

/// Sort by heapifying and repeatedly extracting the maximum.
///
/// Ascending by default; `reverse` yields descending order.
pub fn heap_sort<T: Ord>(list: Vec<T>, reverse: bool) -> Vec<T> {
    let mut heap = MaxHeap::from_vec(list);
    let mut sorted = Vec::with_capacity(heap.len());
    while let Some(max) = heap.pop() {
        sorted.push(max);
    }
    if !reverse {
        sorted.reverse();
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_vec(seed: u64, len: usize) -> Vec<i64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-1_000..1_000)).collect()
    }

    fn sorted_copy(input: &[i64]) -> Vec<i64> {
        let mut expected = input.to_vec();
        expected.sort_unstable();
        expected
    }

    #[test]
    fn test_insertion_sort() {
        let mut input = random_vec(1, 300);
        let expected = sorted_copy(&input);
        insertion_sort(&mut input);
        assert_eq!(input, expected);
    }

    #[test]
    fn test_merge_sort() {
        let input = random_vec(2, 500);
        assert_eq!(merge_sort(&input), sorted_copy(&input));
    }

    #[test]
    fn test_quicksort() {
        let mut input = random_vec(3, 500);
        let expected = sorted_copy(&input);
        quicksort(&mut input);
        assert_eq!(input, expected);

        // fixed-pivot worst case still terminates and sorts
        let mut ascending: Vec<i64> = (0..200).collect();
        quicksort(&mut ascending);
        assert_eq!(ascending, (0..200).collect::<Vec<i64>>());
    }

    #[test]
    fn test_counting_sort_includes_max_key() {
        let input = vec![3usize, 0, 5, 5, 2, 1, 5];
        let output = counting_sort(&input, 5, |x| *x);
        assert_eq!(output, vec![0, 1, 2, 3, 5, 5, 5]);
    }

    #[test]
    fn test_counting_sort_is_stable() {
        let input = vec![(1usize, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let output = counting_sort(&input, 1, |pair| pair.0);
        assert_eq!(output, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn test_radix_sort() {
        let input = vec![170u64, 45, 75, 90, 802, 24, 2, 66];
        assert_eq!(
            radix_sort(&input, 10, 3),
            vec![2, 24, 45, 66, 75, 90, 170, 802]
        );

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let random: Vec<u64> = (0..400).map(|_| rng.gen_range(0..1_000_000)).collect();
        let mut expected = random.clone();
        expected.sort_unstable();
        assert_eq!(radix_sort(&random, 10, 6), expected);
    }

    #[test]
    fn test_bst_sort_with_duplicates() {
        let input = vec![3i64, 6, 5, 4, 1, 9, 8, 7, 6, 5, 3, 2, 1];
        assert_eq!(
            bst_sort(input),
            vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 6, 7, 8, 9]
        );
    }

    #[test]
    fn test_heap_sort_both_directions() {
        let input = random_vec(5, 400);
        let expected = sorted_copy(&input);

        assert_eq!(heap_sort(input.clone(), false), expected);

        let mut descending = expected.clone();
        descending.reverse();
        assert_eq!(heap_sort(input, true), descending);
    }

    #[test]
    fn test_all_sorts_agree() {
        let input = random_vec(6, 250);
        let expected = sorted_copy(&input);

        assert_eq!(merge_sort(&input), expected);
        assert_eq!(bst_sort(input.clone()), expected);
        assert_eq!(heap_sort(input.clone(), false), expected);

        let mut in_place = input.clone();
        insertion_sort(&mut in_place);
        assert_eq!(in_place, expected);

        let mut in_place = input;
        quicksort(&mut in_place);
        assert_eq!(in_place, expected);
    }

    #[test]
    fn test_empty_and_single_inputs() {
        assert_eq!(merge_sort::<i64>(&[]), Vec::<i64>::new());
        assert_eq!(bst_sort(Vec::<i64>::new()), Vec::<i64>::new());
        assert_eq!(heap_sort(vec![7i64], false), vec![7]);

        let mut single = vec![7i64];
        quicksort(&mut single);
        insertion_sort(&mut single);
        assert_eq!(single, vec![7]);

        assert_eq!(radix_sort(&[], 10, 1), Vec::<u64>::new());
    }
}
