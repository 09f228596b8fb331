//! Lazy enumeration of candidate placements.
//!
//! Both generators are iterative so the solver can stop (or check for
//! cancellation) between any two candidates without unwinding a recursion.

/// All `k`-element subsets of `items`, yielded in the order a recursive
/// include-then-exclude search would produce them.
///
/// That order is lexicographic in item index: for `[a, b, c]` and `k = 2` the
/// subsets are `[a, b]`, `[a, c]`, `[b, c]`. Each subset keeps the items in their
/// original order.
pub struct Combinations<'a, T> {
    items: &'a [T],
    /// Indices of the current subset; `None` once exhausted.
    indices: Option<Vec<usize>>,
}

impl<'a, T: Copy> Combinations<'a, T> {
    pub fn new(items: &'a [T], k: usize) -> Self {
        let indices = (k <= items.len()).then(|| (0..k).collect());
        Self { items, indices }
    }

    /// Moves `indices` to the next combination, or exhausts the iterator.
    fn advance(&mut self) {
        let n = self.items.len();
        let Some(indices) = self.indices.as_mut() else {
            return;
        };
        let k = indices.len();

        // rightmost index that can still move right
        let Some(pivot) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            self.indices = None;
            return;
        };
        indices[pivot] += 1;
        for i in pivot + 1..k {
            indices[i] = indices[i - 1] + 1;
        }
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let subset = self
            .indices
            .as_ref()?
            .iter()
            .map(|&i| self.items[i])
            .collect();
        self.advance();
        Some(subset)
    }
}

/// All distinct orderings of a multiset, in lexicographic order.
///
/// Equal elements are never swapped with each other, so `[A, A, B]` yields
/// exactly `[A, A, B]`, `[A, B, A]`, `[B, A, A]`.
pub struct DistinctPermutations<T> {
    current: Option<Vec<T>>,
}

impl<T: Ord + Clone> DistinctPermutations<T> {
    pub fn new(mut multiset: Vec<T>) -> Self {
        multiset.sort();
        Self {
            current: Some(multiset),
        }
    }
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` untouched) when it is already the last one.
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = (1..items.len()).rev().find(|&i| items[i - 1] < items[i]) else {
        return false;
    };
    let pivot = pivot - 1;

    // rightmost element larger than the pivot; the suffix is non-increasing
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&i| items[i] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

impl<T: Ord + Clone> Iterator for DistinctPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.as_mut()?;
        let yielded = current.clone();
        if !next_permutation(current) {
            self.current = None;
        }
        Some(yielded)
    }
}
