use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Records sorted by a key, with the index range of every key's run.
///
/// Built once per forecast; lookups afterwards are O(1).
#[derive(Debug, Clone)]
pub struct Grouped<T, K> {
    items: Vec<T>,
    ranges: HashMap<K, Range<usize>>,
}

impl<T, K> Grouped<T, K>
where
    K: Ord + Hash + Clone,
{
    /// Stable-sort `items` by `key` and record the `[start, end)` range of each run.
    ///
    /// Input elements are moved, never modified. Equal keys keep their input order.
    pub fn by_key<F>(mut items: Vec<T>, key: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        // slice::sort_by is a stable O(n log n) merge sort
        items.sort_by(|a, b| key(a).cmp(&key(b)));

        let mut ranges = HashMap::new();
        if let Some(first) = items.first() {
            let mut current = key(first);
            let mut start = 0;
            for (i, item) in items.iter().enumerate().skip(1) {
                let k = key(item);
                if k != current {
                    ranges.insert(current, start..i);
                    current = k;
                    start = i;
                }
            }
            ranges.insert(current, start..items.len());
        }

        Self { items, ranges }
    }

    /// Records sharing `key`, or an empty slice if none do.
    pub fn get(&self, key: &K) -> &[T] {
        match self.ranges.get(key) {
            Some(range) => &self.items[range.clone()],
            None => &[],
        }
    }

    /// Index range of `key`'s run in the sorted records.
    pub fn range(&self, key: &K) -> Option<Range<usize>> {
        self.ranges.get(key).cloned()
    }

    /// The records in key order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterate distinct keys with their runs (arbitrary key order).
    pub fn groups(&self) -> impl Iterator<Item = (&K, &[T])> + '_ {
        self.ranges
            .iter()
            .map(|(k, range)| (k, &self.items[range.clone()]))
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
