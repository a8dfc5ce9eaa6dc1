//! Round-robin partitioning of the input sequence.
//!
//! Item `i` lands in partition `i % mappers`. Partitions borrow the input, so the
//! source data stays read-only and shared by every map worker. Each entry keeps
//! the item's original index for error reporting.

/// One round-robin bucket of borrowed input items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a, T> {
    /// Partition number, `0..mappers`.
    pub index: usize,
    /// `(original_index, item)` pairs in ascending original index.
    pub items: Vec<(usize, &'a T)>,
}

impl<T> Partition<'_, T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Original indices of the items in this partition.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|(i, _)| *i)
    }
}

/// Split `items` into exactly `mappers` partitions.
///
/// Empty input yields `mappers` empty partitions. A `mappers` of zero is treated
/// as one; the driver rejects that configuration before it gets here.
#[must_use]
pub fn partition<T>(items: &[T], mappers: usize) -> Vec<Partition<'_, T>> {
    let n = mappers.max(1);
    let mut parts: Vec<Partition<'_, T>> = (0..n)
        .map(|index| Partition {
            index,
            items: Vec::with_capacity(items.len().div_ceil(n)),
        })
        .collect();
    for (i, item) in items.iter().enumerate() {
        parts[i % n].items.push((i, item));
    }
    parts
}
