//! Ordered queue: comparator-driven priority container for resting orders.
//!
//! This is deliberately a stable insertion-sorted `Vec`, not a heap: a new
//! item lands at the first position where the comparator ranks it ahead of
//! an existing item, so items the comparator considers equal keep their
//! insertion order. That stability is what gives the book price-time
//! priority: ties at a price are broken by earlier submission.

/// A priority container ordered by a pluggable comparator.
///
/// `comparator(a, b) == true` means `a` belongs strictly before `b`.
pub struct OrderedQueue<T> {
    items: Vec<T>,
    comparator: fn(&T, &T) -> bool,
}

impl<T> OrderedQueue<T> {
    /// Create an empty queue with the given ordering.
    pub fn new(comparator: fn(&T, &T) -> bool) -> Self {
        Self {
            items: Vec::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert at the first position where the comparator ranks the new
    /// item ahead. O(n), stable among equal-priority items.
    pub fn insert(&mut self, item: T) {
        let idx = self
            .items
            .iter()
            .position(|existing| (self.comparator)(&item, existing))
            .unwrap_or(self.items.len());
        self.items.insert(idx, item);
    }

    /// The best (front) item, if any.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Mutable access to the best item, if any.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.first_mut()
    }

    /// Remove and return the best item.
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Indexed access, front = 0.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate from best to worst.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable iteration from best to worst.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Keep only items matching the predicate.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for OrderedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedQueue")
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending() -> OrderedQueue<i32> {
        OrderedQueue::new(|a, b| a < b)
    }

    #[test]
    fn empty_queue() {
        let mut q = ascending();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek(), None);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn orders_by_comparator() {
        let mut q = ascending();
        q.insert(3);
        q.insert(1);
        q.insert(2);

        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
    }

    #[test]
    fn descending_comparator() {
        let mut q: OrderedQueue<i32> = OrderedQueue::new(|a, b| a > b);
        q.insert(1);
        q.insert(3);
        q.insert(2);

        assert_eq!(q.peek(), Some(&3));
    }

    #[test]
    fn stable_among_equal_priority() {
        // Compare only the first tuple element; the second records insertion order.
        let mut q: OrderedQueue<(i32, u32)> = OrderedQueue::new(|a, b| a.0 < b.0);
        q.insert((5, 1));
        q.insert((5, 2));
        q.insert((3, 3));
        q.insert((5, 4));

        assert_eq!(q.pop(), Some((3, 3)));
        assert_eq!(q.pop(), Some((5, 1)));
        assert_eq!(q.pop(), Some((5, 2)));
        assert_eq!(q.pop(), Some((5, 4)));
    }

    #[test]
    fn indexed_access_and_iter() {
        let mut q = ascending();
        q.insert(2);
        q.insert(1);

        assert_eq!(q.get(0), Some(&1));
        assert_eq!(q.get(1), Some(&2));
        assert_eq!(q.get(2), None);

        let collected: Vec<i32> = q.iter().copied().collect();
        assert_eq!(collected, vec![1, 2]);
    }

    #[test]
    fn peek_mut_modifies_front() {
        let mut q = ascending();
        q.insert(1);
        if let Some(front) = q.peek_mut() {
            *front = 10;
        }
        assert_eq!(q.peek(), Some(&10));
    }

    #[test]
    fn retain_filters() {
        let mut q = ascending();
        for i in 1..=5 {
            q.insert(i);
        }
        q.retain(|x| x % 2 == 0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.peek(), Some(&2));
    }
}
