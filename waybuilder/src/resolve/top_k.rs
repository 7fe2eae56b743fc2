//! Bounded selection of the K best items.

use std::collections::BinaryHeap;

/// Keeps the `k` smallest items pushed so far.
///
/// Backed by a max-heap so the current worst retained item sits on top and
/// can be compared against (and replaced by) each newcomer in O(log k).
/// An item equal to the current worst is discarded, so with an ordering
/// that breaks ties by arrival, earlier items win.
///
/// # Examples
///
/// ```
/// use waybuilder::resolve::BoundedTopK;
///
/// let mut top = BoundedTopK::new(3);
/// for x in [9, 4, 7, 1, 8, 2] {
///     top.push(x);
/// }
/// assert_eq!(top.into_sorted_vec(), vec![1, 2, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedTopK<T: Ord> {
    heap: BinaryHeap<T>,
    k: usize,
}

impl<T: Ord> BoundedTopK<T> {
    pub fn new(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k),
            k,
        }
    }

    /// Offer an item. Returns whether it was retained.
    pub fn push(&mut self, item: T) -> bool {
        if self.heap.len() < self.k {
            self.heap.push(item);
            return true;
        }

        match self.heap.peek_mut() {
            Some(mut worst) if item < *worst => {
                *worst = item;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.k
    }

    /// The worst retained item; once full, the admission threshold.
    pub fn peek_worst(&self) -> Option<&T> {
        self.heap.peek()
    }

    pub fn pop_worst(&mut self) -> Option<T> {
        self.heap.pop()
    }

    /// Consume the selector, best item first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_everything_below_k() {
        let mut top = BoundedTopK::new(5);
        top.push(3);
        top.push(1);
        assert_eq!(top.len(), 2);
        assert_eq!(top.into_sorted_vec(), vec![1, 3]);
    }

    #[test]
    fn replaces_worst_when_full() {
        let mut top = BoundedTopK::new(2);
        assert!(top.push(5));
        assert!(top.push(6));
        assert!(top.push(1));
        assert!(!top.push(9));
        assert_eq!(top.peek_worst(), Some(&5));
        assert_eq!(top.into_sorted_vec(), vec![1, 5]);
    }

    #[test]
    fn equal_to_worst_is_rejected() {
        let mut top = BoundedTopK::new(1);
        assert!(top.push((4, 'a')));
        assert!(!top.push((4, 'b')));
        assert_eq!(top.pop_worst(), Some((4, 'a')));
    }

    #[test]
    fn pop_worst_drains_in_descending_order() {
        let mut top = BoundedTopK::new(3);
        for x in [5, 3, 8, 1] {
            top.push(x);
        }
        assert_eq!(top.pop_worst(), Some(5));
        assert_eq!(top.pop_worst(), Some(3));
        assert_eq!(top.pop_worst(), Some(1));
        assert_eq!(top.pop_worst(), None);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut top = BoundedTopK::new(0);
        assert!(!top.push(1));
        assert!(top.is_empty());
    }
}
