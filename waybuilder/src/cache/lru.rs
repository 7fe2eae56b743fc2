//! Fixed-capacity least-recently-used cache.
//!
//! Entries live in a slot vector and are linked into a recency list by
//! slot index, so promotion and eviction are O(1) without pointer juggling.
//!
//! ```text
//!   index: HashMap<K, slot>
//!   slots: [ Node { key, value, prev, next } | free ... ]
//!
//!   head (MRU) ─► [s2] ◄──► [s0] ◄──► [s1] ◄── tail (LRU)
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A bounded key/value store that evicts the least-recently-used entry.
///
/// `insert` refuses to overwrite: a key already present makes it return
/// `false`, and callers must `erase` first to replace a value.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use waybuilder::cache::LruCache;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
/// assert!(cache.insert("a", 1));
/// assert!(cache.insert("b", 2));
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// // "b" is now least recently used and gets evicted.
/// assert!(cache.insert("c", 3));
/// assert!(!cache.contains(&"b"));
/// assert!(cache.contains(&"a"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    index: HashMap<K, usize>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: NonZeroUsize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity.get()),
            slots: Vec::with_capacity(capacity.get()),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insert a new entry as most recently used.
    ///
    /// Returns `false` without touching the cache if `key` is already
    /// present. When the cache is full the least-recently-used entry is
    /// evicted first.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        if self.index.len() >= self.capacity.get() {
            self.evict_tail();
        }

        let node = Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach_front(slot);
        self.index.insert(key, slot);
        true
    }

    /// Look up a value and promote it to most recently used.
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let slot = *self.index.get(key)?;
        if self.head != Some(slot) {
            self.detach(slot);
            self.attach_front(slot);
        }
        self.slots[slot].as_ref().map(|node| node.value.clone())
    }

    /// Look up a value without changing recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|node| &node.value)
    }

    /// Remove an entry if present, returning its value.
    pub fn erase(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.detach(slot);
        let node = self.slots[slot].take()?;
        self.free.push(slot);
        Some(node.value)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate from most to least recently used. Recency is not touched.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.index.len(),
        }
    }

    /// Key that would be evicted by the next insert into a full cache.
    pub fn lru_key(&self) -> Option<&K> {
        let tail = self.tail?;
        self.slots[tail].as_ref().map(|node| &node.key)
    }

    fn evict_tail(&mut self) {
        let Some(tail) = self.tail else {
            return;
        };
        self.detach(tail);
        if let Some(node) = self.slots[tail].take() {
            self.index.remove(&node.key);
            self.free.push(tail);
        }
    }

    fn detach(&mut self, slot: usize) {
        let (prev, next) = match self.slots[slot].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.slots[slot].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(node) = self.slots[slot].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.slots[h].as_mut() {
                    node.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        let mut seen = 0;
        let mut cursor = self.head;
        let mut prev = None;
        while let Some(slot) = cursor {
            let node = self.slots[slot].as_ref().expect("linked slot is occupied");
            assert_eq!(node.prev, prev, "back link mismatch");
            assert_eq!(self.index.get(&node.key), Some(&slot), "index mismatch");
            prev = Some(slot);
            cursor = node.next;
            seen += 1;
        }
        assert_eq!(self.tail, prev);
        assert_eq!(seen, self.index.len());
        assert!(self.index.len() <= self.capacity.get());
    }
}

/// Iterator over cache entries in recency order.
pub struct Iter<'a, K, V> {
    slots: &'a [Option<Node<K, V>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = self.slots[slot].as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn insert_and_get() {
        let mut cache = LruCache::new(cap(3));
        assert!(cache.insert("a".to_string(), 1));
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"missing".to_string()), None);
        assert_eq!(cache.len(), 1);
        cache.check_invariants();
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut cache = LruCache::new(cap(3));
        assert!(cache.insert("a", 1));
        assert!(!cache.insert("a", 2));
        assert_eq!(cache.get(&"a"), Some(1));

        cache.erase(&"a");
        assert!(cache.insert("a", 2));
        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn get_promotes_entry() {
        let mut cache = LruCache::new(cap(2));
        cache.insert("A", 1);
        cache.insert("B", 2);
        cache.insert("C", 3); // evicts A

        assert!(!cache.contains(&"A"));

        let mut cache = LruCache::new(cap(2));
        cache.insert("A", 1);
        cache.insert("B", 2);
        assert_eq!(cache.get(&"A"), Some(1));
        cache.insert("D", 4);

        assert!(cache.contains(&"A"));
        assert!(!cache.contains(&"B"));
        assert!(cache.contains(&"D"));
        cache.check_invariants();
    }

    #[test]
    fn abc_then_get_then_insert_evicts_least_recent() {
        let mut cache = LruCache::new(cap(2));
        cache.insert("A", 1);
        cache.insert("B", 2);
        cache.insert("C", 3);
        // C evicted A; B is now LRU.
        assert_eq!(cache.get(&"A"), None);
        cache.insert("D", 4);
        assert!(!cache.contains(&"B"));
        assert!(cache.contains(&"C"));
        assert!(cache.contains(&"D"));
    }

    #[test]
    fn erase_missing_is_noop() {
        let mut cache: LruCache<&str, i32> = LruCache::new(cap(2));
        assert_eq!(cache.erase(&"nope"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn erase_middle_keeps_links() {
        let mut cache = LruCache::new(cap(3));
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");
        assert_eq!(cache.erase(&2), Some("two"));
        cache.check_invariants();

        let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3, 1]);
    }

    #[test]
    fn iteration_does_not_touch_recency() {
        let mut cache = LruCache::new(cap(2));
        cache.insert("x", 1);
        cache.insert("y", 2);
        assert_eq!(cache.iter().count(), 2);
        assert_eq!(cache.lru_key(), Some(&"x"));
        cache.insert("z", 3);
        assert!(!cache.contains(&"x"));
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = LruCache::new(cap(2));
        cache.insert("x", 1);
        cache.insert("y", 2);
        assert_eq!(cache.peek(&"x"), Some(&1));
        cache.insert("z", 3);
        assert!(!cache.contains(&"x"));
    }

    #[test]
    fn slots_are_reused() {
        let mut cache = LruCache::new(cap(2));
        for i in 0..100 {
            cache.insert(i, i);
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.slots.len() <= 2);
        cache.check_invariants();
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = LruCache::new(cap(2));
        cache.insert(1, 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.lru_key(), None);
        assert!(cache.insert(1, 1));
        cache.check_invariants();
    }
}
