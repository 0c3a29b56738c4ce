//! HashTable: separate chaining over `LinkedList` buckets keyed by `u64`.
//!
//! Each bucket is an independent chain of records. A key lives in exactly
//! the chain `key % bucket_count`, at most once. The table owns every
//! record; values leave it by value through `insert` (on replace),
//! `remove`, `free_with` or a cursor.

use crate::error::TableError;
use crate::linked_list::LinkedList;
use crate::table_cursor::{Iter, TableCursor};
use core::fmt;
use core::mem;
use log::{debug, trace, warn};

/// Table keys are plain integers; pre-hash real data (see `crate::fnv`).
pub type Key = u64;

/// Grow once `len >= LOAD_FACTOR * bucket_count` at the start of an insert.
pub const LOAD_FACTOR: usize = 3;

/// Bucket-count multiplier applied on every resize.
///
/// Deliberately large: sustained growth triggers few rehashes, paid for by
/// over-allocating the bucket array right after each resize (load factor
/// drops to one ninth of the threshold).
pub const GROWTH_FACTOR: usize = 9;

/// Bucket count used by `HashTable::new`.
pub const DEFAULT_BUCKETS: usize = 2;

#[derive(Debug)]
pub(crate) struct Record<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
}

pub(crate) type Chain<V> = LinkedList<Record<V>>;

pub struct HashTable<V> {
    pub(crate) buckets: Vec<Chain<V>>,
    len: usize,
}

/// Outcome of `HashTable::insert`.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertResult<V> {
    /// The key was new; the element count grew by one.
    Inserted,
    /// The key was present; its previous pair is handed back.
    Replaced { key: Key, value: V },
}

impl<V> InsertResult<V> {
    pub fn is_replaced(&self) -> bool {
        matches!(self, InsertResult::Replaced { .. })
    }

    /// The displaced value, if any.
    pub fn replaced(self) -> Option<V> {
        match self {
            InsertResult::Inserted => None,
            InsertResult::Replaced { value, .. } => Some(value),
        }
    }
}

impl<V> HashTable<V> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Allocate a table with `bucket_count` empty chains.
    ///
    /// # Panics
    /// If `bucket_count` is zero or the bucket array cannot be allocated.
    pub fn with_buckets(bucket_count: usize) -> Self {
        match Self::try_with_buckets(bucket_count) {
            Ok(table) => table,
            Err(e) => panic!("HashTable::with_buckets({bucket_count}): {e}"),
        }
    }

    pub fn try_with_buckets(bucket_count: usize) -> Result<Self, TableError> {
        if bucket_count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(bucket_count)?;
        buckets.resize_with(bucket_count, LinkedList::new);
        trace!("allocated hash table with {} buckets", bucket_count);
        Ok(Self { buckets, len: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    #[inline]
    pub fn bucket_of(&self, key: Key) -> usize {
        (key % self.buckets.len() as u64) as usize
    }

    /// Insert or replace. May grow the table first; see `LOAD_FACTOR`.
    pub fn insert(&mut self, key: Key, value: V) -> InsertResult<V> {
        self.maybe_resize();

        let idx = self.bucket_of(key);
        let chain = &mut self.buckets[idx];
        let mut cursor = chain.cursor();
        if cursor.seek(|r| r.key == key) {
            if let Some(record) = cursor.get_mut() {
                let old = mem::replace(&mut record.value, value);
                return InsertResult::Replaced { key, value: old };
            }
        }

        chain.push(Record { key, value });
        self.len += 1;
        InsertResult::Inserted
    }

    pub fn find(&self, key: Key) -> Option<&V> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|r| r.key == key)
            .map(|r| &r.value)
    }

    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        let idx = self.bucket_of(key);
        let mut cursor = self.buckets[idx].cursor();
        if !cursor.seek(|r| r.key == key) {
            return None;
        }
        cursor.into_mut().map(|r| &mut r.value)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Unlink the record for `key` and return its pair.
    pub fn remove(&mut self, key: Key) -> Option<(Key, V)> {
        let idx = self.bucket_of(key);
        let mut cursor = self.buckets[idx].cursor();
        if !cursor.seek(|r| r.key == key) {
            return None;
        }
        let record = cursor.take()?;
        self.len -= 1;
        Some((record.key, record.value))
    }

    /// Tear the table down, handing every value to `destructor`.
    pub fn free_with<F>(self, mut destructor: F)
    where
        F: FnMut(V),
    {
        for chain in self.buckets {
            chain.free_with(|record| destructor(record.value));
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    /// Cursor at the first record (exhausted if the table is empty).
    pub fn cursor(&mut self) -> TableCursor<'_, V> {
        TableCursor::new(self)
    }

    #[cfg(test)]
    pub(crate) fn chain_iter(&self, idx: usize) -> impl Iterator<Item = &Record<V>> + '_ {
        self.buckets[idx].iter()
    }

    fn maybe_resize(&mut self) {
        let bucket_count = self.buckets.len();
        if self.len < LOAD_FACTOR.saturating_mul(bucket_count) {
            return;
        }
        let Some(grown) = bucket_count.checked_mul(GROWTH_FACTOR) else {
            warn!(
                "hash table at {} buckets cannot grow further; chains will lengthen",
                bucket_count
            );
            return;
        };
        debug!(
            "resizing hash table: {} -> {} buckets ({} records)",
            bucket_count, grown, self.len
        );

        // Records move into the replacement; the drained chains are dropped empty.
        let mut replacement = HashTable::with_buckets(grown);
        for mut chain in mem::take(&mut self.buckets) {
            while let Some(record) = chain.pop() {
                replacement.link(record);
            }
        }
        debug_assert_eq!(replacement.len, self.len);
        *self = replacement;
    }

    // Push a record known to be absent into its chain.
    fn link(&mut self, record: Record<V>) {
        let idx = self.bucket_of(record.key);
        self.buckets[idx].push(record);
        self.len += 1;
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn chain_keys<V>(t: &HashTable<V>, idx: usize) -> Vec<Key> {
        t.chain_iter(idx).map(|r| r.key).collect()
    }

    /// Invariant: every key sits in chain `key % bucket_count`, once, and
    /// the chain lengths add up to `len()`.
    fn assert_placement<V>(t: &HashTable<V>) {
        let mut total = 0;
        let mut seen = BTreeSet::new();
        for idx in 0..t.bucket_count() {
            for k in chain_keys(t, idx) {
                assert_eq!(t.bucket_of(k), idx, "key {k} in wrong chain");
                assert!(seen.insert(k), "key {k} stored twice");
                total += 1;
            }
        }
        assert_eq!(total, t.len());
    }

    #[test]
    fn zero_buckets_rejected() {
        assert!(matches!(
            HashTable::<i32>::try_with_buckets(0),
            Err(TableError::ZeroBuckets)
        ));
        let res = std::panic::catch_unwind(|| HashTable::<i32>::with_buckets(0));
        assert!(res.is_err(), "with_buckets(0) must panic");
    }

    /// Invariant: replacing keeps the count and returns the previous pair.
    #[test]
    fn insert_replace_find() {
        let mut t = HashTable::with_buckets(4);
        assert_eq!(t.insert(7, "a"), InsertResult::Inserted);
        assert_eq!(t.len(), 1);
        let r = t.insert(7, "b");
        assert_eq!(r, InsertResult::Replaced { key: 7, value: "a" });
        assert!(r.is_replaced());
        assert_eq!(t.len(), 1);
        assert_eq!(t.find(7), Some(&"b"));
        assert_eq!(t.find(8), None);
        assert_placement(&t);
    }

    /// Invariant: new keys go to the chain head; replace does not reorder.
    #[test]
    fn chain_order_is_head_first() {
        let mut t = HashTable::with_buckets(4);
        t.insert(1, ());
        t.insert(5, ());
        t.insert(9, ());
        assert_eq!(chain_keys(&t, 1), vec![9, 5, 1]);
        t.insert(1, ());
        assert_eq!(chain_keys(&t, 1), vec![9, 5, 1]);
    }

    /// Invariant: remove splices out only the matching record.
    #[test]
    fn remove_from_shared_chain() {
        let mut t = HashTable::with_buckets(4);
        for k in [1, 5, 9, 2] {
            t.insert(k, k * 10);
        }
        assert_eq!(t.remove(5), Some((5, 50)));
        assert_eq!(t.remove(5), None);
        assert_eq!(t.len(), 3);
        assert_eq!(chain_keys(&t, 1), vec![9, 1]);
        assert_eq!(t.find(9), Some(&90));
        assert_eq!(t.find(1), Some(&10));
        assert_placement(&t);
    }

    #[test]
    fn find_mut_updates_in_place() {
        let mut t = HashTable::with_buckets(3);
        t.insert(4, 1);
        *t.find_mut(4).unwrap() += 41;
        assert_eq!(t.find(4), Some(&42));
        assert!(t.find_mut(5).is_none());
    }

    /// Invariant: growth happens at the start of the insert that finds
    /// `len >= 3 * buckets`, multiplies by 9, and keeps every pair.
    #[test]
    fn resize_threshold_and_factor() {
        let mut t = HashTable::with_buckets(4);
        for k in 0..12u64 {
            t.insert(k, k);
        }
        assert_eq!(t.bucket_count(), 4);
        t.insert(12, 12);
        assert_eq!(t.bucket_count(), 36);
        assert_eq!(t.len(), 13);
        for k in 0..13u64 {
            assert_eq!(t.find(k), Some(&k));
        }
        assert_placement(&t);
    }

    /// Invariant: a replacing insert at the threshold still resizes first.
    #[test]
    fn replace_at_threshold_resizes() {
        let mut t = HashTable::with_buckets(1);
        for k in 0..3u64 {
            t.insert(k, 0);
        }
        assert!(t.insert(0, 1).is_replaced());
        assert_eq!(t.bucket_count(), 9);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn free_with_visits_every_value() {
        let mut t = HashTable::with_buckets(2);
        for k in 0..10u64 {
            t.insert(k, k as i32);
        }
        let mut freed = Vec::new();
        t.free_with(|v| freed.push(v));
        freed.sort();
        assert_eq!(freed, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn load_factor_and_debug() {
        let mut t = HashTable::with_buckets(2);
        t.insert(3, 'x');
        assert_eq!(t.load_factor(), 0.5);
        assert_eq!(format!("{:?}", t), "{3: 'x'}");
        assert_eq!(HashTable::<u8>::default().bucket_count(), DEFAULT_BUCKETS);
    }
}
