//! TableCursor: flat enumeration of a `HashTable` built on `ListCursor`.
//!
//! The cursor remembers which bucket it is in and where the nested list
//! cursor stands in that bucket's chain. Empty buckets are skipped. It
//! borrows the table mutably, so the table cannot be changed behind its
//! back; removal through the cursor is the one sanctioned mutation.

use crate::hash_table::{Chain, HashTable, Key, Record};
use crate::linked_list::{self, ListCursor};
use core::iter::FusedIterator;
use slotmap::DefaultKey;

pub struct TableCursor<'a, V> {
    table: &'a mut HashTable<V>,
    // `None` once exhausted (or if the table was empty).
    bucket: Option<usize>,
    node: Option<DefaultKey>,
}

impl<'a, V> TableCursor<'a, V> {
    pub fn new(table: &'a mut HashTable<V>) -> Self {
        let mut cursor = TableCursor {
            table,
            bucket: None,
            node: None,
        };
        if !cursor.table.is_empty() {
            let found = cursor.open_from(0);
            debug_assert!(found, "non-empty table with no populated bucket");
        }
        cursor
    }

    pub fn is_valid(&self) -> bool {
        self.bucket.is_some() && self.node.is_some()
    }

    /// Bucket the cursor is currently visiting.
    pub fn bucket_index(&self) -> Option<usize> {
        self.bucket.filter(|_| self.node.is_some())
    }

    /// Step to the next record, crossing into later buckets as needed.
    /// Returns false when the table is exhausted.
    pub fn next(&mut self) -> bool {
        let Some(bucket) = self.bucket else {
            return false;
        };
        let mut nested = ListCursor::resume(&mut self.table.buckets[bucket], self.node);
        if nested.next() {
            self.node = nested.position();
            return true;
        }
        self.open_from(bucket + 1)
    }

    pub fn get(&self) -> Option<(Key, &V)> {
        let record = self.current()?;
        Some((record.key, &record.value))
    }

    pub fn get_mut(&mut self) -> Option<(Key, &mut V)> {
        let bucket = self.bucket?;
        let record = self.table.buckets[bucket].payload_mut(self.node?)?;
        Some((record.key, &mut record.value))
    }

    /// Remove the current pair and return it, leaving the cursor on the
    /// following pair (or exhausted).
    ///
    /// # Panics
    /// If the removed record is not the one the cursor was positioned on.
    pub fn remove(&mut self) -> Option<(Key, V)> {
        let key = self.current()?.key;
        // Step off the record before it is unlinked.
        self.next();
        let removed = self.table.remove(key);
        assert_eq!(
            removed.as_ref().map(|(k, _)| *k),
            Some(key),
            "table cursor lost its record during removal"
        );
        removed
    }

    fn current(&self) -> Option<&Record<V>> {
        let bucket = self.bucket?;
        self.table.buckets[bucket].payload(self.node?)
    }

    // Open a nested cursor on the first non-empty chain at or after `start`.
    fn open_from(&mut self, start: usize) -> bool {
        for idx in start..self.table.buckets.len() {
            let nested = self.table.buckets[idx].cursor();
            if nested.is_valid() {
                self.node = nested.position();
                self.bucket = Some(idx);
                return true;
            }
        }
        self.bucket = None;
        self.node = None;
        false
    }
}

/// Borrowing iterator over `(key, &value)` pairs, bucket by bucket.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Chain<V>>,
    chain: Option<linked_list::Iter<'a, Record<V>>>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(table: &'a HashTable<V>) -> Self {
        Iter {
            buckets: table.buckets.iter(),
            chain: None,
            remaining: table.len(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((record.key, &record.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}
