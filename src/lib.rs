//! chain-table: a single-threaded hash table with separate chaining over
//! arena-backed doubly linked lists, plus cursors that keep working while
//! the element under them is removed.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose pieces can each be
//!   reasoned about on their own.
//! - Layers:
//!   - LinkedList<T>: doubly linked list whose nodes live in a
//!     generational `SlotMap`; links are keys, not pointers. Supports
//!     push/append at either end, pop/slice from either end, stable
//!     bubble sort, and a `ListCursor` with mid-list removal.
//!   - HashTable<V>: `u64` keys bucketed by `key % bucket_count`, one
//!     `LinkedList` chain per bucket. Insert replaces on duplicate keys.
//!   - TableCursor<V>: a bucket index plus a nested `ListCursor`
//!     position, presenting every pair in one flat walk.
//!
//! Constraints
//! - Single-threaded; no locking or atomics.
//! - No `unsafe`: structural links are generational slot keys, so a stale
//!   link can only miss, never alias freed memory.
//! - Keys are opaque integers. Callers hash their data first
//!   (`fnv::hash_bytes`, `fnv::hash_one`) to get a useful spread.
//!
//! Ownership
//! - The table owns every record. Values leave it by value: replaced on
//!   insert, returned from `remove`, handed to the closure given to
//!   `free_with`, or dropped with the table.
//! - Growing the table moves records from the old chains into the new
//!   ones; nothing is cloned and no value is dropped.
//!
//! Growth
//! - Every insert first checks `len >= LOAD_FACTOR * bucket_count` and, if
//!   so, rebuilds with `GROWTH_FACTOR` times as many buckets. Both are fixed
//!   constants. Tables never shrink.
//!
//! Cursors and mutation
//! - `ListCursor` and `TableCursor` hold their container by `&mut`, so the
//!   container cannot be mutated through any other path while a cursor is
//!   alive; the compiler rejects it. Removal through the cursor is allowed
//!   and leaves the cursor on the next element.
//!
//! Notes and non-goals
//! - No internal synchronisation; share across threads only behind
//!   the caller's own lock.
//! - List sort is O(n^2); it is there for small lists.
//! - Logging goes through the `log` facade (resize events at `debug`);
//!   the crate never installs a logger.

pub mod error;
pub mod fnv;
pub mod hash_table;
mod hash_table_proptest;
pub mod linked_list;
mod linked_list_proptest;
pub mod table_cursor;

// Public surface
pub use error::TableError;
pub use hash_table::{HashTable, InsertResult, Key, DEFAULT_BUCKETS, GROWTH_FACTOR, LOAD_FACTOR};
pub use linked_list::{LinkedList, ListCursor};
pub use table_cursor::TableCursor;
