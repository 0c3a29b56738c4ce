//! LinkedList: doubly linked list whose nodes live in a generational arena.
//!
//! Nodes are owned by the list's `SlotMap`; `prev`/`next`/`head`/`tail` are
//! non-owning keys into it. Removing a node never invalidates the key of any
//! other node, which is what lets cursors keep their position across
//! removals elsewhere in the list.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use log::trace;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<T> {
    payload: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

pub struct LinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|k| &self.nodes[k].payload)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|k| &self.nodes[k].payload)
    }

    /// Insert `payload` at the head.
    pub fn push(&mut self, payload: T) {
        let old_head = self.head;
        let k = self.nodes.insert(Node {
            payload,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.nodes[h].prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
    }

    /// Insert `payload` at the tail.
    pub fn append(&mut self, payload: T) {
        let old_tail = self.tail;
        let k = self.nodes.insert(Node {
            payload,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    /// Remove and return the head payload; `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        let k = self.head?;
        self.unlink(k).map(|n| n.payload)
    }

    /// Remove and return the tail payload; `None` when empty.
    pub fn slice(&mut self) -> Option<T> {
        let k = self.tail?;
        self.unlink(k).map(|n| n.payload)
    }

    /// Bubble sort by swapping payloads between adjacent nodes until a full
    /// pass makes no swap. Equal elements never swap, so the sort is stable.
    /// With `ascending == false` the comparator's sense is inverted.
    pub fn sort_by<F>(&mut self, ascending: bool, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len() < 2 {
            return;
        }

        let mut passes = 0usize;
        loop {
            let mut swapped = false;
            let mut cur = self.head;
            while let Some(k) = cur {
                let Some(next) = self.nodes[k].next else {
                    break;
                };
                let ord = compare(&self.nodes[k].payload, &self.nodes[next].payload);
                let out_of_order = if ascending {
                    ord == Ordering::Greater
                } else {
                    ord == Ordering::Less
                };
                if out_of_order {
                    if let Some([a, b]) = self.nodes.get_disjoint_mut([k, next]) {
                        mem::swap(&mut a.payload, &mut b.payload);
                        swapped = true;
                    }
                }
                cur = Some(next);
            }
            passes += 1;
            if !swapped {
                break;
            }
        }
        trace!("sorted {} list nodes in {} passes", self.len(), passes);
    }

    pub fn sort(&mut self, ascending: bool)
    where
        T: Ord,
    {
        self.sort_by(ascending, T::cmp)
    }

    /// Tear the list down, handing every payload (head to tail) to `destructor`.
    pub fn free_with<F>(mut self, mut destructor: F)
    where
        F: FnMut(T),
    {
        while let Some(payload) = self.pop() {
            destructor(payload);
        }
    }

    /// Cursor positioned at the head (exhausted if the list is empty).
    pub fn cursor(&mut self) -> ListCursor<'_, T> {
        let node = self.head;
        ListCursor { list: self, node }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    pub(crate) fn payload(&self, k: DefaultKey) -> Option<&T> {
        self.nodes.get(k).map(|n| &n.payload)
    }

    pub(crate) fn payload_mut(&mut self, k: DefaultKey) -> Option<&mut T> {
        self.nodes.get_mut(k).map(|n| &mut n.payload)
    }

    // Splice `k` out, repairing neighbour links and head/tail.
    fn unlink(&mut self, k: DefaultKey) -> Option<Node<T>> {
        let node = self.nodes.remove(k)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node)
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for payload in iter {
            self.append(payload);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

/// Cursor over a `LinkedList` with single-node granularity.
///
/// The cursor holds the list mutably for its whole lifetime, so the list can
/// only change through the cursor while it exists.
pub struct ListCursor<'a, T> {
    list: &'a mut LinkedList<T>,
    node: Option<DefaultKey>,
}

impl<'a, T> ListCursor<'a, T> {
    /// Reattach a cursor at a position previously read with `position`.
    pub(crate) fn resume(list: &'a mut LinkedList<T>, node: Option<DefaultKey>) -> Self {
        debug_assert!(node.map_or(true, |k| list.nodes.contains_key(k)));
        ListCursor { list, node }
    }

    pub(crate) fn position(&self) -> Option<DefaultKey> {
        self.node
    }

    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Advance one node. Returns false once the cursor walks off the tail;
    /// an exhausted cursor stays exhausted until `rewind`.
    pub fn next(&mut self) -> bool {
        match self.node {
            Some(k) => {
                self.node = self.list.nodes[k].next;
                self.node.is_some()
            }
            None => false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.node.map(|k| &self.list.nodes[k].payload)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        let k = self.node?;
        Some(&mut self.list.nodes[k].payload)
    }

    /// Consume the cursor, keeping a mutable borrow of the current payload.
    pub fn into_mut(self) -> Option<&'a mut T> {
        let k = self.node?;
        let list = self.list;
        Some(&mut list.nodes[k].payload)
    }

    /// Advance until `pred` holds for the current payload, starting with the
    /// current one. Returns false (cursor exhausted) when nothing matches.
    pub fn seek<P>(&mut self, mut pred: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        while let Some(k) = self.node {
            if pred(&self.list.nodes[k].payload) {
                return true;
            }
            self.node = self.list.nodes[k].next;
        }
        false
    }

    /// Detach the current node and return its payload without destroying it.
    ///
    /// Repositioning: the successor if there is one; otherwise the
    /// predecessor (the node was the tail); otherwise the list is now empty
    /// and the cursor is exhausted.
    pub fn take(&mut self) -> Option<T> {
        let k = self.node?;
        let node = self.list.unlink(k)?;
        self.node = node.next.or(node.prev);
        Some(node.payload)
    }

    /// Remove the current node, handing its payload to `destructor`.
    /// Returns true iff the cursor is still positioned on a node afterwards.
    pub fn remove_with<F>(&mut self, destructor: F) -> bool
    where
        F: FnOnce(T),
    {
        match self.take() {
            Some(payload) => {
                destructor(payload);
                self.is_valid()
            }
            None => false,
        }
    }

    pub fn remove(&mut self) -> bool {
        self.remove_with(drop)
    }

    pub fn rewind(&mut self) {
        self.node = self.list.head;
    }
}

/// Borrowing iterator, head to tail.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a SlotMap<DefaultKey, Node<T>> = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a SlotMap<DefaultKey, Node<T>> = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.payload)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; drains the list from the head (or the tail, backwards).
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.slice()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
