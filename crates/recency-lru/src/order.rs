//! Recency order: a doubly-linked list of entries stored in a slot arena.
//!
//! Entries live in a `Vec` of slots addressed by stable [`Handle`]s. Each
//! occupied slot carries `prev`/`next` links, so relinking an entry is a
//! handful of index writes and never moves the entry itself. Slots vacated
//! by removal go onto a free list and are reused by the next insertion.
//!
//! Direction: the head is the most recently used entry, the tail the least
//! recently used. `prev` points toward the head, `next` toward the tail.

use std::mem;

/// Position of an entry inside the arena.
///
/// A handle stays valid until its entry is removed. After that the slot may
/// be handed out again for a different entry.
pub(crate) type Handle = usize;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<Handle>,
    next: Option<Handle>,
}

#[derive(Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant,
}

/// Arena-backed doubly-linked recency list.
#[derive(Debug)]
pub(crate) struct Order<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> Order<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Most recently used entry.
    pub(crate) fn head(&self) -> Option<Handle> {
        self.head
    }

    /// Least recently used entry.
    pub(crate) fn tail(&self) -> Option<Handle> {
        self.tail
    }

    /// Inserts a new entry at the head and returns its handle.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> Handle {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Slot::Occupied(node);
                handle
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };
        self.link_front(handle);
        self.len += 1;
        handle
    }

    /// Relinks an existing entry at the head. No-op if it is already there.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    /// Removes an entry, frees its slot, and hands back the key and value.
    pub(crate) fn remove(&mut self, handle: Handle) -> (K, V) {
        self.unlink(handle);
        self.len -= 1;
        match mem::replace(&mut self.slots[handle], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free.push(handle);
                (node.key, node.value)
            }
            Slot::Vacant => unreachable!("removed vacant slot {handle}"),
        }
    }

    /// Removes the least recently used entry.
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        Some(self.remove(tail))
    }

    /// Drops every entry and releases the arena's free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Drains all entries, least recently used first.
    pub(crate) fn drain_oldest_first(&mut self) -> Vec<(K, V)> {
        let mut drained = Vec::with_capacity(self.len);
        while let Some(entry) = self.pop_back() {
            drained.push(entry);
        }
        self.clear();
        drained
    }

    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (&node.key, &node.value)
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.node_mut(handle).value
    }

    /// Neighbour one step closer to the head (newer).
    pub(crate) fn newer(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).prev
    }

    /// Neighbour one step closer to the tail (older).
    pub(crate) fn older(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).next
    }

    fn node(&self, handle: Handle) -> &Node<K, V> {
        match &self.slots[handle] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("stale handle {handle}"),
        }
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        match &mut self.slots[handle] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("stale handle {handle}"),
        }
    }

    fn link_front(&mut self, handle: Handle) {
        let old_head = self.head;
        {
            let node = self.node_mut(handle);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old) => self.node_mut(old).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let node = self.node_mut(handle);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }
}
