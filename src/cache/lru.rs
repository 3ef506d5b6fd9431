//! LRU Recency List Module
//!
//! Implements the recency ordering used for cache eviction as a doubly
//! linked list whose nodes live in a slot arena.
//!
//! - Front (head) = Most recently used
//! - Back (tail) = Least recently used

use crate::cache::CacheEntry;

// == Node Id ==
/// Stable handle to a node in a [`RecencyList`].
///
/// An id stays valid until its node is removed; the slot may then be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K, V> {
    entry: CacheEntry<K, V>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Arena-backed doubly linked list of cache entries.
///
/// All operations except iteration are O(1).
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used node.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> NodeId {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id.0) || self.node(id.0).is_none() {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    // == Remove ==
    /// Unlinks a node and returns its entry, freeing the slot for reuse.
    ///
    /// Returns None if the id does not refer to a live node.
    pub fn remove(&mut self, id: NodeId) -> Option<CacheEntry<K, V>> {
        self.node(id.0)?;
        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<CacheEntry<K, V>> {
        let tail = self.back()?;
        self.remove(tail)
    }

    // == Accessors ==
    /// Returns the least recently used node.
    pub fn back(&self) -> Option<NodeId> {
        self.tail.map(NodeId)
    }

    /// Returns the most recently used node.
    pub fn front(&self) -> Option<NodeId> {
        self.head.map(NodeId)
    }

    /// Returns the node one step more recent than `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id.0).and_then(|node| node.prev).map(NodeId)
    }

    pub fn get(&self, id: NodeId) -> Option<&CacheEntry<K, V>> {
        self.node(id.0).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CacheEntry<K, V>> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|node| &mut node.entry)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Internal Linking ==
    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}
