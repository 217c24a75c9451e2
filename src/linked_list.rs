//! A singly linked list that flattens all its nodes onto a Vec for storage,
//! handing out copyable handles instead of pointers so that a node found by
//! [`LinkedList::search`] can be handed back to [`LinkedList::remove`] later.

use std::fmt;
use std::iter::FromIterator;

use log::{debug, trace};

use crate::error::{CollectionError, Result};

/// Identifies a node in a [`LinkedList`]. Two handles are equal only when they
/// name the same node; values never enter into it.
///
/// The generation is bumped every time a slot in the storage vec is vacated,
/// so a handle to a removed node stays dead even after its slot is reused. It's
/// a u64, which no slot is going to be reused often enough to wrap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u64,
}

/// A node that lives in a linked list.
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The index of the next node in the list.
    next: Option<usize>,
}

/// A position in the storage vec, which may or may not hold a live node.
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// A linked list with a single contiguous Vec of nodes, which are addressed by
/// their position in the Vec. It freelists slots that have been removed and
/// reuses them on the next insert. It has no compaction.
///
/// Every occupied slot is part of the chain from `head` to `tail`; there are no
/// orphans. `tail` is always the one node in the chain with no `next`.
pub struct LinkedList<T> {
    /// The nodes in the list, plus vacated slots waiting on the freelist.
    store: Vec<Slot<T>>,

    /// Slots in the list which aren't in use anymore. These will be reused.
    free: Vec<usize>,

    /// The first node in the list.
    head: Option<usize>,

    /// The last node in the list.
    tail: Option<usize>,

    len: usize,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty linked list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new linked list with room for `capacity` nodes before the
    /// storage vec has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates a linked list holding a single value.
    pub fn with_value(value: T) -> Self {
        let mut list = Self::new();
        list.insert(value);
        list
    }

    /// The length of this linked list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` at the tail of the list and returns a handle to its
    /// node. If the list is empty the new node is both head and tail.
    pub fn insert(&mut self, value: T) -> NodeHandle {
        let node = Node { value, next: None };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        let idx = match self.free.pop() {
            Some(idx) => {
                self.store[idx].node = Some(node);
                idx
            }
            None => {
                self.store.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.store.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_node) = self.store[tail].node.as_mut() {
                    tail_node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
        self.len += 1;
        trace!("inserted node {} at tail, len {}", idx, self.len);

        #[cfg(test)]
        self.continuity_test();

        self.handle_at(idx)
    }

    /// Removes the node `node` refers to and returns its value.
    ///
    /// Fails with [`CollectionError::NotFound`] if the node isn't in this list,
    /// in which case the list is left alone.
    pub fn remove(&mut self, node: &NodeHandle) -> Result<T> {
        if self.resolve(node).is_none() {
            debug!("refusing to remove {:?}: not present in list", node);
            return Err(CollectionError::NotFound);
        }

        self.unlink(node.index).ok_or(CollectionError::NotFound)
    }

    /// Removes the last node in the list and returns its value. The node before
    /// it, if any, becomes the new tail.
    ///
    /// Fails with [`CollectionError::EmptyStructure`] on an empty list, which
    /// is otherwise left alone.
    pub fn remove_tail(&mut self) -> Result<T> {
        match self.tail {
            Some(tail) => self.unlink(tail).ok_or(CollectionError::NotFound),
            None => {
                debug!("remove_tail on an empty list");
                Err(CollectionError::EmptyStructure)
            }
        }
    }

    /// Handles to every node whose value equals `value`, head to tail.
    pub fn search(&self, value: &T) -> Vec<NodeHandle>
    where
        T: PartialEq,
    {
        self.chain()
            .filter(|(_, v)| *v == value)
            .map(|(idx, _)| self.handle_at(idx))
            .collect()
    }

    /// Whether any node in the list holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Whether `node` is the first node in the list.
    pub fn is_head(&self, node: &NodeHandle) -> bool {
        self.head_handle() == Some(*node)
    }

    /// Whether `node` is the last node in the list.
    pub fn is_tail(&self, node: &NodeHandle) -> bool {
        self.tail_handle() == Some(*node)
    }

    /// A handle to the first node in the list.
    pub fn head_handle(&self) -> Option<NodeHandle> {
        self.head.map(|idx| self.handle_at(idx))
    }

    /// A handle to the last node in the list.
    pub fn tail_handle(&self) -> Option<NodeHandle> {
        self.tail.map(|idx| self.handle_at(idx))
    }

    /// The value at the head of the list.
    pub fn head(&self) -> Option<&T> {
        self.head_handle().and_then(|h| self.get(&h))
    }

    /// The value at the tail of the list.
    pub fn tail(&self) -> Option<&T> {
        self.tail_handle().and_then(|h| self.get(&h))
    }

    /// Gets the value of a node, if it's still in the list.
    pub fn get(&self, node: &NodeHandle) -> Option<&T> {
        self.resolve(node).map(|n| &n.value)
    }

    /// Gets a mutable reference to the value of a node, if it's still in the
    /// list.
    pub fn get_mut(&mut self, node: &NodeHandle) -> Option<&mut T> {
        match self.store.get_mut(node.index) {
            Some(slot) if slot.generation == node.generation => {
                slot.node.as_mut().map(|n| &mut n.value)
            }
            _ => None,
        }
    }

    /// Iterates over the values in the list, head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.chain())
    }

    /// Clears this linked list. Does not free the underlying buffers, and every
    /// handle issued so far is invalidated.
    pub fn clear(&mut self) {
        for (idx, slot) in self.store.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation + 1;
                self.free.push(idx);
            }
        }

        self.head = None;
        self.tail = None;
        self.len = 0;

        #[cfg(test)]
        self.continuity_test();
    }

    fn handle_at(&self, idx: usize) -> NodeHandle {
        NodeHandle {
            index: idx,
            generation: self.store[idx].generation,
        }
    }

    fn resolve(&self, node: &NodeHandle) -> Option<&Node<T>> {
        self.store
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn chain(&self) -> Chain<'_, T> {
        Chain {
            store: &self.store,
            cursor: self.head,
        }
    }

    /// Cuts the node at `idx` out of the chain, walking from the head to find
    /// the node before it. Callers only pass occupied slots, and every occupied
    /// slot is on the chain, so this never comes back `None` in practice.
    fn unlink(&mut self, idx: usize) -> Option<T> {
        let mut prev = None;
        let mut found = false;

        for (current, _) in self.chain() {
            if current == idx {
                found = true;
                break;
            }
            prev = Some(current);
        }

        if !found {
            return None;
        }

        let slot = &mut self.store[idx];
        let removed = slot.node.take()?;
        slot.generation = slot.generation + 1;
        self.free.push(idx);

        match prev {
            // the removed node was the head
            None => self.head = removed.next,
            // link prev to next so the node doesn't exist in the chain anymore
            Some(prev) => {
                if let Some(prev_node) = self.store[prev].node.as_mut() {
                    prev_node.next = removed.next;
                }
            }
        }

        if self.tail == Some(idx) {
            self.tail = prev;
        }

        self.len -= 1;
        trace!("removed node {}, len {}", idx, self.len);

        #[cfg(test)]
        self.continuity_test();

        Some(removed.value)
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;
        let mut last = None;

        // walk the chain and make sure it matches the number of live nodes
        for (idx, _) in self.chain() {
            count += 1;
            assert!(count <= self.len);
            last = Some(idx);
        }

        assert_eq!(self.len, count);
        assert_eq!(self.tail, last);
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.store.len(), self.len + self.free.len());

        if let Some(tail) = self.tail {
            assert!(self.store[tail].node.as_ref().map_or(false, |n| n.next.is_none()));
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Walks the chain, yielding storage indices alongside values.
struct Chain<'a, T> {
    store: &'a [Slot<T>],
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.store.get(idx)?.node.as_ref()?;
        self.cursor = node.next;
        Some((idx, &node.value))
    }
}

/// Iterator over the values of a [`LinkedList`], head to tail.
pub struct Iter<'a, T>(Chain<'a, T>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
