//! A singly linked list whose nodes live in a single `Vec`.
//!
//! Nodes are addressed by their position in the storage vec rather than by pointer, which
//! lets the list keep an O(1) tail reference without shared mutable ownership. Slots vacated
//! by removals go on a free list and are reused by later insertions.

use std::fmt;

use crate::error::{Error, Result};

/// Position of a node in the list's storage vec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeHandle(usize);

/// A node that lives in a linked list.
#[derive(Debug, Clone)]
struct Node<T> {
    /// The value being stored
    value: T,
    /// The next node in the list, `None` for the tail
    next: Option<NodeHandle>,
}

/// Singly linked list with head and tail references and a running length.
///
/// Every index-taking operation is bounds checked: access and removal accept
/// `0 <= index < len`, insertion accepts `0 <= index <= len`.
///
/// ```rust
/// use chainhash::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.append(2);
/// list.append(3);
/// list.prepend(1);
/// assert_eq!(list.to_string(), "( 1 ) -> ( 2 ) -> ( 3 ) -> null");
/// assert_eq!(list.find(&3), Some(2));
/// assert_eq!(list.remove_at(1)?, 2);
/// assert!(list.at(2).is_err());
/// # Ok::<(), chainhash::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinkedList<T> {
    /// Node slots; `None` marks a slot sitting on the free list
    store: Vec<Option<Node<T>>>,
    /// Vacated slots waiting to be reused
    free: Vec<NodeHandle>,
    /// The first node in the list
    head: Option<NodeHandle>,
    /// The last node in the list
    tail: Option<NodeHandle>,
    /// Number of reachable nodes
    len: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self { store: Vec::new(), free: Vec::new(), head: None, tail: None, len: 0 }
    }

    /// Creates an empty list with room for `capacity` nodes before reallocating
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { store: Vec::with_capacity(capacity), ..Self::new() }
    }

    /// Number of values in the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first value, if any
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.value(self.head?)
    }

    /// The last value, if any
    #[must_use]
    pub fn tail(&self) -> Option<&T> {
        self.value(self.tail?)
    }

    /// Adds a value at the end of the list
    pub fn append(&mut self, value: T) {
        let handle = self.allocate(Node { value, next: None });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(handle);
                }
            }
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        self.len = self.len.saturating_add(1);
    }

    /// Adds a value at the front of the list, making it the new head
    pub fn prepend(&mut self, value: T) {
        let handle = self.allocate(Node { value, next: self.head });
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
        self.len = self.len.saturating_add(1);
    }

    /// Returns the value at a 0-based position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        self.handle_at(index).and_then(|handle| self.value(handle)).ok_or(self.out_of_bounds(index))
    }

    /// Returns a mutable reference to the value at a 0-based position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;
        let error = self.out_of_bounds(index);
        let handle = self.handle_at(index).ok_or(error)?;
        self.node_mut(handle).map(|node| &mut node.value).ok_or(error)
    }

    /// Removes and returns the last value, or `None` if the list is empty
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;
        self.remove_at(last).ok()
    }

    /// Removes and returns the first value, or `None` if the list is empty
    pub fn pop_front(&mut self) -> Option<T> {
        self.unlink_after(None)
    }

    /// Inserts a value so that it ends up at `index`, shifting the current occupant back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `index > len`.
    pub fn insert_at(&mut self, value: T, index: usize) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        if index == 0 {
            self.prepend(value);
            return Ok(());
        }
        if index == self.len {
            self.append(value);
            return Ok(());
        }

        let error = self.out_of_bounds(index);
        let prev = self.handle_at(index.saturating_sub(1)).ok_or(error)?;
        let next = self.node(prev).ok_or(error)?.next;
        let handle = self.allocate(Node { value, next });
        if let Some(node) = self.node_mut(prev) {
            node.next = Some(handle);
        }
        self.len = self.len.saturating_add(1);
        Ok(())
    }

    /// Removes and returns the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let prev = match index.checked_sub(1) {
            Some(prev_index) => Some(self.handle_at(prev_index).ok_or(self.out_of_bounds(index))?),
            None => None,
        };
        self.unlink_after(prev).ok_or(self.out_of_bounds(index))
    }

    /// Detaches and returns the first value matching `predicate`
    pub fn remove_first<P>(&mut self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut prev = None;
        let mut current = self.head;
        while let Some(handle) = current {
            let node = self.node(handle)?;
            if predicate(&node.value) {
                return self.unlink_after(prev);
            }
            prev = Some(handle);
            current = node.next;
        }
        None
    }

    /// Position of the first value matching `predicate`
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Mutable reference to the first value matching `predicate`
    pub fn find_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut current = self.head;
        while let Some(handle) = current {
            let node = self.node(handle)?;
            if predicate(&node.value) {
                return self.node_mut(handle).map(|node| &mut node.value);
            }
            current = node.next;
        }
        None
    }

    /// Removes every value and releases the node slots
    pub fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates the values from head to tail
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { list: self, next: self.head, remaining: self.len }
    }

    /// Stores a node in a free slot, or at the end of the storage vec
    fn allocate(&mut self, node: Node<T>) -> NodeHandle {
        if let Some(handle) = self.free.pop() {
            if let Some(slot) = self.store.get_mut(handle.0) {
                *slot = Some(node);
                return handle;
            }
        }
        let handle = NodeHandle(self.store.len());
        self.store.push(Some(node));
        handle
    }

    /// Takes a node out of its slot and puts the slot on the free list
    fn release(&mut self, handle: NodeHandle) -> Option<Node<T>> {
        let node = self.store.get_mut(handle.0)?.take()?;
        self.free.push(handle);
        Some(node)
    }

    /// Removes the successor of `prev`, or the head when `prev` is `None`
    fn unlink_after(&mut self, prev: Option<NodeHandle>) -> Option<T> {
        let target = match prev {
            Some(prev) => self.node(prev)?.next?,
            None => self.head?,
        };
        let node = self.release(target)?;
        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        if node.next.is_none() {
            self.tail = prev;
        }
        self.len = self.len.saturating_sub(1);
        Some(node.value)
    }

    /// Walks from the head to the node at `index`
    fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        let mut current = self.head?;
        for _ in 0..index {
            current = self.node(current)?.next?;
        }
        Some(current)
    }

    /// Node stored at `handle`, if the slot is live
    fn node(&self, handle: NodeHandle) -> Option<&Node<T>> {
        self.store.get(handle.0)?.as_ref()
    }

    /// Mutable counterpart of `node`
    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<T>> {
        self.store.get_mut(handle.0)?.as_mut()
    }

    /// Value stored at `handle`
    fn value(&self, handle: NodeHandle) -> Option<&T> {
        self.node(handle).map(|node| &node.value)
    }

    /// Accepts positions of existing values
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len { Ok(()) } else { Err(self.out_of_bounds(index)) }
    }

    /// The error reported for a rejected `index`
    fn out_of_bounds(&self, index: usize) -> Error {
        Error::IndexOutOfBounds { index, len: self.len }
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Returns true if some value equals `value`
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Position of the first value equal to `value`
    #[must_use]
    pub fn find(&self, value: &T) -> Option<usize> {
        self.position(|candidate| candidate == value)
    }
}

/// Renders `( v1 ) -> ( v2 ) -> null`; an empty list renders as an empty string.
impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        for value in self {
            write!(f, "( {value} ) -> ")?;
        }
        f.write_str("null")
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
            self.append(value);
        }
    }
}

/// Borrowing iterator over a list, head to tail
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    /// The list being walked
    list: &'a LinkedList<T>,
    /// Node to yield next
    next: Option<NodeHandle>,
    /// Values not yet yielded
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.next?)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator that drains a list from the head
#[derive(Debug, Clone)]
pub struct IntoIter<T> {
    /// The list being drained
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
