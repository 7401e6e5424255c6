use core::mem;

use super::node::{Node, NodePtr};

enum Slot<K, V> {
  Occupied(Node<K, V>),
  /// Links to the next vacant slot.
  Vacant(Option<usize>),
}

/// Owns the memory of every node in a skiplist.
///
/// Nodes are addressed by [`NodePtr`] offsets. Released slots are threaded
/// onto a freelist and reused by later allocations. Running out of memory
/// aborts through the global allocator, there is no recoverable error.
pub(crate) struct Arena<K, V> {
  slots: Vec<Slot<K, V>>,
  free: Option<usize>,
  allocated: usize,
}

impl<K, V> Arena<K, V> {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self {
      slots: Vec::new(),
      free: None,
      allocated: 0,
    }
  }

  #[inline]
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
      free: None,
      allocated: 0,
    }
  }

  /// Returns the number of live nodes.
  #[inline]
  pub(crate) fn allocated(&self) -> usize {
    self.allocated
  }

  /// Returns the number of slots, live or vacant.
  #[inline]
  pub(crate) fn slots(&self) -> usize {
    self.slots.len()
  }

  pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodePtr {
    self.allocated += 1;
    match self.free {
      Some(offset) => {
        match mem::replace(&mut self.slots[offset], Slot::Occupied(node)) {
          Slot::Vacant(next) => self.free = next,
          Slot::Occupied(_) => unreachable!("freelist points at a live node"),
        }
        NodePtr(offset)
      }
      None => {
        self.slots.push(Slot::Occupied(node));
        NodePtr(self.slots.len() - 1)
      }
    }
  }

  pub(crate) fn dealloc(&mut self, ptr: NodePtr) -> Node<K, V> {
    match mem::replace(&mut self.slots[ptr.0], Slot::Vacant(self.free)) {
      Slot::Occupied(node) => {
        self.free = Some(ptr.0);
        self.allocated -= 1;
        node
      }
      Slot::Vacant(_) => unreachable!("double free of node {ptr:?}"),
    }
  }

  #[inline]
  pub(crate) fn get(&self, ptr: NodePtr) -> &Node<K, V> {
    match &self.slots[ptr.0] {
      Slot::Occupied(node) => node,
      Slot::Vacant(_) => unreachable!("dangling node pointer {ptr:?}"),
    }
  }

  #[inline]
  pub(crate) fn get_mut(&mut self, ptr: NodePtr) -> &mut Node<K, V> {
    match &mut self.slots[ptr.0] {
      Slot::Occupied(node) => node,
      Slot::Vacant(_) => unreachable!("dangling node pointer {ptr:?}"),
    }
  }

  /// Forgets every slot. Live nodes must have been released beforehand,
  /// anything still occupied is dropped normally.
  #[inline]
  pub(crate) fn reset(&mut self) {
    self.slots.clear();
    self.free = None;
    self.allocated = 0;
  }
}
