use core::{fmt, mem};

use rand::{rngs::SmallRng, SeedableRng};

use super::{
  arena::Arena,
  node::{Link, Node, NodePtr},
  options::Options,
  types::{Height, Ownership},
  utils::random_height,
  Comparator, MAX_HEIGHT,
};

mod levels;
pub use levels::{LevelEntries, Levels};
pub(crate) use levels::Lane;


/// The predecessors found at each level while descending, `None` stands for the header.
type Splice = [Option<NodePtr>; MAX_HEIGHT];

/// The hook invoked with every resident key the list destroys.
pub(crate) type DiscardHook<K> = Box<dyn FnMut(&K) + Send>;

/// The outcome of [`SkipList::insert`].
pub(crate) enum Insert<V> {
  /// A new node was linked in.
  Inserted,
  /// The key is already resident, nothing was linked in. The rejected value
  /// is handed back.
  Occupied { ptr: NodePtr, value: V },
}

/// The skiplist engine shared by [`SkipSet`](crate::SkipSet) and [`SkipMap`](crate::SkipMap).
pub(crate) struct SkipList<K, V, C> {
  arena: Arena<K, V>,
  /// The header tower, `opts.max_height()` links long.
  head: Box<[Link]>,
  len: usize,
  /// Number of active levels. 1 <= height <= max_height.
  height: usize,
  rng: SmallRng,
  opts: Options,
  cmp: C,
  on_discard: Option<DiscardHook<K>>,
}

impl<K, V, C> fmt::Debug for SkipList<K, V, C>
where
  C: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SkipList")
      .field("len", &self.len)
      .field("height", &self.height)
      .field("slots", &self.arena.slots())
      .field("opts", &self.opts)
      .field("cmp", &self.cmp)
      .field("on_discard", &self.on_discard.is_some())
      .finish()
  }
}

impl<K, V, C> Drop for SkipList<K, V, C> {
  fn drop(&mut self) {
    self.clear();
  }
}

impl<K, V, C> SkipList<K, V, C> {
  /// Creates an empty list, `opts` must already be validated.
  pub(crate) fn new_in(opts: Options, cmp: C) -> Self {
    let rng = match opts.seed() {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_os_rng(),
    };
    let arena = match opts.capacity() {
      Some(capacity) => Arena::with_capacity(capacity),
      None => Arena::new(),
    };
    let max_height: usize = opts.max_height().into();

    Self {
      arena,
      head: vec![None; max_height].into_boxed_slice(),
      len: 0,
      height: 1,
      rng,
      opts,
      cmp,
      on_discard: None,
    }
  }

  #[inline]
  pub(crate) fn set_discard_hook(&mut self, hook: DiscardHook<K>) {
    self.on_discard = Some(hook);
  }

  /// Returns the number of entries in the list.
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len
  }

  /// Returns the number of active levels.
  #[inline]
  pub(crate) fn height(&self) -> Height {
    Height::new_unchecked(self.height)
  }

  #[inline]
  pub(crate) const fn options(&self) -> &Options {
    &self.opts
  }

  #[inline]
  pub(crate) const fn comparator(&self) -> &C {
    &self.cmp
  }

  #[inline]
  pub(crate) fn key(&self, ptr: NodePtr) -> &K {
    &self.arena.get(ptr).key
  }

  #[inline]
  pub(crate) fn value(&self, ptr: NodePtr) -> &V {
    &self.arena.get(ptr).value
  }

  #[inline]
  pub(crate) fn value_mut(&mut self, ptr: NodePtr) -> &mut V {
    &mut self.arena.get_mut(ptr).value
  }

  /// Returns the diagnostic per-level view.
  #[inline]
  pub(crate) fn levels(&self) -> Levels<'_, K, V> {
    Levels::new(&self.arena, &self.head, self.height)
  }

  /// Walks the base level in key order.
  #[inline]
  pub(crate) fn entries(&self) -> Lane<'_, K, V> {
    Lane::new(&self.arena, self.head[0], 0)
  }

  /// Returns the link following `prev` at `level`.
  #[inline]
  fn next(&self, prev: Option<NodePtr>, level: usize) -> Link {
    match prev {
      None => self.head[level],
      Some(ptr) => self.arena.get(ptr).tower[level],
    }
  }

  #[inline]
  fn set_next(&mut self, prev: Option<NodePtr>, level: usize, next: Link) {
    match prev {
      None => self.head[level] = next,
      Some(ptr) => self.arena.get_mut(ptr).tower[level] = next,
    }
  }

  /// Removes and returns the entry with the smallest key.
  ///
  /// The first node is linked directly from the header at every level of its
  /// tower, so no descent is needed.
  pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
    let ptr = self.head[0]?;
    let node = self.arena.dealloc(ptr);
    for (level, next) in node.tower.iter().enumerate() {
      self.head[level] = *next;
    }
    self.len -= 1;
    self.coalesce();
    Some(node.into_parts())
  }

  /// Lowers the active height while the top level is empty.
  fn coalesce(&mut self) {
    #[cfg(feature = "tracing")]
    let before = self.height;

    while self.height > 1 && self.head[self.height - 1].is_none() {
      self.height -= 1;
    }

    #[cfg(feature = "tracing")]
    if before != self.height {
      tracing::trace!(from = before, to = self.height, "coalesced skiplist height");
    }
  }

  /// Runs the discard hook on a resident key and drops it.
  #[inline]
  pub(crate) fn discard_key(&mut self, key: K) {
    if let Some(hook) = self.on_discard.as_mut() {
      hook(&key);
    }
  }

  /// Disposes of a value the caller did not take back, according to the
  /// ownership mode.
  #[inline]
  pub(crate) fn discard_value(&self, value: V) {
    match self.opts.ownership() {
      Ownership::Owning => drop(value),
      Ownership::NonOwning => mem::forget(value),
    }
  }

  /// Releases every node, walking the base level from the header.
  ///
  /// Keys go through the discard hook, values are disposed of according to
  /// the ownership mode. The list is empty and usable afterwards, even if the
  /// hook panics: the nodes left behind are then released without the hook.
  pub(crate) fn clear(&mut self) {
    let cursor = self.head[0];
    let mut teardown = Teardown {
      list: self,
      cursor,
      released: 0,
    };
    while let Some((key, value)) = teardown.next() {
      teardown.list.discard_value(value);
      teardown.list.discard_key(key);
    }
  }

  fn reset(&mut self) {
    debug_assert_eq!(self.arena.allocated(), 0);
    self.arena.reset();
    self.head.iter_mut().for_each(|link| *link = None);
    self.len = 0;
    self.height = 1;
  }
}

/// Walks the base level releasing nodes. Dropping it releases whatever is
/// left, skipping the discard hook, and resets the list.
struct Teardown<'a, K, V, C> {
  list: &'a mut SkipList<K, V, C>,
  cursor: Link,
  released: usize,
}

impl<K, V, C> Teardown<'_, K, V, C> {
  fn next(&mut self) -> Option<(K, V)> {
    let ptr = self.cursor?;
    let node = self.list.arena.dealloc(ptr);
    self.cursor = node.tower[0];
    self.released += 1;
    Some(node.into_parts())
  }
}

impl<K, V, C> Drop for Teardown<'_, K, V, C> {
  fn drop(&mut self) {
    while let Some((_, value)) = self.next() {
      self.list.discard_value(value);
    }

    #[cfg(feature = "tracing")]
    if self.released > 0 {
      let released = self.released;
      if self.list.opts.ownership().is_owning() {
        tracing::debug!(released, "released skiplist nodes");
      } else {
        tracing::warn!(
          released,
          "released skiplist nodes, values are left to their owner"
        );
      }
    }

    debug_assert_eq!(self.released, self.list.len);
    self.list.reset();
  }
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
  /// Searches for `key`, stopping at the first level where it is found.
  pub(crate) fn find(&self, key: &K) -> Option<NodePtr> {
    let mut x = None;
    for level in (0..self.height).rev() {
      while let Some(next) = self.next(x, level) {
        match self.cmp.compare(self.key(next), key) {
          core::cmp::Ordering::Less => x = Some(next),
          core::cmp::Ordering::Equal => return Some(next),
          core::cmp::Ordering::Greater => break,
        }
      }
    }
    None
  }

  /// Descends to the base level recording, at every active level, the last
  /// node whose key is less than `key`. Returns the node holding `key`, if any.
  fn find_splice(&self, key: &K, update: &mut Splice) -> Option<NodePtr> {
    let mut x = None;
    for level in (0..self.height).rev() {
      while let Some(next) = self.next(x, level) {
        if self.cmp.compare(self.key(next), key).is_lt() {
          x = Some(next);
        } else {
          break;
        }
      }
      update[level] = x;
    }

    self
      .next(x, 0)
      .filter(|next| self.cmp.compare(self.key(*next), key).is_eq())
  }

  #[inline]
  fn random_height(&mut self) -> Height {
    random_height(&mut self.rng, self.len, self.height, &self.opts)
  }

  /// Links a new node for `key` unless it is already resident.
  pub(crate) fn insert(&mut self, key: K, value: V) -> Insert<V> {
    let mut update: Splice = [None; MAX_HEIGHT];
    if let Some(ptr) = self.find_splice(&key, &mut update) {
      return Insert::Occupied { ptr, value };
    }

    let height = self.random_height();
    let h: usize = height.into();
    if h > self.height {
      // update[self.height..h] is still None, the header.
      #[cfg(feature = "tracing")]
      tracing::trace!(from = self.height, to = h, "raised skiplist height");
      self.height = h;
    }

    let mut node = Node::new(key, value, height);
    for (level, link) in node.tower.iter_mut().enumerate() {
      *link = self.next(update[level], level);
    }
    let ptr = self.arena.alloc(node);
    for (level, prev) in update.iter().enumerate().take(h) {
      self.set_next(*prev, level, Some(ptr));
    }

    self.len += 1;
    Insert::Inserted
  }

  /// Unlinks the node holding `key` and returns its key and value.
  pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
    let mut update: Splice = [None; MAX_HEIGHT];
    let ptr = self.find_splice(key, &mut update)?;

    let node = self.arena.dealloc(ptr);
    for (level, next) in node.tower.iter().enumerate() {
      self.set_next(update[level], level, *next);
    }

    self.len -= 1;
    self.coalesce();
    Some(node.into_parts())
  }
}
