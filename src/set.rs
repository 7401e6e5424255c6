use core::fmt;

use super::{
  base::{Insert, Levels, SkipList},
  error::Error,
  options::Options,
  traits::Container,
  types::Height,
  Ascend, Comparator,
};


/// An ordered set based on a randomized skiplist.
///
/// Keys are kept unique and ordered by the comparator `C`, [`Ascend`] by
/// default. Lookups, inserts and removals take `O(log n)` expected time,
/// [`pop`](SkipSet::pop) takes the smallest key without a descent.
///
/// The set is single-threaded: it is [`Send`] when its key and comparator
/// are, but every mutation needs `&mut self`, so sharing it across threads
/// needs an external lock.
///
/// ## Example
///
/// ```rust
/// use sklite::SkipSet;
///
/// let mut set = SkipSet::new();
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
///
/// assert!(set.contains(&1));
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.pop(), Some(1));
/// assert!(set.remove(&3));
/// assert!(set.is_empty());
/// ```
pub struct SkipSet<K, C = Ascend>(SkipList<K, (), C>);

impl<K: Ord> Default for SkipSet<K> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K: Ord> SkipSet<K> {
  /// Creates an empty set with the default [`Options`].
  #[inline]
  pub fn new() -> Self {
    Self::with_comparator(Ascend)
  }

  /// Creates an empty set with the given [`Options`].
  #[inline]
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    Self::with_options_and_comparator(opts, Ascend)
  }
}

impl<K, C> SkipSet<K, C> {
  /// Like [`SkipSet::new`], but with a custom [`Comparator`].
  #[inline]
  pub fn with_comparator(cmp: C) -> Self {
    Self(SkipList::new_in(Options::new(), cmp))
  }

  /// Like [`SkipSet::new`], but with [`Options`] and a custom [`Comparator`].
  pub fn with_options_and_comparator(opts: Options, cmp: C) -> Result<Self, Error> {
    opts.validate()?;
    Ok(Self(SkipList::new_in(opts, cmp)))
  }

  /// Installs a hook which is called with every key the set destroys, that
  /// is keys removed by [`remove`](SkipSet::remove) and keys released by
  /// [`clear`](SkipSet::clear), [`destroy`](SkipSet::destroy) or drop.
  ///
  /// Keys handed back by [`pop`](SkipSet::pop) do not go through the hook.
  #[inline]
  pub fn with_discard_hook<F>(mut self, hook: F) -> Self
  where
    F: FnMut(&K) + Send + 'static,
  {
    self.0.set_discard_hook(Box::new(hook));
    self
  }

  /// Returns the number of keys in the set.
  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` if the set holds no keys.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the number of active levels.
  #[inline]
  pub fn height(&self) -> Height {
    self.0.height()
  }

  /// Returns the options the set was built with.
  #[inline]
  pub const fn options(&self) -> &Options {
    self.0.options()
  }

  /// Returns the comparator used to order keys.
  #[inline]
  pub const fn comparator(&self) -> &C {
    self.0.comparator()
  }

  /// Removes and returns the smallest key, or `None` if the set is empty.
  #[inline]
  pub fn pop(&mut self) -> Option<K> {
    self.0.pop_first().map(|(key, ())| key)
  }

  /// Removes every key. The set stays usable.
  #[inline]
  pub fn clear(&mut self) {
    self.0.clear();
  }

  /// Releases every node and the set itself.
  ///
  /// This is what dropping the set does, spelled out.
  #[inline]
  pub fn destroy(self) {
    drop(self);
  }

  /// Returns a diagnostic view of the keys linked at every level.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use sklite::SkipSet;
  ///
  /// let mut set = SkipSet::new();
  /// set.insert(2);
  /// set.insert(1);
  ///
  /// let levels = set.levels();
  /// assert_eq!(levels.level(0).copied().collect::<Vec<_>>(), [1, 2]);
  /// println!("{levels}");
  /// ```
  #[inline]
  pub fn levels(&self) -> Levels<'_, K, ()> {
    self.0.levels()
  }
}

impl<K, C: Comparator<K>> SkipSet<K, C> {
  /// Inserts a key.
  ///
  /// Returns `false`, leaving the set unchanged, if the key is already present.
  #[inline]
  pub fn insert(&mut self, key: K) -> bool {
    matches!(self.0.insert(key, ()), Insert::Inserted)
  }

  /// Returns `true` if the set contains the key.
  #[inline]
  pub fn contains(&self, key: &K) -> bool {
    self.0.find(key).is_some()
  }

  /// Removes a key.
  ///
  /// Returns `false` if the key was not present.
  #[inline]
  pub fn remove(&mut self, key: &K) -> bool {
    match self.0.remove(key) {
      Some((key, ())) => {
        self.0.discard_key(key);
        true
      }
      None => false,
    }
  }
}

impl<K, C> Container for SkipSet<K, C> {
  #[inline]
  fn size(&self) -> usize {
    self.len()
  }
}

impl<K: fmt::Debug, C> fmt::Debug for SkipSet<K, C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.0.entries().map(|(key, _)| key)).finish()
  }
}

impl<K, C: Comparator<K>> Extend<K> for SkipSet<K, C> {
  fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
    for key in iter {
      self.insert(key);
    }
  }
}

impl<K: Ord> FromIterator<K> for SkipSet<K> {
  fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
    let mut set = Self::new();
    set.extend(iter);
    set
  }
}
