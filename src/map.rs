use core::{fmt, mem};

use super::{
  base::{Insert, Levels, SkipList},
  error::Error,
  options::Options,
  traits::Container,
  types::{Height, Ownership},
  Ascend, Comparator,
};

#[cfg(test)]
mod tests;

/// An ordered map based on a randomized skiplist.
///
/// Keys are kept unique and ordered by the comparator `C`, [`Ascend`] by
/// default. Lookups, inserts and removals take `O(log n)` expected time,
/// [`pop`](SkipMap::pop) takes the entry with the smallest key without a descent.
///
/// ## Value ownership
///
/// The [`Ownership`] mode chosen through [`Options::with_ownership`] decides
/// what happens to values the map discards on its own: the value displaced
/// by [`put`](SkipMap::put), and the values still resident on
/// [`clear`](SkipMap::clear), [`destroy`](SkipMap::destroy) or drop. An
/// [`Owning`](Ownership::Owning) map drops each of them exactly once, a
/// [`NonOwning`](Ownership::NonOwning) map never runs their destructors, so
/// it is meant for values which only refer to data the caller owns.
///
/// Use [`replace`](SkipMap::replace), [`remove`](SkipMap::remove) or
/// [`pop`](SkipMap::pop) to take a value back instead.
///
/// ## Example
///
/// ```rust
/// use sklite::SkipMap;
///
/// let mut map = SkipMap::new();
/// assert!(map.put(1, "one"));
/// assert!(map.put(2, "two"));
/// assert_eq!(map.replace(1, "uno"), Some("one"));
///
/// assert_eq!(map.get(&1), Some(&"uno"));
/// assert!(map.contains(&2));
///
/// assert_eq!(map.pop(), Some((1, "uno")));
/// assert_eq!(map.remove(&2), Some("two"));
/// assert!(map.is_empty());
/// ```
pub struct SkipMap<K, V, C = Ascend>(SkipList<K, V, C>);

impl<K: Ord, V> Default for SkipMap<K, V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K: Ord, V> SkipMap<K, V> {
  /// Creates an empty, owning map with the default [`Options`].
  #[inline]
  pub fn new() -> Self {
    Self::with_comparator(Ascend)
  }

  /// Creates an empty map with the given [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use sklite::{Options, Ownership, SkipMap};
  ///
  /// let opts = Options::new().with_ownership(Ownership::NonOwning);
  /// let map = SkipMap::<u32, &str>::with_options(opts).unwrap();
  /// assert_eq!(map.ownership(), Ownership::NonOwning);
  /// ```
  #[inline]
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    Self::with_options_and_comparator(opts, Ascend)
  }
}

impl<K, V, C> SkipMap<K, V, C> {
  /// Like [`SkipMap::new`], but with a custom [`Comparator`].
  #[inline]
  pub fn with_comparator(cmp: C) -> Self {
    Self(SkipList::new_in(Options::new(), cmp))
  }

  /// Like [`SkipMap::new`], but with [`Options`] and a custom [`Comparator`].
  pub fn with_options_and_comparator(opts: Options, cmp: C) -> Result<Self, Error> {
    opts.validate()?;
    Ok(Self(SkipList::new_in(opts, cmp)))
  }

  /// Installs a hook which is called with every key the map destroys, that
  /// is keys removed by [`remove`](SkipMap::remove) and keys released by
  /// [`clear`](SkipMap::clear), [`destroy`](SkipMap::destroy) or drop.
  ///
  /// Keys handed back by [`pop`](SkipMap::pop) do not go through the hook.
  #[inline]
  pub fn with_discard_hook<F>(mut self, hook: F) -> Self
  where
    F: FnMut(&K) + Send + 'static,
  {
    self.0.set_discard_hook(Box::new(hook));
    self
  }

  /// Returns the number of entries in the map.
  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` if the map holds no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the number of active levels.
  #[inline]
  pub fn height(&self) -> Height {
    self.0.height()
  }

  /// Returns the value ownership mode.
  #[inline]
  pub const fn ownership(&self) -> Ownership {
    self.0.options().ownership()
  }

  /// Returns the options the map was built with.
  #[inline]
  pub const fn options(&self) -> &Options {
    self.0.options()
  }

  /// Returns the comparator used to order keys.
  #[inline]
  pub const fn comparator(&self) -> &C {
    self.0.comparator()
  }

  /// Removes and returns the entry with the smallest key, or `None` if the
  /// map is empty.
  #[inline]
  pub fn pop(&mut self) -> Option<(K, V)> {
    self.0.pop_first()
  }

  /// Removes every entry, disposing of the values according to the
  /// ownership mode. The map stays usable.
  #[inline]
  pub fn clear(&mut self) {
    self.0.clear();
  }

  /// Releases every node and the map itself, disposing of the values
  /// according to the ownership mode.
  ///
  /// This is what dropping the map does, spelled out.
  #[inline]
  pub fn destroy(self) {
    drop(self);
  }

  /// Returns a diagnostic view of the keys linked at every level.
  #[inline]
  pub fn levels(&self) -> Levels<'_, K, V> {
    self.0.levels()
  }
}

impl<K, V, C: Comparator<K>> SkipMap<K, V, C> {
  /// Associates `value` with `key`, inserting the key if it is absent.
  ///
  /// Returns `true` once `key` holds `value`, whether the entry was inserted
  /// or updated. An updated entry's previous value is disposed of according
  /// to the ownership mode: an owning map drops it, a non-owning map forgets
  /// it. Use [`replace`](SkipMap::replace) to get it back instead.
  #[inline]
  pub fn put(&mut self, key: K, value: V) -> bool {
    if let Some(old) = self.replace(key, value) {
      self.0.discard_value(old);
    }
    true
  }

  /// Associates `value` with `key` and returns the value it displaced.
  ///
  /// Returns `None` if the key was absent and has been inserted. When the key
  /// is already present the stored key is kept, only the value is swapped.
  pub fn replace(&mut self, key: K, value: V) -> Option<V> {
    match self.0.insert(key, value) {
      Insert::Inserted => None,
      Insert::Occupied { ptr, value } => Some(mem::replace(self.0.value_mut(ptr), value)),
    }
  }

  /// Returns a reference to the value of `key`.
  #[inline]
  pub fn get(&self, key: &K) -> Option<&V> {
    self.0.find(key).map(|ptr| self.0.value(ptr))
  }

  /// Returns a mutable reference to the value of `key`.
  #[inline]
  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
    let ptr = self.0.find(key)?;
    Some(self.0.value_mut(ptr))
  }

  /// Returns `true` if the map contains `key`.
  #[inline]
  pub fn contains(&self, key: &K) -> bool {
    self.0.find(key).is_some()
  }

  /// Removes `key` and hands its value back to the caller.
  ///
  /// Returns `None` if the key was not present.
  #[inline]
  pub fn remove(&mut self, key: &K) -> Option<V> {
    let (key, value) = self.0.remove(key)?;
    self.0.discard_key(key);
    Some(value)
  }
}

impl<K, V, C> Container for SkipMap<K, V, C> {
  #[inline]
  fn size(&self) -> usize {
    self.len()
  }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SkipMap<K, V, C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.0.entries()).finish()
  }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for SkipMap<K, V, C> {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.put(key, value);
    }
  }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = Self::new();
    map.extend(iter);
    map
  }
}
