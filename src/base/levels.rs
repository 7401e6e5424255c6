use core::{fmt, iter::FusedIterator};

use crate::{
  arena::Arena,
  node::{Link, NodePtr},
};

/// A diagnostic view of every active level of a skiplist, from the base
/// level (`0`) up to `height - 1`.
///
/// The [`Display`](fmt::Display) output lists the levels top to bottom, one
/// line each, e.g.
///
/// ```text
/// level 1: --> 3 --> nil
/// level 0: --> 1 --> 3 --> 7 --> nil
/// ```
///
/// It is meant for humans, not a stable format.
pub struct Levels<'a, K, V> {
  arena: &'a Arena<K, V>,
  head: &'a [Link],
  height: usize,
}

impl<K, V> Clone for Levels<'_, K, V> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<K, V> Copy for Levels<'_, K, V> {}

impl<'a, K, V> Levels<'a, K, V> {
  #[inline]
  pub(crate) fn new(arena: &'a Arena<K, V>, head: &'a [Link], height: usize) -> Self {
    Self {
      arena,
      head,
      height,
    }
  }

  /// Returns the number of active levels.
  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  /// Returns the keys linked at `level`, in order.
  ///
  /// Levels at or above [`height`](Levels::height) are empty.
  #[inline]
  pub fn level(&self, level: usize) -> impl Iterator<Item = &'a K> + 'a {
    self.level_entries(level).map(|(key, _)| key)
  }

  /// Returns the entries linked at `level`, in key order.
  ///
  /// Levels at or above [`height`](Levels::height) are empty.
  #[inline]
  pub fn level_entries(&self, level: usize) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
    let first = if level < self.height {
      self.head[level]
    } else {
      None
    };
    Lane::new(self.arena, first, level)
  }

  /// Returns a view which prints `(key, value)` pairs instead of keys.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use sklite::{Height, Options, SkipMap};
  ///
  /// let opts = Options::new().with_max_height(Height::MIN);
  /// let mut map = SkipMap::with_options(opts).unwrap();
  /// map.put(2, 'b');
  /// map.put(1, 'a');
  ///
  /// assert_eq!(
  ///   map.levels().with_values().to_string(),
  ///   "level 0: --> (1, 'a') --> (2, 'b') --> nil\n"
  /// );
  /// ```
  #[inline]
  pub fn with_values(self) -> LevelEntries<'a, K, V> {
    LevelEntries(self)
  }

  /// Returns the height of every node on the base level, in key order.
  #[inline]
  pub fn towers(&self) -> impl Iterator<Item = usize> + 'a {
    let arena = self.arena;
    Lane::new(arena, self.head[0], 0).ptrs().map(move |ptr| arena.get(ptr).height())
  }
}

impl<K: fmt::Debug, V> fmt::Display for Levels<'_, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for level in (0..self.height).rev() {
      write!(f, "level {level}: -->")?;
      for key in self.level(level) {
        write!(f, " {key:?} -->")?;
      }
      writeln!(f, " nil")?;
    }
    Ok(())
  }
}

impl<K: fmt::Debug, V> fmt::Debug for Levels<'_, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut list = f.debug_list();
    for level in 0..self.height {
      list.entry(&self.level(level).collect::<Vec<_>>());
    }
    list.finish()
  }
}

/// A diagnostic view of every active level of a skiplist, printing
/// `(key, value)` pairs. Built by [`Levels::with_values`].
///
/// ```text
/// level 1: --> (3, "c") --> nil
/// level 0: --> (1, "a") --> (3, "c") --> nil
/// ```
pub struct LevelEntries<'a, K, V>(Levels<'a, K, V>);

impl<K, V> Clone for LevelEntries<'_, K, V> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<K, V> Copy for LevelEntries<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for LevelEntries<'_, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for level in (0..self.0.height).rev() {
      write!(f, "level {level}: -->")?;
      for (key, value) in self.0.level_entries(level) {
        write!(f, " ({key:?}, {value:?}) -->")?;
      }
      writeln!(f, " nil")?;
    }
    Ok(())
  }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LevelEntries<'_, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut list = f.debug_list();
    for level in 0..self.0.height {
      list.entry(&self.0.level_entries(level).collect::<Vec<_>>());
    }
    list.finish()
  }
}

/// Follows the links of one level.
pub(crate) struct Lane<'a, K, V> {
  arena: &'a Arena<K, V>,
  cursor: Link,
  level: usize,
}

impl<'a, K, V> Lane<'a, K, V> {
  #[inline]
  pub(crate) fn new(arena: &'a Arena<K, V>, first: Link, level: usize) -> Self {
    Self {
      arena,
      cursor: first,
      level,
    }
  }

  #[inline]
  fn ptrs(self) -> impl Iterator<Item = NodePtr> + 'a {
    let arena = self.arena;
    let level = self.level;
    core::iter::successors(self.cursor, move |ptr| arena.get(*ptr).tower[level])
  }
}

impl<'a, K, V> Iterator for Lane<'a, K, V> {
  type Item = (&'a K, &'a V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let ptr = self.cursor?;
    let node = self.arena.get(ptr);
    self.cursor = node.tower[self.level];
    Some((&node.key, &node.value))
  }
}

impl<K, V> FusedIterator for Lane<'_, K, V> {}
