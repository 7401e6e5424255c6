use core::fmt;

use super::{error::Error, MAX_HEIGHT};

/// Height which is used to configure the maximum tower height of a skiplist,
/// and to report the current height of one. It is always within `1..=MAX_HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height(u8);

impl Default for Height {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Height {
  /// The smallest height, a tower with only the base level.
  pub const MIN: Self = Self(1);

  /// The largest height, see [`MAX_HEIGHT`].
  pub const MAX: Self = Self(MAX_HEIGHT as u8);

  /// Returns the default height, which is [`Height::MAX`].
  #[inline]
  pub const fn new() -> Self {
    Self::MAX
  }

  /// Returns the height as a `u8`.
  #[inline]
  pub const fn get(&self) -> u8 {
    self.0
  }

  /// Callers must guarantee `1 <= height <= MAX_HEIGHT`.
  #[inline]
  pub(crate) const fn new_unchecked(height: usize) -> Self {
    debug_assert!(height >= 1 && height <= MAX_HEIGHT);
    Self(height as u8)
  }
}

impl TryFrom<usize> for Height {
  type Error = Error;

  #[inline]
  fn try_from(height: usize) -> Result<Self, Self::Error> {
    if (1..=MAX_HEIGHT).contains(&height) {
      Ok(Self(height as u8))
    } else {
      Err(Error::InvalidHeight(height))
    }
  }
}

impl TryFrom<u8> for Height {
  type Error = Error;

  #[inline]
  fn try_from(height: u8) -> Result<Self, Self::Error> {
    Self::try_from(height as usize)
  }
}

impl TryFrom<u32> for Height {
  type Error = Error;

  #[inline]
  fn try_from(height: u32) -> Result<Self, Self::Error> {
    Self::try_from(height as usize)
  }
}

impl From<Height> for u8 {
  #[inline]
  fn from(height: Height) -> Self {
    height.0
  }
}

impl From<Height> for u32 {
  #[inline]
  fn from(height: Height) -> Self {
    height.0 as u32
  }
}

impl From<Height> for usize {
  #[inline]
  fn from(height: Height) -> Self {
    height.0 as usize
  }
}

impl PartialEq<usize> for Height {
  #[inline]
  fn eq(&self, other: &usize) -> bool {
    self.0 as usize == *other
  }
}

impl fmt::Display for Height {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Who is responsible for the values stored in a [`SkipMap`](crate::SkipMap).
///
/// The mode only matters when the map discards a value on its own: when
/// [`put`](crate::SkipMap::put) overwrites an existing entry, and on
/// [`clear`](crate::SkipMap::clear), [`destroy`](crate::SkipMap::destroy) or drop.
/// Values handed back by `remove`, `pop` and `replace` always move to the caller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
  /// The map owns its values and runs each value's destructor exactly once
  /// when it discards it.
  #[default]
  Owning,
  /// The values are owned elsewhere, the map never runs their destructors.
  /// Discarded values are forgotten, not dropped.
  ///
  /// Only use this mode when `V` is a handle to data the caller keeps alive
  /// and releases itself, such as a reference or an index into storage it
  /// owns. A value which owns resources, like a `String` or a `Box`, leaks
  /// whenever the map discards it: when [`put`](crate::SkipMap::put)
  /// overwrites it, and on `clear`, `destroy` or drop.
  NonOwning,
}

impl Ownership {
  /// Returns `true` if the container runs the destructors of discarded values.
  #[inline]
  pub const fn is_owning(&self) -> bool {
    matches!(self, Self::Owning)
  }
}
