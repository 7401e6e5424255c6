/// The size queries shared by every container in this crate.
///
/// The trait is also implemented for [`Option`], so an absent container can be
/// queried directly: it has a size of `0` and is empty.
///
/// ## Example
///
/// ```rust
/// use sklite::{Container, SkipSet};
///
/// let mut set = SkipSet::new();
/// set.insert(1u32);
/// assert_eq!(Container::size(&Some(&set)), 1);
///
/// let absent: Option<&SkipSet<u32>> = None;
/// assert_eq!(absent.size(), 0);
/// assert!(Container::is_empty(&absent));
/// ```
pub trait Container {
  /// Returns the number of entries in the container.
  fn size(&self) -> usize;

  /// Returns `true` if the container holds no entries.
  #[inline]
  fn is_empty(&self) -> bool {
    self.size() == 0
  }
}

impl<T: Container + ?Sized> Container for &T {
  #[inline]
  fn size(&self) -> usize {
    (**self).size()
  }
}

impl<T: Container + ?Sized> Container for &mut T {
  #[inline]
  fn size(&self) -> usize {
    (**self).size()
  }
}

impl<T: Container> Container for Option<T> {
  #[inline]
  fn size(&self) -> usize {
    self.as_ref().map_or(0, |container| container.size())
  }
}
