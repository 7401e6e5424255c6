#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::type_complexity, rustdoc::bare_urls)]

use core::cmp;

mod arena;
mod base;
mod node;
mod utils;

mod error;
pub use error::Error;

mod options;
pub use options::Options;

mod types;
pub use types::{Height, Ownership};

mod traits;
pub use traits::Container;

/// A set implementation based on skiplist
pub mod set;
pub use set::SkipSet;

/// A map implementation based on skiplist
pub mod map;
pub use map::SkipMap;

pub use base::{LevelEntries, Levels};

/// The hard ceiling of a tower, the header always carries this many links
/// unless [`Options::with_max_height`] lowers it.
pub const MAX_HEIGHT: usize = 32;

/// Comparator is used to define the ordering of the keys stored in a skiplist.
///
/// The skiplist relies on the comparator being a total order: two keys
/// comparing [`Equal`](cmp::Ordering::Equal) are the same key.
pub trait Comparator<K: ?Sized> {
  /// Compares two keys.
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering;
}

impl<K: ?Sized, C: Comparator<K> + ?Sized> Comparator<K> for &C {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    (**self).compare(a, b)
  }
}

/// Ascend is a comparator that orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ascend;

impl<K: Ord + ?Sized> Comparator<K> for Ascend {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    a.cmp(b)
  }
}

/// Descend is a comparator that orders keys in reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Descend;

impl<K: Ord + ?Sized> Comparator<K> for Descend {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    b.cmp(a)
  }
}
