use super::types::Height;

/// A forward link of a tower, `None` marks the end of a level.
pub(crate) type Link = Option<NodePtr>;

/// The offset of a node in the [`Arena`](crate::arena::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodePtr(pub(crate) usize);

#[derive(Debug)]
pub(crate) struct Node<K, V> {
  pub(crate) key: K,
  pub(crate) value: V,
  // Sized exactly once from the drawn height, never resized.
  pub(crate) tower: Box<[Link]>,
}

impl<K, V> Node<K, V> {
  #[inline]
  pub(crate) fn new(key: K, value: V, height: Height) -> Self {
    Self {
      key,
      value,
      tower: vec![None; height.into()].into_boxed_slice(),
    }
  }

  #[inline]
  pub(crate) fn height(&self) -> usize {
    self.tower.len()
  }

  #[inline]
  pub(crate) fn into_parts(self) -> (K, V) {
    (self.key, self.value)
  }
}
