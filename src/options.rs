use super::{
  error::Error,
  types::{Height, Ownership},
};

/// The default lower bound of the promotion probability.
pub(crate) const DEFAULT_PROMOTION_LOW: f64 = 0.33;
/// The default upper bound of the promotion probability.
pub(crate) const DEFAULT_PROMOTION_HIGH: f64 = 0.70;

/// Options for [`SkipSet`](crate::SkipSet) and [`SkipMap`](crate::SkipMap).
#[viewit::viewit(vis_all = "pub(crate)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
  max_height: Height,
  promotion_low: f64,
  promotion_high: f64,
  ownership: Ownership,
  seed: Option<u64>,
  capacity: Option<usize>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_height: Height::new(),
      promotion_low: DEFAULT_PROMOTION_LOW,
      promotion_high: DEFAULT_PROMOTION_HIGH,
      ownership: Ownership::Owning,
      seed: None,
      capacity: None,
    }
  }

  /// Set the maximum height of the towers, which is also the height of the header.
  ///
  /// The default max height is `32`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use sklite::{Height, Options};
  ///
  /// let height = Height::try_from(8usize).unwrap();
  /// let opts = Options::new().with_max_height(height);
  /// assert_eq!(opts.max_height(), height);
  /// ```
  #[inline]
  pub const fn with_max_height(mut self, max_height: Height) -> Self {
    self.max_height = max_height;
    self
  }

  /// Set the bounds the adaptive promotion probability is clamped to.
  ///
  /// The bounds must satisfy `0 < low <= high < 1`, otherwise building a
  /// container with these options fails with [`Error::InvalidPromotionBounds`].
  ///
  /// The default bounds are `0.33` and `0.70`.
  #[inline]
  pub const fn with_promotion_bounds(mut self, low: f64, high: f64) -> Self {
    self.promotion_low = low;
    self.promotion_high = high;
    self
  }

  /// Set the value ownership mode.
  ///
  /// The default is [`Ownership::Owning`].
  #[inline]
  pub const fn with_ownership(mut self, ownership: Ownership) -> Self {
    self.ownership = ownership;
    self
  }

  /// Seed the random number generator used to draw tower heights.
  ///
  /// Containers built from the same seed and fed the same operations end up
  /// with identical level layouts. By default the generator is seeded from
  /// the operating system.
  #[inline]
  pub const fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  /// Reserve room for `capacity` nodes up front.
  ///
  /// **Note:** this is only a hint, the container grows past it on demand.
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = Some(capacity);
    self
  }

  /// Returns the maximum height of the towers.
  #[inline]
  pub const fn max_height(&self) -> Height {
    self.max_height
  }

  /// Returns the `(low, high)` bounds of the promotion probability.
  #[inline]
  pub const fn promotion_bounds(&self) -> (f64, f64) {
    (self.promotion_low, self.promotion_high)
  }

  /// Returns the value ownership mode.
  #[inline]
  pub const fn ownership(&self) -> Ownership {
    self.ownership
  }

  /// Returns the seed of the random number generator, if any.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }

  /// Returns the number of nodes reserved up front, if any.
  #[inline]
  pub const fn capacity(&self) -> Option<usize> {
    self.capacity
  }

  /// Checks that the options describe a usable skiplist.
  pub fn validate(&self) -> Result<(), Error> {
    let (low, high) = self.promotion_bounds();
    // NaN fails every comparison.
    if !(low > 0.0 && low <= high && high < 1.0) {
      #[cfg(feature = "tracing")]
      tracing::warn!(low, high, "rejecting promotion bounds");
      return Err(Error::InvalidPromotionBounds { low, high });
    }
    Ok(())
  }
}
