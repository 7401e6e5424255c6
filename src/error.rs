/// Error type for the sklite crate.
///
/// Lookups of missing keys, duplicate inserts and pops from an empty
/// container are ordinary outcomes reported through `bool`/`Option`, so the
/// only fallible surface is configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
  /// Indicates that a tower height is outside of `1..=MAX_HEIGHT`.
  InvalidHeight(usize),

  /// Indicates that the promotion probability bounds do not satisfy
  /// `0 < low <= high < 1`.
  InvalidPromotionBounds {
    /// The requested lower bound.
    low: f64,
    /// The requested upper bound.
    high: f64,
  },
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::InvalidHeight(height) => write!(
        f,
        "height {height} is out of range, expected 1..={}",
        crate::MAX_HEIGHT
      ),
      Self::InvalidPromotionBounds { low, high } => write!(
        f,
        "promotion bounds [{low}, {high}] are invalid, expected 0 < low <= high < 1"
      ),
    }
  }
}

impl std::error::Error for Error {}
