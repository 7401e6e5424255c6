use rand::Rng;

use super::{options::Options, types::Height};

/// Returns the chance, in percent, that a new tower grows by one more level.
///
/// The probability is `max(len, 2) ^ (-1 / height)` clamped to `[low, high]`:
/// small lists are pushed towards taller towers, and as the list grows the
/// chance settles towards the classic fixed-p skiplist.
#[inline]
pub(crate) fn promotion_probability(len: usize, height: usize, low: f64, high: f64) -> u32 {
  let base = len.max(2) as f64;
  let p = base.powf(-1.0 / height.max(1) as f64).clamp(low, high);
  (p * 100.0) as u32
}

/// Draws the height of a new tower for a list currently holding `len`
/// entries with `height` active levels.
#[inline]
pub(crate) fn random_height<R: Rng + ?Sized>(
  rng: &mut R,
  len: usize,
  height: usize,
  opts: &Options,
) -> Height {
  let (low, high) = opts.promotion_bounds();
  let max_height: usize = opts.max_height().into();
  let percent = promotion_probability(len, height, low, high);

  let mut h = 1;
  while h < max_height && rng.random_ratio(percent, 100) {
    h += 1;
  }
  Height::new_unchecked(h)
}

#[cfg(test)]
mod tests {
  use rand::{rngs::SmallRng, SeedableRng};

  use super::*;

  #[test]
  fn test_promotion_probability_is_clamped() {
    // tiny lists with several levels hit the upper bound, 2 ^ (-1/4) = 0.84
    assert_eq!(promotion_probability(0, 4, 0.33, 0.70), 70);
    assert_eq!(promotion_probability(1, 4, 0.33, 0.70), 70);
    assert_eq!(promotion_probability(2, 32, 0.33, 0.70), 70);

    // a large, short list hits the lower bound
    assert_eq!(promotion_probability(1_000_000, 1, 0.33, 0.70), 33);
  }

  #[test]
  fn test_promotion_probability_in_between() {
    // 16 ^ (-1/4) = 0.5
    assert_eq!(promotion_probability(16, 4, 0.33, 0.70), 50);
    // an empty list starts at 2 ^ (-1/1) = 0.5
    assert_eq!(promotion_probability(0, 1, 0.33, 0.70), 50);
    assert_eq!(promotion_probability(1, 1, 0.33, 0.70), 50);
    // 100 ^ (-1/2) = 0.1, clamped
    assert_eq!(promotion_probability(100, 2, 0.33, 0.70), 33);
  }

  #[test]
  fn test_promotion_probability_uses_floor_of_two() {
    assert_eq!(
      promotion_probability(0, 3, 0.1, 0.9),
      promotion_probability(2, 3, 0.1, 0.9)
    );
    assert_eq!(
      promotion_probability(1, 3, 0.1, 0.9),
      promotion_probability(2, 3, 0.1, 0.9)
    );
  }

  #[test]
  fn test_random_height_bounds() {
    let mut rng = SmallRng::seed_from_u64(42);
    let opts = Options::new();
    for len in 0..2000 {
      let h: usize = random_height(&mut rng, len, 1 + len % 32, &opts).into();
      assert!((1..=32).contains(&h));
    }
  }

  #[test]
  fn test_random_height_respects_max_height() {
    let mut rng = SmallRng::seed_from_u64(42);
    let opts = Options::new()
      .with_max_height(Height::try_from(3usize).unwrap())
      .with_promotion_bounds(0.9, 0.95);
    let mut tallest = 0;
    for _ in 0..1000 {
      let h: usize = random_height(&mut rng, 0, 1, &opts).into();
      assert!(h <= 3);
      tallest = tallest.max(h);
    }
    assert_eq!(tallest, 3);
  }

  #[test]
  fn test_random_height_is_deterministic() {
    let opts = Options::new();
    let mut a = SmallRng::seed_from_u64(9);
    let mut b = SmallRng::seed_from_u64(9);
    for len in 0..100 {
      assert_eq!(
        random_height(&mut a, len, 4, &opts),
        random_height(&mut b, len, 4, &opts)
      );
    }
  }
}
