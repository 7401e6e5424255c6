use std::{
  cell::{Cell, RefCell},
  panic::{self, AssertUnwindSafe},
  rc::Rc,
};

use super::*;
use crate::Descend;

fn seeded<K: Ord, V>(seed: u64) -> SkipMap<K, V> {
  SkipMap::with_options(Options::new().with_seed(seed)).unwrap()
}

/// A value which records its id in a shared log when it is dropped.
#[derive(Debug)]
struct Tracked {
  id: usize,
  log: Rc<RefCell<Vec<usize>>>,
}

impl Drop for Tracked {
  fn drop(&mut self) {
    self.log.borrow_mut().push(self.id);
  }
}

/// Hands out tracked values with unique ids.
#[derive(Default)]
struct Tracker {
  next: Cell<usize>,
  log: Rc<RefCell<Vec<usize>>>,
}

impl Tracker {
  fn value(&self) -> Tracked {
    let id = self.next.get();
    self.next.set(id + 1);
    Tracked {
      id,
      log: self.log.clone(),
    }
  }

  fn created(&self) -> usize {
    self.next.get()
  }

  fn dropped(&self) -> Vec<usize> {
    let mut log = self.log.borrow().clone();
    log.sort_unstable();
    log
  }
}

#[test]
fn test_put_overwrite_remove() {
  let mut map = seeded(0);
  for i in 0..10 {
    assert!(map.put(i, i * 10));
  }
  assert_eq!(map.len(), 10);
  for i in 0..10 {
    assert!(map.put(i, i * 20));
  }
  assert_eq!(map.len(), 10);
  for i in 0..10 {
    assert_eq!(map.get(&i), Some(&(i * 20)));
  }

  for i in (0..10).filter(|i| i % 2 == 0) {
    assert_eq!(map.remove(&i), Some(i * 20));
  }
  assert_eq!(map.len(), 5);
  for i in 0..10 {
    if i % 2 == 0 {
      assert!(!map.contains(&i));
      assert_eq!(map.get(&i), None);
    } else {
      assert_eq!(map.get(&i), Some(&(i * 20)));
    }
  }
}

#[test]
fn test_replace_returns_old_value() {
  let mut map = seeded(1);
  assert_eq!(map.replace("a", 1), None);
  assert_eq!(map.replace("a", 2), Some(1));
  assert_eq!(map.replace("a", 3), Some(2));
  assert_eq!(map.len(), 1);
  assert_eq!(map.get(&"a"), Some(&3));
}

#[test]
fn test_get_mut() {
  let mut map = seeded(2);
  map.put(String::from("k"), vec![1]);
  map.get_mut(&String::from("k")).unwrap().push(2);
  assert_eq!(map.get(&String::from("k")), Some(&vec![1, 2]));
  assert!(map.get_mut(&String::from("missing")).is_none());
}

#[test]
fn test_pop_yields_pairs_in_order() {
  let mut map = seeded(3);
  for i in [4u32, 2, 0, 3, 1] {
    map.put(i, format!("v{i}"));
  }
  for i in 0..5u32 {
    assert_eq!(map.pop(), Some((i, format!("v{i}"))));
  }
  assert!(map.is_empty());
  assert_eq!(map.pop(), None);
  assert_eq!(map.height(), Height::MIN);
}

#[test]
fn test_remove_missing() {
  let mut map: SkipMap<u32, u32> = seeded(4);
  assert_eq!(map.remove(&1), None);
  map.put(1, 1);
  assert_eq!(map.remove(&2), None);
  assert_eq!(map.remove(&1), Some(1));
  assert_eq!(map.remove(&1), None);
}

#[test]
fn test_owning_destroy_drops_every_value_once() {
  let tracker = Tracker::default();
  let mut map = seeded(5);
  for i in 0..100u32 {
    map.put(i, tracker.value());
  }

  // overwritten values are dropped by the map
  for i in (0..100u32).step_by(10) {
    assert!(map.put(i, tracker.value()));
  }
  assert_eq!(tracker.dropped().len(), 10);

  // removed and popped values belong to the caller
  let removed = map.remove(&55).unwrap();
  let (_, popped) = map.pop().unwrap();
  assert_eq!(tracker.dropped().len(), 10);
  drop((removed, popped));
  assert_eq!(tracker.dropped().len(), 12);

  map.destroy();
  assert_eq!(
    tracker.dropped(),
    (0..tracker.created()).collect::<Vec<_>>()
  );
}

#[test]
fn test_owning_drop_and_clear() {
  let tracker = Tracker::default();
  {
    let mut map = seeded(6);
    for i in 0..20u32 {
      map.put(i, tracker.value());
    }
    map.clear();
    assert_eq!(tracker.dropped().len(), 20);
    for i in 0..5u32 {
      map.put(i, tracker.value());
    }
  }
  assert_eq!(
    tracker.dropped(),
    (0..tracker.created()).collect::<Vec<_>>()
  );
}

#[test]
fn test_non_owning_never_drops_values() {
  let tracker = Tracker::default();
  let opts = Options::new()
    .with_seed(7)
    .with_ownership(Ownership::NonOwning);
  let mut map = SkipMap::with_options(opts).unwrap();
  assert_eq!(map.ownership(), Ownership::NonOwning);
  for i in 0..10u32 {
    map.put(i, tracker.value());
  }
  // displaced by put, left to its owner
  map.put(0, tracker.value());
  assert!(tracker.dropped().is_empty());

  // handed back values are ordinary owned values
  let removed = map.remove(&1).unwrap();
  assert_eq!(removed.id, 1);
  drop(removed);
  assert_eq!(tracker.dropped(), [1]);

  map.destroy();
  assert_eq!(tracker.dropped(), [1]);
}

#[test]
fn test_discard_hook() {
  let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
  let sink = seen.clone();
  let mut map = seeded::<u32, u32>(8).with_discard_hook(move |k| sink.lock().unwrap().push(*k));
  map.extend((0..5).map(|i| (i, i)));

  assert_eq!(map.remove(&2), Some(2));
  assert_eq!(map.pop(), Some((0, 0)));
  assert!(map.put(1, 10));
  map.clear();

  assert_eq!(*seen.lock().unwrap(), [2, 1, 3, 4]);
}

#[test]
fn test_descend() {
  let mut map = SkipMap::with_comparator(Descend);
  map.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
  assert_eq!(format!("{map:?}"), "{3: 'c', 2: 'b', 1: 'a'}");
  assert_eq!(map.pop(), Some((3, 'c')));
}

#[test]
fn test_container_and_from_iter() {
  let map: SkipMap<u8, u8> = (0..4).map(|i| (i, i)).collect();
  assert_eq!(Container::size(&map), 4);
  assert_eq!(Some(&map).size(), 4);
  let absent: Option<&SkipMap<u8, u8>> = None;
  assert!(Container::is_empty(&absent));
}

#[test]
fn test_levels() {
  let mut map = seeded(9);
  for i in 0..200u32 {
    map.put(i, ());
  }
  let levels = map.levels();
  assert_eq!(levels.height(), usize::from(map.height()));
  assert_eq!(levels.level(0).count(), 200);
  assert!(levels.towers().all(|h| h <= levels.height()));
}

#[test]
fn test_non_owning_map_of_borrowed_values() {
  let tracker = Tracker::default();
  let values: Vec<Tracked> = (0..6).map(|_| tracker.value()).collect();
  let opts = Options::new()
    .with_seed(10)
    .with_ownership(Ownership::NonOwning);
  let mut map = SkipMap::with_options(opts).unwrap();
  for (i, value) in values.iter().enumerate() {
    assert!(map.put(i, value));
  }
  assert!(map.put(0, &values[5]));
  assert_eq!(map.get(&0).map(|v| v.id), Some(5));
  map.destroy();
  assert!(tracker.dropped().is_empty());

  drop(values);
  assert_eq!(tracker.dropped(), (0..6).collect::<Vec<_>>());
}

fn hook_failing_on_three(key: &u32) {
  if *key == 3 {
    panic!("cannot release key {key}");
  }
}

#[test]
fn test_panicking_hook_leaves_non_owning_values_alone() {
  let tracker = Tracker::default();
  let opts = Options::new()
    .with_seed(11)
    .with_ownership(Ownership::NonOwning);
  let mut map = SkipMap::with_options(opts)
    .unwrap()
    .with_discard_hook(hook_failing_on_three);
  for i in 0..8u32 {
    map.put(i, tracker.value());
  }

  assert!(panic::catch_unwind(AssertUnwindSafe(|| map.clear())).is_err());
  assert!(tracker.dropped().is_empty());
  assert!(map.is_empty());
  assert_eq!(map.height(), Height::MIN);

  assert!(map.put(9, tracker.value()));
  assert_eq!(map.len(), 1);
  assert!(map.contains(&9));
}

#[test]
fn test_panicking_hook_still_drops_owned_values_once() {
  let tracker = Tracker::default();
  let mut map = seeded(12).with_discard_hook(hook_failing_on_three);
  for i in 0..8u32 {
    map.put(i, tracker.value());
  }

  assert!(panic::catch_unwind(AssertUnwindSafe(|| map.clear())).is_err());
  assert_eq!(tracker.dropped(), (0..8).collect::<Vec<_>>());
  assert!(map.is_empty());
  map.destroy();
  assert_eq!(tracker.dropped().len(), 8);
}

#[test]
fn test_levels_with_values() {
  let opts = Options::new().with_seed(13).with_max_height(Height::MIN);
  let mut map = SkipMap::with_options(opts).unwrap();
  map.extend([(2, "b"), (1, "a")]);
  let levels = map.levels();
  assert_eq!(
    levels.with_values().to_string(),
    "level 0: --> (1, \"a\") --> (2, \"b\") --> nil\n"
  );
  assert_eq!(
    format!("{:?}", levels.with_values()),
    "[[(1, \"a\"), (2, \"b\")]]"
  );
  assert_eq!(levels.level_entries(1).count(), 0);

  let mut map = seeded(14);
  for i in 0..100u32 {
    map.put(i, i * 2);
  }
  let levels = map.levels();
  let printed = levels.with_values().to_string();
  assert_eq!(printed.lines().count(), levels.height());
  for level in 0..levels.height() {
    let keys: Vec<u32> = levels.level(level).copied().collect();
    let entries: Vec<(u32, u32)> = levels
      .level_entries(level)
      .map(|(k, v)| (*k, *v))
      .collect();
    assert_eq!(entries.len(), keys.len());
    for ((k, v), key) in entries.into_iter().zip(keys) {
      assert_eq!(k, key);
      assert_eq!(v, k * 2);
    }
  }
}

fn pop_pairs_in_order<T: From<u8> + Ord + Copy + fmt::Debug>() {
  let mut map = SkipMap::<T, u8>::new();
  for i in (0..10u8).rev() {
    assert!(map.put(T::from(i), i));
  }
  for i in 0..10u8 {
    assert_eq!(map.pop(), Some((T::from(i), i)));
  }
  assert_eq!(map.pop(), None);
}

macro_rules! width_tests {
  ($($ty:ident),+ $(,)?) => {
    $(
      paste::paste! {
        #[test]
        fn [< test_pop_pairs_in_order_ $ty >]() {
          pop_pairs_in_order::<$ty>();
        }
      }
    )+
  };
}

width_tests!(i32, u32, i64, u64);
