use integration::key;
use parking_lot::Mutex;
use sklite::*;
use std::sync::Arc;

fn main() {
  const N: usize = 1000;
  let l = Arc::new(Mutex::new(SkipSet::new()));
  let handles: Vec<_> = (0..N)
    .map(|i| {
      let l = l.clone();
      std::thread::spawn(move || {
        assert!(l.lock().insert(key(i)));
      })
    })
    .collect();
  for h in handles {
    h.join().unwrap();
  }

  let mut l = Arc::try_unwrap(l).unwrap().into_inner();
  assert_eq!(N, l.len());
  for i in 0..N {
    assert!(l.contains(&key(i)), "broken: {i}");
  }
  for i in 0..N {
    assert_eq!(l.pop(), Some(key(i)), "broken: {i}");
  }
  assert!(l.is_empty());
  assert_eq!(l.height(), Height::MIN);
}
