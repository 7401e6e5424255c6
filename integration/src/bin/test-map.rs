use integration::{big_value, key, new_value};
use parking_lot::Mutex;
use sklite::*;
use std::sync::Arc;

fn main() {
  {
    const N: usize = 1000;
    let l = Arc::new(Mutex::new(SkipMap::new()));
    let handles: Vec<_> = (0..N)
      .map(|i| {
        let l = l.clone();
        std::thread::spawn(move || {
          l.lock().put(key(i), new_value(i));
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }

    let handles: Vec<_> = (0..N)
      .map(|i| {
        let l = l.clone();
        std::thread::spawn(move || {
          let k = key(i);
          assert_eq!(l.lock().get(&k), Some(&new_value(i)), "broken: {i}");
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }
  }

  {
    const N2: usize = 100;
    let opts = Options::new().with_capacity(N2);
    let mut l = SkipMap::with_options(opts).unwrap();
    for i in 0..N2 {
      assert!(l.put(key(i), big_value(i)));
    }
    assert_eq!(N2, l.len());
    for i in (0..N2).rev() {
      assert_eq!(l.remove(&key(i)), Some(big_value(i)), "broken: {i}");
    }
    assert!(l.is_empty());
  }
}
