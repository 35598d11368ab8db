/// Sentinel for a key that currently has no position in the heap.
const ABSENT: usize = usize::MAX;

/// Indexed binary max-heap keyed by `f64` score, with O(log n) `increase` and `remove` by
/// key via a reverse position index. Used to drive VSIDS/MiniSat variable selection.
#[derive(Debug, Default)]
pub struct IndexedMaxHeap {
  /// `(score, key)` pairs in heap order.
  heap: Vec<(f64, usize)>,
  /// `pos[key]` is this key's index into `heap`, or `ABSENT` if not present.
  pos: Vec<usize>,
}

impl IndexedMaxHeap {
  /// Builds a heap over `0..scores.len()` keys, including only those in `present`.
  pub fn from_scores(scores: &[f64], present: impl Fn(usize) -> bool) -> Self {
    let mut heap = Vec::new();
    let mut pos = vec![ABSENT; scores.len()];
    for (key, &score) in scores.iter().enumerate() {
      if present(key) {
        pos[key] = heap.len();
        heap.push((score, key));
      }
    }
    let mut h = IndexedMaxHeap { heap, pos };
    for i in (0..h.heap.len() / 2).rev() {
      h.sift_down(i);
    }
    h
  }

  pub fn is_empty(&self) -> bool { self.heap.is_empty() }

  pub fn contains(&self, key: usize) -> bool { self.pos.get(key).copied().unwrap_or(ABSENT) != ABSENT }

  /// Removes and returns the key with the greatest score.
  pub fn extract_max(&mut self) -> Option<usize> {
    if self.heap.is_empty() {
      return None;
    }
    let (_, top_key) = self.heap[0];
    let last = self.heap.len() - 1;
    self.swap(0, last);
    self.heap.pop();
    self.pos[top_key] = ABSENT;
    if !self.heap.is_empty() {
      self.sift_down(0);
    }
    Some(top_key)
  }

  /// Raises `key`'s score by `delta` (delta is expected to be non-negative) and restores
  /// the heap property by sifting up.
  pub fn increase(&mut self, key: usize, delta: f64) {
    let Some(&i) = self.pos.get(key).filter(|&&i| i != ABSENT) else { return };
    self.heap[i].0 += delta;
    self.sift_up(i);
  }

  /// Removes `key` from the heap if present.
  pub fn remove(&mut self, key: usize) {
    let Some(&i) = self.pos.get(key).filter(|&&i| i != ABSENT) else { return };
    let last = self.heap.len() - 1;
    if i != last {
      self.swap(i, last);
      self.heap.pop();
      self.pos[key] = ABSENT;
      if i < self.heap.len() {
        self.sift_down(i);
        self.sift_up(i);
      }
    } else {
      self.heap.pop();
      self.pos[key] = ABSENT;
    }
  }

  /// Inserts `key` with score 0.0, growing the position index if needed.
  pub fn add(&mut self, key: usize) {
    if key >= self.pos.len() {
      self.pos.resize(key + 1, ABSENT);
    }
    if self.pos[key] != ABSENT {
      return;
    }
    let i = self.heap.len();
    self.heap.push((0.0, key));
    self.pos[key] = i;
    self.sift_up(i);
  }

  fn swap(&mut self, i: usize, j: usize) {
    self.heap.swap(i, j);
    self.pos[self.heap[i].1] = i;
    self.pos[self.heap[j].1] = j;
  }

  fn sift_up(&mut self, mut i: usize) {
    while i > 0 {
      let parent = (i - 1) / 2;
      if self.heap[parent].0 >= self.heap[i].0 {
        break;
      }
      self.swap(parent, i);
      i = parent;
    }
  }

  fn sift_down(&mut self, mut i: usize) {
    loop {
      let (left, right) = (2 * i + 1, 2 * i + 2);
      let mut largest = i;
      if left < self.heap.len() && self.heap[left].0 > self.heap[largest].0 {
        largest = left;
      }
      if right < self.heap.len() && self.heap[right].0 > self.heap[largest].0 {
        largest = right;
      }
      if largest == i {
        break;
      }
      self.swap(i, largest);
      i = largest;
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn extracts_in_descending_score_order() {
    let scores = vec![3.0, 1.0, 4.0, 1.0, 5.0];
    let mut heap = IndexedMaxHeap::from_scores(&scores, |_| true);
    let mut out = Vec::new();
    while let Some(k) = heap.extract_max() {
      out.push(k);
    }
    assert_eq!(out, vec![4, 2, 0, 1, 3]);
    assert!(heap.is_empty());
  }

  #[test]
  fn remove_clears_position_so_key_is_reusable() {
    let scores = vec![1.0, 2.0, 3.0];
    let mut heap = IndexedMaxHeap::from_scores(&scores, |_| true);
    heap.remove(1);
    assert!(!heap.contains(1));
    heap.add(1);
    assert!(heap.contains(1));
    heap.increase(1, 10.0);
    assert_eq!(heap.extract_max(), Some(1));
  }

  #[test]
  fn increase_promotes_key_to_top() {
    let scores = vec![1.0, 1.0, 1.0];
    let mut heap = IndexedMaxHeap::from_scores(&scores, |_| true);
    heap.increase(2, 5.0);
    assert_eq!(heap.extract_max(), Some(2));
  }
}
