/// Generator for the Luby restart sequence: 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ...
///
/// Memoizes every term it has produced so far rather than recomputing each one from its
/// index, matching the incremental style of the reference restart scheduler.
#[derive(Debug, Default)]
pub struct LubyGenerator {
  terms: Vec<u64>,
  mult: u64,
  minu: usize,
}

fn is_power_of_two(n: usize) -> bool { n != 0 && (n & (n - 1)) == 0 }

impl LubyGenerator {
  pub fn new() -> Self { LubyGenerator { terms: Vec::new(), mult: 1, minu: 0 } }

  /// Produces the next term in the sequence and records it.
  pub fn next_term(&mut self) -> u64 {
    let to_fill = self.terms.len();
    if is_power_of_two(to_fill + 2) {
      self.terms.push(self.mult);
      self.minu = to_fill + 1;
      self.mult *= 2;
    } else {
      let term = self.terms[to_fill - self.minu];
      self.terms.push(term);
    }
    *self.terms.last().unwrap()
  }

  /// Resets the generator to its initial state, as if newly constructed.
  pub fn reset(&mut self) {
    self.terms.clear();
    self.mult = 1;
    self.minu = 0;
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn matches_known_prefix() {
    let mut gen = LubyGenerator::new();
    let expected = [1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8];
    let got: Vec<u64> = (0..expected.len()).map(|_| gen.next_term()).collect();
    assert_eq!(got, expected);
  }

  #[test]
  fn reset_replays_the_same_sequence() {
    let mut gen = LubyGenerator::new();
    let first: Vec<u64> = (0..10).map(|_| gen.next_term()).collect();
    gen.reset();
    let second: Vec<u64> = (0..10).map(|_| gen.next_term()).collect();
    assert_eq!(first, second);
  }
}
