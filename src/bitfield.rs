/// A packed bitmap with a fixed number of addressable bits.
///
/// Bits live in `u32` words; bit `i` maps to word `i / 32`, bit `i % 32`.
/// Out-of-range accesses are documented no-ops: neighbor probing on a
/// bounded grid routinely lands outside the field, and those cells read as
/// dead.
#[derive(Clone, Debug)]
pub struct BitField {
  words: Vec<u32>,
  num_bits: usize,
}

const WORD_BITS: usize = 32;

impl BitField {
  /// Allocates storage for `num_bits` bits, all cleared.
  pub fn new(num_bits: usize) -> Self {
    let num_words = (num_bits + WORD_BITS - 1) / WORD_BITS;
    Self {
      words: vec![0; num_words],
      num_bits,
    }
  }

  /// Number of addressable bits.
  pub fn len(&self) -> usize {
    self.num_bits
  }

  pub fn is_empty(&self) -> bool {
    self.num_bits == 0
  }

  /// `false` for any `index >= len()`.
  pub fn get(&self, index: usize) -> bool {
    if index >= self.num_bits {
      return false;
    }
    self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 != 0
  }

  pub fn set(&mut self, index: usize, value: bool) {
    if index >= self.num_bits {
      return;
    }
    let mask = 1 << (index % WORD_BITS);
    if value {
      self.words[index / WORD_BITS] |= mask;
    } else {
      self.words[index / WORD_BITS] &= !mask;
    }
  }

  /// Flips a bit in place.
  pub fn toggle(&mut self, index: usize) {
    if index >= self.num_bits {
      return;
    }
    self.words[index / WORD_BITS] ^= 1 << (index % WORD_BITS);
  }

  /// Zeroes all storage in one pass.
  pub fn clear_all(&mut self) {
    for word in &mut self.words {
      *word = 0;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // 65 bits spans a word boundary with one bit in the third word.
  const NUM_BITS: usize = 65;

  #[test]
  fn starts_cleared() {
    let field = BitField::new(NUM_BITS);
    for i in 0..NUM_BITS {
      assert!(!field.get(i));
    }
  }

  #[test]
  fn set_then_get() {
    let mut field = BitField::new(NUM_BITS);
    for i in 0..NUM_BITS {
      field.set(i, true);
    }
    for i in 0..NUM_BITS {
      assert!(field.get(i));
    }
    field.set(64, false);
    assert!(!field.get(64));
    assert!(field.get(63));
  }

  #[test]
  fn toggle_flips() {
    let mut field = BitField::new(NUM_BITS);
    for i in 0..NUM_BITS {
      field.toggle(i);
      assert!(field.get(i));
    }
  }

  #[test]
  fn toggle_twice_restores() {
    let mut field = BitField::new(NUM_BITS);
    field.set(3, true);
    field.toggle(3);
    field.toggle(3);
    assert!(field.get(3));
    field.toggle(40);
    field.toggle(40);
    assert!(!field.get(40));
  }

  #[test]
  fn out_of_range_is_noop() {
    let mut field = BitField::new(NUM_BITS);
    assert!(!field.get(NUM_BITS));
    assert!(!field.get(usize::MAX));
    field.set(NUM_BITS, true);
    field.toggle(NUM_BITS + 7);
    for i in 0..NUM_BITS {
      assert!(!field.get(i));
    }
  }

  #[test]
  fn clear_all_zeroes() {
    let mut field = BitField::new(NUM_BITS);
    for i in (0..NUM_BITS).step_by(3) {
      field.set(i, true);
    }
    field.clear_all();
    for i in 0..NUM_BITS {
      assert!(!field.get(i));
    }
  }
}
