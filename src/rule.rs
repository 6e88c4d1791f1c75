use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::Error;

/// A Life-like rule: which neighbor counts keep a live cell alive, and which
/// bring a dead cell to life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rule {
  birth: NeighborMask,
  survival: NeighborMask,
}

/// One bit per neighbor count 0-8.
pub(crate) type NeighborMask = u16;

/// Conway's original rule, `23/3`. Applied whenever no rule string is given.
pub const GAME_OF_LIFE: Rule = Rule {
  birth: 0b000001000,
  survival: 0b000001100,
};

impl Rule {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn set_birth(&mut self, num: u8) {
    debug_assert!(num < 9);
    self.birth |= 1 << num;
  }

  pub(crate) fn set_survival(&mut self, num: u8) {
    debug_assert!(num < 9);
    self.survival |= 1 << num;
  }

  /// Next state of a cell with `num_neighbors` live neighbors.
  ///
  /// A count outside 0-8 cannot come from an 8-neighborhood; it yields
  /// `false` rather than a fault. Survival and birth are independent masks,
  /// strictly gated on the current state.
  pub fn next_state(&self, alive: bool, num_neighbors: u8) -> bool {
    if num_neighbors > 8 {
      return false;
    }
    let mask = if alive { self.survival } else { self.birth };
    mask >> num_neighbors & 1 != 0
  }
}

impl FromStr for Rule {
  type Err = Error;

  /// Parses `survive/born` notation, e.g. `"23/3"`.
  ///
  /// Digits `0`-`8` on either side of exactly one `/`; whitespace is ignored
  /// anywhere; duplicate digits are idempotent. An empty digit group is
  /// valid and simply never matches.
  fn from_str(s: &str) -> Result<Self, Error> {
    let mut rule = Rule::new();
    let mut seen_separator = false;
    for c in s.chars() {
      match c {
        '0'..='8' => {
          let num = c as u8 - b'0';
          if seen_separator {
            rule.set_birth(num);
          } else {
            rule.set_survival(num);
          }
        }
        '/' if !seen_separator => seen_separator = true,
        c if c.is_whitespace() => {}
        _ => return Err(Error::RuleParse(s.trim().to_owned())),
      }
    }
    if !seen_separator {
      return Err(Error::RuleParse(s.trim().to_owned()));
    }
    Ok(rule)
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let mut s = self.survival;
    while s != 0 {
      write!(f, "{}", s.trailing_zeros())?;
      s &= s - 1;
    }
    write!(f, "/")?;
    let mut b = self.birth;
    while b != 0 {
      write!(f, "{}", b.trailing_zeros())?;
      b &= b - 1;
    }
    Ok(())
  }
}
