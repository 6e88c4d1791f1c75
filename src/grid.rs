use itertools::Itertools;
use rand::Rng;
use std::str::FromStr;

use crate::bitfield::BitField;
use crate::error::Error;
use crate::rule::{Rule, GAME_OF_LIFE};

/// A bounded Life field with double-buffered generations.
///
/// One buffer holds the current generation and is only ever read; the next
/// generation is written to the other. The roles flip once per [`step`],
/// after every cell has been evaluated, so no cell can observe a partially
/// updated grid.
///
/// [`step`]: Grid::step
pub struct Grid {
  buffers: [BitField; 2],
  /// Index of the buffer holding the current generation.
  current: usize,
  width: usize,
  height: usize,
  edge_wrap: bool,
  rule: Rule,
}

impl Grid {
  /// An all-dead `width` x `height` grid.
  pub fn new(width: usize, height: usize, edge_wrap: bool, rule: Rule) -> Self {
    let num_cells = width * height;
    Self {
      buffers: [BitField::new(num_cells), BitField::new(num_cells)],
      current: 0,
      width,
      height,
      edge_wrap,
      rule,
    }
  }

  /// A randomly seeded grid: each cell is independently alive with
  /// probability `1 / seed_rate` (`seed_rate == 0` seeds nothing).
  ///
  /// The random source is injected so callers can seed it for reproducible
  /// runs. Without a `rule_string` the grid runs under `23/3`.
  pub fn random(
    width: usize,
    height: usize,
    seed_rate: u32,
    edge_wrap: bool,
    rule_string: Option<&str>,
    rng: &mut impl Rng,
  ) -> Result<Self, Error> {
    let rule = match rule_string {
      Some(s) => Rule::from_str(s)?,
      None => GAME_OF_LIFE,
    };
    let mut grid = Self::new(width, height, edge_wrap, rule);
    if seed_rate > 0 {
      for offset in 0..grid.num_cells() {
        let alive = rng.gen_ratio(1, seed_rate);
        grid.buffers[grid.current].set(offset, alive);
      }
    }
    log::debug!(
      "seeded {}x{} grid, seed rate {}, rule {}",
      width, height, seed_rate, grid.rule
    );
    Ok(grid)
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn num_cells(&self) -> usize {
    self.width * self.height
  }

  pub fn edge_wrap(&self) -> bool {
    self.edge_wrap
  }

  pub fn rule(&self) -> Rule {
    self.rule
  }

  pub(crate) fn set_rule(&mut self, rule: Rule) {
    self.rule = rule;
  }

  /// Current state of the cell at `offset` (row-major); `false` for any
  /// offset at or beyond `num_cells()`.
  pub fn get_cell(&self, offset: usize) -> bool {
    self.buffers[self.current].get(offset)
  }

  /// Flips a cell of the current generation in place.
  pub fn toggle_cell(&mut self, offset: usize) {
    self.buffers[self.current].toggle(offset);
  }

  /// Kills every cell in both generations.
  pub fn clear(&mut self) {
    self.buffers[0].clear_all();
    self.buffers[1].clear_all();
  }

  /// Advances one generation.
  ///
  /// The entire read buffer is evaluated before the swap publishes the new
  /// generation; the swap is the only mutation visible to later calls.
  pub fn step(&mut self) {
    for offset in 0..self.num_cells() {
      let neighbors = self.count_neighbors(offset);
      let alive = self.buffers[self.current].get(offset);
      let next = self.rule.next_state(alive, neighbors);
      self.buffers[1 - self.current].set(offset, next);
    }
    self.swap_buffers();
  }

  /// Writes a cell of the in-progress next generation. The pattern loader
  /// paints here and publishes with [`swap_buffers`](Self::swap_buffers).
  pub(crate) fn paint(&mut self, offset: usize, alive: bool) {
    self.buffers[1 - self.current].set(offset, alive);
  }

  pub(crate) fn swap_buffers(&mut self) {
    self.current = 1 - self.current;
  }

  fn count_neighbors(&self, offset: usize) -> u8 {
    let x = (offset % self.width) as i64;
    let y = (offset / self.width) as i64;
    let mut count = 0;
    for dy in -1..=1 {
      for dx in -1..=1 {
        if dx == 0 && dy == 0 {
          continue;
        }
        if self.cell_at(x + dx, y + dy) {
          count += 1;
        }
      }
    }
    count
  }

  /// Reads a cell by coordinate, applying the edge policy: wrapped modulo
  /// each axis on a toroidal grid, permanently dead outside bounds
  /// otherwise.
  fn cell_at(&self, x: i64, y: i64) -> bool {
    let w = self.width as i64;
    let h = self.height as i64;
    let (x, y) = if x < 0 || y < 0 || x >= w || y >= h {
      if !self.edge_wrap {
        return false;
      }
      (x.rem_euclid(w), y.rem_euclid(h))
    } else {
      (x, y)
    };
    self.buffers[self.current].get((x + y * w) as usize)
  }

  /// Renders the current generation, `#` for live cells. The seam the
  /// terminal loop draws from, and the assertion surface for tests.
  pub fn debug(&self) -> String {
    (0..self.height)
      .map(|y| {
        (0..self.width)
          .map(|x| {
            if self.get_cell(x + y * self.width) {
              '#'
            } else {
              ' '
            }
          })
          .collect::<String>()
      })
      .join("\n")
  }
}
