use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::Error;
use crate::grid::Grid;
use crate::rule::{Rule, GAME_OF_LIFE};

/// Life 1.05 format: <https://www.conwaylife.com/wiki/Life_1.05>.
const HEADER: &str = "#Life 1.05";

/// Pattern lines are at most 80 characters before the terminator; longer
/// input wraps to the next pattern row at each 80-column boundary.
const MAX_LINE: usize = 80;

/// Paint cursor for a pattern block.
///
/// `offset` is the absolute cell the next character lands on; `row_start`
/// pins the block's leftmost column so a line break drops the cursor one
/// grid row down, same column.
struct Cursor {
  offset: usize,
  row_start: usize,
  grid_width: usize,
}

impl Cursor {
  fn place(origin: usize, grid_width: usize) -> Self {
    Self {
      offset: origin,
      row_start: origin,
      grid_width,
    }
  }

  fn advance(&mut self) {
    self.offset += 1;
  }

  fn next_row(&mut self) {
    self.row_start += self.grid_width;
    self.offset = self.row_start;
  }
}

fn placement_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^#P\s*(-?\d+)\s+(-?\d+)\s*$").unwrap())
}

/// Reads a Life pattern from a Life 1.05 text source into a fresh
/// `width` x `height` grid.
///
/// `rule_string` is a caller-supplied rule override. A `#R` or `#N` tag in
/// the file replaces it, and may appear only once; with neither, the grid
/// runs under the default `23/3`. Each `#P x y` tag starts a pattern block
/// whose top-left corner sits at `x`/`y` relative to the grid center.
pub fn read(
  src: impl BufRead,
  width: usize,
  height: usize,
  edge_wrap: bool,
  rule_string: Option<&str>,
) -> Result<Grid, Error> {
  let mut lines = src.lines();

  let header = lines.next().ok_or(Error::FileFormatUnexpected)??;
  if !header.starts_with(HEADER) {
    return Err(Error::FileFormatUnexpected);
  }

  let mut rule = rule_string.map(Rule::from_str).transpose()?;
  let mut file_rule_seen = false;

  let center_x = (width / 2) as i64;
  let center_y = (height / 2) as i64;
  let center_offset = width / 2 + height / 2 * width;

  let mut grid = Grid::new(width, height, edge_wrap, GAME_OF_LIFE);
  let mut cursor: Option<Cursor> = None;

  for line in lines {
    let line = line?;
    if let Some(tag) = line.strip_prefix('#') {
      match tag.chars().next() {
        Some('R') => {
          if file_rule_seen {
            return Err(Error::DuplicateAttribute);
          }
          rule = Some(Rule::from_str(&tag[1..])?);
          file_rule_seen = true;
        }
        Some('N') => {
          if file_rule_seen {
            return Err(Error::DuplicateAttribute);
          }
          rule = Some(GAME_OF_LIFE);
          file_rule_seen = true;
        }
        Some('D') => {}
        Some('P') => {
          let caps = placement_re()
            .captures(&line)
            .ok_or_else(|| Error::TagsMalformed(line.clone()))?;
          let x: i64 = caps[1]
            .parse()
            .map_err(|_| Error::TagsMalformed(line.clone()))?;
          let y: i64 = caps[2]
            .parse()
            .map_err(|_| Error::TagsMalformed(line.clone()))?;
          // Placements left of or above the grid clamp to the edge, per
          // the reference loader.
          let gx = (center_x + x).max(0) as usize;
          let gy = (center_y + y).max(0) as usize;
          log::debug!("pattern block at ({}, {})", gx, gy);
          cursor = Some(Cursor::place(gx + gy * width, width));
        }
        // Unknown tags (and a bare `#`) are skipped like comments.
        _ => {}
      }
      continue;
    }

    // An empty line is skipped without moving the cursor, per the format.
    if line.is_empty() {
      continue;
    }

    // A cell line before any #P paints from the grid center.
    let cur = cursor.get_or_insert_with(|| Cursor::place(center_offset, width));

    let mut truncated = false;
    for (i, c) in line.chars().enumerate() {
      if i > 0 && i % MAX_LINE == 0 {
        cur.next_row();
      }
      if cur.offset >= width * height {
        // The block runs past the grid; stop painting, not a hard error.
        truncated = true;
        break;
      }
      match c {
        '*' => {
          grid.paint(cur.offset, true);
          cur.advance();
        }
        '.' => {
          grid.paint(cur.offset, false);
          cur.advance();
        }
        c => return Err(Error::FileLayoutMalformed(c)),
      }
    }
    if truncated {
      log::warn!("pattern block runs past the {}x{} grid, truncated", width, height);
    }
    cur.next_row();
  }

  grid.set_rule(rule.unwrap_or(GAME_OF_LIFE));
  grid.swap_buffers();
  log::info!("loaded pattern into {}x{} grid, rule {}", width, height, grid.rule());
  Ok(grid)
}

/// Reads a Life 1.05 file from disk. See [`read`].
pub fn read_file(
  path: impl AsRef<Path>,
  width: usize,
  height: usize,
  edge_wrap: bool,
  rule_string: Option<&str>,
) -> Result<Grid, Error> {
  let file = File::open(path).map_err(|err| match err.kind() {
    io::ErrorKind::NotFound => Error::FileNotFound,
    _ => Error::Io(err),
  })?;
  read(BufReader::new(file), width, height, edge_wrap, rule_string)
}
