use std::io;
use thiserror::Error;

/// Everything that can fail while building a grid or loading a pattern.
///
/// A failed load never leaves a partially painted grid behind; the grid and
/// its buffers are dropped before the error reaches the caller.
#[derive(Debug, Error)]
pub enum Error {
  #[error("could not find the specified file")]
  FileNotFound,

  #[error("specified file is not Life 1.05 format")]
  FileFormatUnexpected,

  #[error("specified file had layout description line(s) with invalid format: {0:?}")]
  FileLayoutMalformed(char),

  #[error("specified file had improperly formatted tags: {0:?}")]
  TagsMalformed(String),

  #[error("specified file had duplicate attribute tags")]
  DuplicateAttribute,

  #[error("ruleset {0:?} is improperly formatted (check the #R tag or the supplied rule string)")]
  RuleParse(String),

  #[error("i/o error while reading pattern: {0}")]
  Io(#[from] io::Error),
}
