//! Bounded-grid Life-like cellular automata.
//!
//! A [`Grid`] holds two bit-packed generations of a fixed `width` x `height`
//! field and advances them synchronously under a configurable `survive/born`
//! rule, with either bounded or toroidal edges. Patterns load from the
//! Life 1.05 text format via [`life105`].
//!
//! ```
//! use gridlife::Grid;
//!
//! let src = "#Life 1.05\n#P 0 0\n.*.\n..*\n***\n";
//! let mut grid: Grid = gridlife::life105::read(src.as_bytes(), 32, 32, false, None).unwrap();
//! grid.step();
//! ```

pub mod bitfield;
pub mod error;
pub mod grid;
pub mod life105;
pub mod rule;

pub use bitfield::BitField;
pub use error::Error;
pub use grid::Grid;
pub use rule::{Rule, GAME_OF_LIFE};
