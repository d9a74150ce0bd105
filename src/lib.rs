//! An engine for playing or analysing the board game 'Ataxx'
//!
//! Positions are stored as compact bit-packed boards and searched with a
//! fixed-depth minimax with alpha-beta pruning.
//!
//! # Basic Usage
//!
//! ```
//! use ataxx_ai::{bitboard::BitBoard, notation::move_string, solver::Solver};
//!
//! let board = BitBoard::initial();
//! let mut solver = Solver::new(board);
//! let (score, next) = solver.search(1);
//!
//! assert_eq!(score, 1);
//! assert_eq!(move_string(&board, &next.unwrap()), "B0");
//! ```

use static_assertions::*;
pub use anyhow;

pub mod bitboard;

pub mod movegen;

pub mod notation;

pub mod solver;


pub use bitboard::{BitBoard, Cell};
pub use movegen::{generate_moves, MoveList};
pub use notation::{move_string, Move};
pub use solver::Solver;

/// The side length of the square game board in tiles
pub const SIZE: usize = 7;

/// The number of tiles on the board
pub const CELLS: usize = SIZE * SIZE;

/// An upper bound on the number of successors of any position: one spawn
/// into every tile plus up to 16 jumps into every tile
pub const MAX_MOVES: usize = CELLS + 16 * CELLS;

/// A position evaluation, positive values favour White
pub type Score = i32;

/// The score of a position won by White
pub const MAX_SCORE: Score = CELLS as Score;
/// The score of a position won by Black
pub const MIN_SCORE: Score = -MAX_SCORE;

// the four seed corners must be distinct tiles
const_assert!(SIZE > 2);
// columns are labelled with a single letter
const_assert!(SIZE <= 26);
