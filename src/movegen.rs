//! Legal move generation
//!
//! A move is never stored on its own: every legal action of the player to
//! move is represented by the position it leads to.

use anyhow::{anyhow, Result};

use std::ops::{Deref, DerefMut};

use crate::bitboard::{offset, BitBoard, Cell, JUMPS, NEIGHBOURS};
use crate::notation::Move;
use crate::{MAX_MOVES, SIZE};

/// A fixed-capacity list of successor positions
///
/// Sized by `MAX_MOVES` so that no position can overflow it.
#[derive(Clone)]
pub struct MoveList {
    size: usize,
    moves: [BitBoard; MAX_MOVES],
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [BitBoard::new(); MAX_MOVES],
        }
    }

    pub fn push(&mut self, board: BitBoard) {
        debug_assert!(self.size < MAX_MOVES, "move list overflow");
        self.moves[self.size] = board;
        self.size += 1;
    }

    pub fn clear(&mut self) {
        self.size = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [BitBoard];

    fn deref(&self) -> &Self::Target {
        &self.moves[..self.size]
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.moves[..self.size]
    }
}

/// Appends every position reachable by one legal action of the player to
/// move, returning the number of positions added.
///
/// For each empty tile this yields one spawn if a friendly piece touches it,
/// plus one jump for every friendly piece exactly two tiles away. A return
/// value of 0 means the player has to pass.
pub fn generate_moves(board: &BitBoard, output: &mut MoveList) -> usize {
    let start = output.len();
    let player = board.moving_player();

    for row in 0..SIZE {
        for col in 0..SIZE {
            if board.get(row * SIZE + col) != Cell::Empty {
                continue;
            }

            // spawn a new piece next to an existing one
            if NEIGHBOURS
                .iter()
                .filter_map(|&delta| offset(row, col, delta))
                .any(|neighbour| board.get(neighbour) == player)
            {
                let mut next = *board;
                next.place(row, col);
                output.push(next);
            }

            // every piece two tiles away may jump in, leaving its tile empty
            for source in JUMPS.iter().filter_map(|&delta| offset(row, col, delta)) {
                if board.get(source) == player {
                    let mut next = *board;
                    next.set(source, Cell::Empty);
                    next.place(row, col);
                    output.push(next);
                }
            }
        }
    }
    output.len() - start
}

impl BitBoard {
    /// Generates all successors of this position
    pub fn moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        generate_moves(self, &mut moves);
        moves
    }

    /// Whether the player to move has at least one legal action
    pub fn has_moves(&self) -> bool {
        let player = self.moving_player();
        (0..SIZE * SIZE)
            .filter(|&index| self.get(index) == Cell::Empty)
            .any(|index| {
                let (row, col) = (index / SIZE, index % SIZE);
                NEIGHBOURS
                    .iter()
                    .chain(JUMPS.iter())
                    .filter_map(|&delta| offset(row, col, delta))
                    .any(|source| self.get(source) == player)
            })
    }

    /// Plays a move given in notation, rejecting it unless it is one of the
    /// legal actions of the player to move
    pub fn play_checked(&self, candidate: Move) -> Result<BitBoard> {
        self.moves()
            .iter()
            .find(|next| Move::between(self, next) == Some(candidate))
            .copied()
            .ok_or_else(|| anyhow!("Illegal move: {}", candidate))
    }
}
