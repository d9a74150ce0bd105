use anyhow::{anyhow, Result};
use static_assertions::const_assert;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::notation::column_letter;
use crate::{Score, CELLS, MAX_SCORE, MIN_SCORE, SIZE};

mod layout {
    use crate::CELLS;

    pub const BITS_PER_STORAGE: usize = 64;
    // two bits per tile plus the turn flag
    pub const BITS_NEEDED: usize = CELLS * 2 + 1;
    pub const STORAGES: usize =
        BITS_NEEDED / BITS_PER_STORAGE + (BITS_NEEDED % BITS_PER_STORAGE != 0) as usize;
    pub const TURN_BIT: u64 = 1 << (BITS_PER_STORAGE - 1);
}
use layout::*;

// the turn flag sits in the top bit of the last word, above every tile
const_assert!(CELLS * 2 < STORAGES * BITS_PER_STORAGE);

/// Offsets of the eight tiles touching a tile
pub(crate) const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the sixteen tiles a piece can jump in from
pub(crate) const JUMPS: [(isize, isize); 16] = [
    (-2, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, -2),
    (-1, 2),
    (0, -2),
    (0, 2),
    (1, -2),
    (1, 2),
    (2, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// Returns the index of the tile at the given offset from (row, col),
/// or `None` if it falls off the board
#[inline]
pub(crate) fn offset(row: usize, col: usize, (d_row, d_col): (isize, isize)) -> Option<usize> {
    let row = row as isize + d_row;
    let col = col as isize + d_col;
    if row < 0 || col < 0 || row >= SIZE as isize || col >= SIZE as isize {
        None
    } else {
        Some(row as usize * SIZE + col as usize)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty = 0,
    White = 1,
    Black = 2,
}

impl Cell {
    fn from_bits(bits: u64) -> Self {
        match bits {
            0 => Cell::Empty,
            1 => Cell::White,
            2 => Cell::Black,
            _ => unreachable!("invalid tile encoding {}", bits),
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Cell::White => Cell::Black,
            Cell::Black => Cell::White,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::White => 'W',
            Cell::Black => 'B',
        }
    }
}

/// A compact Ataxx position
///
/// # Notes
/// Tiles are stored row by row, two bits each, in an array of words. The
/// top bit of the last word holds the player to move (clear for White).
/// Piece counts are cached and kept in step with every write so that
/// scoring a position never has to scan the board.
#[derive(Copy, Clone, Debug)]
pub struct BitBoard {
    storages: [u64; STORAGES],
    white_count: Score,
    black_count: Score,
}

impl BitBoard {
    /// Creates an empty board with White to move
    pub fn new() -> Self {
        Self {
            storages: [0; STORAGES],
            white_count: 0,
            black_count: 0,
        }
    }

    /// Creates the starting position: White in the top-left and bottom-right
    /// corners, Black in the other two, White to move
    pub fn initial() -> Self {
        let mut board = Self::new();
        board.set(0, Cell::White);
        board.set(SIZE - 1, Cell::Black);
        board.set((SIZE - 1) * SIZE, Cell::Black);
        board.set(CELLS - 1, Cell::White);
        board
    }

    /// Builds a position from one string per row using `W`, `B` and `.`
    pub fn from_rows<S: AsRef<str>>(rows: &[S], mover: Cell) -> Result<Self> {
        if rows.len() != SIZE {
            return Err(anyhow!("expected {} rows, found {}", SIZE, rows.len()));
        }
        if mover == Cell::Empty {
            return Err(anyhow!("the player to move must be White or Black"));
        }

        let mut board = Self::new();
        for (row, text) in rows.iter().enumerate() {
            let tiles: Vec<char> = text
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if tiles.len() != SIZE {
                return Err(anyhow!(
                    "row {} has {} tiles, expected {}",
                    row,
                    tiles.len(),
                    SIZE
                ));
            }
            for (col, tile) in tiles.into_iter().enumerate() {
                let value = match tile.to_ascii_uppercase() {
                    'W' => Cell::White,
                    'B' => Cell::Black,
                    '.' | 'E' => Cell::Empty,
                    _ => return Err(anyhow!("could not parse '{}' as a tile", tile)),
                };
                board.set(row * SIZE + col, value);
            }
        }
        if mover == Cell::Black {
            board.switch_turn();
        }
        Ok(board)
    }

    pub fn white_moves(&self) -> bool {
        self.storages[STORAGES - 1] & TURN_BIT == 0
    }

    pub fn black_moves(&self) -> bool {
        !self.white_moves()
    }

    pub fn moving_player(&self) -> Cell {
        if self.white_moves() {
            Cell::White
        } else {
            Cell::Black
        }
    }

    pub fn switch_turn(&mut self) {
        self.storages[STORAGES - 1] ^= TURN_BIT;
    }

    /// Returns a copy of this position with the other player to move
    pub fn passed(&self) -> Self {
        let mut board = *self;
        board.switch_turn();
        board
    }

    #[inline]
    pub fn get(&self, index: usize) -> Cell {
        debug_assert!(index < CELLS, "tile index {} out of range", index);
        let bit = index * 2;
        let word = bit / BITS_PER_STORAGE;
        let shift = bit % BITS_PER_STORAGE;
        Cell::from_bits((self.storages[word] >> shift) & 0b11)
    }

    /// Overwrites a tile, keeping the piece counts in step
    pub fn set(&mut self, index: usize, value: Cell) {
        let old = self.get(index);
        if old == value {
            return;
        }
        match old {
            Cell::White => self.white_count -= 1,
            Cell::Black => self.black_count -= 1,
            Cell::Empty => {}
        }
        match value {
            Cell::White => self.white_count += 1,
            Cell::Black => self.black_count += 1,
            Cell::Empty => {}
        }
        self.set_raw(index, value);
    }

    fn set_raw(&mut self, index: usize, value: Cell) {
        let bit = index * 2;
        let word = bit / BITS_PER_STORAGE;
        let shift = bit % BITS_PER_STORAGE;
        self.storages[word] &= !(0b11 << shift);
        self.storages[word] |= (value as u64) << shift;
    }

    /// Puts a piece of the player to move at (row, col) and hands the turn
    /// over. Every touching piece of the opponent changes colour; converted
    /// pieces do not convert anything further.
    pub fn place(&mut self, row: usize, col: usize) {
        debug_assert!(row < SIZE && col < SIZE);
        let index = row * SIZE + col;
        debug_assert!(self.get(index) == Cell::Empty, "tile {} is occupied", index);

        let player = self.moving_player();
        self.set(index, player);
        self.switch_turn();

        let opponent = self.moving_player();
        for &delta in NEIGHBOURS.iter() {
            if let Some(neighbour) = offset(row, col, delta) {
                if self.get(neighbour) == opponent {
                    self.set(neighbour, player);
                }
            }
        }
    }

    pub fn white_count(&self) -> Score {
        self.white_count
    }

    pub fn black_count(&self) -> Score {
        self.black_count
    }

    pub fn empty_count(&self) -> Score {
        CELLS as Score - self.white_count - self.black_count
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Scores the position as White's piece lead.
    ///
    /// A player with no pieces left has lost outright, and a full board is
    /// won outright by whoever holds more of it; these report `MAX_SCORE` or
    /// `MIN_SCORE`.
    pub fn score(&self) -> Score {
        #[cfg(debug_assertions)]
        {
            let (white, black) = (0..CELLS).fold((0, 0), |(w, b), i| match self.get(i) {
                Cell::White => (w + 1, b),
                Cell::Black => (w, b + 1),
                Cell::Empty => (w, b),
            });
            debug_assert_eq!(white, self.white_count);
            debug_assert_eq!(black, self.black_count);
        }

        if self.black_count == 0 {
            return MAX_SCORE;
        }
        if self.white_count == 0 {
            return MIN_SCORE;
        }
        if self.is_full() {
            match self.white_count.cmp(&self.black_count) {
                Ordering::Greater => return MAX_SCORE,
                Ordering::Less => return MIN_SCORE,
                Ordering::Equal => {}
            }
        }
        self.white_count - self.black_count
    }

    /// Whether the game is over by elimination or a full board
    pub fn is_decided(&self) -> bool {
        self.score().abs() >= MAX_SCORE
    }
}

impl Default for BitBoard {
    fn default() -> Self {
        Self::new()
    }
}

// the counts are derived from the tiles, so only the packed words take part
impl PartialEq for BitBoard {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(
            self.storages != other.storages
                || (self.white_count == other.white_count && self.black_count == other.black_count)
        );
        self.storages == other.storages
    }
}

impl Eq for BitBoard {}

impl Hash for BitBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storages.hash(state);
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = format!("--+-{}", "--".repeat(SIZE));

        write!(f, "  | ")?;
        for col in 0..SIZE {
            write!(f, "{} ", column_letter(col))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", divider)?;
        for row in 0..SIZE {
            write!(f, "{} | ", row)?;
            for col in 0..SIZE {
                write!(f, "{} ", self.get(row * SIZE + col).symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", divider)?;
        writeln!(f, "  | Score: {}", self.score())
    }
}
