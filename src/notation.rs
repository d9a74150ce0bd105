//! Human readable coordinates and moves
//!
//! A tile is written as its column letter followed by its zero-based row,
//! so the top-left tile is `A0`. A spawn is written as its destination
//! (`B1`), a jump as its source followed by its destination (`A0C2`).

use anyhow::{anyhow, Result};

use std::fmt;
use std::str::FromStr;

use crate::bitboard::{BitBoard, Cell};
use crate::{CELLS, SIZE};

pub fn column_letter(col: usize) -> char {
    debug_assert!(col < SIZE);
    (b'A' + col as u8) as char
}

/// Turns a tile index into its coordinate, e.g. `10` becomes `D1`
pub fn index_string(index: usize) -> String {
    debug_assert!(index < CELLS);
    format!("{}{}", column_letter(index % SIZE), index / SIZE)
}

/// Parses a single coordinate such as `c4` into a tile index
pub fn parse_index(text: &str) -> Result<usize> {
    let mut coordinates = Coordinates::new(text);
    let index = coordinates
        .next()
        .ok_or_else(|| anyhow!("could not parse '{}' as a coordinate", text))??;
    if coordinates.next().is_some() {
        return Err(anyhow!("expected a single coordinate, found '{}'", text));
    }
    Ok(index)
}

/// A spawn or a jump, identified by the tiles it touches
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    /// The tile vacated by a jump
    pub from: Option<usize>,
    pub to: usize,
}

impl Move {
    pub fn spawn(to: usize) -> Self {
        Self { from: None, to }
    }

    pub fn jump(from: usize, to: usize) -> Self {
        Self {
            from: Some(from),
            to,
        }
    }

    /// Recovers the move leading from `before` to `after` by looking for the
    /// tile that was filled and the tile that was vacated, if any.
    ///
    /// Returns `None` when no tile was filled, i.e. the player passed.
    pub fn between(before: &BitBoard, after: &BitBoard) -> Option<Self> {
        debug_assert!(before.white_moves() != after.white_moves());
        let mut from = None;
        let mut to = None;
        for index in 0..CELLS {
            let (old, new) = (before.get(index), after.get(index));
            if old != Cell::Empty && new == Cell::Empty {
                from = Some(index);
            }
            if old == Cell::Empty && new != Cell::Empty {
                to = Some(index);
            }
        }
        to.map(|to| Self { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{}", index_string(from))?;
        }
        write!(f, "{}", index_string(self.to))
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let coordinates = Coordinates::new(text).collect::<Result<Vec<_>>>()?;
        match coordinates.as_slice() {
            &[to] => Ok(Move::spawn(to)),
            &[from, to] => Ok(Move::jump(from, to)),
            _ => Err(anyhow!("could not parse '{}' as a move", text.trim())),
        }
    }
}

/// Renders the move from one position to the next, or `pass` if the
/// player to move could not act
pub fn move_string(before: &BitBoard, after: &BitBoard) -> String {
    match Move::between(before, after) {
        Some(candidate) => candidate.to_string(),
        None => String::from("pass"),
    }
}

/// Splits text like `a0 C2` into tile indices, ignoring whitespace
struct Coordinates<'a> {
    text: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Coordinates<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }
}

impl<'a> Iterator for Coordinates<'a> {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let (_, letter) = self.chars.next()?;
        if !letter.is_ascii_alphabetic() {
            return Some(Err(anyhow!("could not parse '{}' as a column", letter)));
        }
        let col = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        if col >= SIZE {
            return Some(Err(anyhow!(
                "column {} out of range, columns must be between A and {}",
                letter,
                column_letter(SIZE - 1)
            )));
        }

        self.skip_whitespace();
        let mut digits = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        if digits.is_empty() {
            return Some(Err(anyhow!(
                "missing row after column {} in '{}'",
                letter,
                self.text.trim()
            )));
        }
        let row = match digits.parse::<usize>() {
            Ok(row) if row < SIZE => row,
            _ => {
                return Some(Err(anyhow!(
                    "row {} out of range, rows must be between 0 and {}",
                    digits,
                    SIZE - 1
                )))
            }
        };
        Some(Ok(row * SIZE + col))
    }
}
