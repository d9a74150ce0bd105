//! A fixed-depth minimax agent for Ataxx

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use std::cmp::Reverse;
use std::time::Instant;

use crate::{bitboard::*, movegen::*, Score, MAX_SCORE, MIN_SCORE};

/// An agent to pick moves in Ataxx positions
///
/// # Notes
/// This agent runs a minimax search with alpha-beta pruning to a fixed depth,
/// scoring the positions at the horizon by piece count (see
/// [`BitBoard::score`]). White maximises the score and Black minimises it.
///
/// Below the root, successors are tried in order of their immediate score,
/// which tightens the search window early and prunes far more of the tree.
/// The root keeps generation order, so among equally good moves the first
/// one generated is reported.
///
/// A player without a legal move passes: the board stays as it is and the
/// turn goes to the other player.
#[derive(Clone)]
pub struct Solver {
    board: BitBoard,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` for a position
    pub fn new(board: BitBoard) -> Self {
        Self {
            board,
            node_count: 0,
        }
    }

    /// Performs game tree search below the root
    ///
    /// Returns the score of `board` when searched `level` plies deep
    fn minimax(&mut self, board: &BitBoard, level: u32, mut alpha: Score, mut beta: Score) -> Score {
        self.node_count += 1;

        if level == 0 {
            return board.score();
        }

        let mut moves = MoveList::new();
        if generate_moves(board, &mut moves) == 0 {
            // forced pass, the material on the board is unchanged
            return board.score();
        }

        let maximizing = board.white_moves();
        if maximizing {
            moves.sort_unstable_by_key(|next| Reverse(next.score()));
        } else {
            moves.sort_unstable_by_key(|next| next.score());
        }

        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };
        for next in moves.iter() {
            let score = self.minimax(next, level - 1, alpha, beta);
            if maximizing {
                if score > best_score {
                    best_score = score;
                }
                if score > alpha {
                    alpha = score;
                }
            } else {
                if score < best_score {
                    best_score = score;
                }
                if score < beta {
                    beta = score;
                }
            }
            // the other player will never allow this line
            if beta <= alpha {
                break;
            }
        }
        best_score
    }

    /// Performs the root search, keeping track of the best successor
    fn top_level_search(&mut self, depth: u32, progress: &ProgressBar) -> (Score, Option<BitBoard>) {
        self.node_count += 1;
        let board = self.board;

        if depth == 0 {
            return (board.score(), None);
        }

        let mut moves = MoveList::new();
        if generate_moves(&board, &mut moves) == 0 {
            return (board.score(), Some(board.passed()));
        }
        progress.set_length(moves.len() as u64);

        let maximizing = board.white_moves();
        let (mut alpha, mut beta) = (MIN_SCORE, MAX_SCORE);
        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };
        let mut best_index = 0;

        for (i, next) in moves.iter().enumerate() {
            let score = self.minimax(next, depth - 1, alpha, beta);
            progress.inc(1);
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_index = i;
                }
                if score > alpha {
                    alpha = score;
                }
            } else {
                if score < best_score {
                    best_score = score;
                    best_index = i;
                }
                if score < beta {
                    beta = score;
                }
            }
            if beta <= alpha {
                break;
            }
        }

        (best_score, Some(moves[best_index]))
    }

    /// Calculate the score and best successor of the current position
    ///
    /// The successor is `None` only when `depth` is 0. If the player to move
    /// has to pass, the successor is the same board with the turn switched.
    pub fn search(&mut self, depth: u32) -> (Score, Option<BitBoard>) {
        self._search(depth, true)
    }

    /// Calculate the score and best successor of the current position, logging progress to stdout
    pub fn search_verbose(&mut self, depth: u32) -> (Score, Option<BitBoard>) {
        self._search(depth, false)
    }

    fn _search(&mut self, depth: u32, silent: bool) -> (Score, Option<BitBoard>) {
        let progress = if silent {
            ProgressBar::hidden()
        } else {
            let progress = ProgressBar::new(0);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("Searching depth {msg}: {bar:40.cyan/blue} {pos}/{len} moves")
                    .progress_chars("█▓▒░  "),
            );
            progress.set_message(&depth.to_string());
            progress
        };

        let start_time = Instant::now();
        let start_count = self.node_count;
        let result = self.top_level_search(depth, &progress);
        progress.finish_and_clear();

        if !silent {
            let time = start_time.elapsed();
            let positions = self.node_count - start_count;
            println!(
                "Searched {} positions in {:.3}s ({:.0} kpos/s), score: {}",
                positions,
                time.as_secs_f64(),
                positions as f64 / (1000.0 * time.as_secs_f64().max(1e-9)),
                result.0
            );
        }
        result
    }

    /// Calculate the score and best successor of the current position,
    /// searching the root moves in parallel
    ///
    /// Each root move is searched with a full window, so the result matches
    /// [`Solver::search`] exactly while the pruning between root moves is lost.
    pub fn search_parallel(&mut self, depth: u32) -> (Score, Option<BitBoard>) {
        self.node_count += 1;
        let board = self.board;

        if depth == 0 {
            return (board.score(), None);
        }

        let mut list = MoveList::new();
        if generate_moves(&board, &mut list) == 0 {
            return (board.score(), Some(board.passed()));
        }
        let moves: &[BitBoard] = &list;

        let results: Vec<(Score, usize)> = moves
            .par_iter()
            .map(|next| {
                let mut solver = Solver::new(*next);
                let score = solver.minimax(next, depth - 1, MIN_SCORE, MAX_SCORE);
                (score, solver.node_count)
            })
            .collect();

        let maximizing = board.white_moves();
        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };
        let mut best_index = 0;
        for (i, &(score, nodes)) in results.iter().enumerate() {
            self.node_count += nodes;
            if (maximizing && score > best_score) || (!maximizing && score < best_score) {
                best_score = score;
                best_index = i;
            }
        }

        (best_score, Some(moves[best_index]))
    }
}

impl std::ops::Deref for Solver {
    type Target = BitBoard;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
