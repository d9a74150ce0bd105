use anyhow::Result;

use std::cmp::Ordering;
use std::io::{stdin, stdout, Write};

use ataxx_ai::*;

mod display;
use display::*;

/// Search depth offered for a computer controlled White
const DEFAULT_WHITE_DEPTH: u32 = 5;
/// Search depth offered for a computer controlled Black
const DEFAULT_BLACK_DEPTH: u32 = 3;

#[derive(Copy, Clone)]
struct Player {
    ai: bool,
    depth: u32,
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    stdout().flush()?;
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

// choose AI control and search depth of one player
fn choose_player(name: &str, default_depth: u32) -> Result<Option<Player>> {
    let ai = loop {
        let buffer = match prompt(&format!("Is {} AI controlled? y/n: ", name))? {
            Some(buffer) => buffer,
            None => return Ok(None),
        };
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => break true,
            Some(_letter @ 'n') => break false,
            _ => println!("Unknown answer given"),
        }
    };
    if !ai {
        return Ok(Some(Player { ai, depth: 0 }));
    }

    loop {
        let buffer = match prompt(&format!("Search depth for {} [{}]: ", name, default_depth))? {
            Some(buffer) => buffer,
            None => return Ok(None),
        };
        let input = buffer.trim();
        if input.is_empty() {
            return Ok(Some(Player { ai, depth: default_depth }));
        }
        match input.parse::<u32>() {
            Ok(depth) if depth > 0 => return Ok(Some(Player { ai, depth })),
            _ => println!("Invalid depth: {}, must be a positive number", input),
        }
    }
}

// read moves until a legal one is given, `None` on end of input
fn human_move(board: &BitBoard) -> Result<Option<BitBoard>> {
    if !board.has_moves() {
        println!("No legal moves, passing");
        return Ok(Some(board.passed()));
    }
    loop {
        let input = match prompt("Move input > ")? {
            Some(input) => input,
            None => return Ok(None),
        };
        match input.parse::<Move>().and_then(|candidate| board.play_checked(candidate)) {
            Ok(next) => return Ok(Some(next)),
            Err(err) => println!("{}", err),
        }
    }
}

fn main() -> Result<()> {
    println!("Welcome to Ataxx\n");

    let white = match choose_player("White", DEFAULT_WHITE_DEPTH)? {
        Some(player) => player,
        None => return Ok(()),
    };
    let black = match choose_player("Black", DEFAULT_BLACK_DEPTH)? {
        Some(player) => player,
        None => return Ok(()),
    };

    let mut board = BitBoard::initial();
    let mut move_number = 0;
    let mut passes = 0;

    // game loop
    loop {
        display(&board)?;
        if board.is_decided() || passes >= 2 {
            break;
        }
        println!("======== Move {} ========", move_number);
        move_number += 1;

        let player = if board.white_moves() { white } else { black };
        let next = if player.ai {
            println!("AI is thinking...");
            let mut solver = Solver::new(board);
            let (_score, next) = solver.search_verbose(player.depth);
            next.unwrap_or_else(|| board.passed())
        } else {
            match human_move(&board)? {
                Some(next) => next,
                None => return Ok(()),
            }
        };

        println!("> {}", move_string(&board, &next));
        passes = match Move::between(&board, &next) {
            Some(_) => 0,
            None => passes + 1,
        };
        board = next;
    }

    // end states
    match board.score().cmp(&0) {
        Ordering::Greater => println!("White wins!"),
        Ordering::Less => println!("Black wins!"),
        Ordering::Equal => println!("Draw!"),
    }
    Ok(())
}
