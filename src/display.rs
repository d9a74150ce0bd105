use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use ataxx_ai::{notation::column_letter, BitBoard, Cell, SIZE};

/// Draws the board to the terminal, one coloured tile per cell
pub fn display(board: &BitBoard) -> Result<()> {
    let mut stdout = stdout();
    let divider = format!("--+-{}\n", "--".repeat(SIZE));

    let cols: String = (0..SIZE).map(|col| format!("{} ", column_letter(col))).collect();
    stdout.queue(PrintStyledContent(style(format!("  | {}\n", cols))))?;
    stdout.queue(PrintStyledContent(style(divider.clone())))?;

    for row in 0..SIZE {
        stdout.queue(PrintStyledContent(style(format!("{} | ", row))))?;
        for col in 0..SIZE {
            let cell = board.get(row * SIZE + col);
            stdout.queue(PrintStyledContent(
                style(format!("{} ", cell.symbol()))
                    .attribute(Attribute::Bold)
                    .on(Color::DarkGreen)
                    .with(match cell {
                        Cell::White => Color::White,
                        Cell::Black => Color::Black,
                        Cell::Empty => Color::Green,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    stdout.queue(PrintStyledContent(style(divider)))?;
    stdout.queue(PrintStyledContent(style(format!(
        "  | White: {}, Black: {}, Score: {}\n",
        board.white_count(),
        board.black_count(),
        board.score()
    ))))?;
    stdout.flush()?;
    Ok(())
}
