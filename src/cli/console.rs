//! Console adapters: a human player reading moves from text input and an
//! observer that draws the board after every move.

use std::io::{BufRead, Write};

use super::output::render_board;
use crate::{
    Error, Result,
    ports::{Learner, Observer},
    tictactoe::{BoardState, GameOutcome, Player, position_from_row_col},
};

/// Human player entering "row column" pairs, e.g. `0 1`
pub struct HumanLearner<R, W> {
    input: R,
    output: W,
    name: String,
}

impl<R: BufRead, W: Write> HumanLearner<R, W> {
    pub fn new(input: R, output: W, name: String) -> Self {
        Self {
            input,
            output,
            name,
        }
    }
}

/// Parse a "row column" line into a cell index.
pub fn parse_move(line: &str) -> std::result::Result<usize, String> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Invalid input! Please enter two whole numbers.".to_string());
    };
    let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
        return Err("Invalid input! Please enter two whole numbers.".to_string());
    };
    position_from_row_col(row, col)
        .map_err(|_| "Row and column must be between 0 and 2.".to_string())
}

impl<R: BufRead + Send, W: Write + Send> Learner for HumanLearner<R, W> {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        if state.is_terminal() {
            return Err(Error::NoValidMoves);
        }

        loop {
            writeln!(self.output, "Your move (row and column, e.g. 0 1):")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            match parse_move(&line) {
                Ok(pos) if state.is_empty(pos) => return Ok(pos),
                Ok(_) => writeln!(self.output, "Invalid move, please try again.")?,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Draws the board and announces the result for a human at the console
pub struct ConsoleObserver<W> {
    output: W,
    human: Player,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(output: W, human: Player) -> Self {
        Self { output, human }
    }

    fn draw(&mut self, state: &BoardState) -> Result<()> {
        writeln!(self.output, "{}", render_board(state))?;
        Ok(())
    }
}

impl<W: Write + Send> Observer for ConsoleObserver<W> {
    fn on_game_start(&mut self, _game_num: usize, state: &BoardState) -> Result<()> {
        self.draw(state)
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        player: Player,
        move_pos: usize,
        state: &BoardState,
    ) -> Result<()> {
        if player != self.human {
            writeln!(
                self.output,
                "The AI plays {} {}.",
                move_pos / 3,
                move_pos % 3
            )?;
        }
        self.draw(state)
    }

    fn on_game_end(
        &mut self,
        _game_num: usize,
        _state: &BoardState,
        outcome: GameOutcome,
    ) -> Result<()> {
        let message = match outcome {
            GameOutcome::Win(winner) if winner == self.human => "Congratulations, you won!",
            GameOutcome::Win(_) => "The AI won!",
            GameOutcome::Draw => "Draw!",
        };
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }
}
