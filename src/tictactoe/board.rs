//! Board cells, players and move rules

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of one square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Marker used for this cell in state keys and board strings
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

/// Side to move; X and O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The marker this player puts on the board
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Convert a (row, column) pair into a row-major cell index.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidPosition`] if either coordinate is outside 0-2.
pub fn position_from_row_col(row: usize, col: usize) -> Result<usize, crate::Error> {
    if row > 2 || col > 2 {
        return Err(crate::Error::InvalidPosition {
            position: row.saturating_mul(3).saturating_add(col),
        });
    }
    Ok(row * 3 + col)
}

/// Split a row-major cell index into its (row, column) pair.
pub fn row_col(position: usize) -> (usize, usize) {
    (position / 3, position % 3)
}

/// Nine cells in row-major order plus the side to move. `Copy`, so moves
/// produce new boards instead of mutating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

fn count_of(cells: &[Cell; 9], cell: Cell) -> usize {
    cells.iter().filter(|&&c| c == cell).count()
}

impl BoardState {
    /// Empty board, X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Empty board with `first_player` to move.
    ///
    /// ```
    /// use tictactoe_q::tictactoe::{BoardState, Player};
    ///
    /// let board = BoardState::new_with_player(Player::O);
    /// let after = board.make_move(4).unwrap();
    /// assert_eq!(after.to_move, Player::X);
    /// ```
    pub fn new_with_player(first_player: Player) -> Self {
        Self {
            cells: [Cell::Empty; 9],
            to_move: first_player,
        }
    }

    pub(crate) fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; 9], crate::Error> {
        let cells: [char; 9] =
            chars
                .try_into()
                .map_err(|_| crate::Error::InvalidBoardLength {
                    expected: 9,
                    got: chars.len(),
                    context: context.to_string(),
                })?;

        let mut parsed = [Cell::Empty; 9];
        for (position, (slot, character)) in parsed.iter_mut().zip(cells).enumerate() {
            *slot = Cell::from_char(character).ok_or_else(|| {
                crate::Error::InvalidCellCharacter {
                    character,
                    position,
                    context: context.to_string(),
                }
            })?;
        }
        Ok(parsed)
    }

    /// Parse nine markers, ignoring whitespace, e.g. `"XO. .X. ..O"`.
    ///
    /// The side with fewer pieces is to move; X moves on equal counts.
    ///
    /// # Errors
    ///
    /// Fails on a wrong cell count, an unknown marker, or piece counts that
    /// differ by more than one.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let cells = Self::parse_cells(&chars, s)?;
        let (x_count, o_count) = (count_of(&cells, Cell::X), count_of(&cells, Cell::O));

        let to_move = match x_count as isize - o_count as isize {
            -1 | 0 => Player::X,
            1 => Player::O,
            _ => return Err(crate::Error::InvalidPieceCounts { x_count, o_count }),
        };
        Ok(Self { cells, to_move })
    }

    pub fn occupied_count(&self) -> usize {
        9 - count_of(&self.cells, Cell::Empty)
    }

    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Indices of empty cells, ascending
    pub fn empty_positions(&self) -> Vec<usize> {
        (0..9).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Place the side to move on `pos` and hand the turn over.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidPosition`] past cell 8, [`crate::Error::InvalidMove`]
    /// on an occupied cell.
    #[must_use = "make_move returns the next board and leaves this one as it was"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        match self.cells.get(pos) {
            None => Err(crate::Error::InvalidPosition { position: pos }),
            Some(Cell::X | Cell::O) => Err(crate::Error::InvalidMove { position: pos }),
            Some(Cell::Empty) => {
                let mut next = *self;
                next.cells[pos] = self.to_move.to_cell();
                next.to_move = self.to_move.opponent();
                Ok(next)
            }
        }
    }

    /// Empty cells in ascending order, or nothing once the game has ended
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    pub fn has_won(&self, player: Player) -> bool {
        super::lines::LineAnalyzer::has_won(&self.cells, player)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// A line is complete or no cell is left
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.has_won(player))
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .chunks(3)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect();
        write!(f, "{}", rows.join("\n"))
    }
}
