//! Library error type

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // Game rules
    #[error("cell {position} is occupied")]
    InvalidMove { position: usize },

    #[error("cell {position} is off the board (cells are 0-8)")]
    InvalidPosition { position: usize },

    #[error("the game has already finished")]
    GameOver,

    #[error("no legal moves left")]
    NoValidMoves,

    // Board and state-key parsing
    #[error("'{context}' has {got} cells, a board needs {expected}")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("'{character}' at cell {position} of '{context}' is not one of . X O")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("{x_count} X and {o_count} O cannot occur in a real game")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    // Configuration and persistence
    #[error("bad configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Q-table line {line} is malformed: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("could not {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    // Console and terminal
    #[error("progress bar template: {message}")]
    ProgressBarTemplate { message: String },

    #[error("console input closed before a move was entered")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// An I/O failure tagged with what was being attempted, e.g. `"open qtable.csv"`.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::io("read or write a stream", source)
    }
}
