//! Subcommands of the `tictactoe-q` binary

pub mod inspect;
pub mod play;
pub mod train;
