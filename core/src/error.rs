use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("A game needs at least one icon")]
    NoIcons,
    #[error("Icon id {0} is used more than once")]
    DuplicateIcon(u32),
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FortuneError {
    #[error("Fortune request failed: {0}")]
    Request(String),
    #[error("Fortune service answered with status {0}")]
    Status(u16),
    #[error("Fortune service returned an empty fortune")]
    Empty,
    #[error("Fortune payload could not be understood")]
    Malformed,
}
