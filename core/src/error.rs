use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board letters must form a non-empty square grid")]
    InvalidBoardShape,
    #[error("Letter distribution has no usable weights")]
    InvalidDistribution,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Word list has no words of at least {0} letters")]
    EmptyDictionary(usize),
}

pub type Result<T> = core::result::Result<T, GameError>;
