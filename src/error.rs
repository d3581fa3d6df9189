use thiserror::Error;

/// Caller errors reported by [`Board`](crate::Board)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cell ({row}, {column}) is outside a {rows}x{columns} board")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
}

pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors produced while decoding run-length encoded patterns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("invalid run length: {0}")]
    InvalidRun(String),

    #[error("unexpected token {0:?} in pattern")]
    UnexpectedToken(char),

    #[error("pattern has more than {0} live cells")]
    TooLarge(usize),

    #[error("pattern does not fit when placed at ({row}, {column})")]
    Placement { row: usize, column: usize },
}
