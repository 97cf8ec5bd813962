use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid grid dimensions {rows}x{cols}: need at least two slots")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("slots must hold tiles 0..{expected} once each and one empty slot")]
    InvalidSlots { expected: usize },
}

#[derive(Debug, Error)]
pub enum PictureError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image {width}x{height} is too small for a {rows}x{cols} grid")]
    TooSmall {
        width: u32,
        height: u32,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("puzzle is not solvable by sliding tiles")]
    Unsolvable,

    #[error("search gave up after {nodes} nodes")]
    BudgetExhausted { nodes: usize },
}
