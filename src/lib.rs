//! Sliding tile puzzle for the terminal.
//!
//! A picture is cut into a grid of tiles, one slot is left empty and the
//! tiles are shuffled. The player slides tiles back with the arrow keys or
//! the mouse until the picture is whole again.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod picture;
pub mod puzzle;
pub mod solver;
pub mod terminal;
pub mod view;

pub use app::App;
pub use config::Config;
pub use puzzle::{Move, Puzzle, Slot};
