use std::path::PathBuf;

pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLS: usize = 3;
pub const IMAGE_FILE_NAME: &str = "puzzle_image.jpeg";
pub const LOG_FILE_NAME: &str = "slider-puzzle.log";

/// Terminal columns per tile.
pub const CELL_WIDTH: u16 = 12;
/// Terminal lines per tile (two image pixel rows each).
pub const CELL_HEIGHT: u16 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub image_path: PathBuf,
    pub cell_width: u16,
    pub cell_height: u16,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            image_path: default_image_path(),
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            log_path: std::env::temp_dir().join(LOG_FILE_NAME),
        }
    }
}

/// `~/Desktop/puzzle_image.jpeg`, falling back to the working directory
/// when no home directory is known.
pub fn default_image_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_default();
    home.join("Desktop").join(IMAGE_FILE_NAME)
}
