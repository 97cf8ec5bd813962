//! Game state owned by the event loop, and the loop itself.

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PuzzleError, SolveError};
use crate::input::{self, Action};
use crate::picture::Picture;
use crate::puzzle::{Move, Puzzle};
use crate::solver;
use crate::terminal::Terminal;
use crate::view::Layout;

pub struct App {
    puzzle: Puzzle,
    picture: Option<Picture>,
    moves: usize,
    hint: Option<Move>,
    message: Option<String>,
    hint_budget: usize,
}

impl App {
    pub fn new(puzzle: Puzzle, picture: Option<Picture>) -> Self {
        Self {
            puzzle,
            picture,
            moves: 0,
            hint: None,
            message: None,
            hint_budget: solver::NODE_BUDGET,
        }
    }

    /// Caps the search behind the hint key.
    pub fn with_hint_budget(mut self, budget: usize) -> Self {
        self.hint_budget = budget;
        self
    }

    /// Builds a shuffled board and loads the picture. A missing or broken
    /// image is logged and the game falls back to numbered tiles.
    pub fn from_config(config: &Config) -> Result<Self, PuzzleError> {
        let mut puzzle = Puzzle::new(config.rows, config.cols)?;
        puzzle.shuffle();

        let picture = match Picture::open(
            &config.image_path,
            config.rows,
            config.cols,
            config.cell_width,
            config.cell_height,
        ) {
            Ok(picture) => Some(picture),
            Err(err) => {
                warn!(path = %config.image_path.display(), error = %err, "could not load puzzle image");
                None
            }
        };

        let mut app = Self::new(puzzle, picture);
        if app.picture.is_none() {
            app.message = Some(format!("No image at {}", config.image_path.display()));
        }
        Ok(app)
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn picture(&self) -> Option<&Picture> {
        self.picture.as_ref()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn hint(&self) -> Option<Move> {
        self.hint
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Applies one action. Returns true when the board changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Slide(dir) => {
                let moved = self.puzzle.apply_move(dir);
                self.after_move(moved)
            }
            Action::Click(index) => {
                let moved = self.puzzle.move_tile(index);
                self.after_move(moved)
            }
            Action::Solve => {
                self.puzzle.reset();
                self.clear_progress();
                info!("puzzle reset to solved order");
                true
            }
            Action::Restart => {
                self.puzzle.restart();
                self.clear_progress();
                info!(solvable = self.puzzle.is_solvable(), "puzzle reshuffled");
                true
            }
            Action::Hint => {
                self.show_hint();
                false
            }
            Action::Quit => false,
        }
    }

    fn after_move(&mut self, moved: bool) -> bool {
        if !moved {
            return false;
        }

        self.moves += 1;
        self.hint = None;
        self.message = None;
        debug!(moves = self.moves, empty = ?self.puzzle.find_empty(), "tile moved");
        if self.puzzle.is_solved() {
            info!(moves = self.moves, "puzzle solved");
        }
        true
    }

    fn clear_progress(&mut self) {
        self.moves = 0;
        self.hint = None;
        self.message = None;
    }

    fn show_hint(&mut self) {
        match solver::solve_with_budget(&self.puzzle, self.hint_budget) {
            Ok(path) => match path.first() {
                Some(&next) => {
                    self.hint = Some(next);
                    let noun = if path.len() == 1 { "move" } else { "moves" };
                    self.message = Some(format!("Hint: {} ({} {} to go)", next, path.len(), noun));
                }
                None => {
                    self.hint = None;
                    self.message = Some("Nothing left to do".to_string());
                }
            },
            Err(SolveError::Unsolvable) => {
                self.hint = None;
                self.message =
                    Some("This shuffle cannot be solved by sliding; press r to restart".to_string());
            }
            Err(err) => {
                debug!(error = %err, "hint search failed");
                self.hint = None;
                self.message = Some("No hint available for this board".to_string());
            }
        }
    }
}

/// Runs the game until the player quits.
pub fn run(config: &Config) -> Result<()> {
    let mut app = App::from_config(config)?;
    let layout = Layout::new(config.rows, config.cols, config.cell_width, config.cell_height);
    info!(rows = config.rows, cols = config.cols, "starting puzzle");

    let mut term = Terminal::new();
    term.enter()?;

    let result = event_loop(&mut app, &layout, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn event_loop(app: &mut App, layout: &Layout, term: &mut Terminal) -> Result<()> {
    term.draw(app, layout)?;

    loop {
        let event = event::read()?;
        let redraw = match input::map_event(&event, layout) {
            Some(Action::Quit) => return Ok(()),
            Some(action) => {
                app.apply(action);
                true
            }
            None => matches!(event, Event::Resize(..)),
        };

        if redraw {
            term.draw(app, layout)?;
        }
    }
}
