//! Screen layout, hit testing and drawing.
//!
//! The board sits between a "Solve" button above it and a "Restart" button
//! below it. Tiles are drawn from the picture with `▀` half blocks, or as
//! numbered boxes when no picture could be loaded.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::app::App;
use crate::puzzle::Slot;

pub const SOLVE_LABEL: &str = "[ Solve ]";
pub const RESTART_LABEL: &str = "[ Restart ]";
pub const HELP_TEXT: &str = "arrows/click: slide  s: solve  r: restart  h: hint  q: quit";

const LEFT_MARGIN: u16 = 1;
const GRID_TOP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && column - self.x < self.width
            && row - self.y < self.height
    }
}

/// What a mouse press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Tile(usize),
    Solve,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    cell_width: u16,
    cell_height: u16,
}

impl Layout {
    pub fn new(rows: usize, cols: usize, cell_width: u16, cell_height: u16) -> Self {
        Self {
            rows,
            cols,
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height
    }

    pub fn grid(&self) -> Rect {
        Rect {
            x: LEFT_MARGIN,
            y: GRID_TOP,
            width: clamp_u16(self.cols).saturating_mul(self.cell_width),
            height: clamp_u16(self.rows).saturating_mul(self.cell_height),
        }
    }

    pub fn solve_button(&self) -> Rect {
        Rect {
            x: LEFT_MARGIN,
            y: 0,
            width: SOLVE_LABEL.len() as u16,
            height: 1,
        }
    }

    pub fn restart_button(&self) -> Rect {
        let grid = self.grid();
        Rect {
            x: LEFT_MARGIN,
            y: grid.y.saturating_add(grid.height).saturating_add(1),
            width: RESTART_LABEL.len() as u16,
            height: 1,
        }
    }

    pub fn status_row(&self) -> u16 {
        self.restart_button().y.saturating_add(2)
    }

    /// Top-left terminal cell of slot `index`.
    pub fn tile_origin(&self, index: usize) -> (u16, u16) {
        let grid = self.grid();
        let row = clamp_u16(index / self.cols);
        let col = clamp_u16(index % self.cols);
        (
            grid.x.saturating_add(col.saturating_mul(self.cell_width)),
            grid.y.saturating_add(row.saturating_mul(self.cell_height)),
        )
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        if self.solve_button().contains(column, row) {
            return Some(Target::Solve);
        }
        if self.restart_button().contains(column, row) {
            return Some(Target::Restart);
        }

        let grid = self.grid();
        if !grid.contains(column, row) {
            return None;
        }
        let col = usize::from((column - grid.x) / self.cell_width);
        let row = usize::from((row - grid.y) / self.cell_height);
        Some(Target::Tile(row * self.cols + col))
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Slot holding the tile the current hint would slide.
pub fn hinted_slot(app: &App) -> Option<usize> {
    app.puzzle().target_of(app.hint()?)
}

/// Queues a full frame for `app` into `out`.
pub fn draw<W: Write>(out: &mut W, app: &App, layout: &Layout) -> io::Result<()> {
    out.queue(ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_button(out, layout.solve_button(), SOLVE_LABEL)?;

    let hinted = hinted_slot(app);
    for (index, slot) in app.puzzle().slots().iter().enumerate() {
        let (x, y) = layout.tile_origin(index);
        if hinted == Some(index) {
            out.queue(SetAttribute(Attribute::Reverse))?;
        }
        for line in 0..layout.cell_height() {
            out.queue(cursor::MoveTo(x, y.saturating_add(line)))?;
            match (slot, app.picture()) {
                (Slot::Tile(id), Some(picture)) => {
                    for column in 0..layout.cell_width() {
                        match picture.half_block(*id, column, line) {
                            Some((top, bottom)) => {
                                out.queue(SetForegroundColor(rgb(top)))?;
                                out.queue(SetBackgroundColor(rgb(bottom)))?;
                                out.queue(Print('▀'))?;
                            }
                            None => {
                                out.queue(ResetColor)?;
                                out.queue(Print(' '))?;
                            }
                        }
                    }
                    out.queue(ResetColor)?;
                }
                (Slot::Tile(id), None) => {
                    out.queue(Print(numbered_line(
                        id + 1,
                        layout.cell_width(),
                        layout.cell_height(),
                        line,
                    )))?;
                }
                (Slot::Empty, _) => {
                    out.queue(Print(" ".repeat(usize::from(layout.cell_width()))))?;
                }
            }
        }
        if hinted == Some(index) {
            out.queue(SetAttribute(Attribute::Reset))?;
        }
    }

    draw_button(out, layout.restart_button(), RESTART_LABEL)?;

    let status = layout.status_row();
    out.queue(cursor::MoveTo(LEFT_MARGIN, status))?;
    out.queue(Print(status_line(app)))?;
    out.queue(cursor::MoveTo(LEFT_MARGIN, status.saturating_add(1)))?;
    out.queue(SetAttribute(Attribute::Dim))?;
    out.queue(Print(HELP_TEXT))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn draw_button<W: Write>(out: &mut W, rect: Rect, label: &str) -> io::Result<()> {
    out.queue(cursor::MoveTo(rect.x, rect.y))?;
    out.queue(SetAttribute(Attribute::Reverse))?;
    out.queue(Print(label))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb(pixel: image::Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    Color::Rgb { r, g, b }
}

/// One line of a boxed tile showing `label` on its middle line.
pub fn numbered_line(label: usize, width: u16, height: u16, line: u16) -> String {
    let width = usize::from(width);
    if width < 2 || height < 2 {
        return format!("{:^width$}", label, width = width);
    }

    let inner = width - 2;
    if line == 0 {
        format!("┌{}┐", "─".repeat(inner))
    } else if line + 1 == height {
        format!("└{}┘", "─".repeat(inner))
    } else if line == height / 2 {
        format!("│{:^inner$}│", label, inner = inner)
    } else {
        format!("│{}│", " ".repeat(inner))
    }
}

pub fn status_line(app: &App) -> String {
    let mut line = format!("Moves: {}", app.moves());
    if app.puzzle().is_solved() {
        line.push_str("  Solved!");
    }
    if let Some(message) = app.message() {
        line.push_str("  ");
        line.push_str(message);
    }
    line
}
