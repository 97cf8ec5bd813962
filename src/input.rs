//! Mapping from terminal events to game actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::puzzle::Move;
use crate::view::{Layout, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Slide(Move),
    /// Slide the tile at this slot index.
    Click(usize),
    Solve,
    Restart,
    Hint,
    Quit,
}

pub fn map_event(event: &Event, layout: &Layout) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key_event(*key),
        Event::Mouse(mouse) => handle_mouse_event(*mouse, layout),
        _ => None,
    }
}

pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(key) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up => Some(Action::Slide(Move::Up)),
        KeyCode::Down => Some(Action::Slide(Move::Down)),
        KeyCode::Left => Some(Action::Slide(Move::Left)),
        KeyCode::Right => Some(Action::Slide(Move::Right)),

        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Solve),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::Hint),

        _ => None,
    }
}

pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn handle_mouse_event(mouse: MouseEvent, layout: &Layout) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }

    match layout.hit_test(mouse.column, mouse.row)? {
        Target::Tile(index) => Some(Action::Click(index)),
        Target::Solve => Some(Action::Solve),
        Target::Restart => Some(Action::Restart),
    }
}
