//! Key bindings
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use edit3d_core::{Axes, Axis};

use crate::session::EditorAction;

/// View orbit per arrow key press, in radians
pub const ORBIT_STEP: f32 = 0.1;

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Edit(EditorAction),
    /// Orbit the view; not recorded in the undo history
    Orbit { dx: f32, dy: f32, dz: f32 },
    ToggleProjection,
    Quit,
}

pub fn map_key(event: KeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    let edit = |action| Some(Input::Edit(action));
    let orbit = |dx, dy, dz| Some(Input::Orbit { dx, dy, dz });

    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('x') => edit(EditorAction::SelectAxes(Axes::One(Axis::X))),
        KeyCode::Char('y') => edit(EditorAction::SelectAxes(Axes::One(Axis::Y))),
        KeyCode::Char('z') => edit(EditorAction::SelectAxes(Axes::One(Axis::Z))),
        KeyCode::Char('a') => edit(EditorAction::SelectAxes(Axes::All)),
        KeyCode::Char('t') => edit(EditorAction::Translate(1.0)),
        KeyCode::Char('T') => edit(EditorAction::Translate(-1.0)),
        KeyCode::Char('r') => edit(EditorAction::Rotate(1.0)),
        KeyCode::Char('R') => edit(EditorAction::Rotate(-1.0)),
        KeyCode::Char('s') => edit(EditorAction::ScaleUp),
        KeyCode::Char('S') => edit(EditorAction::ScaleDown),
        KeyCode::Char('f') => edit(EditorAction::Floor),
        KeyCode::Char('c') => edit(EditorAction::Center),
        KeyCode::Char('w') => edit(EditorAction::ToggleWireframe),
        KeyCode::Char('u') => edit(EditorAction::Undo),
        KeyCode::Char('U') => edit(EditorAction::ClearHistory),
        KeyCode::Char('p') => Some(Input::ToggleProjection),
        KeyCode::Up => orbit(ORBIT_STEP, 0.0, 0.0),
        KeyCode::Down => orbit(-ORBIT_STEP, 0.0, 0.0),
        KeyCode::Left => orbit(0.0, -ORBIT_STEP, 0.0),
        KeyCode::Right => orbit(0.0, ORBIT_STEP, 0.0),
        KeyCode::Char('[') => orbit(0.0, 0.0, ORBIT_STEP),
        KeyCode::Char(']') => orbit(0.0, 0.0, -ORBIT_STEP),
        _ => None,
    }
}

/// One-line help shown in the title bar
pub const HELP: &str =
    "x/y/z/a axis  t/T move  r/R rotate  s/S scale  f floor  c center  w wire  u undo  U clear  arrows/[] orbit  p proj  q quit";
