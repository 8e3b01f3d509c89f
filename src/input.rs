use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

use crate::board::Board;
use crate::geometry::GridGeometry;
use crate::rules::Pattern;

pub const TITLE: &str = "Conway's Game of Life";

/// Keys the simulator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Quit,
    Clear,
    ToggleFullscreen,
    ToggleMenu,
    Stamp(Pattern),
}

/// Platform events reduced to what the game loop consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    MouseMoved { x: f32, y: f32 },
    MouseLeft,
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Resized { width: u32, height: u32 },
    Restored,
    DisplayChanged,
    KeyDown(Command),
    CloseRequested,
}

impl AppEvent {
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(AppEvent::CloseRequested),
            WindowEvent::Resized(size) => Some(AppEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::Occluded(false) => Some(AppEvent::Restored),
            WindowEvent::ScaleFactorChanged { .. } => Some(AppEvent::DisplayChanged),
            WindowEvent::CursorMoved { position, .. } => Some(AppEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::CursorLeft { .. } => Some(AppEvent::MouseLeft),
            WindowEvent::MouseInput { state, button, .. } => Some(match state {
                ElementState::Pressed => AppEvent::ButtonDown(*button),
                ElementState::Released => AppEvent::ButtonUp(*button),
            }),
            WindowEvent::KeyboardInput { event, .. } => key_command(event).map(AppEvent::KeyDown),
            _ => None,
        }
    }
}

fn key_command(event: &KeyEvent) -> Option<Command> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Space) => Some(Command::TogglePause),
        Key::Named(NamedKey::Escape) => Some(Command::Quit),
        Key::Named(NamedKey::F11) => Some(Command::ToggleFullscreen),
        Key::Named(NamedKey::Tab) => Some(Command::ToggleMenu),
        Key::Character(text) => {
            let c = text.chars().next()?;
            match c.to_ascii_lowercase() {
                'c' => Some(Command::Clear),
                digit => Pattern::from_digit(digit).map(Command::Stamp),
            }
        }
        _ => None,
    }
}

/// What the caller has to do after an event was absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Recalculate,
    RunStateChanged,
    ToggleFullscreen,
    ToggleMenu,
    Clear,
}

/// Pointer, editing and run/pause state owned by the event loop
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub cursor_pos: Option<(f32, f32)>,
    pub hovered: Option<(usize, usize)>,
    pub editing: bool,
    /// An event arrived while the button was held and the flip for it is
    /// still owed
    pub pending_edit: bool,
    pub running: bool,
    pub quit: bool,
}

impl InputState {
    pub fn new(running: bool) -> Self {
        Self {
            running,
            ..Default::default()
        }
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        log::info!("simulation {}", if self.running { "running" } else { "paused" });
    }

    pub fn title(&self) -> String {
        format!("{TITLE} --- ({})", if self.running { "running" } else { "paused" })
    }

    /// Re-derive the hovered cell, e.g. after the grid moved under a still cursor.
    pub fn refresh_hover(&mut self, geometry: &GridGeometry) {
        self.hovered = self
            .cursor_pos
            .and_then(|(x, y)| geometry.cell_at(x, y));
    }

    pub fn handle_event(&mut self, event: AppEvent, geometry: &GridGeometry, board: &mut Board) -> Action {
        let action = self.dispatch(event, geometry, board);
        self.pending_edit = self.editing;
        action
    }

    fn dispatch(&mut self, event: AppEvent, geometry: &GridGeometry, board: &mut Board) -> Action {
        match event {
            AppEvent::MouseMoved { x, y } => {
                self.cursor_pos = Some((x, y));
                self.refresh_hover(geometry);
                Action::None
            }
            AppEvent::MouseLeft => {
                self.cursor_pos = None;
                self.hovered = None;
                Action::None
            }
            AppEvent::ButtonDown(MouseButton::Left) => {
                self.editing = true;
                self.refresh_hover(geometry);
                Action::None
            }
            AppEvent::ButtonUp(MouseButton::Left) => {
                self.editing = false;
                Action::None
            }
            AppEvent::ButtonDown(_) | AppEvent::ButtonUp(_) => Action::None,
            AppEvent::Resized { .. } | AppEvent::Restored | AppEvent::DisplayChanged => {
                Action::Recalculate
            }
            AppEvent::CloseRequested => {
                self.quit = true;
                Action::Quit
            }
            AppEvent::KeyDown(command) => match command {
                Command::Quit => {
                    self.quit = true;
                    Action::Quit
                }
                Command::TogglePause => {
                    self.toggle_running();
                    Action::RunStateChanged
                }
                Command::Clear => {
                    board.clear();
                    Action::Clear
                }
                Command::ToggleFullscreen => Action::ToggleFullscreen,
                Command::ToggleMenu => Action::ToggleMenu,
                Command::Stamp(pattern) => {
                    if let Some((row, column)) = self.hovered {
                        log::info!("placing {} at ({row}, {column})", pattern.name());
                        board.stamp(pattern, row, column);
                    }
                    Action::None
                }
            },
        }
    }

    /// Close a drained batch of events: flip the hovered cell once if the
    /// batch arrived while the primary button was held. A held button keeps
    /// flipping on every batch that brings events, none while idle.
    pub fn end_batch(&mut self, board: &mut Board) -> bool {
        let pending = std::mem::take(&mut self.pending_edit);
        match (pending && self.editing, self.hovered) {
            (true, Some((row, column))) => {
                board.toggle(row as isize, column as isize);
                true
            }
            _ => false,
        }
    }

    /// The automaton only advances while running and not being edited.
    pub fn should_simulate(&self) -> bool {
        self.running && !self.editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_BORDER_SIZE;

    fn setup() -> (InputState, GridGeometry, Board) {
        let mut geometry = GridGeometry::new(10, 10, DEFAULT_BORDER_SIZE);
        geometry.recalculate(220, 220);
        (InputState::default(), geometry, Board::new(10, 10).unwrap())
    }

    fn center_of(geometry: &GridGeometry, row: usize, column: usize) -> AppEvent {
        let r = geometry.cell_rect(row, column);
        AppEvent::MouseMoved {
            x: r.x + r.w / 2.0,
            y: r.y + r.h / 2.0,
        }
    }

    #[test]
    fn toggling_pause_twice_restores_flag() {
        let (mut input, geometry, mut board) = setup();
        let initial = input.running;
        let toggle = AppEvent::KeyDown(Command::TogglePause);
        assert_eq!(input.handle_event(toggle, &geometry, &mut board), Action::RunStateChanged);
        assert_ne!(input.running, initial);
        input.handle_event(toggle, &geometry, &mut board);
        assert_eq!(input.running, initial);
    }

    #[test]
    fn title_reflects_run_state() {
        let mut input = InputState::new(false);
        assert_eq!(input.title(), "Conway's Game of Life --- (paused)");
        input.toggle_running();
        assert_eq!(input.title(), "Conway's Game of Life --- (running)");
    }

    #[test]
    fn mouse_move_tracks_hovered_cell() {
        let (mut input, geometry, mut board) = setup();
        input.handle_event(center_of(&geometry, 3, 7), &geometry, &mut board);
        assert_eq!(input.hovered, Some((3, 7)));

        input.handle_event(AppEvent::MouseMoved { x: 1.0, y: 1.0 }, &geometry, &mut board);
        assert_eq!(input.hovered, None);
    }

    #[test]
    fn click_flips_hovered_cell_once_per_batch() {
        let (mut input, geometry, mut board) = setup();
        input.handle_event(center_of(&geometry, 2, 2), &geometry, &mut board);
        input.end_batch(&mut board);

        input.handle_event(AppEvent::ButtonDown(MouseButton::Left), &geometry, &mut board);
        assert!(input.end_batch(&mut board));
        assert!(board.is_alive(2, 2));

        // Button still held, no new events: idle iterations leave the cell alone
        for _ in 0..9 {
            assert!(!input.end_batch(&mut board));
        }
        assert!(board.is_alive(2, 2));

        input.handle_event(AppEvent::ButtonUp(MouseButton::Left), &geometry, &mut board);
        assert!(!input.end_batch(&mut board));
        assert!(board.is_alive(2, 2));
    }

    #[test]
    fn held_button_flips_again_on_each_new_batch() {
        let (mut input, geometry, mut board) = setup();
        input.handle_event(center_of(&geometry, 2, 2), &geometry, &mut board);
        input.handle_event(AppEvent::ButtonDown(MouseButton::Left), &geometry, &mut board);
        assert!(input.end_batch(&mut board));

        // Two events in one batch still owe a single flip
        input.handle_event(center_of(&geometry, 2, 2), &geometry, &mut board);
        input.handle_event(center_of(&geometry, 2, 2), &geometry, &mut board);
        assert!(input.end_batch(&mut board));
        assert!(!board.is_alive(2, 2));
        assert!(!input.end_batch(&mut board));
    }

    #[test]
    fn press_and_release_in_one_batch_does_not_flip() {
        let (mut input, geometry, mut board) = setup();
        input.handle_event(center_of(&geometry, 3, 3), &geometry, &mut board);
        input.handle_event(AppEvent::ButtonDown(MouseButton::Left), &geometry, &mut board);
        input.handle_event(AppEvent::ButtonUp(MouseButton::Left), &geometry, &mut board);
        assert!(!input.end_batch(&mut board));
        assert_eq!(board.live_count(), 0);
    }

    #[test]
    fn leaving_the_window_clears_hover() {
        let (mut input, geometry, mut board) = setup();
        input.handle_event(center_of(&geometry, 9, 0), &geometry, &mut board);
        assert_eq!(input.hovered, Some((9, 0)));

        input.handle_event(AppEvent::MouseLeft, &geometry, &mut board);
        assert_eq!(input.cursor_pos, None);
        assert_eq!(input.hovered, None);

        input.handle_event(AppEvent::ButtonDown(MouseButton::Left), &geometry, &mut board);
        assert!(!input.end_batch(&mut board));
        assert_eq!(board.live_count(), 0);
    }

    #[test]
    fn secondary_button_does_not_edit() {
        let (mut input, geometry, mut board) = setup();
        input.handle_event(center_of(&geometry, 1, 1), &geometry, &mut board);
        input.handle_event(AppEvent::ButtonDown(MouseButton::Right), &geometry, &mut board);
        assert!(!input.editing);
        assert!(!input.end_batch(&mut board));
    }

    #[test]
    fn editing_pauses_simulation() {
        let mut input = InputState::new(true);
        assert!(input.should_simulate());
        input.editing = true;
        assert!(!input.should_simulate());
    }

    #[test]
    fn window_changes_request_recalculation() {
        let (mut input, geometry, mut board) = setup();
        for event in [
            AppEvent::Resized { width: 640, height: 480 },
            AppEvent::Restored,
            AppEvent::DisplayChanged,
        ] {
            assert_eq!(input.handle_event(event, &geometry, &mut board), Action::Recalculate);
        }
    }

    #[test]
    fn close_and_escape_quit() {
        let (mut input, geometry, mut board) = setup();
        assert_eq!(input.handle_event(AppEvent::CloseRequested, &geometry, &mut board), Action::Quit);
        assert!(input.quit);

        let (mut input, geometry, mut board) = setup();
        let escape = AppEvent::KeyDown(Command::Quit);
        assert_eq!(input.handle_event(escape, &geometry, &mut board), Action::Quit);
        assert!(input.quit);
    }

    #[test]
    fn stamp_uses_hovered_cell() {
        let (mut input, geometry, mut board) = setup();
        let stamp = AppEvent::KeyDown(Command::Stamp(Pattern::Block));
        input.handle_event(stamp, &geometry, &mut board);
        assert_eq!(board.live_count(), 0);

        input.handle_event(center_of(&geometry, 4, 4), &geometry, &mut board);
        input.handle_event(stamp, &geometry, &mut board);
        assert_eq!(board.live_count(), 4);
        assert!(board.is_alive(5, 5));

        input.handle_event(AppEvent::KeyDown(Command::Clear), &geometry, &mut board);
        assert_eq!(board.live_count(), 0);
    }
}
