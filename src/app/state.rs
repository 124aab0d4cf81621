// app/state.rs - Core Application State
//
// The interactive state machine. Window events come in as `InputEvent`s,
// the state updates itself and answers with a `Command` the window loop
// carries out (resizing the window, grabbing the screen, opening dialogs).

use log::{debug, info};

use super::gesture::SelectionGesture;
use crate::capture::{CaptureRect, Point};

/// Current mode of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Small window showing the cover image
    Idle,
    /// Full-screen overlay, user is dragging out a region
    Selecting,
    /// Captured region is shown, waiting for save or reselect
    Previewing,
}

/// Keys the application reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Start selecting
    S,
    /// Reset / reselect
    R,
    /// Capture the selection
    Q,
    Other,
}

/// Input relevant to the state machine, in window pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(Key),
    MouseDown(Point),
    MouseUp(Point),
    CursorMoved(Point),
    CloseRequested,
}

/// What the window loop has to do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Nothing changed
    None,
    /// Repaint the current mode
    Redraw,
    /// Grab a fresh screenshot and show the selection overlay
    TakeSnapshot,
    /// Show the selection overlay over the existing screenshot
    ShowOverlay,
    /// Shrink back to the idle window
    ShowIdle,
    /// Cut the region out of the screenshot and preview it
    Capture(CaptureRect),
    /// Ask for a file name and write the previewed capture
    Save,
    /// Leave the event loop
    Quit,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    mode: AppMode,
    gesture: SelectionGesture,
    cursor: Point,
    /// False until the cursor has moved over the current overlay
    cursor_known: bool,
    frame_count: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: AppMode::Idle,
            gesture: SelectionGesture::Idle,
            cursor: Point::default(),
            cursor_known: false,
            frame_count: 0,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn gesture(&self) -> SelectionGesture {
        self.gesture
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Rectangle to outline on the overlay this frame
    pub fn visible_selection(&self) -> Option<CaptureRect> {
        self.gesture.visible_rect(self.cursor)
    }

    /// Feed one input event through the state machine
    pub fn handle(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::CloseRequested => Command::Quit,
            InputEvent::KeyPressed(key) => self.handle_key(key),
            InputEvent::CursorMoved(at) => {
                self.cursor = at;
                self.cursor_known = true;
                if self.mode == AppMode::Selecting {
                    Command::Redraw
                } else {
                    Command::None
                }
            }
            InputEvent::MouseDown(_) | InputEvent::MouseUp(_)
                if self.mode == AppMode::Selecting && !self.cursor_known =>
            {
                debug!("Ignoring click before the cursor position is known");
                Command::None
            }
            InputEvent::MouseDown(at) if self.mode == AppMode::Selecting => {
                self.cursor = at;
                self.gesture.press(at);
                Command::Redraw
            }
            InputEvent::MouseUp(at) if self.mode == AppMode::Selecting => {
                self.cursor = at;
                if let Some(rect) = self.gesture.release(at) {
                    info!("Selected region {:?}", rect);
                }
                Command::Redraw
            }
            InputEvent::MouseDown(_) | InputEvent::MouseUp(_) => Command::None,
        }
    }

    fn handle_key(&mut self, key: Key) -> Command {
        match (self.mode, key) {
            (AppMode::Previewing, Key::R | Key::Escape) => {
                self.enter_selecting();
                Command::ShowOverlay
            }
            (AppMode::Previewing, _) => {
                self.gesture.reset();
                self.set_mode(AppMode::Idle);
                Command::Save
            }
            (_, Key::Escape) => Command::Quit,
            (AppMode::Idle, Key::S) => {
                self.enter_selecting();
                Command::TakeSnapshot
            }
            (AppMode::Selecting, Key::R) => {
                self.gesture.reset();
                self.set_mode(AppMode::Idle);
                Command::ShowIdle
            }
            (AppMode::Selecting, Key::Q) => match self.gesture.selection() {
                Some(rect) => {
                    self.set_mode(AppMode::Previewing);
                    Command::Capture(rect)
                }
                None => {
                    debug!("Q pressed without a finished selection");
                    Command::None
                }
            },
            _ => Command::None,
        }
    }

    /// The screenshot for the overlay could not be taken
    pub fn snapshot_failed(&mut self) {
        self.gesture.reset();
        self.set_mode(AppMode::Idle);
    }

    /// The selection could not be cut out; keep it so the user can retry
    pub fn capture_failed(&mut self) {
        if self.mode == AppMode::Previewing {
            self.set_mode(AppMode::Selecting);
        }
    }

    /// Count a presented frame; returns the new total
    pub fn tick(&mut self) -> u64 {
        self.frame_count += 1;
        self.frame_count
    }

    /// Positions reported before the overlay appeared belong to another
    /// window geometry and are not trusted for clicks.
    fn enter_selecting(&mut self) {
        self.gesture.reset();
        self.cursor_known = false;
        self.set_mode(AppMode::Selecting);
    }

    fn set_mode(&mut self, mode: AppMode) {
        if self.mode != mode {
            info!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selecting() -> AppState {
        let mut state = AppState::new();
        assert_eq!(state.handle(InputEvent::KeyPressed(Key::S)), Command::TakeSnapshot);
        state
    }

    #[test]
    fn mouse_is_ignored_outside_selection() {
        let mut state = AppState::new();
        assert_eq!(state.handle(InputEvent::MouseDown(Point::new(1, 1))), Command::None);
        assert_eq!(state.gesture(), SelectionGesture::Idle);
    }

    #[test]
    fn s_is_ignored_while_selecting() {
        let mut state = selecting();
        assert_eq!(state.handle(InputEvent::KeyPressed(Key::S)), Command::None);
        assert_eq!(state.mode(), AppMode::Selecting);
    }

    #[test]
    fn cursor_motion_redraws_only_while_selecting() {
        let mut state = AppState::new();
        assert_eq!(state.handle(InputEvent::CursorMoved(Point::new(3, 4))), Command::None);
        assert_eq!(state.cursor(), Point::new(3, 4));
        let mut state = selecting();
        assert_eq!(state.handle(InputEvent::CursorMoved(Point::new(3, 4))), Command::Redraw);
    }

    #[test]
    fn click_before_overlay_motion_is_ignored() {
        let mut state = AppState::new();
        state.handle(InputEvent::CursorMoved(Point::new(700, 500)));
        state.handle(InputEvent::KeyPressed(Key::S));

        // still the idle-window position
        let stale = state.cursor();
        assert_eq!(state.handle(InputEvent::MouseDown(stale)), Command::None);
        assert_eq!(state.gesture(), SelectionGesture::Idle);

        state.handle(InputEvent::CursorMoved(Point::new(40, 30)));
        assert_eq!(state.handle(InputEvent::MouseDown(state.cursor())), Command::Redraw);
        assert_eq!(
            state.gesture(),
            SelectionGesture::Dragging {
                anchor: Point::new(40, 30)
            }
        );
    }

    #[test]
    fn reselecting_from_preview_waits_for_motion() {
        let mut state = selecting();
        state.handle(InputEvent::CursorMoved(Point::new(0, 0)));
        state.handle(InputEvent::MouseDown(Point::new(0, 0)));
        state.handle(InputEvent::CursorMoved(Point::new(10, 10)));
        state.handle(InputEvent::MouseUp(Point::new(10, 10)));
        state.handle(InputEvent::KeyPressed(Key::Q));
        assert_eq!(state.handle(InputEvent::KeyPressed(Key::R)), Command::ShowOverlay);

        assert_eq!(state.handle(InputEvent::MouseDown(Point::new(10, 10))), Command::None);
        state.handle(InputEvent::CursorMoved(Point::new(12, 12)));
        assert_eq!(state.handle(InputEvent::MouseDown(Point::new(12, 12))), Command::Redraw);
    }

    #[test]
    fn snapshot_failure_returns_to_idle() {
        let mut state = selecting();
        state.snapshot_failed();
        assert_eq!(state.mode(), AppMode::Idle);
    }

    #[test]
    fn tick_counts_frames() {
        let mut state = AppState::new();
        state.tick();
        assert_eq!(state.tick(), 2);
    }
}
