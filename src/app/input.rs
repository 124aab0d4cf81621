// app/input.rs - Window Event Translation
//
// Turns the winit events the window loop receives into `InputEvent`s.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::state::{InputEvent, Key};
use crate::capture::Point;

pub fn map_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::KeyS) => Key::S,
        PhysicalKey::Code(KeyCode::KeyR) => Key::R,
        PhysicalKey::Code(KeyCode::KeyQ) => Key::Q,
        _ => Key::Other,
    }
}

/// Only fresh presses count; releases and auto-repeat are dropped
pub fn key_input(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
    (state == ElementState::Pressed && !repeat).then(|| InputEvent::KeyPressed(map_key(key)))
}

/// Left button only, reported at the last known cursor position
pub fn mouse_input(button: MouseButton, state: ElementState, at: Point) -> Option<InputEvent> {
    match (button, state) {
        (MouseButton::Left, ElementState::Pressed) => Some(InputEvent::MouseDown(at)),
        (MouseButton::Left, ElementState::Released) => Some(InputEvent::MouseUp(at)),
        _ => None,
    }
}

pub fn cursor_input(position: PhysicalPosition<f64>) -> InputEvent {
    InputEvent::CursorMoved(Point::new(
        position.x.round() as i32,
        position.y.round() as i32,
    ))
}
