// app/mod.rs - Application State and Configuration
//
// Platform-independent state: the mode/gesture state machine and the
// persisted settings. The window loop in main.rs drives it.

mod gesture;
pub mod input;
mod settings;
mod state;

pub use gesture::SelectionGesture;
pub use settings::{MagnifierSettings, Settings};
pub use state::*;
