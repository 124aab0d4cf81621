//! SnapFrame - Region Screenshot Library
//!
//! Everything that does not need a live window: the mode/selection state
//! machine, screen capture backends, frame composition and saving.

pub mod app;
pub mod capture;
pub mod compositor;
pub mod constants;
pub mod persistence;

// Re-export commonly used types
pub use app::{AppMode, AppState, Command, InputEvent, Key, Settings};
pub use capture::{CaptureEngine, CaptureFrame, CaptureRect, Point};
