// constants.rs - Application-wide Constants
//
// Centralized constants for colors, dimensions, and other magic numbers.

/// Canvas colors (RGBA)
pub mod colors {
    /// Selection outline and magnifier decorations
    pub const OUTLINE: [u8; 4] = [255, 255, 255, 255];
    /// Window background behind letterboxed images
    pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];
    /// Placeholder cover, top of the gradient
    pub const COVER_TOP: [u8; 4] = [24, 28, 38, 255];
    /// Placeholder cover, bottom of the gradient
    pub const COVER_BOTTOM: [u8; 4] = [0, 120, 200, 255];
    /// Frame drawn around the saved image in idle mode
    pub const SAVED_FRAME: [u8; 4] = [0, 221, 0, 255];
    /// Pixels outside the screenshot read by the magnifier
    pub const OFFSCREEN: [u8; 4] = [0, 0, 0, 255];
}

/// Idle window defaults
pub mod window {
    /// Title shown in idle mode
    pub const TITLE: &str = "ScreenShot";
    /// Default window width
    pub const DEFAULT_WIDTH: u32 = 800;
    /// Default window height
    pub const DEFAULT_HEIGHT: u32 = 600;
    /// Title shown while previewing a capture
    pub const PREVIEW_TITLE: &str = "Hit R to reselect...";
}

/// Selection overlay defaults
pub mod overlay {
    /// Opacity of the black veil over the frozen screenshot
    pub const DEFAULT_OPACITY: f32 = 0.3;
    /// Poll/render interval while selecting
    pub const FRAME_INTERVAL_MS: u64 = 20;
    /// Time given to the compositor to hide our window before grabbing
    pub const CAPTURE_DELAY_MS: u64 = 150;
}

/// Magnifier defaults
pub mod magnifier {
    /// Width of the screen area sampled around the cursor
    pub const SOURCE_WIDTH: u32 = 40;
    /// Height of the screen area sampled around the cursor
    pub const SOURCE_HEIGHT: u32 = 40;
    /// Width of the zoomed preview
    pub const ZOOM_WIDTH: u32 = 100;
    /// Height of the zoomed preview
    pub const ZOOM_HEIGHT: u32 = 100;
    /// Gap between the cursor and the preview
    pub const CURSOR_OFFSET: i32 = 20;
    /// Inset of the outline drawn inside the preview
    pub const OUTLINE_INSET: i32 = 2;
}

/// Save dialog defaults
pub mod save {
    /// Suggested file name
    pub const DEFAULT_FILE_NAME: &str = "screenshot.png";
    /// Extension appended when the user types none
    pub const DEFAULT_EXTENSION: &str = "png";
}
