// window_manager.rs - The Application Window
//
// A single winit window changes presentation with the application mode:
// - Idle: small decorated window showing the cover image
// - Selecting: borderless full-screen overlay on the current monitor
// - Previewing: decorated window sized to the captured region

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event_loop::ActiveEventLoop,
    monitor::MonitorHandle,
    window::{CursorIcon, Fullscreen, Window, WindowAttributes, WindowId},
};

use snapframe::capture::Point;
use snapframe::constants::window as window_consts;

/// Wrapper for the application window
pub struct AppWindow {
    window: Arc<Window>,
    title: String,
}

impl AppWindow {
    /// Create the window in its idle presentation
    pub fn new(event_loop: &ActiveEventLoop, title: &str, width: u32, height: u32) -> Result<Self> {
        info!("Creating application window");

        let attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false)
            .with_visible(false);

        let window = event_loop
            .create_window(attributes)
            .context("Failed to create application window")?;
        info!("Window created with ID: {:?}", window.id());

        let app_window = Self {
            window: Arc::new(window),
            title: title.to_string(),
        };
        app_window.show_idle(width, height);
        Ok(app_window)
    }

    pub fn window(&self) -> Arc<Window> {
        self.window.clone()
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Decorated window of `width x height` logical pixels, centered
    pub fn show_idle(&self, width: u32, height: u32) {
        debug!("Window -> idle {}x{}", width, height);
        self.window.set_fullscreen(None);
        self.window.set_decorations(true);
        self.window.set_cursor(CursorIcon::Default);
        let size: PhysicalSize<u32> =
            LogicalSize::new(width, height).to_physical(self.window.scale_factor());
        let _ = self.window.request_inner_size(size);
        self.center(size);
        self.window.set_title(&format!("{} | [S] Select  [Esc] Quit", self.title));
        self.window.set_visible(true);
        self.window.request_redraw();
    }

    /// Borderless full-screen overlay on the monitor the window is on
    pub fn show_overlay(&self) {
        debug!("Window -> overlay");
        let monitor = self.monitor();
        self.window.set_decorations(false);
        self.window.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
        self.window.set_cursor(CursorIcon::Crosshair);
        self.window.set_title(&format!(
            "{} | Drag to select  [Q] Capture  [R] Back  [Esc] Quit",
            self.title
        ));
        self.window.set_visible(true);
        self.window.focus_window();
        self.window.request_redraw();
    }

    /// Decorated window of `width x height` physical pixels, centered
    pub fn show_preview(&self, width: u32, height: u32) {
        debug!("Window -> preview {}x{}", width, height);
        self.window.set_fullscreen(None);
        self.window.set_decorations(true);
        self.window.set_cursor(CursorIcon::Default);
        let size = PhysicalSize::new(width, height);
        let _ = self.window.request_inner_size(size);
        self.center(size);
        self.window.set_title(window_consts::PREVIEW_TITLE);
        self.window.set_visible(true);
        self.window.request_redraw();
    }

    pub fn hide(&self) {
        self.window.set_visible(false);
    }

    /// Center of the current monitor in desktop coordinates
    pub fn monitor_center(&self) -> Point {
        match self.monitor() {
            Some(monitor) => {
                let pos = monitor.position();
                let size = monitor.size();
                Point::new(
                    pos.x + (size.width / 2) as i32,
                    pos.y + (size.height / 2) as i32,
                )
            }
            None => Point::default(),
        }
    }

    fn monitor(&self) -> Option<MonitorHandle> {
        self.window
            .current_monitor()
            .or_else(|| self.window.primary_monitor())
    }

    fn center(&self, size: PhysicalSize<u32>) {
        if let Some(monitor) = self.monitor() {
            let origin = monitor.position();
            let area = monitor.size();
            let x = origin.x + (area.width as i32 - size.width as i32) / 2;
            let y = origin.y + (area.height as i32 - size.height as i32) / 2;
            self.window.set_outer_position(PhysicalPosition::new(x, y));
        }
    }
}
