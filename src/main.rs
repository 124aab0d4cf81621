// main.rs - SnapFrame Application Entry Point
//
// This is the orchestrator for the entire application. It manages:
// 1. Window creation and its per-mode presentation
// 2. Event loop handling (mouse/keyboard input -> state machine commands)
// 3. Coordination between capture, composition, rendering and saving

mod renderer;
mod window_manager;

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use image::RgbaImage;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use snapframe::app::{input, AppMode, AppState, Command, InputEvent, Settings};
use snapframe::capture::{self, create_capture_engine, CaptureEngine, CaptureRect};
use snapframe::compositor::{preview_window_size, Compositor, Scene, Snapshot};
use snapframe::persistence;

use renderer::Renderer;
use window_manager::AppWindow;

/// Main application state
struct SnapFrameApp {
    settings: Settings,

    /// Mode and selection state machine
    state: AppState,

    compositor: Compositor,

    capture_engine: Box<dyn CaptureEngine>,

    window: Option<AppWindow>,

    renderer: Option<Renderer>,

    /// Frozen screen the user is selecting on
    snapshot: Option<Snapshot>,

    /// Region cut out of the snapshot, shown while previewing
    capture: Option<RgbaImage>,

    /// Last successfully saved capture, shown in idle mode
    last_saved: Option<RgbaImage>,

    /// Next scheduled repaint while selecting
    next_frame: Instant,
}

impl SnapFrameApp {
    fn new(settings: Settings) -> Self {
        let capture_engine = create_capture_engine(settings.capture_backend);
        info!("Using {} capture engine", capture_engine.name());

        Self {
            compositor: Compositor::new(&settings),
            settings,
            state: AppState::new(),
            capture_engine,
            window: None,
            renderer: None,
            snapshot: None,
            capture: None,
            last_saved: None,
            next_frame: Instant::now(),
        }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.settings.frame_interval_ms)
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Run one input event through the state machine and act on the result
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        let command = self.state.handle(event);
        self.execute(event_loop, command);
    }

    fn execute(&mut self, event_loop: &ActiveEventLoop, command: Command) {
        match command {
            Command::None => {}
            Command::Redraw => self.request_redraw(),
            Command::Quit => {
                info!("Quit requested, shutting down");
                event_loop.exit();
            }
            Command::TakeSnapshot => match self.take_snapshot() {
                Ok(()) => {
                    self.last_saved = None;
                    if let Some(window) = &self.window {
                        window.show_overlay();
                    }
                    self.next_frame = Instant::now();
                }
                Err(e) => {
                    error!("Failed to take screenshot: {:#}", e);
                    self.state.snapshot_failed();
                    self.show_idle();
                }
            },
            Command::ShowOverlay => {
                self.capture = None;
                if let Some(window) = &self.window {
                    window.show_overlay();
                }
            }
            Command::ShowIdle => {
                self.snapshot = None;
                self.show_idle();
            }
            Command::Capture(rect) => {
                if let Err(e) = self.capture_region(rect) {
                    error!("Failed to capture region: {:#}", e);
                    self.state.capture_failed();
                    self.request_redraw();
                }
            }
            Command::Save => self.save_capture(),
        }
    }

    fn show_idle(&self) {
        if let Some(window) = &self.window {
            window.show_idle(self.settings.window_width, self.settings.window_height);
        }
    }

    /// Hide the window, grab the monitor under it and keep the result frozen
    fn take_snapshot(&mut self) -> Result<()> {
        let window = self.window.as_ref().context("No window")?;
        let at = window.monitor_center();
        window.hide();
        // Give the compositor time to take our window off screen
        thread::sleep(Duration::from_millis(self.settings.capture_delay_ms));

        let frame = self
            .capture_engine
            .capture_screen(at)
            .context("Screen capture failed")?;
        let image = frame.into_rgba_image()?;
        info!("Captured {}x{} screenshot", image.width(), image.height());

        self.snapshot = Some(Snapshot::new(image, self.settings.overlay_opacity));
        Ok(())
    }

    fn capture_region(&mut self, rect: CaptureRect) -> Result<()> {
        let snapshot = self.snapshot.as_ref().context("No screenshot to cut from")?;
        let image = capture::crop(snapshot.image(), rect)?;
        let (screen_w, screen_h) = snapshot.dimensions();
        let (w, h) = preview_window_size(image.width(), image.height(), screen_w, screen_h);
        info!(
            "Captured region {:?} ({}x{}), previewing at {}x{}",
            rect,
            image.width(),
            image.height(),
            w,
            h
        );

        self.capture = Some(image);
        if let Some(window) = &self.window {
            window.show_preview(w, h);
        }
        Ok(())
    }

    fn save_capture(&mut self) {
        self.snapshot = None;
        self.last_saved = None;
        self.show_idle();

        let Some(capture) = self.capture.take() else {
            warn!("Nothing to save");
            return;
        };

        let Some(path) = persistence::prompt_save_path(self.settings.last_save_dir.as_deref()) else {
            info!("Save cancelled");
            self.request_redraw();
            return;
        };

        match persistence::save_image(&capture, &path) {
            Ok(_) => {
                self.last_saved = Some(capture);
                self.remember_save_dir(&path);
            }
            Err(e) => {
                error!("Failed to save screenshot: {}", e);
                let report = persistence::error_report("Failed to save screenshot", &e);
                persistence::show_error("Save failed", &report);
            }
        }
        self.request_redraw();
    }

    fn remember_save_dir(&mut self, path: &Path) {
        if let Err(e) = self
            .settings
            .remember_save_dir(path, &Settings::config_path())
        {
            warn!("Failed to persist settings: {:#}", e);
        }
    }

    fn redraw(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        let (width, height) = renderer.size();

        let scene = match (self.state.mode(), &self.snapshot, &self.capture) {
            (AppMode::Selecting, Some(snapshot), _) => Scene::Selecting {
                snapshot,
                cursor: self.state.cursor(),
                selection: self.state.visible_selection(),
            },
            (AppMode::Previewing, _, Some(capture)) => Scene::Preview { capture },
            _ => Scene::Idle {
                saved: self.last_saved.as_ref(),
            },
        };

        let canvas = self.compositor.compose(scene, width, height);
        if let Err(e) = renderer.present(&canvas) {
            error!("Render error: {:#}", e);
        }

        let frames = self.state.tick();
        if frames % 500 == 0 {
            debug!("Rendered frame #{}", frames);
        }
    }
}

impl ApplicationHandler for SnapFrameApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        info!("Application resumed");
        if self.window.is_some() {
            return;
        }

        let window = match AppWindow::new(
            event_loop,
            &self.settings.window_title,
            self.settings.window_width,
            self.settings.window_height,
        ) {
            Ok(window) => window,
            Err(e) => {
                fatal("Failed to create window", &e);
                event_loop.exit();
                return;
            }
        };

        match Renderer::new(window.window()) {
            Ok(renderer) => {
                info!("Renderer initialized");
                self.renderer = Some(renderer);
            }
            Err(e) => {
                fatal("Failed to initialize renderer", &e);
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);
    }

    /// Called when the event loop is about to block waiting for events
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.mode() != AppMode::Selecting {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        // Fixed-interval repaint keeps the magnifier live while selecting
        let now = Instant::now();
        if now >= self.next_frame {
            self.request_redraw();
            self.next_frame = now + self.frame_interval();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(AppWindow::window_id) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.dispatch(event_loop, InputEvent::CloseRequested),

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::Resized(size) => {
                debug!("Window resized to {:?}", size);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = input::key_input(event.physical_key, event.state, event.repeat) {
                    self.dispatch(event_loop, key);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(click) = input::mouse_input(button, state, self.state.cursor()) {
                    self.dispatch(event_loop, click);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(event_loop, input::cursor_input(position));
            }

            _ => {}
        }
    }
}

/// Log a failure the application cannot continue from and tell the user
fn fatal(summary: &str, err: &anyhow::Error) {
    error!("{}: {:#}", summary, err);
    persistence::show_error("SnapFrame", &persistence::error_report(summary, &**err));
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("SnapFrame starting...");
    let settings = Settings::load();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            let e = anyhow::Error::new(e);
            fatal("Failed to start the event loop", &e);
            return Err(e);
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = SnapFrameApp::new(settings);
    event_loop.run_app(&mut app)?;

    info!("SnapFrame shutting down");
    Ok(())
}
