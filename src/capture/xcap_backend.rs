// capture/xcap_backend.rs - Desktop Capture via xcap
//
// xcap wraps GDI/DXGI on Windows, CoreGraphics on macOS and X11/the
// screenshot portal on Linux, and hands back RGBA images.

use log::{debug, warn};
use xcap::Monitor;

use super::{CaptureEngine, CaptureError, CaptureFrame, PixelFormat, Point};

/// Capture engine backed by the `xcap` crate
#[derive(Debug, Default)]
pub struct XcapCaptureEngine;

impl XcapCaptureEngine {
    pub fn new() -> Self {
        Self
    }

    fn monitor_at(at: Point) -> Result<Monitor, CaptureError> {
        match Monitor::from_point(at.x, at.y) {
            Ok(monitor) => Ok(monitor),
            Err(e) => {
                warn!("No monitor at ({}, {}): {}, falling back to primary", at.x, at.y, e);
                let monitors =
                    Monitor::all().map_err(|e| CaptureError::Backend(e.to_string()))?;
                let mut fallback = None;
                for monitor in monitors {
                    if monitor.is_primary().unwrap_or(false) {
                        return Ok(monitor);
                    }
                    fallback.get_or_insert(monitor);
                }
                fallback.ok_or(CaptureError::NoMonitor { x: at.x, y: at.y })
            }
        }
    }
}

impl CaptureEngine for XcapCaptureEngine {
    fn name(&self) -> &'static str {
        "xcap"
    }

    fn capture_screen(&mut self, at: Point) -> Result<CaptureFrame, CaptureError> {
        let monitor = Self::monitor_at(at)?;
        debug!("Capturing monitor {:?}", monitor.name().unwrap_or_default());

        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        let (width, height) = image.dimensions();

        Ok(CaptureFrame {
            data: image.into_raw(),
            width,
            height,
            stride: width * 4,
            format: PixelFormat::Rgba8,
        })
    }
}
