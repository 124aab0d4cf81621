// capture/mock.rs - Synthetic Capture Backend
//
// Produces deterministic BGRA frames with padded rows, the layout a GDI or
// DXGI grab delivers, without touching a display.

use log::debug;

use super::{CaptureEngine, CaptureError, CaptureFrame, PixelFormat, Point};

/// Bytes of padding appended to every row
const ROW_PADDING: u32 = 8;

/// Mock capture engine for tests and headless runs
#[derive(Debug, Clone)]
pub struct MockCaptureEngine {
    width: u32,
    height: u32,
    fail_with: Option<String>,
    captures: usize,
}

impl Default for MockCaptureEngine {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl MockCaptureEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fail_with: None,
            captures: 0,
        }
    }

    /// Make every capture fail with a backend error
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Number of successful captures so far
    pub fn captures(&self) -> usize {
        self.captures
    }

    /// RGBA value of the synthetic screen at `(x, y)`
    pub fn pixel_at(x: u32, y: u32) -> [u8; 4] {
        [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255]
    }
}

impl CaptureEngine for MockCaptureEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn capture_screen(&mut self, at: Point) -> Result<CaptureFrame, CaptureError> {
        if let Some(message) = &self.fail_with {
            return Err(CaptureError::Backend(message.clone()));
        }
        debug!("Mock capture at ({}, {})", at.x, at.y);

        let stride = self.width * 4 + ROW_PADDING;
        let mut data = vec![0u8; (stride * self.height) as usize];
        for (y, row) in data.chunks_exact_mut(stride as usize).enumerate() {
            for x in 0..self.width {
                let [r, g, b, a] = Self::pixel_at(x, y as u32);
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&[b, g, r, a]);
            }
        }
        self.captures += 1;

        Ok(CaptureFrame {
            data,
            width: self.width,
            height: self.height,
            stride,
            format: PixelFormat::Bgra8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_frame_round_trips_to_screen_colors() {
        let mut engine = MockCaptureEngine::new(300, 4);
        let img = engine
            .capture_screen(Point::default())
            .unwrap()
            .into_rgba_image()
            .unwrap();
        assert_eq!(img.dimensions(), (300, 4));
        assert_eq!(img.get_pixel(299, 3).0, MockCaptureEngine::pixel_at(299, 3));
        assert_eq!(engine.captures(), 1);
    }

    #[test]
    fn injected_error_is_returned() {
        let mut engine = MockCaptureEngine::new(4, 4).with_error("denied");
        let err = engine.capture_screen(Point::default()).unwrap_err();
        assert!(err.to_string().contains("denied"));
        assert_eq!(engine.captures(), 0);
    }
}
