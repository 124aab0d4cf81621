// capture/mod.rs - Screen Capture Module
//
// Grabs a whole monitor as raw pixels and turns it into an RGBA surface.
// Backends live in their own submodules behind the `CaptureEngine` trait.

mod mock;
mod rect;
mod xcap_backend;

pub use mock::MockCaptureEngine;
pub use rect::{CaptureRect, Point};
pub use xcap_backend::XcapCaptureEngine;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while grabbing or converting screen pixels
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no monitor found at ({x}, {y})")]
    NoMonitor { x: i32, y: i32 },

    #[error("capture backend failed: {0}")]
    Backend(String),

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("region {rect:?} does not overlap the {width}x{height} screenshot")]
    EmptyRegion {
        rect: CaptureRect,
        width: u32,
        height: u32,
    },
}

/// Channel order of a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Blue, green, red, alpha (GDI/DXGI style bitmaps)
    Bgra8,
    /// Red, green, blue, alpha
    Rgba8,
}

/// A captured frame containing pixel data
#[derive(Debug)]
pub struct CaptureFrame {
    /// Raw pixel data, `stride * height` bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Bytes per row (may include padding)
    pub stride: u32,
    /// Channel order of `data`
    pub format: PixelFormat,
}

impl CaptureFrame {
    /// Convert to a tightly packed RGBA image, dropping row padding and
    /// correcting the channel order.
    pub fn into_rgba_image(self) -> Result<RgbaImage, CaptureError> {
        let row_bytes = self.width as usize * 4;
        let stride = self.stride as usize;
        if stride < row_bytes {
            return Err(CaptureError::InvalidFrame(format!(
                "stride {} is smaller than a {}px row",
                stride, self.width
            )));
        }
        let needed = match self.height as usize {
            0 => 0,
            h => stride * (h - 1) + row_bytes,
        };
        if self.data.len() < needed {
            return Err(CaptureError::InvalidFrame(format!(
                "{} bytes for a {}x{} frame with stride {}",
                self.data.len(),
                self.width,
                self.height,
                stride
            )));
        }

        let mut pixels = if stride == row_bytes {
            let mut data = self.data;
            data.truncate(needed);
            data
        } else {
            let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
            for row in self.data.chunks(stride).take(self.height as usize) {
                packed.extend_from_slice(&row[..row_bytes]);
            }
            packed
        };

        if self.format == PixelFormat::Bgra8 {
            swap_red_blue(&mut pixels);
        }

        RgbaImage::from_raw(self.width, self.height, pixels)
            .ok_or_else(|| CaptureError::InvalidFrame("pixel buffer size mismatch".into()))
    }
}

/// Swap the first and third byte of every 4-byte pixel (BGRA <-> RGBA).
pub fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

/// Cut `rect` out of a full screenshot. The rectangle is clipped to the
/// screenshot first.
pub fn crop(screenshot: &RgbaImage, rect: CaptureRect) -> Result<RgbaImage, CaptureError> {
    let (width, height) = screenshot.dimensions();
    let clipped = rect
        .clamp_to(width, height)
        .ok_or(CaptureError::EmptyRegion { rect, width, height })?;
    Ok(image::imageops::crop_imm(
        screenshot,
        clipped.x as u32,
        clipped.y as u32,
        clipped.width,
        clipped.height,
    )
    .to_image())
}

/// Trait for platform-specific capture engines
pub trait CaptureEngine {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Grab the whole monitor containing `at` (desktop coordinates)
    fn capture_screen(&mut self, at: Point) -> Result<CaptureFrame, CaptureError>;
}

/// Which capture engine to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureBackend {
    /// Real desktop capture through xcap
    #[default]
    Xcap,
    /// Synthetic frames, no display access
    Mock,
}

/// Create a capture engine for the requested backend
pub fn create_capture_engine(backend: CaptureBackend) -> Box<dyn CaptureEngine> {
    match backend {
        CaptureBackend::Xcap => Box::new(XcapCaptureEngine::new()),
        CaptureBackend::Mock => Box::new(MockCaptureEngine::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_red_blue_keeps_green_and_alpha() {
        let mut px = vec![1, 2, 3, 4, 10, 20, 30, 40];
        swap_red_blue(&mut px);
        assert_eq!(px, vec![3, 2, 1, 4, 30, 20, 10, 40]);
    }

    #[test]
    fn bgra_frame_converts_to_rgba() {
        let frame = CaptureFrame {
            data: vec![0, 0, 255, 255, 255, 0, 0, 128],
            width: 2,
            height: 1,
            stride: 8,
            format: PixelFormat::Bgra8,
        };
        let img = frame.into_rgba_image().unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 128]);
    }

    #[test]
    fn padded_rows_are_dropped() {
        // 1 pixel per row, 4 bytes of padding
        let frame = CaptureFrame {
            data: vec![1, 2, 3, 4, 9, 9, 9, 9, 5, 6, 7, 8, 9, 9, 9, 9],
            width: 1,
            height: 2,
            stride: 8,
            format: PixelFormat::Rgba8,
        };
        let img = frame.into_rgba_image().unwrap();
        assert_eq!(img.as_raw(), &vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn last_row_may_omit_padding() {
        let frame = CaptureFrame {
            data: vec![1, 2, 3, 4, 0, 0, 5, 6, 7, 8],
            width: 1,
            height: 2,
            stride: 6,
            format: PixelFormat::Rgba8,
        };
        let img = frame.into_rgba_image().unwrap();
        assert_eq!(img.get_pixel(0, 1).0, [5, 6, 7, 8]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let frame = CaptureFrame {
            data: vec![0; 7],
            width: 2,
            height: 1,
            stride: 8,
            format: PixelFormat::Rgba8,
        };
        assert!(matches!(frame.into_rgba_image(), Err(CaptureError::InvalidFrame(_))));
    }

    #[test]
    fn narrow_stride_is_rejected() {
        let frame = CaptureFrame {
            data: vec![0; 16],
            width: 2,
            height: 2,
            stride: 4,
            format: PixelFormat::Rgba8,
        };
        assert!(matches!(frame.into_rgba_image(), Err(CaptureError::InvalidFrame(_))));
    }

    #[test]
    fn crop_clips_to_screenshot() {
        let shot = RgbaImage::from_fn(10, 10, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
        let out = crop(&shot, CaptureRect::new(8, -2, 5, 5)).unwrap();
        assert_eq!(out.dimensions(), (2, 3));
        assert_eq!(out.get_pixel(0, 0).0, [8, 0, 0, 255]);
    }

    #[test]
    fn crop_outside_screenshot_fails() {
        let shot = RgbaImage::new(10, 10);
        let err = crop(&shot, CaptureRect::new(20, 20, 5, 5)).unwrap_err();
        assert!(matches!(err, CaptureError::EmptyRegion { .. }));
    }
}
