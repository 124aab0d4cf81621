// compositor/mod.rs - Frame Composition
//
// Builds the RGBA canvas shown in the window for each mode. The renderer
// only uploads and presents what this module produces.

mod draw;
mod magnifier;

pub use draw::{fit_rect, veil};
pub use magnifier::Magnifier;

use std::path::Path;

use image::{Rgba, RgbaImage};
use log::{info, warn};

use crate::app::Settings;
use crate::capture::{CaptureRect, Point};
use crate::constants::colors;

/// Length of the corner marks on the placeholder cover
const CORNER_SIZE: i32 = 40;
/// Distance of the corner marks from the canvas edge
const CORNER_MARGIN: i32 = 60;

/// Frozen screenshot plus its veiled copy, prepared once per selection
#[derive(Debug, Clone)]
pub struct Snapshot {
    image: RgbaImage,
    veiled: RgbaImage,
}

impl Snapshot {
    pub fn new(image: RgbaImage, opacity: f32) -> Self {
        let veiled = draw::veil(&image, opacity);
        Self { image, veiled }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// What to draw this frame
#[derive(Debug, Clone, Copy)]
pub enum Scene<'a> {
    /// Cover image, or the last saved capture
    Idle { saved: Option<&'a RgbaImage> },
    /// Overlay with selection and magnifier
    Selecting {
        snapshot: &'a Snapshot,
        cursor: Point,
        selection: Option<CaptureRect>,
    },
    /// The captured region
    Preview { capture: &'a RgbaImage },
}

pub struct Compositor {
    magnifier: Magnifier,
    cover: Option<RgbaImage>,
    saved_cover: Option<RgbaImage>,
}

impl Compositor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            magnifier: Magnifier::new(settings.magnifier),
            cover: settings.cover_image.as_deref().and_then(load_image),
            saved_cover: settings.saved_image.as_deref().and_then(load_image),
        }
    }

    /// Render `scene` onto a fresh `width x height` canvas
    pub fn compose(&self, scene: Scene<'_>, width: u32, height: u32) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(width.max(1), height.max(1), Rgba(colors::BACKGROUND));
        match scene {
            Scene::Idle { saved: None } => match &self.cover {
                Some(cover) => {
                    draw::blit_fitted(&mut canvas, cover);
                }
                None => paint_placeholder_cover(&mut canvas),
            },
            Scene::Idle { saved: Some(capture) } => match &self.saved_cover {
                Some(cover) => {
                    draw::blit_fitted(&mut canvas, cover);
                }
                None => {
                    let area = draw::blit_fitted(&mut canvas, capture);
                    draw::rect_outline(&mut canvas, area, colors::SAVED_FRAME);
                }
            },
            Scene::Selecting {
                snapshot,
                cursor,
                selection,
            } => {
                draw::blit(&mut canvas, &snapshot.veiled, 0, 0);
                if let Some(rect) = selection {
                    draw::blit_region(&mut canvas, &snapshot.image, rect);
                    draw::rect_outline(&mut canvas, rect, colors::OUTLINE);
                }
                self.magnifier.draw(&mut canvas, &snapshot.image, cursor);
            }
            Scene::Preview { capture } => {
                draw::blit_fitted(&mut canvas, capture);
            }
        }
        canvas
    }
}

/// Window size used to preview a `width x height` capture taken from a
/// `screen_width x screen_height` monitor.
///
/// Small captures are shown 1:1, tiny ones four times enlarged, and anything
/// reaching half the screen is shrunk to two thirds.
pub fn preview_window_size(width: u32, height: u32, screen_width: u32, screen_height: u32) -> (u32, u32) {
    let (w, h) = if width < screen_width / 2 && height < screen_height / 2 {
        let tiny = screen_height / 10;
        if width > tiny && height > tiny {
            (width, height)
        } else {
            (width * 4, height * 4)
        }
    } else {
        (width * 2 / 3, height * 2 / 3)
    };
    (w.max(1), h.max(1))
}

fn load_image(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => {
            info!("Loaded image {:?}", path);
            Some(img.to_rgba8())
        }
        Err(e) => {
            warn!("Failed to load image {:?}: {}", path, e);
            None
        }
    }
}

/// Vertical gradient with viewfinder corner marks
fn paint_placeholder_cover(canvas: &mut RgbaImage) {
    let height = canvas.height().max(1) as f32;
    for (_, y, px) in canvas.enumerate_pixels_mut() {
        let t = y as f32 / height;
        let mut c = [0u8; 4];
        for (i, ch) in c.iter_mut().enumerate() {
            let a = colors::COVER_TOP[i] as f32;
            let b = colors::COVER_BOTTOM[i] as f32;
            *ch = (a + (b - a) * t).round() as u8;
        }
        *px = Rgba(c);
    }

    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let corners = [
        (CORNER_MARGIN, CORNER_MARGIN, 1, 1),
        (w - 1 - CORNER_MARGIN, CORNER_MARGIN, -1, 1),
        (CORNER_MARGIN, h - 1 - CORNER_MARGIN, 1, -1),
        (w - 1 - CORNER_MARGIN, h - 1 - CORNER_MARGIN, -1, -1),
    ];
    for (x, y, dx, dy) in corners {
        for thickness in 0..3 {
            draw::hline(canvas, x, x + dx * CORNER_SIZE, y + dy * thickness, colors::OUTLINE);
            draw::vline(canvas, x + dx * thickness, y, y + dy * CORNER_SIZE, colors::OUTLINE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compositor() -> Compositor {
        Compositor::new(&Settings::default())
    }

    #[test]
    fn preview_size_rules() {
        let (sw, sh) = (1920, 1080);
        // mid-sized: shown as is
        assert_eq!(preview_window_size(300, 200, sw, sh), (300, 200));
        // tiny: enlarged four times
        assert_eq!(preview_window_size(50, 200, sw, sh), (200, 800));
        // large: two thirds
        assert_eq!(preview_window_size(1200, 300, sw, sh), (800, 200));
        assert_eq!(preview_window_size(1, 1, sw, sh), (4, 4));
    }

    #[test]
    fn preview_size_is_never_zero() {
        assert_eq!(preview_window_size(1, 1, 2, 2), (1, 1));
    }

    #[test]
    fn selecting_scene_veils_outside_and_keeps_selection() {
        let snapshot = Snapshot::new(RgbaImage::from_pixel(400, 300, Rgba([100, 100, 100, 255])), 0.5);
        let scene = Scene::Selecting {
            snapshot: &snapshot,
            cursor: Point::new(390, 290),
            selection: Some(CaptureRect::new(10, 10, 50, 50)),
        };
        let frame = compositor().compose(scene, 400, 300);
        assert_eq!(frame.get_pixel(300, 20).0, [50, 50, 50, 255]);
        assert_eq!(frame.get_pixel(30, 30).0, [100, 100, 100, 255]);
        assert_eq!(frame.get_pixel(10, 10).0, colors::OUTLINE);
    }

    #[test]
    fn preview_scene_fills_canvas_with_capture() {
        let capture = RgbaImage::from_pixel(20, 10, Rgba([1, 2, 3, 255]));
        let frame = compositor().compose(Scene::Preview { capture: &capture }, 40, 20);
        assert_eq!(frame.dimensions(), (40, 20));
        assert_eq!(frame.get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(frame.get_pixel(39, 19).0, [1, 2, 3, 255]);
    }

    #[test]
    fn idle_after_save_frames_the_capture() {
        let capture = RgbaImage::from_pixel(10, 10, Rgba([9, 9, 9, 255]));
        let frame = compositor().compose(Scene::Idle { saved: Some(&capture) }, 40, 20);
        // capture letterboxed to 20x20 at x = 10
        assert_eq!(frame.get_pixel(10, 0).0, colors::SAVED_FRAME);
        assert_eq!(frame.get_pixel(20, 10).0, [9, 9, 9, 255]);
        assert_eq!(frame.get_pixel(2, 10).0, colors::BACKGROUND);
    }

    #[test]
    fn placeholder_cover_has_gradient() {
        let frame = compositor().compose(Scene::Idle { saved: None }, 800, 600);
        assert_eq!(frame.get_pixel(400, 0).0, colors::COVER_TOP);
        assert_ne!(frame.get_pixel(400, 599).0, colors::COVER_TOP);
        assert_eq!(frame.get_pixel(60, 60).0, colors::OUTLINE);
    }
}
