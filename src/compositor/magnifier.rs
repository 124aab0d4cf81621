// compositor/magnifier.rs - Cursor Magnifier
//
// Samples a small square of the screenshot around the cursor and paints it
// enlarged next to the cursor, flipped to the other side near screen edges.

use image::{Rgba, RgbaImage};

use super::draw;
use crate::app::MagnifierSettings;
use crate::capture::{CaptureRect, Point};
use crate::constants::{colors, magnifier};

#[derive(Debug, Clone, Copy)]
pub struct Magnifier {
    settings: MagnifierSettings,
}

impl Magnifier {
    pub fn new(settings: MagnifierSettings) -> Self {
        Self { settings }
    }

    /// Screenshot area that gets enlarged
    pub fn source_rect(&self, cursor: Point) -> CaptureRect {
        let s = &self.settings;
        CaptureRect::new(
            cursor.x - (s.source_width / 2) as i32,
            cursor.y - (s.source_height / 2) as i32,
            s.source_width,
            s.source_height,
        )
    }

    /// Where the enlarged view goes on a `screen_width x screen_height` canvas
    pub fn placement(&self, cursor: Point, screen_width: u32, screen_height: u32) -> CaptureRect {
        let s = &self.settings;
        let offset = s.cursor_offset;
        let (zw, zh) = (s.zoom_width as i32, s.zoom_height as i32);

        let x = if cursor.x + offset + zw > screen_width as i32 {
            cursor.x - offset - zw
        } else {
            cursor.x + offset
        };
        let y = if cursor.y + offset + zh > screen_height as i32 {
            cursor.y - offset - zh
        } else {
            cursor.y + offset
        };
        CaptureRect::new(x, y, s.zoom_width, s.zoom_height)
    }

    /// Copy the source area; pixels off the screenshot come out black
    pub fn sample(&self, screenshot: &RgbaImage, cursor: Point) -> RgbaImage {
        let src = self.source_rect(cursor);
        let (width, height) = screenshot.dimensions();
        RgbaImage::from_fn(src.width, src.height, |dx, dy| {
            let x = src.x + dx as i32;
            let y = src.y + dy as i32;
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                *screenshot.get_pixel(x as u32, y as u32)
            } else {
                Rgba(colors::OFFSCREEN)
            }
        })
    }

    /// Paint the magnifier for `cursor` onto `canvas`
    pub fn draw(&self, canvas: &mut RgbaImage, screenshot: &RgbaImage, cursor: Point) -> CaptureRect {
        let s = &self.settings;
        let target = self.placement(cursor, canvas.width(), canvas.height());
        let zoomed = draw::scale_nearest(&self.sample(screenshot, cursor), s.zoom_width, s.zoom_height);
        draw::blit(canvas, &zoomed, target.x, target.y);

        let (zw, zh) = (s.zoom_width as i32, s.zoom_height as i32);
        let color = colors::OUTLINE;
        draw::hline(
            canvas,
            target.x + zw / 5 * 2,
            target.x + zw / 5 * 3,
            target.y + zh / 2,
            color,
        );
        draw::vline(
            canvas,
            target.x + zw / 2,
            target.y + zh / 5 * 2,
            target.y + zh / 5 * 3,
            color,
        );
        draw::rect_outline(canvas, target.inset(magnifier::OUTLINE_INSET), color);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnifier() -> Magnifier {
        Magnifier::new(MagnifierSettings::default())
    }

    #[test]
    fn placed_below_right_of_cursor_with_room() {
        let rect = magnifier().placement(Point::new(100, 100), 1920, 1080);
        assert_eq!(rect, CaptureRect::new(120, 120, 100, 100));
    }

    #[test]
    fn flips_near_right_and_bottom_edges() {
        let rect = magnifier().placement(Point::new(1850, 1000), 1920, 1080);
        assert_eq!(rect, CaptureRect::new(1730, 880, 100, 100));
    }

    #[test]
    fn exact_fit_does_not_flip() {
        // 1800 + 20 + 100 lands exactly on the right edge
        let rect = magnifier().placement(Point::new(1800, 0), 1920, 1080);
        assert_eq!(rect.x, 1820);
        let rect = magnifier().placement(Point::new(1801, 0), 1920, 1080);
        assert_eq!(rect.x, 1801 - 120);
    }

    #[test]
    fn source_is_centered_on_cursor() {
        assert_eq!(
            magnifier().source_rect(Point::new(50, 60)),
            CaptureRect::new(30, 40, 40, 40)
        );
    }

    #[test]
    fn sample_pads_with_black_off_screen() {
        let shot = RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255]));
        let sample = magnifier().sample(&shot, Point::new(0, 0));
        assert_eq!(sample.dimensions(), (40, 40));
        assert_eq!(sample.get_pixel(0, 0).0, colors::OFFSCREEN);
        assert_eq!(sample.get_pixel(39, 39).0, [255, 0, 0, 255]);
    }

    #[test]
    fn draw_paints_crosshair_and_inset_outline() {
        let shot = RgbaImage::from_pixel(400, 400, Rgba([10, 20, 30, 255]));
        let mut canvas = shot.clone();
        let target = magnifier().draw(&mut canvas, &shot, Point::new(100, 100));
        assert_eq!(target, CaptureRect::new(120, 120, 100, 100));
        // crosshair center
        assert_eq!(canvas.get_pixel(170, 170).0, colors::OUTLINE);
        // inset outline corner
        assert_eq!(canvas.get_pixel(122, 122).0, colors::OUTLINE);
        // magnified content between outline and crosshair
        assert_eq!(canvas.get_pixel(130, 130).0, [10, 20, 30, 255]);
    }
}
