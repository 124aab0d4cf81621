// compositor/draw.rs - Canvas Primitives
//
// Minimal raster operations on RGBA canvases. Everything clips against the
// canvas, so callers may pass rectangles that hang off the edge.

use image::{imageops, Rgba, RgbaImage};

use crate::capture::CaptureRect;

fn put(canvas: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, Rgba(color));
    }
}

/// Horizontal line from `x0` to `x1` inclusive
pub fn hline(canvas: &mut RgbaImage, x0: i32, x1: i32, y: i32, color: [u8; 4]) {
    for x in x0.min(x1)..=x0.max(x1) {
        put(canvas, x, y, color);
    }
}

/// Vertical line from `y0` to `y1` inclusive
pub fn vline(canvas: &mut RgbaImage, x: i32, y0: i32, y1: i32, color: [u8; 4]) {
    for y in y0.min(y1)..=y0.max(y1) {
        put(canvas, x, y, color);
    }
}

/// One pixel outline on the rectangle's own edge pixels
pub fn rect_outline(canvas: &mut RgbaImage, rect: CaptureRect, color: [u8; 4]) {
    if rect.is_empty() {
        return;
    }
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    hline(canvas, left, right, top, color);
    hline(canvas, left, right, bottom, color);
    vline(canvas, left, top, bottom, color);
    vline(canvas, right, top, bottom, color);
}

/// Copy `src` onto the canvas with its top-left at `(x, y)`
pub fn blit(canvas: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    imageops::replace(canvas, src, x as i64, y as i64);
}

/// Copy the `rect` area of `src` onto the same position of the canvas
pub fn blit_region(canvas: &mut RgbaImage, src: &RgbaImage, rect: CaptureRect) {
    let Some(rect) = rect.clamp_to(src.width(), src.height()) else {
        return;
    };
    let view = imageops::crop_imm(src, rect.x as u32, rect.y as u32, rect.width, rect.height);
    imageops::replace(canvas, &*view, rect.x as i64, rect.y as i64);
}

/// Darken an image as if seen through a black veil of the given opacity
pub fn veil(src: &RgbaImage, opacity: f32) -> RgbaImage {
    let keep = 1.0 - opacity.clamp(0.0, 1.0);
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in &mut px.0[..3] {
            *c = (*c as f32 * keep).round() as u8;
        }
    }
    out
}

/// Nearest-neighbour scale to exactly `width x height`
pub fn scale_nearest(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width.max(1), height.max(1), imageops::FilterType::Nearest)
}

/// Largest rectangle with `src`'s aspect ratio that fits the box, centered
pub fn fit_rect(src_width: u32, src_height: u32, box_width: u32, box_height: u32) -> CaptureRect {
    if src_width == 0 || src_height == 0 || box_width == 0 || box_height == 0 {
        return CaptureRect::default();
    }
    let scale = (box_width as f64 / src_width as f64).min(box_height as f64 / src_height as f64);
    let width = ((src_width as f64 * scale).round() as u32).clamp(1, box_width);
    let height = ((src_height as f64 * scale).round() as u32).clamp(1, box_height);
    CaptureRect::new(
        ((box_width - width) / 2) as i32,
        ((box_height - height) / 2) as i32,
        width,
        height,
    )
}

/// Scale `src` to fit the canvas, letterboxed and centered. Enlarging keeps
/// hard pixel edges; shrinking is filtered.
pub fn blit_fitted(canvas: &mut RgbaImage, src: &RgbaImage) -> CaptureRect {
    let target = fit_rect(src.width(), src.height(), canvas.width(), canvas.height());
    if target.is_empty() {
        return target;
    }
    let scaled = if target.width >= src.width() && target.height >= src.height() {
        scale_nearest(src, target.width, target.height)
    } else {
        imageops::resize(src, target.width, target.height, imageops::FilterType::Triangle)
    };
    blit(canvas, &scaled, target.x, target.y);
    target
}
