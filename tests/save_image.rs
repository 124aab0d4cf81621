use image::{Rgba, RgbaImage};
use snapframe::persistence::{save_image, PersistError, SaveFormat};
use tempfile::TempDir;

fn sample() -> RgbaImage {
    RgbaImage::from_fn(16, 8, |x, y| Rgba([x as u8 * 10, y as u8 * 20, 128, 255]))
}

#[test]
fn png_round_trips_pixels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shot.png");
    assert_eq!(save_image(&sample(), &path).unwrap(), SaveFormat::Png);

    let loaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(loaded, sample());
}

#[test]
fn bmp_is_written_as_bitmap() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shot.bmp");
    save_image(&sample(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"BM");
    let loaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(loaded.get_pixel(3, 2).0, [30, 40, 128, 255]);
}

#[test]
fn jpeg_drops_alpha() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shot.JPG");
    assert_eq!(save_image(&sample(), &path).unwrap(), SaveFormat::Jpeg);

    let loaded = image::open(&path).unwrap();
    assert_eq!(loaded.color(), image::ColorType::Rgb8);
    assert_eq!((loaded.width(), loaded.height()), (16, 8));
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("shot.png");
    save_image(&sample(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn unknown_extension_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shot.gif");
    let err = save_image(&sample(), &path).unwrap_err();
    assert!(matches!(err, PersistError::UnsupportedFormat(_)));
    assert!(!path.exists());
}
