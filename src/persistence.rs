// persistence.rs - Save Dialog and Image Writing
//
// Asks the user for a destination with the native save dialog and encodes
// the capture in the format matching the chosen extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::info;
use thiserror::Error;

use crate::constants::save;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unsupported image extension {0:?}")]
    UnsupportedFormat(String),

    #[error("failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to prepare {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Image formats the save dialog offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
}

impl SaveFormat {
    /// Pick the format for `path`'s extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, PersistError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            _ => Err(PersistError::UnsupportedFormat(ext)),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Append the default extension when the user typed none
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(save::DEFAULT_EXTENSION)
    }
}

/// Show the native save dialog. Returns `None` when the user cancels.
pub fn prompt_save_path(start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save screenshot")
        .set_file_name(save::DEFAULT_FILE_NAME)
        .add_filter("PNG (.png)", &["png"])
        .add_filter("JPG (.jpg)", &["jpg", "jpeg"])
        .add_filter("BitMap (.bmp)", &["bmp"])
        .add_filter("All", &["*"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file().map(with_default_extension)
}

/// Message shown to the user for a failure: the summary followed by the
/// error and each of its causes on their own line
pub fn error_report(summary: &str, err: &(dyn std::error::Error + 'static)) -> String {
    let mut report = format!("{}\n\n{}", summary, err);
    let mut source = err.source();
    while let Some(cause) = source {
        report.push_str(&format!("\ncaused by: {}", cause));
        source = cause.source();
    }
    report
}

/// Blocking native error box
pub fn show_error(title: &str, report: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(report)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

/// Encode `capture` to `path`, picking the format from the extension
pub fn save_image(capture: &RgbaImage, path: &Path) -> Result<SaveFormat, PersistError> {
    let format = SaveFormat::from_path(path)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| PersistError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let encode_err = |source| PersistError::Encode {
        path: path.to_path_buf(),
        source,
    };
    match format {
        // JPEG has no alpha channel
        SaveFormat::Jpeg => DynamicImage::ImageRgba8(capture.clone())
            .to_rgb8()
            .save_with_format(path, format.image_format())
            .map_err(encode_err)?,
        _ => capture
            .save_with_format(path, format.image_format())
            .map_err(encode_err)?,
    }

    info!(
        "Saved {}x{} capture to {:?} as {:?}",
        capture.width(),
        capture.height(),
        path,
        format
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_report_lists_causes() {
        let err = PersistError::Io {
            path: PathBuf::from("/shots"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        let report = error_report("Failed to save screenshot", &err);
        assert!(report.starts_with("Failed to save screenshot\n\nfailed to prepare"));
        assert!(report.ends_with("\ncaused by: access denied"));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("a.PNG")).unwrap(), SaveFormat::Png);
        assert_eq!(SaveFormat::from_path(Path::new("a.jpeg")).unwrap(), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_path(Path::new("dir/a.bmp")).unwrap(), SaveFormat::Bmp);
        assert!(matches!(
            SaveFormat::from_path(Path::new("a.gif")),
            Err(PersistError::UnsupportedFormat(ext)) if ext == "gif"
        ));
    }

    #[test]
    fn missing_extension_becomes_png() {
        assert_eq!(with_default_extension("shot".into()), PathBuf::from("shot.png"));
        assert_eq!(with_default_extension("shot.bmp".into()), PathBuf::from("shot.bmp"));
    }
}
