use std::path::Path;

use image::ImageReader;

use crate::core::{ImageRef, ImageSource, resolve_image_source};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageProbe {
    Loaded {
        path: String,
        width: u32,
        height: u32,
    },
    LoadFailed {
        path: String,
        reason: String,
    },
    InvalidPath,
}

fn decode_dimensions(full: &Path) -> Result<(u32, u32), String> {
    let reader = ImageReader::open(full)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| e.to_string())?;
    reader.into_dimensions().map_err(|e| e.to_string())
}

/// Relative paths are taken from `data_dir`.
pub fn probe_image(data_dir: &Path, image: &ImageRef) -> ImageProbe {
    let path = match resolve_image_source(image) {
        ImageSource::Resolved(path) => path,
        ImageSource::Invalid => return ImageProbe::InvalidPath,
    };
    let full = data_dir.join(&path);
    if !full.is_file() {
        tracing::warn!(path = %full.display(), "image file missing");
        return ImageProbe::LoadFailed {
            path,
            reason: "not a file".to_string(),
        };
    }
    match decode_dimensions(&full) {
        Ok((width, height)) => ImageProbe::Loaded {
            path,
            width,
            height,
        },
        Err(reason) => {
            tracing::warn!(path = %full.display(), error = %reason, "image failed to load");
            ImageProbe::LoadFailed { path, reason }
        }
    }
}
