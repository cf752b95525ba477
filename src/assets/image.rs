//! Texture and skybox decoding via the `image` crate.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::error::AssetError;

/// Largest edge uploaded as-is; bigger images are scaled down to fit.
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// Tightly packed RGBA8 pixels, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Six square faces in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyboxImages {
    pub size: u32,
    pub faces: Vec<DecodedImage>,
}

pub fn load_image(path: &Path) -> Result<DecodedImage, AssetError> {
    let mut img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    if img.width() > MAX_TEXTURE_SIZE || img.height() > MAX_TEXTURE_SIZE {
        log::debug!(
            "Scaling {} down from {}x{}",
            path.display(),
            img.width(),
            img.height()
        );
        img = img.resize(MAX_TEXTURE_SIZE, MAX_TEXTURE_SIZE, FilterType::Triangle);
    }

    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Loads the six cube faces; all must be square and share the first face's size.
pub fn load_skybox(paths: &[PathBuf; 6]) -> Result<SkyboxImages, AssetError> {
    let mut faces = Vec::with_capacity(6);
    let mut size = None;

    for path in paths {
        let face = load_image(path)?;
        let expected = *size.get_or_insert(face.width);
        if face.width != expected || face.height != expected {
            return Err(AssetError::SkyboxFaceSize {
                path: path.clone(),
                width: face.width,
                height: face.height,
                expected,
            });
        }
        faces.push(face);
    }

    Ok(SkyboxImages {
        size: size.unwrap_or(0),
        faces,
    })
}
