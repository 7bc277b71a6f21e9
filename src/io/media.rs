// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (images and video frames).
//!
//! This module handles loading image files, converting them to formats
//! suitable for display in egui, and the PNG data-URL codec annotation
//! snapshots travel through.

use std::io::Cursor;
use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, RgbaImage};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A decoded image ready for texture upload.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Load an image file as RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_rgba8();
    Ok(LoadedImage {
        width: img.width(),
        height: img.height(),
        pixels: img.into_raw(),
    })
}

/// Encode a raster as a `data:image/png;base64,` URL.
pub fn encode_png_data_url(img: &RgbaImage) -> Result<String> {
    let mut bytes: Vec<u8> = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode snapshot PNG")?;
    let b64 = general_purpose::STANDARD.encode(&bytes);
    Ok(format!("{PNG_DATA_URL_PREFIX}{b64}"))
}

/// Decode a base64 image data URL back into a raster. Accepts any
/// `data:image/*;base64,` payload the `image` crate can sniff.
pub fn decode_image_data_url(data_url: &str) -> Result<RgbaImage> {
    let Some((header, payload)) = data_url.split_once(";base64,") else {
        bail!("not a base64 data URL");
    };
    if !header.starts_with("data:image/") {
        bail!("not an image data URL: {header:?}");
    }
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .context("snapshot payload is not valid base64")?;
    let img = image::load_from_memory(&bytes).context("snapshot payload is not a decodable image")?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_data_url_roundtrip() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 0, Rgba([0, 255, 0, 128]));

        let url = encode_png_data_url(&img).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let back = decode_image_data_url(&url).unwrap();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_rejects_non_data_urls() {
        assert!(decode_image_data_url("hello world").is_err());
        assert!(decode_image_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(decode_image_data_url("data:image/png;base64,!!!").is_err());
        assert!(decode_image_data_url("data:image/png;base64,aGk=").is_err());
    }
}
