// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared binary assets: font, logo, seal.
//
// Loaded once before a batch and shared read-only by every generation, so
// the bytes live behind `Arc` and are never mutated after construction.
// Logo and seal are decoded here, once; an image that does not decode is
// treated exactly like a missing one.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use urkunde_core::error::{Result, UrkundeError};
use urkunde_core::types::ImageRef;

/// sfnt signatures accepted as font data: TrueType, OpenType/CFF, Apple
/// TrueType, and TrueType collections.
const FONT_SIGNATURES: [[u8; 4]; 4] = [
    [0x00, 0x01, 0x00, 0x00],
    *b"OTTO",
    *b"true",
    *b"ttcf",
];

/// An image decoded to 8-bit RGB, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    /// Row-major RGB8 pixels, `width * height * 3` bytes.
    pub rgb: Arc<[u8]>,
}

impl DecodedImage {
    /// Decode PNG, JPEG, or any other format the `image` crate recognises.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let dynamic_image = ::image::load_from_memory(bytes).map_err(|err| {
            UrkundeError::ImageError(format!("failed to decode image: {}", err))
        })?;
        let width = dynamic_image.width() as usize;
        let height = dynamic_image.height() as usize;
        let rgb_image = dynamic_image.to_rgb8();
        Ok(Self {
            width,
            height,
            rgb: rgb_image.into_raw().into(),
        })
    }
}

/// Immutable asset set for one batch run.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    font: Arc<[u8]>,
    logo: Option<DecodedImage>,
    seal: Option<DecodedImage>,
}

impl AssetBundle {
    /// Build a bundle from bytes already in memory.
    ///
    /// Missing or unrecognisable font bytes are fatal. Missing, empty, or
    /// undecodable images are not: they are logged and documents skip
    /// drawing them.
    pub fn new(font: Vec<u8>, logo: Option<Vec<u8>>, seal: Option<Vec<u8>>) -> Result<Self> {
        if font.is_empty() {
            return Err(UrkundeError::FontMissing);
        }
        if font.len() < 12 || !FONT_SIGNATURES.iter().any(|sig| font.starts_with(sig)) {
            return Err(UrkundeError::InvalidFont(
                "data does not start with an sfnt signature".into(),
            ));
        }
        Ok(Self {
            font: font.into(),
            logo: decode_optional(ImageRef::Logo, logo),
            seal: decode_optional(ImageRef::Seal, seal),
        })
    }

    /// Read assets from disk. Image paths that are absent or unreadable are
    /// logged and skipped.
    pub fn load(font: &Path, logo: Option<&Path>, seal: Option<&Path>) -> Result<Self> {
        let font_bytes = std::fs::read(font).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                UrkundeError::FontMissing
            } else {
                UrkundeError::Io(err)
            }
        })?;
        let bundle = Self::new(font_bytes, read_optional(logo), read_optional(seal))?;
        info!(
            font = %font.display(),
            logo = bundle.logo.is_some(),
            seal = bundle.seal.is_some(),
            "loaded assets"
        );
        Ok(bundle)
    }

    pub fn font(&self) -> &[u8] {
        &self.font
    }

    pub fn image(&self, image: ImageRef) -> Option<&DecodedImage> {
        match image {
            ImageRef::Logo => self.logo.as_ref(),
            ImageRef::Seal => self.seal.as_ref(),
        }
    }

    pub fn has_image(&self, image: ImageRef) -> bool {
        self.image(image).is_some()
    }
}

fn decode_optional(image: ImageRef, bytes: Option<Vec<u8>>) -> Option<DecodedImage> {
    let bytes = bytes.filter(|b| !b.is_empty())?;
    match DecodedImage::decode(&bytes) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!(?image, error = %err, "image asset does not decode, skipping");
            None
        }
    }
}

fn read_optional(path: Option<&Path>) -> Option<Vec<u8>> {
    let path = path?;
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "image asset unavailable, skipping");
            None
        }
    }
}
