//! Image metadata probing and upload validation rules.

use std::io::Cursor;

use image::ImageFormat;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Metadata probed from raw image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub size: usize,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageMeta {
    /// Sniffs format and dimensions from raw bytes without a full decode.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` when the bytes are not a recognizable image
    pub fn probe(bytes: &[u8]) -> Result<Self, DomainError> {
        let reader = image::io::Reader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| {
                DomainError::validation("image", format!("unreadable image bytes: {}", e))
            })?;
        let format = reader.format().ok_or_else(|| {
            DomainError::validation("image", "unrecognized image format")
        })?;
        let (width, height) = reader.into_dimensions().map_err(|e| {
            DomainError::validation("image", format!("failed to decode image header: {}", e))
        })?;

        Ok(Self {
            size: bytes.len(),
            format,
            width,
            height,
        })
    }

    fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// A named validation rule set for one upload use case.
#[derive(Debug, Clone)]
pub struct ImageRule {
    pub name: &'static str,
    pub allowed_formats: &'static [ImageFormat],
    pub max_bytes: usize,
    /// Maximum width and height; `None` means unbounded.
    pub max_bounds: Option<(u32, u32)>,
    /// Inclusive aspect-ratio range (width / height).
    pub aspect_ratio_range: Option<(f64, f64)>,
}

const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Profile icons: small square-ish jpeg/png.
pub const PROFILE_ICON_RULE: ImageRule = ImageRule {
    name: "profile_icon",
    allowed_formats: &[ImageFormat::Jpeg, ImageFormat::Png],
    max_bytes: MAX_UPLOAD_BYTES,
    max_bounds: Some((300, 300)),
    aspect_ratio_range: None,
};

/// Opinion reference images: jpeg/png up to 4 MiB, any bounds.
pub const REFERENCE_IMAGE_RULE: ImageRule = ImageRule {
    name: "reference_image",
    allowed_formats: &[ImageFormat::Jpeg, ImageFormat::Png],
    max_bytes: MAX_UPLOAD_BYTES,
    max_bounds: None,
    aspect_ratio_range: None,
};

/// Fallback for uploads without a dedicated rule; gif allowed.
pub const UNRESTRICTED_RULE: ImageRule = ImageRule {
    name: "unrestricted",
    allowed_formats: &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif],
    max_bytes: MAX_UPLOAD_BYTES,
    max_bounds: None,
    aspect_ratio_range: None,
};

impl ImageRule {
    /// Validates probed metadata against this rule.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` naming the violated constraint
    pub fn check(&self, meta: &ImageMeta) -> Result<(), DomainError> {
        if !self.allowed_formats.contains(&meta.format) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("{:?} is not an allowed format for {}", meta.format, self.name),
            ));
        }
        if meta.size > self.max_bytes {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "image of {} bytes exceeds the {} byte limit for {}",
                    meta.size, self.max_bytes, self.name
                ),
            ));
        }
        if let Some((max_w, max_h)) = self.max_bounds {
            if meta.width > max_w || meta.height > max_h {
                return Err(DomainError::new(
                    ErrorCode::ValidationFailed,
                    format!(
                        "{}x{} exceeds the {}x{} bounds for {}",
                        meta.width, meta.height, max_w, max_h, self.name
                    ),
                ));
            }
        }
        if let Some((min_ratio, max_ratio)) = self.aspect_ratio_range {
            let ratio = meta.aspect_ratio();
            if !(min_ratio..=max_ratio).contains(&ratio) {
                return Err(DomainError::new(
                    ErrorCode::ValidationFailed,
                    format!(
                        "aspect ratio {:.3} outside {:.3}..{:.3} for {}",
                        ratio, min_ratio, max_ratio, self.name
                    ),
                ));
            }
        }
        Ok(())
    }
}
