use image::{imageops, Rgba, RgbaImage};

use crate::{AssetError, AssetLimits};

/// Integer crop rectangle in image pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Decoded RGBA spritesheet, immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteImage {
    pixels: RgbaImage,
}

impl SpriteImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// A fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.pixels.get_pixel(x, y).0)
        } else {
            None
        }
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Copies a sub-region. The rectangle is clamped to the image bounds, so
    /// a frame hanging off the sheet yields a smaller (possibly empty) image.
    pub fn crop(&self, rect: PixelRect) -> SpriteImage {
        let x = rect.x.min(self.width());
        let y = rect.y.min(self.height());
        let width = rect.width.min(self.width() - x);
        let height = rect.height.min(self.height() - y);
        SpriteImage {
            pixels: imageops::crop_imm(&self.pixels, x, y, width, height).to_image(),
        }
    }

    pub(crate) fn put_pixel_clipped(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, Rgba(color));
        }
    }
}

/// Decodes PNG/JPEG bytes into RGBA, rejecting images over the limits.
pub fn decode_image(bytes: &[u8], limits: &AssetLimits) -> Result<SpriteImage, AssetError> {
    let size = bytes.len() as u64;
    if size > limits.max_bytes {
        return Err(AssetError::TooLarge {
            size,
            max: limits.max_bytes,
        });
    }
    let image = image::load_from_memory(bytes).map_err(|err| AssetError::Decode(err.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width > limits.max_width || height > limits.max_height {
        return Err(AssetError::InvalidDimensions {
            width,
            height,
            max_width: limits.max_width,
            max_height: limits.max_height,
        });
    }
    Ok(SpriteImage::from_rgba(rgba))
}
