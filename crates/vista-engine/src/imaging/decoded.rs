use crate::coords::PixelSize;

/// Decoded image: tightly packed, straight-alpha RGBA8 rows, top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    size: PixelSize,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wraps raw RGBA8 pixels. Returns `None` when the buffer length does not
    /// match `width * height * 4` or the image is empty.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            size: PixelSize::new(width, height),
            pixels,
        })
    }

    /// A uniformly colored image. Same size rules as [`DecodedImage::from_rgba8`].
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Option<Self> {
        let count = (width as usize).checked_mul(height as usize)?;
        count.checked_mul(4)?;
        Self::from_rgba8(width, height, rgba.repeat(count))
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row of the packed buffer.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.size.width * 4
    }

    /// RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        self.pixels.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("size", &self.size)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba8_checks_length() {
        assert!(DecodedImage::from_rgba8(2, 2, vec![0; 16]).is_some());
        assert!(DecodedImage::from_rgba8(2, 2, vec![0; 15]).is_none());
        assert!(DecodedImage::from_rgba8(0, 2, vec![]).is_none());
    }

    #[test]
    fn solid_fills_every_pixel() {
        let img = DecodedImage::solid(3, 2, [255, 0, 0, 255]).unwrap();
        assert_eq!(img.pixels().len(), 24);
        assert_eq!(img.pixel(2, 1), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(3, 0), None);
        assert_eq!(img.bytes_per_row(), 12);
    }

    #[test]
    fn solid_rejects_empty_sizes() {
        assert!(DecodedImage::solid(0, 0, [0, 0, 0, 255]).is_none());
        assert!(DecodedImage::solid(4, 0, [0, 0, 0, 255]).is_none());
        assert!(DecodedImage::solid(0, 4, [0, 0, 0, 255]).is_none());
    }
}
