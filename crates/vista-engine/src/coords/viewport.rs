/// Viewport size in logical pixels.
///
/// The sidebar breakpoint and all hit testing are expressed in this space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Builds a logical viewport from a physical size and a scale factor.
    pub fn from_physical(size: PixelSize, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            width: (size.width as f64 / scale) as f32,
            height: (size.height as f64 / scale) as f32,
        }
    }
}

/// Size in physical pixels (texture / canvas dimensions).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn max_side(self) -> u32 {
        self.width.max(self.height)
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_physical_divides_by_scale() {
        let v = Viewport::from_physical(PixelSize::new(1400, 800), 2.0);
        assert_eq!(v, Viewport::new(700.0, 400.0));
    }

    #[test]
    fn from_physical_ignores_bogus_scale() {
        let v = Viewport::from_physical(PixelSize::new(640, 480), 0.0);
        assert_eq!(v, Viewport::new(640.0, 480.0));
    }

    #[test]
    fn pixel_size_display() {
        assert_eq!(PixelSize::new(256, 128).to_string(), "256x128");
        assert!(PixelSize::new(0, 3).is_empty());
    }
}
