/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a`.
/// - components are linear, so they can be written to an sRGB target unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque black; the canvas clear color.
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from straight-alpha sRGB bytes (`0`–`255`), e.g. hex literals.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a = a as f32 / 255.0;
        Self {
            r: srgb_to_linear(r as f32 / 255.0) * a,
            g: srgb_to_linear(g as f32 / 255.0) * a,
            b: srgb_to_linear(b as f32 / 255.0) * a,
            a,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
