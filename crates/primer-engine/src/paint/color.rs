/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::from_premul(1.0, 0.0, 0.0, 1.0);
    pub const BLUE: Color = Color::from_premul(0.0, 0.0, 1.0, 1.0);

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates a premultiplied color from straight 8-bit sRGB channels.
    ///
    /// Color channels are decoded to linear; alpha is already linear.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clear value for a render pass load op.
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

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_alpha_is_premultiplied_and_clamped() {
        let c = Color::from_straight(1.0, 0.5, 2.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.5, 0.5));
    }

    #[test]
    fn srgb_bytes_are_decoded_to_linear() {
        let c = Color::from_srgb_u8(128, 0, 255, 255);
        assert!((c.r - 0.2158605).abs() < 1e-4, "{}", c.r);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 1.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);

        let dark = Color::from_srgb_u8(10, 10, 10, 255);
        assert!((dark.r - 10.0 / 255.0 / 12.92).abs() < 1e-6);
    }

    #[test]
    fn srgb_alpha_stays_linear_and_premultiplies() {
        let c = Color::from_srgb_u8(255, 255, 255, 51);
        assert!((c.a - 0.2).abs() < 1e-6);
        assert!((c.r - 0.2).abs() < 1e-6);
    }

    #[test]
    fn blue_clears_to_opaque_blue() {
        let w = Color::BLUE.to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (0.0, 0.0, 1.0, 1.0));
    }
}
