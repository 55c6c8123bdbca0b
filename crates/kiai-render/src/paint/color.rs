/// Straight-alpha RGBA color with 8-bit channels.
///
/// Glyph cache keys include the color, so it must hash exactly; that is why
/// channels are integers rather than floats.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Converts floating-point channels in `0.0..=255.0` by rounding.
    ///
    /// Out-of-range and non-finite inputs saturate (`NaN` becomes `0`).
    #[inline]
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(channel(r), channel(g), channel(b), channel(a))
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Channels normalized to `0.0..=1.0`, as GPU vertex data expects.
    #[inline]
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[inline]
fn channel(v: f32) -> u8 {
    // `as` saturates and maps NaN to 0.
    v.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_channels_round_to_nearest() {
        let c = Color::from_rgba_f32(12.4, 12.5, 254.6, 0.49);
        assert_eq!(c, Color::rgba(12, 13, 255, 0));
    }

    #[test]
    fn float_channels_saturate() {
        let c = Color::from_rgba_f32(-20.0, 300.0, f32::NAN, f32::INFINITY);
        assert_eq!(c, Color::rgba(0, 255, 0, 255));
    }

    #[test]
    fn normalized_array() {
        assert_eq!(Color::WHITE.to_f32_array(), [1.0; 4]);
        assert_eq!(Color::TRANSPARENT.to_f32_array(), [0.0; 4]);
    }
}
