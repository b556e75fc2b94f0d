use anyhow::Context;

/// Floating point color, every channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0., 0., 0., 1.);
    pub const WHITE: Self = Self::new(1., 1., 1., 1.);
    pub const MAGENTA: Self = Self::new(1., 0., 1., 1.);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> anyhow::Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .with_context(|| format!("not a hex string: {hex}"))?;
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            anyhow::bail!("not a hex string: {hex}");
        }

        let channel = |at: usize| -> anyhow::Result<f32> {
            Ok(u8::from_str_radix(&digits[at..at + 2], 16)
                .with_context(|| format!("bad channel in {hex}"))? as f32
                / 255.)
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1. };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(
            r as f32 / 255.,
            g as f32 / 255.,
            b as f32 / 255.,
            a as f32 / 255.,
        )
    }

    /// Scale the color channels by `factor`, leaving alpha alone.
    pub fn brightness(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Quantize to 8 bits per channel, clamping out of range values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0., 1.) * 255.).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn parse_hex() {
        assert_eq!(
            Rgba::from_hex("#ff0000").unwrap(),
            Rgba::new(1., 0., 0., 1.)
        );
        assert_eq!(
            Rgba::from_hex("#00ff0000").unwrap().to_rgba8(),
            [0, 255, 0, 0]
        );
        assert_eq!(Rgba::from_hex("#181818").unwrap().to_rgba8(), [24, 24, 24, 255]);
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert!(Rgba::from_hex("ff0000").is_err());
        assert!(Rgba::from_hex("#ff00").is_err());
        assert!(Rgba::from_hex("#gg0000").is_err());
        assert!(Rgba::from_hex("#ff00é0").is_err());
    }

    #[test]
    fn brightness_keeps_alpha() {
        let c = Rgba::new(0.5, 1., 0.25, 0.5).brightness(0.5);
        assert_eq!(c, Rgba::new(0.25, 0.5, 0.125, 0.5));
    }

    #[test]
    fn quantize_clamps() {
        assert_eq!(Rgba::new(-1., 2., 0.5, 1.).to_rgba8(), [0, 255, 128, 255]);
    }
}
