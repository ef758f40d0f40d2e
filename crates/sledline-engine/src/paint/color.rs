/// Straight-alpha RGBA color with 8-bit channels.
///
/// Geometry producers work in this representation. Backends that blend with
/// premultiplied alpha convert at upload time via [`to_premul_f32`](Self::to_premul_f32).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CORNFLOWER_BLUE: Color = Color::rgb(100, 149, 237);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Unpacks a `0xAARRGGBB` literal.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgba(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha from a `[0, 1]` opacity; out-of-range values are clamped.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha(opacity_to_alpha(opacity))
    }

    #[inline]
    pub fn alpha_f32(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Premultiplied `[r, g, b, a]` in `[0, 1]`.
    #[inline]
    pub fn to_premul_f32(self) -> [f32; 4] {
        let a = self.alpha_f32();
        [
            self.r as f32 / 255.0 * a,
            self.g as f32 / 255.0 * a,
            self.b as f32 / 255.0 * a,
            a,
        ]
    }
}

/// Converts an opacity in `[0, 1]` to an 8-bit alpha (truncating, like a byte cast).
#[inline]
pub fn opacity_to_alpha(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0) as u8
}
