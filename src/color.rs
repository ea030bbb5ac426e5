//! Display colors and CIELab conversion.
//!
//! DICOM encodes presentation colors as CIELab triples scaled into unsigned
//! 16-bit ranges (PS3.3 C.10.7.1.1): `L* = v0 * 100 / 65535`, and
//! `a*`/`b*` = `v * 255 / 65535 - 128`. Conversion to sRGB goes through
//! CIE XYZ against the D65 reference white.

use std::fmt;

/// D65 reference white in CIE XYZ (Y normalized to 1).
const D65: [f64; 3] = [0.950_47, 1.0, 1.088_83];

const DELTA: f64 = 6.0 / 29.0;

/// 8-bit RGBA color. Alpha 255 is fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Replace the alpha channel with `round(opacity * 255)`.
    ///
    /// Opacity is clamped to `[0, 1]`; NaN leaves the color untouched.
    pub fn with_opacity(self, opacity: f32) -> Self {
        if opacity.is_nan() {
            return self;
        }
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color { a, ..self }
    }

    /// Packed as `0xAARRGGBB`.
    pub fn argb(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Convert a DICOM-scaled CIELab triple to an opaque color.
    ///
    /// Returns `None` unless exactly three values are given.
    pub fn from_dicom_lab(lab: &[i32]) -> Option<Self> {
        let [l, a, b] = <[i32; 3]>::try_from(lab).ok()?;
        let l = f64::from(l) * 100.0 / 65535.0;
        let a = f64::from(a) * 255.0 / 65535.0 - 128.0;
        let b = f64::from(b) * 255.0 / 65535.0 - 128.0;
        Some(lab_to_rgb(l, a, b))
    }

    /// DICOM-scaled CIELab triple for this color (alpha is ignored).
    pub fn to_dicom_lab(self) -> [i32; 3] {
        let (l, a, b) = rgb_to_lab(self);
        let scale = |v: f64| (v.round() as i64).clamp(0, 65535) as i32;
        [
            scale(l * 65535.0 / 100.0),
            scale((a + 128.0) * 65535.0 / 255.0),
            scale((b + 128.0) * 65535.0 / 255.0),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({},{},{})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

/// CIELab (L* in 0..100) to opaque sRGB.
pub fn lab_to_rgb(l: f64, a: f64, b: f64) -> Color {
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;
    let x = D65[0] * lab_f_inv(fx);
    let y = D65[1] * lab_f_inv(fy);
    let z = D65[2] * lab_f_inv(fz);

    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let bl = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

    Color::rgb(encode_srgb(r), encode_srgb(g), encode_srgb(bl))
}

/// Opaque sRGB to CIELab (L* in 0..100).
pub fn rgb_to_lab(color: Color) -> (f64, f64, f64) {
    let r = decode_srgb(color.r);
    let g = decode_srgb(color.g);
    let b = decode_srgb(color.b);

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

    let fx = lab_f(x / D65[0]);
    let fy = lab_f(y / D65[1]);
    let fz = lab_f(z / D65[2]);
    (116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

fn encode_srgb(linear: f64) -> u8 {
    let v = if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn decode_srgb(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
