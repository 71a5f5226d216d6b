// SPDX-License-Identifier: MIT
//
// Color space math — sRGB, CIE XYZ, CIE LUV and HCL (polar LUV).
//
// Single-character variable names (r, g, b, x, y, z, l, u, v, h, c) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   sRGB ↔ Linear sRGB ↔ XYZ (D65) ↔ LUV ↔ HCL
//
// Every function here is pure and total over plain `(f64, f64, f64)`
// tuples. Nothing is validated or clamped: out-of-gamut results are
// returned as computed, and the `Rgb` type decides what to do with them.
//
// Ranges: sRGB channels 0–1, XYZ with Y = 1 for the white point,
// LUV lightness 0–100, HCL hue in degrees [0, 360).

// ─── Reference constants ─────────────────────────────────────────────────────

// Linear sRGB → XYZ (D65).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

// XYZ (D65) → linear sRGB.
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266_0, 1.876_010_8, 0.041_556_0],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

/// The D65 white point as produced by the sRGB matrix (XYZ of RGB 1, 1, 1).
///
/// Deriving the reference white from the matrix rows keeps every sRGB gray
/// exactly achromatic in LUV.
pub const WHITE_XYZ: (f64, f64, f64) = (
    RGB_TO_XYZ[0][0] + RGB_TO_XYZ[0][1] + RGB_TO_XYZ[0][2],
    RGB_TO_XYZ[1][0] + RGB_TO_XYZ[1][1] + RGB_TO_XYZ[1][2],
    RGB_TO_XYZ[2][0] + RGB_TO_XYZ[2][1] + RGB_TO_XYZ[2][2],
);

const WHITE_DENOM: f64 = WHITE_XYZ.0 + 15.0 * WHITE_XYZ.1 + 3.0 * WHITE_XYZ.2;

/// Chromaticity u′ of the D65 2° white point (≈ 0.19784).
pub const REF_U: f64 = 4.0 * WHITE_XYZ.0 / WHITE_DENOM;

/// Chromaticity v′ of the D65 2° white point (≈ 0.46834).
pub const REF_V: f64 = 9.0 * WHITE_XYZ.1 / WHITE_DENOM;

/// CIE κ (24389/27): slope of the linear lightness segment near black.
pub const KAPPA: f64 = 903.296_296_296_296_3;

/// CIE ε (216/24389): Y threshold between the linear and cube-root branches.
pub const EPSILON: f64 = 0.008_856_451_679_035_630_8;

/// Chroma below which a color counts as achromatic. Hue is reported as
/// `0.0` for such colors instead of the meaningless `atan2` of noise.
pub const ACHROMATIC_CHROMA: f64 = 1e-8;

#[inline]
fn mat_mul(m: &[[f64; 3]; 3], a: f64, b: f64, c: f64) -> (f64, f64, f64) {
    (
        m[0][2].mul_add(c, m[0][0].mul_add(a, m[0][1] * b)),
        m[1][2].mul_add(c, m[1][0].mul_add(a, m[1][1] * b)),
        m[2][2].mul_add(c, m[2][0].mul_add(a, m[2][1] * b)),
    )
}

// ─── sRGB companding ─────────────────────────────────────────────────────────

/// Convert a single sRGB component to linear light (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a single linear-light component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

// ─── RGB ↔ XYZ ───────────────────────────────────────────────────────────────

/// Convert sRGB (0–1) to CIE XYZ.
#[must_use]
pub fn rgb_to_xyz(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    mat_mul(
        &RGB_TO_XYZ,
        srgb_to_linear(r),
        srgb_to_linear(g),
        srgb_to_linear(b),
    )
}

/// Convert CIE XYZ to sRGB. The result may fall outside 0–1.
#[must_use]
pub fn xyz_to_rgb(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let (r, g, b) = mat_mul(&XYZ_TO_RGB, x, y, z);
    (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

// ─── XYZ ↔ LUV ───────────────────────────────────────────────────────────────

/// Convert CIE XYZ to CIE 1976 L\*u\*v\*.
///
/// Black (and anything whose lightness computes to zero) maps to the origin.
#[must_use]
pub fn xyz_to_luv(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let l = if y <= EPSILON {
        y * KAPPA
    } else {
        116.0f64.mul_add(y.cbrt(), -16.0)
    };
    let denom = 3.0f64.mul_add(z, 15.0f64.mul_add(y, x));
    if l == 0.0 || denom == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let u_prime = 4.0 * x / denom;
    let v_prime = 9.0 * y / denom;
    (l, 13.0 * l * (u_prime - REF_U), 13.0 * l * (v_prime - REF_V))
}

/// Convert CIE 1976 L\*u\*v\* to CIE XYZ.
#[must_use]
pub fn luv_to_xyz(l: f64, u: f64, v: f64) -> (f64, f64, f64) {
    if l == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let u_prime = u / (13.0 * l) + REF_U;
    let v_prime = v / (13.0 * l) + REF_V;
    let y = if l <= KAPPA * EPSILON {
        l / KAPPA
    } else {
        ((l + 16.0) / 116.0).powi(3)
    };
    let x = 9.0 * y * u_prime / (4.0 * v_prime);
    let z = y * (12.0 - 3.0 * u_prime - 20.0 * v_prime) / (4.0 * v_prime);
    (x, y, z)
}

// ─── LUV ↔ HCL ───────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
///
/// A tiny negative angle wraps to a value that rounds up to exactly 360;
/// that is folded back to 0.
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h }
}

/// Convert LUV to HCL, returned as `(hue, chroma, luminance)`.
///
/// Hue is undefined for achromatic colors; it is reported as `0.0`
/// whenever chroma is below [`ACHROMATIC_CHROMA`].
#[must_use]
pub fn luv_to_hcl(l: f64, u: f64, v: f64) -> (f64, f64, f64) {
    let c = u.hypot(v);
    let h = if c < ACHROMATIC_CHROMA {
        0.0
    } else {
        normalize_hue(v.atan2(u).to_degrees())
    };
    (h, c, l)
}

/// Convert HCL `(hue, chroma, luminance)` to LUV.
#[must_use]
pub fn hcl_to_luv(h: f64, c: f64, l: f64) -> (f64, f64, f64) {
    let h_rad = h.to_radians();
    (l, c * h_rad.cos(), c * h_rad.sin())
}

// ─── Composite conversions ───────────────────────────────────────────────────

/// Convert sRGB (0–1) to LUV.
#[must_use]
pub fn rgb_to_luv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (x, y, z) = rgb_to_xyz(r, g, b);
    xyz_to_luv(x, y, z)
}

/// Convert LUV to sRGB. The result may fall outside 0–1.
#[must_use]
pub fn luv_to_rgb(l: f64, u: f64, v: f64) -> (f64, f64, f64) {
    let (x, y, z) = luv_to_xyz(l, u, v);
    xyz_to_rgb(x, y, z)
}

/// Convert sRGB (0–1) to HCL `(hue, chroma, luminance)`.
#[must_use]
pub fn rgb_to_hcl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, u, v) = rgb_to_luv(r, g, b);
    luv_to_hcl(l, u, v)
}

/// Convert HCL `(hue, chroma, luminance)` to sRGB. The result may fall
/// outside 0–1: most high-chroma HCL coordinates have no sRGB equivalent.
#[must_use]
pub fn hcl_to_rgb(h: f64, c: f64, l: f64) -> (f64, f64, f64) {
    let (l, u, v) = hcl_to_luv(h, c, l);
    luv_to_rgb(l, u, v)
}

/// Squared Euclidean distance between two LUV coordinates.
#[inline]
#[must_use]
pub fn luv_distance_sq(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    let dl = a.0 - b.0;
    let du = a.1 - b.1;
    let dv = a.2 - b.2;
    dv.mul_add(dv, dl.mul_add(dl, du * du))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
