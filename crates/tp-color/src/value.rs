// SPDX-License-Identifier: MIT
//
// ColorValue — "a color", in whichever representation it arrived in.
//
// Cells, palettes and decoded escape sequences carry colors in different
// forms: an ANSI art file says `38;5;208`, a palette file says `#ff8700`,
// the palette editor works in HCL. `ColorValue` keeps the original form and
// converts on demand, always through `Rgb`:
//
//   Hex ─┐
//   Ansi256 ─┤
//   WebColor ─┼──► Rgb ──► Hex / HCL / LUV / XYZ / nearest Ansi256
//   Hcl ─┘
//
// Equality is semantic: two values are equal when they decode to the same
// RGB, within half an 8-bit step. `Ansi256(9)`, `#ff0000` and `red` are
// all the same color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ColorError, RangeKind, Result};
use crate::hex::Hex;
use crate::palette::{ansi256_rgb8, nearest_ansi256_luv};
use crate::rgb::Rgb;
use crate::space::{hcl_to_luv, hcl_to_rgb, luv_to_hcl, luv_to_xyz, normalize_hue, rgb_to_luv};
use crate::web::WebColor;

/// Per-channel tolerance for [`ColorValue`] equality: half an 8-bit step.
pub const EQ_TOLERANCE: f64 = 0.5 / 255.0;

// ─── Hcl ─────────────────────────────────────────────────────────────────────

/// A color in HCL (hue, chroma, luminance), the polar form of CIE LUV.
///
/// Equal steps in hue or luminance look like equal steps, which is what
/// the palette editor's sliders want. Most high-chroma coordinates fall
/// outside sRGB; [`Hcl::to_rgb`] reports that instead of guessing.
///
/// The components are always finite and the hue lies in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
    h: f64,
    c: f64,
    l: f64,
}

impl Hcl {
    /// Create an HCL color. The hue is normalized to `[0, 360)`.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfGamut`] if any component is NaN or infinite.
    pub fn new(h: f64, c: f64, l: f64) -> Result<Self> {
        if let Some(value) = [h, c, l].into_iter().find(|v| !v.is_finite()) {
            return Err(ColorError::OutOfGamut { value });
        }
        Ok(Self {
            h: normalize_hue(h),
            c,
            l,
        })
    }

    /// Hue angle in degrees, `[0, 360)`. `0` for achromatic colors.
    #[inline]
    #[must_use]
    pub const fn h(self) -> f64 {
        self.h
    }

    /// Chroma, `0` (gray) upward. sRGB tops out near 180.
    #[inline]
    #[must_use]
    pub const fn c(self) -> f64 {
        self.c
    }

    /// Luminance (LUV lightness), `0` (black) to `100` (white).
    #[inline]
    #[must_use]
    pub const fn l(self) -> f64 {
        self.l
    }

    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.to_tuple();
        let (l, u, v) = rgb_to_luv(r, g, b);
        let (h, c, l) = luv_to_hcl(l, u, v);
        Self { h, c, l }
    }

    /// Convert to sRGB.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfGamut`] if the coordinate has no sRGB equivalent.
    pub fn to_rgb(self) -> Result<Rgb> {
        Rgb::from_conversion(hcl_to_rgb(self.h, self.c, self.l))
    }

    #[must_use]
    pub fn to_luv(self) -> (f64, f64, f64) {
        hcl_to_luv(self.h, self.c, self.l)
    }
}

// ─── ColorValue ──────────────────────────────────────────────────────────────

/// A color in any supported representation.
///
/// # Examples
///
/// ```
/// use tp_color::{ColorValue, Rgb};
///
/// let red: ColorValue = "red".parse().unwrap();
/// assert_eq!(red, ColorValue::Ansi256(9));
/// assert_eq!(red, ColorValue::Rgb(Rgb::from_rgb8(255, 0, 0)));
/// assert_eq!(red.to_hex().unwrap().to_string(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy)]
pub enum ColorValue {
    Rgb(Rgb),
    Hex(Hex),
    Ansi256(u8),
    WebColor(WebColor),
    Hcl(Hcl),
}

impl ColorValue {
    /// Parse any of the text forms produced by `Display`:
    /// `#rrggbb`, `rrggbb`, `rgb(R, G, B)`, `ansi(N)`, `hcl(H, C, L)`
    /// or a web color name.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColorFormat`] for malformed functional or hex
    /// forms, [`ColorError::OutOfRange`] for out-of-range integers,
    /// [`ColorError::UnknownColorName`] for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let lower = text.to_ascii_lowercase();

        if let Some(args) = functional_args(&lower, "rgb") {
            let [r, g, b]: [i64; 3] = parse_args(args, s)?;
            return Rgb::from_ints(r, g, b).map(Self::Rgb);
        }
        if let Some(args) = functional_args(&lower, "ansi") {
            let [idx]: [i64; 1] = parse_args(args, s)?;
            return u8::try_from(idx).map(Self::Ansi256).map_err(|_| {
                ColorError::OutOfRange {
                    kind: RangeKind::Ansi256Index,
                    value: idx,
                }
            });
        }
        if let Some(args) = functional_args(&lower, "hcl") {
            let [h, c, l]: [f64; 3] = parse_args(args, s)?;
            return Hcl::new(h, c, l)
                .map(Self::Hcl)
                .map_err(|_| ColorError::InvalidColorFormat(s.to_string()));
        }
        if text.starts_with('#') || looks_like_hex(text) {
            return Hex::parse(text).map(Self::Hex);
        }
        WebColor::lookup(text).map(Self::WebColor)
    }

    /// Wrap an [`Rgb`]. The inverse of [`ColorValue::to_rgb`].
    #[inline]
    #[must_use]
    pub const fn from_rgb(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }

    /// Convert to sRGB.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfGamut`] only for an [`Hcl`] coordinate with no
    /// sRGB equivalent. Every other representation is in gamut by
    /// construction.
    pub fn to_rgb(self) -> Result<Rgb> {
        match self {
            Self::Rgb(rgb) => Ok(rgb),
            Self::Hex(hex) => Ok(hex.to_rgb()),
            Self::Ansi256(idx) => Ok(Rgb::from(ansi256_rgb8(idx))),
            Self::WebColor(color) => Ok(color.to_rgb()),
            Self::Hcl(hcl) => hcl.to_rgb(),
        }
    }

    /// Convert to sRGB, clamping out-of-gamut HCL coordinates.
    #[must_use]
    pub fn to_rgb_clamped(self) -> Rgb {
        match self {
            Self::Hcl(hcl) => {
                let (r, g, b) = hcl_to_rgb(hcl.h, hcl.c, hcl.l);
                Rgb::clamped(r, g, b)
            }
            other => other.to_rgb().unwrap_or_default(),
        }
    }

    /// Convert to a packed hex color.
    ///
    /// # Errors
    ///
    /// As [`ColorValue::to_rgb`].
    pub fn to_hex(self) -> Result<Hex> {
        match self {
            Self::Hex(hex) => Ok(hex),
            other => other.to_rgb().map(Hex::from),
        }
    }

    /// Convert to CIE LUV. Total: out-of-gamut HCL converts directly.
    #[must_use]
    pub fn to_luv(self) -> (f64, f64, f64) {
        match self {
            Self::Hcl(hcl) => hcl.to_luv(),
            other => {
                let (r, g, b) = other.to_rgb_clamped().to_tuple();
                rgb_to_luv(r, g, b)
            }
        }
    }

    /// Convert to HCL.
    #[must_use]
    pub fn to_hcl(self) -> Hcl {
        match self {
            Self::Hcl(hcl) => hcl,
            other => Hcl::from_rgb(other.to_rgb_clamped()),
        }
    }

    /// Convert to CIE XYZ.
    #[must_use]
    pub fn to_xyz(self) -> (f64, f64, f64) {
        let (l, u, v) = self.to_luv();
        luv_to_xyz(l, u, v)
    }

    /// The palette index: exact for [`ColorValue::Ansi256`], the nearest
    /// match by LUV distance for everything else.
    #[must_use]
    pub fn to_ansi256(self) -> u8 {
        match self {
            Self::Ansi256(idx) => idx,
            other => nearest_ansi256_luv(other.to_luv()),
        }
    }

    /// Compare by RGB with an explicit per-channel tolerance.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        self.to_rgb_clamped().max_channel_diff(other.to_rgb_clamped()) <= tolerance
    }
}

fn functional_args<'a>(lower: &'a str, name: &str) -> Option<&'a str> {
    lower
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_args<T: FromStr, const N: usize>(args: &str, original: &str) -> Result<[T; N]> {
    let invalid = || ColorError::InvalidColorFormat(original.to_string());
    let parsed = args
        .split(',')
        .map(|part| part.trim().parse::<T>().map_err(|_| invalid()))
        .collect::<Result<Vec<T>>>()?;
    <[T; N]>::try_from(parsed).map_err(|_| invalid())
}

fn looks_like_hex(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl PartialEq for ColorValue {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, EQ_TOLERANCE)
    }
}

impl Default for ColorValue {
    /// Default is black.
    fn default() -> Self {
        Self::Rgb(Rgb::BLACK)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(rgb) => {
                let (r, g, b) = rgb.to_rgb8();
                write!(f, "rgb({r},{g},{b})")
            }
            Self::Hex(hex) => write!(f, "{hex}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::WebColor(color) => write!(f, "{color}"),
            Self::Hcl(hcl) => write!(f, "hcl({},{},{})", hcl.h, hcl.c, hcl.l),
        }
    }
}

impl FromStr for ColorValue {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Rgb> for ColorValue {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hex> for ColorValue {
    fn from(hex: Hex) -> Self {
        Self::Hex(hex)
    }
}

impl From<WebColor> for ColorValue {
    fn from(color: WebColor) -> Self {
        Self::WebColor(color)
    }
}

impl From<Hcl> for ColorValue {
    fn from(hcl: Hcl) -> Self {
        Self::Hcl(hcl)
    }
}

/// Serialized as the `Display` text. `Rgb` values therefore go through
/// `rgb(R,G,B)` and come back quantized to 8 bits per channel, which stays
/// within the equality tolerance; every other representation round-trips
/// exactly.
impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ─── ColorPair ───────────────────────────────────────────────────────────────

/// A foreground/background pair.
///
/// The default is black on white, the editor's default document colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: ColorValue,
    pub background: ColorValue,
}

impl ColorPair {
    #[inline]
    #[must_use]
    pub const fn new(foreground: ColorValue, background: ColorValue) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// Exchange the roles, returning a new pair.
    #[inline]
    #[must_use]
    pub const fn swap(self) -> Self {
        Self {
            foreground: self.background,
            background: self.foreground,
        }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(
            ColorValue::Rgb(Rgb::BLACK),
            ColorValue::Rgb(Rgb::WHITE),
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("#ff8000" ; "hash hex")]
    #[test_case("FF8000" ; "bare hex")]
    #[test_case("rgb(255, 128, 0)" ; "functional rgb")]
    #[test_case("RGB(255,128,0)" ; "uppercase functional rgb")]
    fn parses_equivalent_forms(input: &str) {
        let color = ColorValue::parse(input).unwrap();
        assert_eq!(color.to_rgb().unwrap().to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn parse_keeps_representation() {
        assert!(matches!(ColorValue::parse("ansi(208)"), Ok(ColorValue::Ansi256(208))));
        assert!(matches!(ColorValue::parse("Tomato"), Ok(ColorValue::WebColor(_))));
        assert!(matches!(ColorValue::parse("#123456"), Ok(ColorValue::Hex(_))));
        assert!(matches!(ColorValue::parse("hcl(10, 20, 30)"), Ok(ColorValue::Hcl(_))));
    }

    #[test]
    fn parse_errors_are_specific() {
        assert!(matches!(
            ColorValue::parse("rgb(1, 2)"),
            Err(ColorError::InvalidColorFormat(_))
        ));
        assert!(matches!(
            ColorValue::parse("rgb(1, 2, 300)"),
            Err(ColorError::OutOfRange { kind: RangeKind::Rgb8Channel, value: 300 })
        ));
        assert!(matches!(
            ColorValue::parse("ansi(256)"),
            Err(ColorError::OutOfRange { kind: RangeKind::Ansi256Index, value: 256 })
        ));
        assert!(matches!(
            ColorValue::parse("#12345g"),
            Err(ColorError::InvalidColorFormat(_))
        ));
        assert!(matches!(
            ColorValue::parse("not-a-color"),
            Err(ColorError::UnknownColorName(_))
        ));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let values = [
            ColorValue::Rgb(Rgb::from_rgb8(1, 2, 3)),
            ColorValue::Hex(Hex::new(0xAB_CD_EF).unwrap()),
            ColorValue::Ansi256(42),
            ColorValue::WebColor(WebColor::lookup("salmon").unwrap()),
            ColorValue::Hcl(Hcl::new(120.0, 30.5, 60.25).unwrap()),
        ];
        for value in values {
            let text = value.to_string();
            assert_eq!(ColorValue::parse(&text).unwrap(), value, "via {text}");
        }
    }

    #[test]
    fn hcl_rejects_non_finite_components() {
        assert!(matches!(
            Hcl::new(f64::NAN, 10.0, 50.0),
            Err(ColorError::OutOfGamut { .. })
        ));
        assert!(Hcl::new(0.0, f64::INFINITY, 50.0).is_err());
        assert!(matches!(
            ColorValue::parse("hcl(NaN, 10, 50)"),
            Err(ColorError::InvalidColorFormat(_))
        ));

        let hcl = Hcl::new(-30.0, 10.0, 50.0).unwrap();
        assert_eq!((hcl.h(), hcl.c(), hcl.l()), (330.0, 10.0, 50.0));
    }

    #[test]
    fn rgb_serializes_quantized_within_tolerance() {
        #[derive(Serialize, Deserialize)]
        struct Doc {
            color: ColorValue,
        }

        let original = ColorValue::Rgb(Rgb::new(0.2, 0.4, 0.61).unwrap());
        let text = toml::to_string(&Doc { color: original }).unwrap();
        assert_eq!(text.trim(), "color = \"rgb(51,102,156)\"");
        let back: Doc = toml::from_str(&text).unwrap();
        assert_eq!(back.color, original);
    }

    #[test]
    fn equality_is_by_rgb() {
        let red_names = [
            ColorValue::Ansi256(9),
            ColorValue::Ansi256(196),
            ColorValue::parse("red").unwrap(),
            ColorValue::parse("#FF0000").unwrap(),
            ColorValue::Rgb(Rgb::new(1.0, 0.0, 0.0).unwrap()),
        ];
        for a in red_names {
            for b in red_names {
                assert_eq!(a, b);
            }
        }
        assert_ne!(ColorValue::Ansi256(1), ColorValue::Ansi256(9));
    }

    #[test]
    fn hcl_roundtrip_through_value() {
        let original = ColorValue::Rgb(Rgb::new(0.2, 0.4, 0.6).unwrap());
        let hcl = ColorValue::Hcl(original.to_hcl());
        let back = hcl.to_rgb().unwrap();
        assert!(back.max_channel_diff(original.to_rgb().unwrap()) < 1e-4);
    }

    #[test]
    fn out_of_gamut_hcl() {
        let vivid = ColorValue::Hcl(Hcl::new(265.0, 250.0, 50.0).unwrap());
        assert!(matches!(vivid.to_rgb(), Err(ColorError::OutOfGamut { .. })));
        assert!(vivid.to_hex().is_err());

        // The clamped and downsampled forms still work.
        let clamped = vivid.to_rgb_clamped().to_tuple();
        assert!([clamped.0, clamped.1, clamped.2].iter().all(|c| (0.0..=1.0).contains(c)));
        let _ = vivid.to_ansi256();
    }

    #[test]
    fn ansi256_is_exact_or_nearest() {
        assert_eq!(ColorValue::Ansi256(196).to_ansi256(), 196);
        assert_eq!(ColorValue::parse("#ff0000").unwrap().to_ansi256(), 9);
        assert_eq!(ColorValue::parse("#ff8700").unwrap().to_ansi256(), 208);
    }

    #[test]
    fn achromatic_hcl_has_zero_hue() {
        let gray = ColorValue::parse("gray").unwrap().to_hcl();
        assert!(gray.h.abs() < f64::EPSILON);
        assert!(gray.c < 1e-6);
    }

    #[test]
    fn white_xyz_is_reference_white() {
        let (x, y, z) = ColorValue::parse("white").unwrap().to_xyz();
        assert!((x - 0.950_47).abs() < 1e-4);
        assert!((y - 1.0).abs() < 1e-4);
        assert!((z - 1.088_83).abs() < 1e-4);
    }

    #[test]
    fn pair_swap_is_pure() {
        let pair = ColorPair::default();
        let swapped = pair.swap();
        assert_eq!(swapped.foreground, pair.background);
        assert_eq!(swapped.background, pair.foreground);
        assert_eq!(swapped.swap(), pair);
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Palette {
        colors: ColorPair,
    }

    #[test]
    fn pair_serde_through_toml() {
        let text = "[colors]\nforeground = \"navy\"\nbackground = \"#fafafa\"\n";
        let palette: Palette = toml::from_str(text).unwrap();
        assert_eq!(palette.colors.foreground, ColorValue::parse("#000080").unwrap());
        assert_eq!(palette.colors.background, ColorValue::parse("rgb(250,250,250)").unwrap());

        let written = toml::to_string(&palette).unwrap();
        assert!(written.contains("foreground = \"navy\""), "{written}");
        assert!(written.contains("background = \"#fafafa\""), "{written}");
    }

    #[test]
    fn bad_color_in_toml_is_an_error() {
        let text = "[colors]\nforeground = \"blurple\"\nbackground = \"white\"\n";
        assert!(toml::from_str::<Palette>(text).is_err());
    }
}
