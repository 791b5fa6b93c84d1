//! Integer sRGB colors and their hex / CMYK / luma representations

use crate::{Error, Result};
use palette::Srgb;
use serde::Serialize;
use std::{
	fmt::{self, Display},
	str::FromStr,
};

/// Luma thresholds (scaled by 1000) outside of which a color counts as neutral
const NEUTRAL_DARK_MILLI: u32 = 50_000;
/// See [`NEUTRAL_DARK_MILLI`]
const NEUTRAL_LIGHT_MILLI: u32 = 200_000;

/// An immutable 8-bit sRGB color.
///
/// The hex string, CMYK percentages, and luma are always computed from the channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "ColorRecord")]
pub struct Color {
	/// Red, green, and blue channels
	rgb: [u8; 3],
}

impl Color {
	/// Pure black
	pub const BLACK: Self = Self::new(0, 0, 0);
	/// Pure white
	pub const WHITE: Self = Self::new(255, 255, 255);

	/// Create a color from its channels
	#[must_use]
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { rgb: [r, g, b] }
	}

	/// The `(r, g, b)` channels
	#[must_use]
	pub const fn rgb(self) -> [u8; 3] {
		self.rgb
	}

	/// The red channel
	#[must_use]
	pub const fn red(self) -> u8 {
		self.rgb[0]
	}

	/// The green channel
	#[must_use]
	pub const fn green(self) -> u8 {
		self.rgb[1]
	}

	/// The blue channel
	#[must_use]
	pub const fn blue(self) -> u8 {
		self.rgb[2]
	}

	/// Lowercase `#rrggbb`
	#[must_use]
	pub fn hex(self) -> String {
		let [r, g, b] = self.rgb;
		rgb_to_hex(r, g, b)
	}

	/// CMYK percentages
	#[must_use]
	pub fn cmyk(self) -> Cmyk {
		let [r, g, b] = self.rgb;
		rgb_to_cmyk(r, g, b)
	}

	/// Perceptual brightness `0.299r + 0.587g + 0.114b` on the 0-255 scale
	#[must_use]
	pub fn luma(self) -> f64 {
		f64::from(self.luma_milli()) / 1000.0
	}

	/// Luma multiplied by 1000, exact in integer arithmetic
	#[must_use]
	pub(crate) fn luma_milli(self) -> u32 {
		let [r, g, b] = self.rgb.map(u32::from);
		299 * r + 587 * g + 114 * b
	}

	/// Whether the luma is strictly below 50 or strictly above 200
	#[must_use]
	pub fn is_neutral(self) -> bool {
		let luma = self.luma_milli();
		luma < NEUTRAL_DARK_MILLI || luma > NEUTRAL_LIGHT_MILLI
	}

	/// Sum of the channels, used to break population ties
	#[must_use]
	pub(crate) fn channel_sum(self) -> u16 {
		self.rgb.iter().copied().map(u16::from).sum()
	}
}

impl From<Srgb<u8>> for Color {
	fn from(srgb: Srgb<u8>) -> Self {
		Self::new(srgb.red, srgb.green, srgb.blue)
	}
}

impl From<[u8; 3]> for Color {
	fn from(rgb: [u8; 3]) -> Self {
		Self { rgb }
	}
}

impl From<Color> for Srgb<u8> {
	fn from(color: Color) -> Self {
		let [r, g, b] = color.rgb;
		Srgb::new(r, g, b)
	}
}

impl FromStr for Color {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		hex_to_rgb(s)
	}
}

impl Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.hex())
	}
}

/// Subtractive print representation, each component a percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "[u8; 4]")]
pub struct Cmyk {
	/// Cyan
	pub cyan: u8,
	/// Magenta
	pub magenta: u8,
	/// Yellow
	pub yellow: u8,
	/// Key (black)
	pub key: u8,
}

impl From<Cmyk> for [u8; 4] {
	fn from(cmyk: Cmyk) -> Self {
		[cmyk.cyan, cmyk.magenta, cmyk.yellow, cmyk.key]
	}
}

impl Display for Cmyk {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Self { cyan, magenta, yellow, key } = self;
		write!(f, "{cyan}%,{magenta}%,{yellow}%,{key}%")
	}
}

/// Serialized form of a [`Color`]
#[derive(Serialize)]
struct ColorRecord {
	/// `[r, g, b]`
	rgb: [u8; 3],
	/// `#rrggbb`
	hex: String,
	/// `[c, m, y, k]`
	cmyk: Cmyk,
}

impl From<Color> for ColorRecord {
	fn from(color: Color) -> Self {
		Self {
			rgb: color.rgb(),
			hex: color.hex(),
			cmyk: color.cmyk(),
		}
	}
}

/// Format channels as a lowercase, zero-padded `#rrggbb` string
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
	format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#rrggbb`, `rrggbb`, or the short `#rgb` form
///
/// # Errors
/// Returns [`Error::InvalidHex`] if the text is not a hex color.
pub fn hex_to_rgb(hex: &str) -> Result<Color> {
	Srgb::<u8>::from_str(hex.trim())
		.map(Color::from)
		.map_err(|source| Error::InvalidHex { input: hex.to_owned(), source })
}

/// Convert channels to CMYK percentages.
///
/// Pure black maps to `(0, 0, 0, 100)` instead of dividing by zero.
#[must_use]
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
	if r == 0 && g == 0 && b == 0 {
		return Cmyk { cyan: 0, magenta: 0, yellow: 0, key: 100 };
	}

	let [r, g, b] = [r, g, b].map(|c| f64::from(c) / 255.0);
	let k = 1.0 - r.max(g).max(b);

	// Results are within 0.0..=100.0
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let percent = |x: f64| (x * 100.0).round() as u8;

	Cmyk {
		cyan: percent((1.0 - r - k) / (1.0 - k)),
		magenta: percent((1.0 - g - k) / (1.0 - k)),
		yellow: percent((1.0 - b - k) / (1.0 - k)),
		key: percent(k),
	}
}
