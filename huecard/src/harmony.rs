//! Color-wheel harmonies derived from a single seed color by rotating its HSV hue

use crate::{Color, Error, Palette, Result};
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};
use std::{
	fmt::{self, Display},
	str::FromStr,
};

/// Offset around `1 - hue` used by the split-complementary scheme
const SPLIT_OFFSET: f32 = 0.08;

/// Offset used by the analogous scheme
const ANALOGOUS_OFFSET: f32 = 0.1;

/// Supported harmony schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyScheme {
	/// Keep the colors extracted from the image
	#[default]
	Auto,
	/// One color opposite on the wheel
	Complementary,
	/// Two neighbors, 36° to either side
	Analogous,
	/// Two colors 29° to either side of the mirrored hue `1 - h`
	SplitComplementary,
	/// Two colors spaced evenly at 120°
	Triadic,
}

impl HarmonyScheme {
	/// Every scheme, in display order
	pub const ALL: [Self; 5] = [
		Self::Auto,
		Self::Complementary,
		Self::Analogous,
		Self::SplitComplementary,
		Self::Triadic,
	];

	/// The lowercase, hyphenated name
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::Auto => "auto",
			Self::Complementary => "complementary",
			Self::Analogous => "analogous",
			Self::SplitComplementary => "split-complementary",
			Self::Triadic => "triadic",
		}
	}

	/// The target hues of the companion colors, as fractions of the color wheel
	fn companion_hues(self, hue: f32) -> Vec<f32> {
		match self {
			Self::Auto => Vec::new(),
			Self::Complementary => vec![hue + 0.5],
			Self::Analogous => vec![hue + ANALOGOUS_OFFSET, hue - ANALOGOUS_OFFSET],
			Self::SplitComplementary => {
				let mirrored = 1.0 - hue;
				vec![mirrored + SPLIT_OFFSET, mirrored - SPLIT_OFFSET]
			},
			Self::Triadic => vec![hue + 1.0 / 3.0, hue + 2.0 / 3.0],
		}
	}

	/// The colors this scheme derives from `seed`.
	///
	/// Saturation and value are kept, only the hue rotates.
	/// `Auto` derives nothing.
	#[must_use]
	pub fn companions(self, seed: Color) -> Vec<Color> {
		let hsv: Hsv = Hsv::from_color(Srgb::<u8>::from(seed).into_format::<f32>());
		let hue = hsv.hue.into_positive_degrees() / 360.0;

		self.companion_hues(hue)
			.into_iter()
			.map(|h| rotate(hsv, h))
			.collect()
	}
}

/// Replace the hue of `hsv` with `hue`, given as a (possibly out of range) fraction of the wheel
fn rotate(hsv: Hsv, hue: f32) -> Color {
	let degrees = hue.rem_euclid(1.0) * 360.0;
	let rotated: Hsv = Hsv::new(degrees, hsv.saturation, hsv.value);
	Srgb::<f32>::from_color(rotated).into_format::<u8>().into()
}

impl Display for HarmonyScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for HarmonyScheme {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
		Self::ALL
			.into_iter()
			.find(|scheme| scheme.name() == normalized)
			.ok_or_else(|| Error::UnknownScheme(s.to_owned()))
	}
}

/// Build a palette from `seed` and its companions under `scheme`.
///
/// The neutral group is empty; use [`Palette::with_neutral`] to merge classified neutrals back in.
#[must_use]
pub fn harmonize(seed: Color, scheme: HarmonyScheme) -> Palette {
	Palette::new(seed, scheme.companions(seed), Vec::new())
}

impl Palette {
	/// Derive a harmony from the main color.
	///
	/// `Auto` returns the palette unchanged, every other scheme replaces
	/// the secondary colors with companions and clears the neutral colors.
	#[must_use]
	pub fn harmonized(&self, scheme: HarmonyScheme) -> Self {
		match scheme {
			HarmonyScheme::Auto => self.clone(),
			HarmonyScheme::Complementary
			| HarmonyScheme::Analogous
			| HarmonyScheme::SplitComplementary
			| HarmonyScheme::Triadic => harmonize(self.main, scheme),
		}
	}
}
