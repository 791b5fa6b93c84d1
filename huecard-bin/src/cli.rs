//! Specifies the CLI and handles arg parsing

use clap::{Parser, ValueEnum};
use huecard::{HarmonyScheme, Theme, MAX_CLUSTERS};
use std::{
	fmt::{Debug, Display},
	ops::RangeBounds,
	path::PathBuf,
	str::FromStr,
};

/// Supported output formats for the final colors
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FormatOutput {
	/// sRGB hexcode
	Hex,
	/// sRGB (r,g,b) triple
	Rgb,
	/// CMYK percentages
	Cmyk,
	/// Whitespace with true color background
	Swatch,
	/// JSON object with the main, secondary, and neutral groups
	Json,
	/// Markdown design document
	Spec,
}

/// Ways to colorize the output text
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorizeOutput {
	/// Foreground
	Fg,
	/// Background
	Bg,
}

/// Extract the main, secondary, and neutral colors of images with k-means clustering.
///
/// The palette can be replaced by a color harmony of its main color,
/// printed in several formats, and rendered to a PNG swatch card.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Options {
	/// The paths to the input images
	#[arg(required = true)]
	pub images: Vec<PathBuf>,

	/// The format to print the colors in
	#[arg(short, long, default_value = "hex")]
	pub output: FormatOutput,

	/// Color the foreground or background for each printed color
	#[arg(short, long)]
	pub colorize: Option<ColorizeOutput>,

	/// The number of colors to find, in [1, 10]
	///
	/// Below 4, every color after the main one is a secondary color.
	/// Otherwise, at most 3 secondary colors are reported.
	#[arg(short, default_value_t = huecard::DEFAULT_CLUSTERS, value_parser = parse_valid_k)]
	pub k: u8,

	/// Replace the secondary colors with a harmony of the main color
	///
	/// One of auto, complementary, analogous, split-complementary, or triadic.
	/// Neutral colors are kept from the image.
	#[arg(short, long, default_value = "auto", value_parser = parse_scheme)]
	pub scheme: HarmonyScheme,

	/// Write a PNG swatch card of the palette to this path
	///
	/// With multiple images, the image number is appended to the file name.
	#[arg(long)]
	pub card: Option<PathBuf>,

	/// The built-in theme whose card color is used for empty swatch bands, in [0, 4]
	#[arg(short, long, default_value_t = 0, value_parser = parse_valid_theme)]
	pub theme: usize,

	/// Side length of the square grid images are resized to before clustering [default: 100, or 50 with --batch]
	///
	/// Smaller grids are faster but less accurate. The grid must hold at least k pixels.
	#[arg(short, long, value_parser = parse_valid_grid)]
	pub grid: Option<u32>,

	/// Process all images in parallel, on the faster 50x50 grid unless --grid is given
	#[arg(short, long)]
	pub batch: bool,

	/// The number of trials of k-means to run
	///
	/// The trial with the lowest variance is picked.
	#[arg(short = 'n', long, default_value_t = 1)]
	pub trials: u32,

	/// The maximum number of iterations for each k-means trial
	#[arg(short = 'i', long, default_value_t = 300)]
	pub max_iter: u32,

	/// The seed value used for the random number generator
	#[arg(long, default_value_t = huecard::DEFAULT_SEED)]
	pub seed: u64,

	/// Typography notes to include in the --output spec document
	#[arg(long)]
	pub font_notes: Option<String>,

	/// Layout notes to include in the --output spec document
	#[arg(long)]
	pub layout_notes: Option<String>,

	/// The number of threads to use, 0 lets rayon decide
	#[cfg(feature = "threads")]
	#[arg(long, default_value_t = 0)]
	pub threads: u8,

	/// Print timings and debug logs
	#[arg(long)]
	pub verbose: bool,
}

/// Parse a value and ensure it is in the provided, valid range
fn parse_in_range<T>(s: &str, range: impl RangeBounds<T> + Debug) -> Result<T, String>
where
	T: FromStr + Display + PartialOrd,
	T::Err: Display,
{
	let value: T = s.parse().map_err(|e| format!("{e}"))?;
	if range.contains(&value) {
		Ok(value)
	} else {
		Err(format!("{value} is not in {range:?}"))
	}
}

/// Parse the number of clusters and ensure it is in `1..=10`
fn parse_valid_k(s: &str) -> Result<u8, String> {
	parse_in_range(s, 1..=MAX_CLUSTERS)
}

/// Parse the grid side length and ensure it is at least `1`
fn parse_valid_grid(s: &str) -> Result<u32, String> {
	parse_in_range(s, 1..)
}

/// Parse a theme index and ensure it names one of the presets
fn parse_valid_theme(s: &str) -> Result<usize, String> {
	parse_in_range(s, 0..Theme::PRESETS.len())
}

/// Parse a harmony scheme name
fn parse_scheme(s: &str) -> Result<HarmonyScheme, String> {
	s.parse().map_err(|e: huecard::Error| e.to_string())
}
