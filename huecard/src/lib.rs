//! Extract design palettes from images.
//!
//! An image is downsampled to a small grid, its pixels are clustered with k-means in sRGB,
//! and the clusters are ranked into a main color, up to three secondary colors, and
//! the neutral (very dark or very light) colors.
//! The resulting [`Palette`] can be replaced by a color-wheel harmony of its main color,
//! rendered onto a PNG swatch card, or written out as a markdown design document.
//!
//! # Examples
//!
//! ## Read an image file and get its palette.
//!
//! ```no_run
//! let image = image::open("some image").unwrap().into_rgb8();
//! let palette = huecard::extract(&image, &huecard::PaletteOptions::default()).unwrap().palette;
//! println!("{}", palette.main);
//! ```
//!
//! ## Render a triadic harmony onto a swatch card.
//!
//! ```no_run
//! use huecard::{CardStyle, HarmonyScheme, PaletteOptions, Theme};
//!
//! let image = image::open("some image").unwrap().into_rgb8();
//! let palette = huecard::extract(&image, &PaletteOptions::default()).unwrap().palette;
//! let triadic = palette.harmonized(HarmonyScheme::Triadic);
//! let png = huecard::render_png(&triadic, &CardStyle::from_theme(&Theme::PRESETS[2])).unwrap();
//! std::fs::write("card.png", png).unwrap();
//! ```
//!
//! # Arguments
//!
//! ## K
//!
//! The number of clusters, in `1..=10`. Exactly `k` clusters are always returned,
//! even if the image has fewer distinct colors, in which case some centroids repeat.
//! With `k` below 4, every cluster after the main one is secondary.
//!
//! ## Grid
//!
//! The size images are resized to before clustering.
//! Clustering cost depends only on this, not on the image resolution.
//! The grid must hold at least `k` pixels.
//!
//! ## Seed
//!
//! Seeds the k-means++ initialization. The same image, `k`, and seed always give the same palette.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::enum_glob_use)]
#![allow(clippy::unreadable_literal)]

use image::RgbImage;
use tracing::debug;

mod classify;
mod color;
mod error;
mod harmony;
mod kmeans;
mod render;
mod report;
mod sample;

pub use classify::{classify, palette_from_swatches, sort_by_population, tag, Palette, Rank, Swatch, MAX_SECONDARY};
pub use color::{hex_to_rgb, rgb_to_cmyk, rgb_to_hex, Cmyk, Color};
pub use error::{Error, Result};
pub use harmony::{harmonize, HarmonyScheme};
pub use kmeans::{cluster, run, Cluster, ClusterResult, ColorCounts, KmeansParams, DEFAULT_SEED};
pub use render::{encode_png, label_color, render_card, render_png, CardStyle, Theme, CARD_HEIGHT, CARD_WIDTH};
pub use report::DesignSpec;
pub use sample::{sample, sample_dynamic, SampleGrid};

/// The largest supported number of clusters
pub const MAX_CLUSTERS: u8 = 10;

/// Number of clusters used when none is given
pub const DEFAULT_CLUSTERS: u8 = 5;

/// Options for [`extract`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteOptions {
	/// Number of clusters, in `1..=`[`MAX_CLUSTERS`]
	pub k: u8,
	/// The grid images are resized to before clustering
	pub grid: SampleGrid,
	/// k-means parameters
	pub kmeans: KmeansParams,
}

impl Default for PaletteOptions {
	fn default() -> Self {
		Self {
			k: DEFAULT_CLUSTERS,
			grid: SampleGrid::PALETTE,
			kmeans: KmeansParams::default(),
		}
	}
}

impl PaletteOptions {
	/// The default options with the smaller [`SampleGrid::BATCH`] grid, for use with [`extract_batch`]
	#[must_use]
	pub fn batch() -> Self {
		Self { grid: SampleGrid::BATCH, ..Self::default() }
	}
}

/// The raw clusters of an image together with the palette classified from them
#[derive(Debug, Clone)]
pub struct Extraction {
	/// Clustering output, one entry per requested cluster
	pub clusters: ClusterResult,
	/// The classified palette
	pub palette: Palette,
}

/// Extract the palette of an image.
///
/// # Errors
/// - [`Error::InvalidClusterCount`] if `options.k` is not in `1..=10`.
/// - [`Error::InsufficientData`] if the image, or the grid, has fewer pixels than `options.k`.
pub fn extract(image: &RgbImage, options: &PaletteOptions) -> Result<Extraction> {
	let pixels = sample(image, options.grid);
	debug!(
		width = image.width(),
		height = image.height(),
		samples = pixels.len(),
		"sampled image"
	);

	let clusters = cluster(&pixels, options.k, &options.kmeans)?;
	let palette = classify(&clusters.clusters, options.k)
		.ok_or(Error::InsufficientData { samples: pixels.len(), k: options.k })?;

	Ok(Extraction { clusters, palette })
}

/// The palette of one image in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
	/// 1-based position of the image in the batch
	pub index: usize,
	/// The classified palette
	pub palette: Palette,
}

/// Extract palettes from many images, all with the same `options`.
///
/// [`PaletteOptions::batch`] gives the usual batch settings on the smaller [`SampleGrid::BATCH`] grid.
/// Results are in input order and fail independently.
/// With the `threads` feature, images are processed in parallel.
#[must_use]
pub fn extract_batch(images: &[RgbImage], options: &PaletteOptions) -> Vec<Result<BatchEntry>> {
	let entry = |(i, image): (usize, &RgbImage)| {
		extract(image, options).map(|extraction| BatchEntry { index: i + 1, palette: extraction.palette })
	};

	debug!(images = images.len(), k = options.k, grid = ?options.grid, "extracting batch");

	#[cfg(feature = "threads")]
	{
		use rayon::prelude::*;
		images.par_iter().enumerate().map(entry).collect()
	}

	#[cfg(not(feature = "threads"))]
	{
		images.iter().enumerate().map(entry).collect()
	}
}
