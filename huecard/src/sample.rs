//! Downsampling images to a fixed grid before clustering

use image::{imageops, DynamicImage, RgbImage};
use palette::Srgb;

/// The dimensions an image is resized to before clustering.
///
/// Clustering cost depends only on the grid size, not on the source resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
	/// Number of columns
	width: u32,
	/// Number of rows
	height: u32,
}

impl SampleGrid {
	/// The grid used for single image palette extraction
	pub const PALETTE: Self = Self { width: 100, height: 100 };

	/// The smaller grid used for fast batch extraction
	pub const BATCH: Self = Self { width: 50, height: 50 };

	/// Create a grid with the given dimensions, each raised to at least `1`
	#[must_use]
	pub fn new(width: u32, height: u32) -> Self {
		Self { width: width.max(1), height: height.max(1) }
	}

	/// Create a square grid
	#[must_use]
	pub fn square(side: u32) -> Self {
		Self::new(side, side)
	}

	/// Number of columns
	#[must_use]
	pub const fn width(self) -> u32 {
		self.width
	}

	/// Number of rows
	#[must_use]
	pub const fn height(self) -> u32 {
		self.height
	}

	/// The number of pixels produced by sampling with this grid
	#[must_use]
	pub const fn len(self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Always false, since both dimensions are at least `1`
	#[must_use]
	pub const fn is_empty(self) -> bool {
		false
	}
}

impl Default for SampleGrid {
	fn default() -> Self {
		Self::PALETTE
	}
}

/// Resize the image to `grid` with area averaging and flatten it row by row.
///
/// The result has exactly `grid.len()` pixels, unless the image itself has no pixels.
#[must_use]
pub fn sample(image: &RgbImage, grid: SampleGrid) -> Vec<Srgb<u8>> {
	if image.width() == 0 || image.height() == 0 {
		return Vec::new();
	}

	let resized = if image.dimensions() == (grid.width, grid.height) {
		image.clone()
	} else {
		imageops::thumbnail(image, grid.width, grid.height)
	};

	palette::cast::from_component_slice::<Srgb<u8>>(resized.as_raw()).to_vec()
}

/// Drop any alpha channel and then [`sample`] the image
#[must_use]
pub fn sample_dynamic(image: &DynamicImage, grid: SampleGrid) -> Vec<Srgb<u8>> {
	match image {
		DynamicImage::ImageRgb8(rgb) => sample(rgb, grid),
		other => sample(&other.to_rgb8(), grid),
	}
}
