//! Error type shared by every fallible operation in the crate

use thiserror::Error;

/// Result alias for huecard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while extracting, converting, or rendering palettes
#[derive(Error, Debug)]
pub enum Error {
	/// Fewer sampled pixels than requested clusters
	///
	/// Lower `k` or sample the image on a larger grid.
	#[error("cannot form {k} clusters from {samples} sampled pixels")]
	InsufficientData {
		/// Number of sampled pixels
		samples: usize,
		/// Requested number of clusters
		k: u8,
	},

	/// The number of clusters is outside of `1..=10`
	#[error("cluster count must be in 1..={max}, got {k}", max = crate::MAX_CLUSTERS)]
	InvalidClusterCount {
		/// Requested number of clusters
		k: u8,
	},

	/// A hex color string could not be parsed
	#[error("invalid hex color {input:?}: {source}")]
	InvalidHex {
		/// The rejected text
		input: String,
		/// Underlying parse error
		#[source]
		source: palette::rgb::FromHexError,
	},

	/// A harmony scheme name was not recognized
	#[error("unknown harmony scheme {0:?} (expected auto, complementary, analogous, split-complementary, or triadic)")]
	UnknownScheme(String),

	/// Encoding the rendered card failed
	#[error("failed to encode palette card: {0}")]
	Encode(#[from] image::ImageError),
}
