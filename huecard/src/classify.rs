//! Ranking clusters into main / secondary / neutral groups

use crate::{kmeans::Cluster, Color};
use serde::Serialize;
use std::cmp::Reverse;

/// The most secondary colors a palette can have
pub const MAX_SECONDARY: usize = 3;

/// Position of a cluster in the population ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
	/// The most populous cluster
	Main,
	/// One of the next most populous clusters
	Secondary,
	/// Not part of the main or secondary group
	Unranked,
}

/// A classified cluster.
///
/// The rank and the neutral flag are independent,
/// so a main or secondary color can also be neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
	/// The cluster color
	pub color: Color,
	/// Number of sampled pixels in the cluster
	pub population: u32,
	/// Population rank
	pub rank: Rank,
	/// Whether the luma is below 50 or above 200
	pub neutral: bool,
}

/// A classified color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
	/// The dominant color
	pub main: Color,
	/// The next colors by descending population, at most [`MAX_SECONDARY`] of them
	pub secondary: Vec<Color>,
	/// Very dark or very light colors, which may also appear as main or secondary
	pub neutral: Vec<Color>,
}

impl Palette {
	/// Create a palette from its parts
	#[must_use]
	pub fn new(main: Color, secondary: Vec<Color>, neutral: Vec<Color>) -> Self {
		Self { main, secondary, neutral }
	}

	/// Replace the neutral colors, e.g. to merge classifier neutrals into a synthesized palette
	#[must_use]
	pub fn with_neutral(mut self, neutral: Vec<Color>) -> Self {
		self.neutral = neutral;
		self
	}

	/// Every color in the palette, in main / secondary / neutral order, including repeats
	pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
		std::iter::once(self.main)
			.chain(self.secondary.iter().copied())
			.chain(self.neutral.iter().copied())
	}
}

/// Sort clusters by descending population.
///
/// Ties go to the centroid with the smaller channel sum, then to the earlier cluster.
#[must_use]
pub fn sort_by_population(clusters: &[Cluster]) -> Vec<Cluster> {
	let mut sorted = clusters.to_vec();
	sorted.sort_by_key(|c| (Reverse(c.population), c.centroid.channel_sum()));
	sorted
}

/// Tag every cluster with its rank and neutral flag, in descending population order.
///
/// `k` is the number of requested clusters:
/// below 4 every cluster after the main one is secondary,
/// otherwise only the next [`MAX_SECONDARY`] are.
#[must_use]
pub fn tag(clusters: &[Cluster], k: u8) -> Vec<Swatch> {
	let secondary_len = if k >= 4 { MAX_SECONDARY } else { usize::MAX };

	sort_by_population(clusters)
		.into_iter()
		.enumerate()
		.map(|(i, cluster)| Swatch {
			color: cluster.centroid,
			population: cluster.population,
			rank: match i {
				0 => Rank::Main,
				i if i <= secondary_len => Rank::Secondary,
				_ => Rank::Unranked,
			},
			neutral: cluster.centroid.is_neutral(),
		})
		.collect()
}

/// Project tagged swatches onto a [`Palette`].
///
/// Returns `None` if there are no swatches.
#[must_use]
pub fn palette_from_swatches(swatches: &[Swatch]) -> Option<Palette> {
	let main = swatches.iter().find(|s| s.rank == Rank::Main)?.color;

	let secondary = swatches
		.iter()
		.filter(|s| s.rank == Rank::Secondary)
		.map(|s| s.color)
		.collect();

	let neutral = swatches.iter().filter(|s| s.neutral).map(|s| s.color).collect();

	Some(Palette { main, secondary, neutral })
}

/// Classify clusters into a [`Palette`].
///
/// Returns `None` only if `clusters` is empty.
#[must_use]
pub fn classify(clusters: &[Cluster], k: u8) -> Option<Palette> {
	palette_from_swatches(&tag(clusters, k))
}
