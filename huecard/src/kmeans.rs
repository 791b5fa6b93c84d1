//! Lloyd's k-means over sRGB pixels with k-means++ seeding and a fixed random seed

use crate::{Color, Error, Result, MAX_CLUSTERS};
use palette::Srgb;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Seed used for every clustering run unless overridden
pub const DEFAULT_SEED: u64 = 42;

/// Tuning knobs for a k-means run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KmeansParams {
	/// Seed for the random number generator that picks the initial centroids
	pub seed: u64,
	/// Number of independent runs, the one with the lowest variance wins
	pub trials: u32,
	/// Maximum number of Lloyd iterations per trial
	pub max_iter: u32,
	/// Total centroid movement (in normalized sRGB units) below which a trial has converged
	pub convergence_threshold: f32,
}

impl Default for KmeansParams {
	fn default() -> Self {
		Self {
			seed: DEFAULT_SEED,
			trials: 1,
			max_iter: 300,
			convergence_threshold: 1e-5,
		}
	}
}

/// Deduplicated pixels with the number of times each one occurs
#[derive(Debug, Clone)]
pub struct ColorCounts {
	/// Unique colors, normalized to `0.0..=1.0`
	colors: Vec<Srgb<f32>>,
	/// The number of pixels for each color
	counts: Vec<u32>,
	/// Total number of pixels
	total: usize,
}

impl ColorCounts {
	/// Merge duplicate pixels, keeping the order in which colors first appear
	#[must_use]
	pub fn new(pixels: &[Srgb<u8>]) -> Self {
		let mut colors: Vec<Srgb<f32>> = Vec::new();
		let mut counts: Vec<u32> = Vec::new();

		// Packed Srgb -> data index
		let mut memo: HashMap<u32, usize> = HashMap::new();

		for srgb in pixels {
			let key = srgb.into_u32::<palette::rgb::channels::Rgba>();
			let index = *memo.entry(key).or_insert_with(|| {
				colors.push(srgb.into_format());
				counts.push(0);
				colors.len() - 1
			});

			counts[index] += 1;
		}

		Self { colors, counts, total: pixels.len() }
	}

	/// Number of unique colors
	#[must_use]
	pub fn num_colors(&self) -> usize {
		self.colors.len()
	}

	/// Number of pixels, counting duplicates
	#[must_use]
	pub const fn num_pixels(&self) -> usize {
		self.total
	}

	/// Each unique color paired with its count
	fn pairs(&self) -> impl Iterator<Item = (Srgb<f32>, u32)> + '_ {
		self.colors.iter().copied().zip(self.counts.iter().copied())
	}
}

/// Squared euclidean distance between two normalized colors
fn squared_distance(x: Srgb<f32>, y: Srgb<f32>) -> f32 {
	let dr = x.red - y.red;
	let dg = x.green - y.green;
	let db = x.blue - y.blue;
	dr * dr + dg * dg + db * db
}

/// The all zero sum
const ZERO_SUM: Srgb<f64> = Srgb::new(0.0, 0.0, 0.0);

/// Bookkeeping for each k-means data point
struct PointData {
	/// Center assignment for this data point
	assignment: Vec<u8>,
	/// Squared distance to the closest chosen centroid, used by k-means++
	weight: Vec<f32>,
}

impl PointData {
	/// Create a [`PointData`] with the given number data points
	fn new(n: usize) -> Self {
		Self {
			assignment: vec![0; n],
			weight: vec![f32::INFINITY; n],
		}
	}

	/// Reset data for the next k-means trial
	fn reset(&mut self) {
		self.assignment.fill(0);
		self.weight.fill(f32::INFINITY);
	}
}

/// Data for each center/centroid
struct CenterData {
	/// The centroid point
	centroid: Vec<Srgb<f32>>,
	/// Vector sum for all data points in this center
	sum: Vec<Srgb<f64>>,
	/// Number of pixels in this center
	count: Vec<u32>,
}

impl CenterData {
	/// Create a [`CenterData`] with the given number of centers
	fn new(k: u8) -> Self {
		let k = usize::from(k);
		Self {
			centroid: Vec::with_capacity(k),
			sum: vec![ZERO_SUM; k],
			count: vec![0; k],
		}
	}

	/// Reset data for the next k-means trial
	fn reset(&mut self) {
		self.centroid.clear();
		self.sum.fill(ZERO_SUM);
		self.count.fill(0);
	}
}

/// Holds all the state used by k-means
struct KmeansState {
	/// Data for each center
	centers: CenterData,
	/// One fourth of the squared distance between each pairs of centers
	distances: Vec<(u8, f32)>,
	/// Data for each point
	points: PointData,
}

impl KmeansState {
	/// Initialize a new [`KmeansState`] with `k` centers and `n` data points
	fn new(k: u8, n: usize) -> Self {
		Self {
			centers: CenterData::new(k),
			distances: vec![(0, 0.0); usize::from(k) * usize::from(k)],
			points: PointData::new(n),
		}
	}
}

/// One cluster: its rounded centroid and the number of pixels assigned to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
	/// Mean color of the cluster, rounded to integer channels
	pub centroid: Color,
	/// Number of sampled pixels in the cluster
	pub population: u32,
}

/// Result from running k-means
#[derive(Debug, Clone)]
pub struct ClusterResult {
	/// Exactly `k` clusters, in centroid order (not sorted by population)
	pub clusters: Vec<Cluster>,
	/// Weighted sum of squared distances from each pixel to its centroid
	///
	/// A lower variance indicates a tighter fit.
	pub variance: f64,
	/// Number of Lloyd iterations of the winning trial
	pub iterations: u32,
}

impl ClusterResult {
	/// Total population over all clusters
	#[must_use]
	pub fn num_pixels(&self) -> u64 {
		self.clusters.iter().map(|c| u64::from(c.population)).sum()
	}
}

/// Choose the starting centroids using the k-means++ algorithm.
///
/// If every point already matches a chosen centroid,
/// the remaining centroids repeat the chosen ones so that exactly `k` centroids exist.
fn kmeans_plus_plus(
	k: u8,
	rng: &mut impl Rng,
	data: &ColorCounts,
	centroids: &mut Vec<Srgb<f32>>,
	weights: &mut [f32],
) {
	use rand::{
		distributions::{WeightedError::*, WeightedIndex},
		prelude::Distribution,
	};

	let colors = &data.colors;
	let k = usize::from(k);

	// Pick the first centroid proportionally to pixel counts
	match WeightedIndex::<u32>::new(&data.counts) {
		Ok(sampler) => centroids.push(colors[sampler.sample(rng)]),
		Err(_) => centroids.push(colors[rng.gen_range(0..colors.len())]),
	}

	// Pick each next centroid with a weighted probability based off the squared distance to its closest centroid
	while centroids.len() < k {
		let centroid = centroids[centroids.len() - 1];
		for (weight, &color) in weights.iter_mut().zip(colors) {
			*weight = f32::min(*weight, squared_distance(color, centroid));
		}

		#[allow(clippy::cast_precision_loss)]
		let weighted = weights.iter().zip(&data.counts).map(|(&w, &n)| w * n as f32);

		match WeightedIndex::<f32>::new(weighted) {
			Ok(sampler) => centroids.push(colors[sampler.sample(rng)]),
			Err(AllWeightsZero) => break, // all points exactly match a centroid
			Err(InvalidWeight | NoItem | TooMany) => {
				unreachable!("colors is non-empty and each weight is a finite squared distance >= 0 times a count")
			},
		}
	}

	let chosen = centroids.len();
	for i in chosen..k {
		centroids.push(centroids[i % chosen]);
	}
}

/// Initializes the center sums and counts based off the initial assignment
fn compute_initial_sums(data: &ColorCounts, centers: &mut CenterData, assignment: &[u8]) {
	for ((color, n), &center) in data.pairs().zip(assignment) {
		let i = usize::from(center);
		let nf = f64::from(n);
		let sum = &mut centers.sum[i];
		sum.red += nf * f64::from(color.red);
		sum.green += nf * f64::from(color.green);
		sum.blue += nf * f64::from(color.blue);
		centers.count[i] += n;
	}
}

/// For each pair of centers, update their distances and sort each center's row by increasing distance
// i and j are < centroids.len() <= MAX_CLUSTERS
#[allow(clippy::cast_possible_truncation)]
fn update_distances(centroids: &[Srgb<f32>], distances: &mut [(u8, f32)]) {
	let k = centroids.len();
	for i in 0..k {
		let ci = centroids[i];
		distances[i * k + i] = (i as u8, 0.0);
		for j in (i + 1)..k {
			let cj = centroids[j];
			let dist = squared_distance(ci, cj) / 4.0;
			distances[j * k + i] = (i as u8, dist);
			distances[i * k + j] = (j as u8, dist);
		}
	}

	for row in distances.chunks_exact_mut(k) {
		row.sort_by(|(_, x), (_, y)| f32::total_cmp(x, y));
	}
}

/// For each data point, move it to its closest center.
///
/// A point only moves if another center is strictly closer, so ties keep the current assignment.
fn update_assignments(data: &ColorCounts, centers: &mut CenterData, distances: &[(u8, f32)], points: &mut PointData) {
	let k = centers.centroid.len();
	for ((color, n), center) in data.pairs().zip(&mut points.assignment) {
		let ci = usize::from(*center);
		let dist = squared_distance(color, centers.centroid[ci]);

		// Find the closest center
		let mut min_dist = dist;
		let mut min_center = *center;
		for &(other_center, half_dist) in &distances[(ci * k + 1)..((ci + 1) * k)] {
			if dist < half_dist {
				break;
			}

			let other_dist = squared_distance(color, centers.centroid[usize::from(other_center)]);
			if other_dist < min_dist {
				min_dist = other_dist;
				min_center = other_center;
			}
		}

		// Move this point to its new center
		if min_center != *center {
			let nf = f64::from(n);
			let r = nf * f64::from(color.red);
			let g = nf * f64::from(color.green);
			let b = nf * f64::from(color.blue);

			let old_sum = &mut centers.sum[ci];
			old_sum.red -= r;
			old_sum.green -= g;
			old_sum.blue -= b;
			centers.count[ci] -= n;

			let cj = usize::from(min_center);

			let new_sum = &mut centers.sum[cj];
			new_sum.red += r;
			new_sum.green += g;
			new_sum.blue += b;
			centers.count[cj] += n;

			*center = min_center;
		}
	}
}

/// For each center, update its centroid using the vector sums and return the total movement.
///
/// Empty centers keep their previous centroid.
fn update_centroids(centers: &mut CenterData) -> f32 {
	let mut total_delta = 0.0;
	for ((centroid, &n), sum) in centers.centroid.iter_mut().zip(&centers.count).zip(&centers.sum) {
		if n == 0 {
			continue;
		}

		let n = f64::from(n);
		// Sums may need greater precision, but the average can fall back down to a reduced precision
		#[allow(clippy::cast_possible_truncation)]
		let new_centroid = Srgb::new((sum.red / n) as f32, (sum.green / n) as f32, (sum.blue / n) as f32);

		total_delta += squared_distance(*centroid, new_centroid).sqrt();
		*centroid = new_centroid;
	}

	total_delta
}

/// Run one trial of k-means
fn kmeans(
	data: &ColorCounts,
	KmeansState { centers, distances, points }: &mut KmeansState,
	k: u8,
	max_iter: u32,
	convergence: f32,
	seed: u64,
) -> ClusterResult {
	let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
	kmeans_plus_plus(k, &mut rng, data, &mut centers.centroid, &mut points.weight);
	compute_initial_sums(data, centers, &points.assignment);

	let mut iterations = 0;
	let mut total_delta = f32::INFINITY;
	while iterations < max_iter && total_delta > convergence {
		update_distances(&centers.centroid, distances);
		update_assignments(data, centers, distances, points);
		total_delta = update_centroids(centers);
		iterations += 1;
		trace!(iteration = iterations, total_delta, "k-means step");
	}

	let variance = data
		.pairs()
		.zip(&points.assignment)
		.map(|((color, n), &center)| {
			f64::from(n) * f64::from(squared_distance(color, centers.centroid[usize::from(center)]))
		})
		.sum();

	let clusters = centers
		.centroid
		.iter()
		.zip(&centers.count)
		.map(|(&centroid, &population)| Cluster {
			centroid: centroid.into_format::<u8>().into(),
			population,
		})
		.collect();

	centers.reset();
	points.reset();

	ClusterResult { clusters, variance, iterations }
}

/// Partition `pixels` into exactly `k` clusters.
///
/// # Errors
/// - [`Error::InvalidClusterCount`] if `k` is `0` or greater than [`MAX_CLUSTERS`].
/// - [`Error::InsufficientData`] if there are fewer pixels than `k`.
pub fn cluster(pixels: &[Srgb<u8>], k: u8, params: &KmeansParams) -> Result<ClusterResult> {
	validate(pixels.len(), k)?;
	run(&ColorCounts::new(pixels), k, params)
}

/// Check `k` against the allowed range and the number of pixels
fn validate(samples: usize, k: u8) -> Result<()> {
	if k == 0 || k > MAX_CLUSTERS {
		Err(Error::InvalidClusterCount { k })
	} else if samples < usize::from(k) {
		Err(Error::InsufficientData { samples, k })
	} else {
		Ok(())
	}
}

/// Run multiple trials of k-means on already deduplicated pixels, taking the trial with the lowest variance
///
/// # Errors
/// See [`cluster`].
pub fn run(data: &ColorCounts, k: u8, params: &KmeansParams) -> Result<ClusterResult> {
	validate(data.num_pixels(), k)?;

	debug!(
		pixels = data.num_pixels(),
		unique = data.num_colors(),
		k,
		seed = params.seed,
		"clustering"
	);

	let mut state = KmeansState::new(k, data.num_colors());

	let result = (0..params.trials.max(1))
		.map(|i| {
			kmeans(
				data,
				&mut state,
				k,
				params.max_iter,
				params.convergence_threshold,
				params.seed ^ u64::from(i),
			)
		})
		.min_by(|x, y| f64::total_cmp(&x.variance, &y.variance))
		.ok_or(Error::InsufficientData { samples: data.num_pixels(), k })?;

	debug!(iterations = result.iterations, variance = result.variance, "k-means finished");

	Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	fn test_pixels() -> Vec<Srgb<u8>> {
		let colors = [
			(Srgb::new(230, 40, 40), 120),
			(Srgb::new(220, 50, 35), 80),
			(Srgb::new(30, 30, 200), 90),
			(Srgb::new(40, 25, 210), 60),
			(Srgb::new(245, 245, 240), 50),
			(Srgb::new(10, 12, 8), 40),
			(Srgb::new(60, 180, 75), 30),
			(Srgb::new(70, 170, 80), 20),
		];

		colors
			.into_iter()
			.flat_map(|(color, n)| std::iter::repeat(color).take(n))
			.collect()
	}

	fn initialize(k: u8) -> (ColorCounts, KmeansState) {
		let data = ColorCounts::new(&test_pixels());
		let mut state = KmeansState::new(k, data.num_colors());
		let mut rng = Xoroshiro128PlusPlus::seed_from_u64(DEFAULT_SEED);

		kmeans_plus_plus(k, &mut rng, &data, &mut state.centers.centroid, &mut state.points.weight);
		compute_initial_sums(&data, &mut state.centers, &state.points.assignment);

		(data, state)
	}

	fn center_sum(sums: &[Srgb<f64>]) -> Srgb<f64> {
		let mut center_sum = ZERO_SUM;
		for sum in sums {
			center_sum.red += sum.red;
			center_sum.green += sum.green;
			center_sum.blue += sum.blue;
		}
		center_sum
	}

	#[test]
	fn color_counts_merge_duplicates() {
		let data = ColorCounts::new(&test_pixels());
		assert_eq!(data.num_colors(), 8);
		assert_eq!(data.num_pixels(), 490);
		assert_eq!(data.counts, vec![120, 80, 90, 60, 50, 40, 30, 20]);
	}

	fn kmeans_plus_plus_num_centroids(k: u8, unique: usize) {
		let pixels = test_pixels();
		let data = ColorCounts::new(&pixels);
		let data = ColorCounts {
			colors: data.colors[..unique].to_vec(),
			counts: data.counts[..unique].to_vec(),
			total: data.counts[..unique].iter().sum::<u32>() as usize,
		};

		let mut state = KmeansState::new(k, data.num_colors());
		kmeans_plus_plus(
			k,
			&mut Xoroshiro128PlusPlus::seed_from_u64(0),
			&data,
			&mut state.centers.centroid,
			&mut state.points.weight,
		);

		assert_eq!(state.centers.centroid.len(), usize::from(k));

		let mut distinct = state.centers.centroid.clone();
		distinct.sort_by(|x, y| f32::total_cmp(&x.red, &y.red).then(f32::total_cmp(&x.green, &y.green)));
		distinct.dedup();
		assert_eq!(distinct.len(), usize::min(usize::from(k), unique));
	}

	#[test]
	fn kmeans_plus_plus_k_greater_than_n() {
		kmeans_plus_plus_num_centroids(6, 2);
	}

	#[test]
	fn kmeans_plus_plus_k_equals_n() {
		kmeans_plus_plus_num_centroids(4, 4);
	}

	#[test]
	fn kmeans_plus_plus_k_less_than_n() {
		kmeans_plus_plus_num_centroids(2, 6);
	}

	#[test]
	fn kmeans_plus_plus_weights_stay_finite() {
		// the eight corners of the sRGB cube, each covering a full 500x500 grid
		let corners = (0..8u8)
			.map(|i| Srgb::new((i & 1) * 255, ((i >> 1) & 1) * 255, ((i >> 2) & 1) * 255))
			.collect::<Vec<_>>();
		let data = ColorCounts {
			colors: corners.iter().map(|c| c.into_format()).collect(),
			counts: vec![250_000; corners.len()],
			total: 250_000 * corners.len(),
		};

		let mut state = KmeansState::new(10, data.num_colors());
		kmeans_plus_plus(
			10,
			&mut Xoroshiro128PlusPlus::seed_from_u64(DEFAULT_SEED),
			&data,
			&mut state.centers.centroid,
			&mut state.points.weight,
		);

		assert_eq!(state.centers.centroid.len(), 10);
		assert!(state.points.weight.iter().all(|w| w.is_finite() && *w >= 0.0));
	}

	#[test]
	fn update_distances_sorts_each_row() {
		let centroids = ColorCounts::new(&test_pixels()).colors;
		let len = centroids.len();
		let mut distances = vec![(0, 0.0); len * len];

		update_distances(&centroids, &mut distances);

		#[allow(clippy::cast_possible_truncation)]
		for (i, row) in distances.chunks_exact(len).enumerate() {
			assert!(row[0] == (i as u8, 0.0));
			for j in 0..(len - 1) {
				assert!(row[j].1 <= row[j + 1].1);
			}
		}
	}

	#[test]
	fn compute_initial_sums_preserves_sum() {
		let (data, state) = initialize(4);

		let mut expected_sum = ZERO_SUM;
		let mut expected_count = 0;
		for (color, count) in data.pairs() {
			expected_count += count;
			let n = f64::from(count);
			expected_sum.red += n * f64::from(color.red);
			expected_sum.green += n * f64::from(color.green);
			expected_sum.blue += n * f64::from(color.blue);
		}

		assert_eq!(expected_count, state.centers.count.iter().sum::<u32>());
		approx::assert_relative_eq!(expected_sum, center_sum(&state.centers.sum));
	}

	#[test]
	fn update_assignments_preserves_sum() {
		let (data, mut state) = initialize(4);

		let expected_sum = center_sum(&state.centers.sum);
		let expected_count = state.centers.count.iter().sum::<u32>();

		update_distances(&state.centers.centroid, &mut state.distances);
		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		assert_eq!(expected_count, state.centers.count.iter().sum::<u32>());
		approx::assert_relative_eq!(expected_sum, center_sum(&state.centers.sum), epsilon = 1e-9);
	}

	#[test]
	fn update_assignments_picks_closest_center() {
		let (data, mut state) = initialize(4);

		update_distances(&state.centers.centroid, &mut state.distances);
		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		for (color, &center) in data.colors.iter().zip(&state.points.assignment) {
			let assigned = squared_distance(*color, state.centers.centroid[usize::from(center)]);
			for &other in &state.centers.centroid {
				assert!(assigned <= squared_distance(*color, other));
			}
		}
	}

	#[test]
	fn update_centroids_total_delta() {
		let (data, mut state) = initialize(4);

		let old_centroids = state.centers.centroid.clone();

		update_distances(&state.centers.centroid, &mut state.distances);
		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		let total_delta = update_centroids(&mut state.centers);

		let expected = old_centroids
			.iter()
			.zip(&state.centers.centroid)
			.map(|(&old, &new)| squared_distance(old, new).sqrt())
			.sum::<f32>();

		assert!((total_delta - expected).abs() <= 1e-6);
	}

	#[test]
	fn empty_center_keeps_centroid() {
		let mut centers = CenterData::new(2);
		centers.centroid = vec![Srgb::new(0.5, 0.5, 0.5), Srgb::new(0.1, 0.2, 0.3)];
		centers.sum[0] = Srgb::new(1.0, 1.0, 1.0);
		centers.count[0] = 2;

		update_centroids(&mut centers);

		assert_eq!(centers.centroid[1], Srgb::new(0.1, 0.2, 0.3));
	}

	#[test]
	fn populations_sum_to_pixel_count() {
		let pixels = test_pixels();
		for k in 1..=MAX_CLUSTERS {
			let result = cluster(&pixels, k, &KmeansParams::default()).unwrap();
			assert_eq!(result.clusters.len(), usize::from(k));
			assert_eq!(result.num_pixels(), pixels.len() as u64);
		}
	}

	#[test]
	fn deterministic_for_fixed_seed() {
		let pixels = test_pixels();
		let params = KmeansParams::default();

		let first = cluster(&pixels, 5, &params).unwrap();
		for _ in 0..3 {
			let again = cluster(&pixels, 5, &params).unwrap();
			assert_eq!(first.clusters, again.clusters);
			assert_eq!(first.iterations, again.iterations);
		}
	}

	#[test]
	fn more_trials_never_increase_variance() {
		let pixels = test_pixels();
		let one = cluster(&pixels, 3, &KmeansParams::default()).unwrap();
		let many = cluster(&pixels, 3, &KmeansParams { trials: 4, ..KmeansParams::default() }).unwrap();
		assert!(many.variance <= one.variance);
	}

	#[test]
	fn max_iter_reached() {
		let pixels = test_pixels();
		let params = KmeansParams { max_iter: 1, convergence_threshold: 0.0, ..KmeansParams::default() };
		let result = cluster(&pixels, 4, &params).unwrap();
		assert_eq!(result.iterations, 1);
	}

	#[test]
	fn invalid_cluster_counts() {
		let pixels = test_pixels();
		assert!(matches!(
			cluster(&pixels, 0, &KmeansParams::default()),
			Err(Error::InvalidClusterCount { k: 0 })
		));
		assert!(matches!(
			cluster(&pixels, MAX_CLUSTERS + 1, &KmeansParams::default()),
			Err(Error::InvalidClusterCount { .. })
		));
	}

	#[test]
	fn fewer_pixels_than_clusters() {
		let pixels = vec![Srgb::new(1, 2, 3); 4];
		assert!(matches!(
			cluster(&pixels, 5, &KmeansParams::default()),
			Err(Error::InsufficientData { samples: 4, k: 5 })
		));
		assert!(cluster(&pixels, 4, &KmeansParams::default()).is_ok());
	}

	#[test]
	fn two_colors_with_five_clusters() {
		let mut pixels = vec![Srgb::new(255, 0, 0); 30];
		pixels.extend(vec![Srgb::new(0, 0, 255); 20]);

		let result = cluster(&pixels, 5, &KmeansParams::default()).unwrap();
		assert_eq!(result.clusters.len(), 5);

		let mut populated = result
			.clusters
			.iter()
			.filter(|c| c.population > 0)
			.map(|c| (c.centroid, c.population))
			.collect::<Vec<_>>();
		populated.sort_by_key(|&(_, n)| std::cmp::Reverse(n));

		assert_eq!(populated, vec![(Color::new(255, 0, 0), 30), (Color::new(0, 0, 255), 20)]);
	}

	#[test]
	fn solid_color_degenerates() {
		let pixels = vec![Srgb::new(200, 100, 50); 100];
		let result = cluster(&pixels, 5, &KmeansParams::default()).unwrap();

		for cluster in &result.clusters {
			assert_eq!(cluster.centroid, Color::new(200, 100, 50));
		}
		assert_eq!(result.num_pixels(), 100);
	}
}
