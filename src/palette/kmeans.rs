//! Seeded k-means clustering over RGB pixel data.
//!
//! Identical pixels are merged into weighted samples before clustering,
//! which also makes centroid order deterministic for a fixed seed.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Tuning knobs for one clustering run.
#[derive(Debug, Clone)]
pub struct KmeansParams {
    pub clusters: usize,
    /// Number of restarts; the trial with the lowest inertia wins.
    pub trials: u32,
    pub max_iterations: u32,
    /// Squared centroid movement below which a trial stops iterating.
    pub convergence: f32,
    pub seed: u64,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            clusters: 5,
            trials: 10,
            max_iterations: 64,
            convergence: 1.0,
            seed: 42,
        }
    }
}

/// Runs k-means `trials` times and returns the centroids of the best trial.
pub fn run(pixels: &[[u8; 3]], params: &KmeansParams) -> Vec<[f32; 3]> {
    if pixels.is_empty() || params.clusters == 0 {
        return Vec::new();
    }

    let (colors, counts) = merge_duplicates(pixels);
    let mut rng = StdRng::seed_from_u64(params.seed);

    let mut best: Option<(Vec<[f32; 3]>, f32)> = None;
    for _ in 0..params.trials.max(1) {
        let (centroids, inertia) = lloyd(&colors, &counts, params, &mut rng);
        if best.as_ref().map_or(true, |(_, lowest)| inertia < *lowest) {
            best = Some((centroids, inertia));
        }
    }

    best.map(|(centroids, _)| centroids).unwrap_or_default()
}

/// Groups identical pixels, keeping first-seen order so results are
/// reproducible across runs.
fn merge_duplicates(pixels: &[[u8; 3]]) -> (Vec<[f32; 3]>, Vec<f32>) {
    let mut index: HashMap<[u8; 3], usize> = HashMap::new();
    let mut colors: Vec<[f32; 3]> = Vec::new();
    let mut counts: Vec<f32> = Vec::new();

    for pixel in pixels {
        let i = *index.entry(*pixel).or_insert_with(|| {
            colors.push([pixel[0] as f32, pixel[1] as f32, pixel[2] as f32]);
            counts.push(0.0);
            colors.len() - 1
        });
        counts[i] += 1.0;
    }

    (colors, counts)
}

fn lloyd(
    colors: &[[f32; 3]],
    counts: &[f32],
    params: &KmeansParams,
    rng: &mut StdRng,
) -> (Vec<[f32; 3]>, f32) {
    let mut centroids = seed_centroids(colors, counts, params.clusters, rng);
    let mut assignment = vec![0usize; colors.len()];

    for _ in 0..params.max_iterations {
        for (i, color) in colors.iter().enumerate() {
            assignment[i] = nearest(&centroids, color).0;
        }

        let mut sums = vec![[0.0f32; 3]; centroids.len()];
        let mut weights = vec![0.0f32; centroids.len()];
        for (i, color) in colors.iter().enumerate() {
            let cluster = assignment[i];
            for channel in 0..3 {
                sums[cluster][channel] += color[channel] * counts[i];
            }
            weights[cluster] += counts[i];
        }

        let mut movement: f32 = 0.0;
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            // An empty cluster keeps its previous centroid.
            if weights[cluster] == 0.0 {
                continue;
            }
            let updated = [
                sums[cluster][0] / weights[cluster],
                sums[cluster][1] / weights[cluster],
                sums[cluster][2] / weights[cluster],
            ];
            movement = movement.max(distance_squared(centroid, &updated));
            *centroid = updated;
        }

        if movement < params.convergence {
            break;
        }
    }

    let inertia = colors
        .iter()
        .enumerate()
        .map(|(i, color)| nearest(&centroids, color).1 * counts[i])
        .sum();

    (centroids, inertia)
}

/// k-means++ seeding: each new centroid is drawn weighted by squared
/// distance to the nearest existing one.
fn seed_centroids(
    colors: &[[f32; 3]],
    counts: &[f32],
    clusters: usize,
    rng: &mut StdRng,
) -> Vec<[f32; 3]> {
    let mut centroids = Vec::with_capacity(clusters);

    let first = match WeightedIndex::new(counts) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.random_range(0..colors.len()),
    };
    centroids.push(colors[first]);

    while centroids.len() < clusters {
        let weights: Vec<f32> = colors
            .iter()
            .zip(counts)
            .map(|(color, count)| nearest(&centroids, color).1 * count)
            .collect();
        let next = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.random_range(0..colors.len()),
        };
        centroids.push(colors[next]);
    }

    centroids
}

fn nearest(centroids: &[[f32; 3]], color: &[f32; 3]) -> (usize, f32) {
    let mut best = (0, f32::MAX);
    for (i, centroid) in centroids.iter().enumerate() {
        let distance = distance_squared(centroid, color);
        if distance < best.1 {
            best = (i, distance);
        }
    }
    best
}

fn distance_squared(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let mut sum = 0.0;
    for channel in 0..3 {
        let delta = a[channel] - b[channel];
        sum += delta * delta;
    }
    sum
}
