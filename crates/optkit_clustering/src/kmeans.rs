//! Lloyd's k-means over 2-D points.
//!
//! **Objective**: minimise the within-cluster sum of squares
//!
//! ```text
//! J = Σ_k Σ_{p ∈ C_k} ||p - μ_k||²
//! ```
//!
//! Each pass assigns every point to its nearest centroid (squared Euclidean
//! distance, first minimum wins) and then moves each non-empty cluster's
//! centroid to the mean of its members. The run stops when no centroid of a
//! non-empty cluster moved more than the tolerance in either coordinate, or
//! when the iteration budget is spent.
//!
//! Seeding is random. All entry points either take a caller-supplied
//! [`rand::Rng`] or draw from the thread-local generator, so tests pin
//! `StdRng::seed_from_u64` for reproducible runs.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::ClusteringError;
use crate::point::{Centroid, Cluster, DataPoint};

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default per-coordinate centroid movement below which the run has converged.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// How initial centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Seeding {
    /// Shuffle the points and take the first `k` (sampling without replacement).
    #[default]
    RandomSample,
    /// k-means++: each further seed drawn with probability proportional to
    /// its squared distance from the nearest seed already chosen.
    KMeansPlusPlus,
}

/// What happens to a cluster that receives no points in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EmptyClusterPolicy {
    /// The centroid stays where it was.
    #[default]
    KeepCentroid,
    /// The centroid jumps to the point farthest from its own centroid.
    ///
    /// The cluster picks that point up on the next pass; if the budget runs
    /// out first it is returned empty.
    ReseedFarthest,
}

/// k-means configuration.
///
/// The defaults reproduce plain [`k_means_clustering`]: random-sample seeding,
/// stale centroids for empty clusters, tolerance 0.001 and 100 iterations.
///
/// # Examples
/// ```
/// use optkit_clustering::{DataPoint, KMeans, Seeding};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let points = vec![
///     DataPoint::new(0.0, 0.0, "a"),
///     DataPoint::new(0.2, 0.1, "b"),
///     DataPoint::new(9.0, 9.0, "c"),
///     DataPoint::new(9.1, 8.8, "d"),
/// ];
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let fit = KMeans::new(2)
///     .with_seeding(Seeding::KMeansPlusPlus)
///     .fit(&points, &mut rng)
///     .unwrap();
///
/// assert!(fit.converged);
/// assert_eq!(fit.assignments[0], fit.assignments[1]);
/// assert_ne!(fit.assignments[0], fit.assignments[2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KMeans {
    /// Number of clusters.
    pub k: usize,
    /// Maximum assignment/update passes.
    pub max_iterations: usize,
    /// Convergence threshold on centroid movement per coordinate.
    pub tolerance: f64,
    /// Initial centroid selection.
    pub seeding: Seeding,
    /// Handling of clusters left without members.
    pub empty_cluster_policy: EmptyClusterPolicy,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            k: 2,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            seeding: Seeding::default(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }
}

/// Result of [`KMeans::fit`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KMeansFit<M = ()> {
    /// Exactly `k` clusters, possibly some empty.
    pub clusters: Vec<Cluster<M>>,
    /// Cluster index of each input point, in input order.
    pub assignments: Vec<usize>,
    /// Passes performed.
    pub iterations: usize,
    /// Whether the movement tolerance was reached within the budget.
    pub converged: bool,
}

impl KMeans {
    /// Default configuration with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the movement tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the seeding strategy.
    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Sets the empty-cluster policy.
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    fn validate(&self, n_points: usize) -> Result<(), ClusteringError> {
        if self.k == 0 {
            return Err(ClusteringError::InvalidParameter {
                name: "k",
                reason: "must be at least 1".to_string(),
            });
        }
        if n_points < self.k {
            return Err(ClusteringError::InsufficientData {
                points: n_points,
                clusters: self.k,
            });
        }
        if self.max_iterations == 0 {
            return Err(ClusteringError::InvalidParameter {
                name: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ClusteringError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be non-negative, got {}", self.tolerance),
            });
        }
        Ok(())
    }

    /// Runs k-means on `points`, drawing seeds from `rng`.
    ///
    /// # Errors
    /// - `ClusteringError::InvalidParameter` for `k == 0`, `max_iterations == 0`
    ///   or a negative/NaN tolerance
    /// - `ClusteringError::InsufficientData` when `points.len() < k`
    pub fn fit<M, R>(
        &self,
        points: &[DataPoint<M>],
        rng: &mut R,
    ) -> Result<KMeansFit<M>, ClusteringError>
    where
        M: Clone,
        R: Rng + ?Sized,
    {
        self.validate(points.len())?;

        debug!(
            points = points.len(),
            k = self.k,
            seeding = ?self.seeding,
            "starting k-means"
        );

        let mut centroids = match self.seeding {
            Seeding::RandomSample => seed_random_sample(points, self.k, rng),
            Seeding::KMeansPlusPlus => seed_plus_plus(points, self.k, rng),
        };
        let mut assignments = vec![0usize; points.len()];

        let tolerance = self.tolerance;
        let mut iterations = 0;
        let mut changed = true;

        while changed && iterations < self.max_iterations {
            let counts = assign(points, &centroids, &mut assignments);
            changed = update(points, &assignments, &counts, &mut centroids, tolerance);

            if self.empty_cluster_policy == EmptyClusterPolicy::ReseedFarthest
                && reseed_empty(points, &assignments, &counts, &mut centroids, tolerance)
            {
                changed = true;
            }

            iterations += 1;
            trace!(iteration = iterations, changed, "k-means pass");
        }

        let converged = !changed;
        debug!(iterations, converged, "k-means finished");

        Ok(KMeansFit {
            clusters: collect_clusters(points, &centroids, &assignments),
            assignments,
            iterations,
            converged,
        })
    }
}

/// Seeds from the first `k` entries of a shuffled index list.
fn seed_random_sample<M, R>(points: &[DataPoint<M>], k: usize, rng: &mut R) -> Vec<Centroid>
where
    R: Rng + ?Sized,
{
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.shuffle(rng);
    order[..k].iter().map(|&i| points[i].position()).collect()
}

fn seed_plus_plus<M, R>(points: &[DataPoint<M>], k: usize, rng: &mut R) -> Vec<Centroid>
where
    R: Rng + ?Sized,
{
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].position());

    // Squared distance from each point to its nearest seed so far
    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| centroids[0].squared_distance(p.x, p.y))
        .collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();

        let chosen = if total > 0.0 && total.is_finite() {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            nearest
                .iter()
                .position(|&d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or(points.len() - 1)
        } else {
            // Every point coincides with a seed
            rng.gen_range(0..points.len())
        };

        let seed = points[chosen].position();
        for (d, p) in nearest.iter_mut().zip(points) {
            *d = d.min(seed.squared_distance(p.x, p.y));
        }
        centroids.push(seed);
    }

    centroids
}

/// Assigns each point to its nearest centroid and returns member counts.
///
/// Ties go to the lowest centroid index; a point whose distances are all NaN
/// lands in cluster 0.
fn assign<M>(
    points: &[DataPoint<M>],
    centroids: &[Centroid],
    assignments: &mut [usize],
) -> Vec<usize> {
    let mut counts = vec![0usize; centroids.len()];

    for (point, slot) in points.iter().zip(assignments.iter_mut()) {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (j, centroid) in centroids.iter().enumerate() {
            let distance = centroid.squared_distance(point.x, point.y);
            if distance < best_distance {
                best_distance = distance;
                best = j;
            }
        }
        *slot = best;
        counts[best] += 1;
    }

    counts
}

/// Moves non-empty centroids to their member means.
///
/// Returns true if any of them moved more than `tolerance` in x or y.
fn update<M>(
    points: &[DataPoint<M>],
    assignments: &[usize],
    counts: &[usize],
    centroids: &mut [Centroid],
    tolerance: f64,
) -> bool {
    let mut sums = vec![(0.0, 0.0); centroids.len()];
    for (point, &cluster) in points.iter().zip(assignments) {
        sums[cluster].0 += point.x;
        sums[cluster].1 += point.y;
    }

    let mut changed = false;
    for ((centroid, &(sx, sy)), &count) in centroids.iter_mut().zip(&sums).zip(counts) {
        if count == 0 {
            continue;
        }
        let mean = Centroid::new(sx / count as f64, sy / count as f64);
        if (mean.x - centroid.x).abs() > tolerance || (mean.y - centroid.y).abs() > tolerance {
            changed = true;
        }
        *centroid = mean;
    }

    changed
}

/// Moves each empty cluster's centroid onto the point farthest from its own
/// centroid, using each point at most once. Points already on their centroid
/// are never candidates. Returns true if some centroid moved by more than
/// `tolerance` on either axis.
fn reseed_empty<M>(
    points: &[DataPoint<M>],
    assignments: &[usize],
    counts: &[usize],
    centroids: &mut [Centroid],
    tolerance: f64,
) -> bool {
    let empty: Vec<usize> = (0..centroids.len()).filter(|&j| counts[j] == 0).collect();
    if empty.is_empty() {
        return false;
    }

    let mut by_distance: Vec<(usize, f64)> = points
        .iter()
        .zip(assignments)
        .enumerate()
        .map(|(i, (p, &cluster))| {
            let centroid = &centroids[cluster];
            (i, centroid.squared_distance(p.x, p.y))
        })
        .filter(|&(_, distance)| distance > 0.0)
        .collect();
    // Farthest first; stable so equal distances keep input order
    by_distance.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut moved = false;
    for (&cluster, &(index, distance)) in empty.iter().zip(&by_distance) {
        trace!(cluster, point = index, distance, "reseeding empty cluster");
        let target = points[index].position();
        let current = centroids[cluster];
        if (target.x - current.x).abs() > tolerance || (target.y - current.y).abs() > tolerance {
            moved = true;
        }
        centroids[cluster] = target;
    }

    moved
}

fn collect_clusters<M: Clone>(
    points: &[DataPoint<M>],
    centroids: &[Centroid],
    assignments: &[usize],
) -> Vec<Cluster<M>> {
    let mut clusters: Vec<Cluster<M>> = centroids
        .iter()
        .map(|&centroid| Cluster {
            centroid,
            points: Vec::new(),
        })
        .collect();

    for (point, &cluster) in points.iter().zip(assignments) {
        clusters[cluster].points.push(point.clone());
    }

    clusters
}

/// Partitions `points` into `k` clusters, seeding from the thread-local RNG.
///
/// Results vary from run to run; use [`k_means_clustering_with_rng`] for a
/// reproducible partition.
///
/// # Errors
/// - `ClusteringError::InsufficientData` when `points.len() < k`
/// - `ClusteringError::InvalidParameter` for `k == 0` or `max_iterations == 0`
///
/// # Examples
/// ```
/// use optkit_clustering::{k_means_clustering, ClusteringError, DataPoint};
///
/// let points = vec![DataPoint::at(0.0, 0.0), DataPoint::at(1.0, 1.0)];
/// let err = k_means_clustering(&points, 3, 100).unwrap_err();
/// assert_eq!(err, ClusteringError::InsufficientData { points: 2, clusters: 3 });
/// ```
pub fn k_means_clustering<M: Clone>(
    points: &[DataPoint<M>],
    k: usize,
    max_iterations: usize,
) -> Result<Vec<Cluster<M>>, ClusteringError> {
    k_means_clustering_with_rng(points, k, max_iterations, &mut rand::thread_rng())
}

/// Partitions `points` into `k` clusters, seeding from `rng`.
///
/// # Examples
/// ```
/// use optkit_clustering::{k_means_clustering_with_rng, DataPoint};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let points: Vec<DataPoint<&str>> = vec![
///     DataPoint::new(0.0, 0.0, "a"),
///     DataPoint::new(0.0, 1.0, "b"),
///     DataPoint::new(1.0, 0.0, "c"),
///     DataPoint::new(10.0, 10.0, "d"),
///     DataPoint::new(10.0, 11.0, "e"),
///     DataPoint::new(11.0, 10.0, "f"),
/// ];
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let clusters = k_means_clustering_with_rng(&points, 2, 100, &mut rng).unwrap();
///
/// assert_eq!(clusters.len(), 2);
/// let total: usize = clusters.iter().map(|c| c.len()).sum();
/// assert_eq!(total, 6);
/// ```
pub fn k_means_clustering_with_rng<M, R>(
    points: &[DataPoint<M>],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Result<Vec<Cluster<M>>, ClusteringError>
where
    M: Clone,
    R: Rng + ?Sized,
{
    KMeans::new(k)
        .with_max_iterations(max_iterations)
        .fit(points, rng)
        .map(|fit| fit.clusters)
}
