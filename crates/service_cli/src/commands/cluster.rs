//! Cluster command implementation
//!
//! Reads labelled points from CSV and groups them with k-means.
//!
//! Input columns: `x`, `y` and an optional `label`. Rows without a label are
//! named by their 1-based row number.

use std::path::Path;

use optkit_clustering::{
    prepare_points, total_inertia, Cluster, DataPoint, EmptyClusterPolicy, KMeans, Seeding,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{CliConfig, ClusteringConfig, OutputFormat};
use crate::output::{emit, num, Table};
use crate::{CliError, Result};

/// Flag overrides for the cluster command
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterOverrides {
    /// Number of clusters
    pub k: Option<usize>,
    /// Iteration budget
    pub max_iterations: Option<usize>,
    /// RNG seed
    pub seed: Option<u64>,
    /// Use k-means++ seeding
    pub plus_plus: bool,
    /// Reseed clusters that lose all members
    pub reseed_empty: bool,
}

impl ClusterOverrides {
    /// Merges the flags over the configured defaults.
    fn settings(&self, base: &ClusteringConfig) -> (KMeans, Option<u64>) {
        let seeding = if self.plus_plus {
            Seeding::KMeansPlusPlus
        } else {
            base.seeding
        };
        let policy = if self.reseed_empty {
            EmptyClusterPolicy::ReseedFarthest
        } else {
            base.empty_cluster_policy
        };
        let kmeans = KMeans::new(self.k.unwrap_or(base.k))
            .with_max_iterations(self.max_iterations.unwrap_or(base.max_iterations))
            .with_seeding(seeding)
            .with_empty_cluster_policy(policy);
        (kmeans, self.seed.or(base.seed))
    }
}

#[derive(Debug, Deserialize)]
struct PointRecord {
    x: f64,
    y: f64,
    #[serde(default)]
    label: Option<String>,
}

/// Reads `x,y[,label]` rows.
pub fn read_points<R: std::io::Read>(reader: R) -> Result<Vec<DataPoint<String>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (i, record) in csv_reader.deserialize::<PointRecord>().enumerate() {
        let record = record?;
        let label = record
            .label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| format!("row{}", i + 1));
        points.push(DataPoint::new(record.x, record.y, label));
    }
    Ok(points)
}

/// Result of the cluster command
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    /// Seed that reproduces this partition
    pub seed: u64,
    /// Points clustered after dropping non-finite rows
    pub points: usize,
    /// Rows dropped for non-finite coordinates
    pub dropped: usize,
    /// Passes performed
    pub iterations: usize,
    /// Whether centroids settled within the budget
    pub converged: bool,
    /// Within-cluster sum of squares
    pub total_inertia: f64,
    /// The clusters, in centroid index order
    pub clusters: Vec<Cluster<String>>,
}

/// Clusters `raw` points.
pub fn evaluate(raw: Vec<DataPoint<String>>, kmeans: KMeans, seed: u64) -> Result<ClusterReport> {
    let total = raw.len();
    let points = prepare_points(raw);
    let dropped = total - points.len();
    if dropped > 0 {
        warn!(dropped, "skipping rows with non-finite coordinates");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let fit = kmeans.fit(&points, &mut rng)?;

    if !fit.converged {
        warn!(
            iterations = fit.iterations,
            "k-means stopped at the iteration budget"
        );
    }

    Ok(ClusterReport {
        seed,
        points: points.len(),
        dropped,
        iterations: fit.iterations,
        converged: fit.converged,
        total_inertia: total_inertia(&fit.clusters),
        clusters: fit.clusters,
    })
}

fn table(report: &ClusterReport) -> Table {
    let mut table = Table::new([
        "Cluster",
        "Centroid x",
        "Centroid y",
        "Size",
        "Inertia",
        "Members",
    ]);
    for (i, cluster) in report.clusters.iter().enumerate() {
        let members: Vec<&str> = cluster.points.iter().map(|p| p.meta.as_str()).collect();
        table.row([
            i.to_string(),
            num(cluster.centroid.x, 4),
            num(cluster.centroid.y, 4),
            cluster.len().to_string(),
            num(cluster.inertia(), 4),
            members.join(", "),
        ]);
    }
    let status = if report.converged {
        ""
    } else {
        " (not converged)"
    };
    table.row([
        "total".to_string(),
        String::new(),
        String::new(),
        report.points.to_string(),
        num(report.total_inertia, 4),
        format!("seed {}, {} iterations{}", report.seed, report.iterations, status),
    ]);
    table
}

/// Run the cluster command
pub fn run(
    input: &Path,
    overrides: ClusterOverrides,
    config: &CliConfig,
    format: OutputFormat,
) -> Result<()> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }

    let raw = read_points(std::fs::File::open(input)?)?;
    let (kmeans, seed) = overrides.settings(&config.clustering);
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());

    info!(
        input = %input.display(),
        rows = raw.len(),
        k = kmeans.k,
        seed,
        "clustering points"
    );

    emit(format, &evaluate(raw, kmeans, seed)?, table)
}
