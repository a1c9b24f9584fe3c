//! # optkit_clustering (L2: Clustering Engine)
//!
//! k-means clustering of labelled points in the plane.
//!
//! This crate provides:
//! - `DataPoint<M>`: `(x, y)` coordinates with an opaque caller payload
//! - `Cluster<M>`: a centroid with its members and inertia diagnostics
//! - `k_means_clustering`: Lloyd's algorithm with random-sample seeding
//! - `KMeans`: the configurable form (k-means++ seeding, empty-cluster reseeding,
//!   tolerance) returning iteration and convergence diagnostics
//!
//! ## Design Principles
//!
//! - **Coordinate-only algorithm**: payloads are cloned through, never read
//! - **Injected randomness**: every seeded entry point accepts any `rand::Rng`
//! - **Exactly `k` clusters**: empty clusters are kept, never dropped
//!
//! ## Usage
//!
//! ```rust
//! use optkit_clustering::{k_means_clustering_with_rng, prepare_points, DataPoint};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let raw = vec![
//!     DataPoint::new(0.1, 0.2, "SPY 450C"),
//!     DataPoint::new(0.2, 0.1, "SPY 455C"),
//!     DataPoint::new(f64::NAN, 0.3, "stale quote"),
//!     DataPoint::new(0.9, 0.8, "QQQ 380P"),
//!     DataPoint::new(0.8, 0.9, "QQQ 375P"),
//! ];
//!
//! let points = prepare_points(raw);
//! let mut rng = StdRng::seed_from_u64(42);
//! let clusters = k_means_clustering_with_rng(&points, 2, 100, &mut rng).unwrap();
//!
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod kmeans;
pub mod point;

pub use error::ClusteringError;
pub use kmeans::{
    k_means_clustering, k_means_clustering_with_rng, EmptyClusterPolicy, KMeans, KMeansFit, Seeding,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
pub use point::{prepare_points, total_inertia, Centroid, Cluster, DataPoint};
