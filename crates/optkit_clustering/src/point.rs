//! Points, centroids and clusters.

/// A cluster centre in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centroid {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Centroid {
    /// Creates a centroid at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `(x, y)`.
    #[inline]
    pub fn squared_distance(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy
    }
}

/// A 2-D point with an opaque payload.
///
/// Clustering reads only `x` and `y`; `meta` is carried through untouched so
/// callers can tag points with a symbol, a contract id or any other record.
///
/// # Examples
/// ```
/// use optkit_clustering::DataPoint;
///
/// let p = DataPoint::new(0.25, 1.5, "AAPL");
/// assert_eq!(p.meta, "AAPL");
///
/// let bare = DataPoint::at(1.0, 2.0);
/// assert_eq!((bare.x, bare.y), (1.0, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoint<M = ()> {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Caller payload
    pub meta: M,
}

impl<M> DataPoint<M> {
    /// Creates a point carrying `meta`.
    pub fn new(x: f64, y: f64, meta: M) -> Self {
        Self { x, y, meta }
    }

    /// Returns true when both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The point's position as a centroid.
    #[inline]
    pub fn position(&self) -> Centroid {
        Centroid::new(self.x, self.y)
    }
}

impl DataPoint<()> {
    /// Creates a point with no payload.
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, meta: () }
    }
}

/// One group of a clustering result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster<M = ()> {
    /// Final centre.
    pub centroid: Centroid,
    /// Members in input order; may be empty.
    pub points: Vec<DataPoint<M>>,
}

impl<M> Cluster<M> {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when no point was assigned to this cluster.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of squared distances from the members to the centroid.
    pub fn inertia(&self) -> f64 {
        self.points
            .iter()
            .map(|p| self.centroid.squared_distance(p.x, p.y))
            .sum()
    }
}

/// Within-cluster sum of squares over a whole result.
pub fn total_inertia<M>(clusters: &[Cluster<M>]) -> f64 {
    clusters.iter().map(Cluster::inertia).sum()
}

/// Drops points with a NaN or infinite coordinate.
///
/// Such points would poison every centroid they touch; filter them before
/// clustering data that comes from user input.
///
/// # Examples
/// ```
/// use optkit_clustering::{prepare_points, DataPoint};
///
/// let raw = vec![
///     DataPoint::new(1.0, 2.0, "ok"),
///     DataPoint::new(f64::NAN, 2.0, "missing x"),
///     DataPoint::new(3.0, f64::INFINITY, "overflow"),
/// ];
/// let clean = prepare_points(raw);
/// assert_eq!(clean.len(), 1);
/// assert_eq!(clean[0].meta, "ok");
/// ```
pub fn prepare_points<M, I>(points: I) -> Vec<DataPoint<M>>
where
    I: IntoIterator<Item = DataPoint<M>>,
{
    points.into_iter().filter(DataPoint::is_finite).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_squared_distance() {
        let c = Centroid::new(1.0, 1.0);
        assert_eq!(c.squared_distance(4.0, 5.0), 25.0);
        assert_eq!(c.squared_distance(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_cluster_diagnostics() {
        let cluster = Cluster {
            centroid: Centroid::new(0.0, 0.0),
            points: vec![DataPoint::at(1.0, 0.0), DataPoint::at(0.0, -2.0)],
        };
        assert_eq!(cluster.len(), 2);
        assert!(!cluster.is_empty());
        assert_relative_eq!(cluster.inertia(), 5.0);
    }

    #[test]
    fn test_empty_cluster_inertia() {
        let cluster: Cluster = Cluster {
            centroid: Centroid::new(3.0, 3.0),
            points: Vec::new(),
        };
        assert!(cluster.is_empty());
        assert_eq!(cluster.inertia(), 0.0);
    }

    #[test]
    fn test_total_inertia() {
        let clusters = vec![
            Cluster {
                centroid: Centroid::new(0.0, 0.0),
                points: vec![DataPoint::at(1.0, 1.0)],
            },
            Cluster {
                centroid: Centroid::new(10.0, 10.0),
                points: vec![DataPoint::at(10.0, 13.0)],
            },
        ];
        assert_relative_eq!(total_inertia(&clusters), 11.0);
    }

    #[test]
    fn test_prepare_points_keeps_order() {
        let raw = vec![
            DataPoint::new(0.0, 0.0, 1),
            DataPoint::new(f64::NEG_INFINITY, 0.0, 2),
            DataPoint::new(5.0, 5.0, 3),
        ];
        let ids: Vec<i32> = prepare_points(raw).into_iter().map(|p| p.meta).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_point_serde() {
        let p = DataPoint::new(1.5, -2.0, "XYZ".to_string());
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0,"meta":"XYZ"}"#);
    }
}
