use ndarray::ArrayView2;

use crate::dimred::mds::{classical_mds, MdsResult};
use crate::eigen::EigenOptions;
use crate::error::{ReductionError, Result};
use crate::graph;

/// Isomap manifold embedding.
///
/// A pure composition of the graph pipeline: union k-NN graph, bridge
/// disconnected components, all-pairs geodesic distances, classical MDS
/// on the geodesics. Nothing is retained between calls.
#[derive(Debug, Clone)]
pub struct Isomap {
    k: usize,
    eigen_options: EigenOptions,
}

impl Isomap {
    /// `k` is the neighbor count of the underlying k-NN graph.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            eigen_options: EigenOptions::default(),
        }
    }

    pub fn eigen_options(mut self, options: EigenOptions) -> Self {
        self.eigen_options = options;
        self
    }

    /// Embeds the point set along its recovered manifold axis.
    pub fn embed(&self, points: ArrayView2<f64>) -> Result<MdsResult> {
        let knn = graph::knn_graph(points, self.k)?;
        let connected = graph::connect_components(knn.view(), points)?;
        let geodesics = graph::geodesic_distances(connected.view())?;

        // A connected graph reaches every vertex pair; a leftover
        // sentinel here is a bug in this library, not in the input.
        for ((i, j), &d) in geodesics.indexed_iter() {
            if !d.is_finite() {
                return Err(ReductionError::Invariant(format!(
                    "geodesic distance {i} -> {j} is still unreachable after bridging"
                )));
            }
        }

        classical_mds(geodesics.view(), points, self.eigen_options)
    }
}
