use std::cmp::Ordering;

use ndarray::{Array2, ArrayView2};

use crate::distance::pairwise_distances;
use crate::error::{ReductionError, Result};
use crate::graph::NO_EDGE;

/// Builds the union k-nearest-neighbor graph of a point set.
///
/// Every vertex picks its `k` nearest other vertices (ties broken by
/// ascending index) and each pick is inserted symmetrically with the
/// true Euclidean distance as weight. Because the union of individual
/// choices is kept, a vertex ends up with degree > k whenever another
/// vertex chose it without reciprocation. Absent edges are [`NO_EDGE`],
/// the diagonal is zero.
pub fn knn_graph(points: ArrayView2<f64>, k: usize) -> Result<Array2<f64>> {
    let n = points.nrows();
    if n == 0 {
        return Err(ReductionError::Configuration("point set is empty".into()));
    }
    if k < 1 || k >= n {
        return Err(ReductionError::Configuration(format!(
            "k must satisfy 1 <= k < n (n = {n}), got {k}"
        )));
    }

    let distances = pairwise_distances(points);
    let mut adjacency = Array2::from_elem((n, n), NO_EDGE);
    adjacency.diag_mut().fill(0.0);

    for i in 0..n {
        // Stable sort over an ascending index list keeps ties in index order.
        let mut order: Vec<usize> = (0..n).filter(|&j| j != i).collect();
        order.sort_by(|&a, &b| {
            distances[[i, a]]
                .partial_cmp(&distances[[i, b]])
                .unwrap_or(Ordering::Equal)
        });
        for &j in order.iter().take(k) {
            adjacency[[i, j]] = distances[[i, j]];
            adjacency[[j, i]] = distances[[i, j]];
        }
    }

    Ok(adjacency)
}

/// Builds the epsilon-neighborhood graph of a point set.
///
/// Vertices within `epsilon` of each other are connected with weight
/// `1.0`; everything else, including the diagonal, stays `0.0`. Unlike
/// [`knn_graph`] the weights are indicators, not distances.
pub fn epsilon_graph(points: ArrayView2<f64>, epsilon: f64) -> Result<Array2<f64>> {
    let n = points.nrows();
    if n == 0 {
        return Err(ReductionError::Configuration("point set is empty".into()));
    }

    let distances = pairwise_distances(points);
    let mut adjacency = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            if distances[[i, j]] <= epsilon {
                adjacency[[i, j]] = 1.0;
                adjacency[[j, i]] = 1.0;
            }
        }
    }

    Ok(adjacency)
}
