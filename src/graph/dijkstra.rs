use ndarray::{Array2, ArrayView2};

use crate::error::{ReductionError, Result};

/// Sentinel distance for vertices that cannot be reached from the source.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Single-source shortest-path tree produced by [`dijkstra`].
pub struct ShortestPaths {
    source: usize,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Distance from the source to every vertex, [`UNREACHABLE`] where
    /// no path exists.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn distance(&self, vertex: usize) -> f64 {
        self.distances[vertex]
    }

    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distances[vertex].is_finite()
    }

    /// Vertex sequence from the source to `target` (inclusive), rebuilt
    /// from the predecessor links. Empty when `target` is unreachable.
    pub fn path_to(&self, target: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(v) = current {
            path.push(v);
            current = self.predecessors[v];
        }
        path.reverse();
        if path.first() != Some(&self.source) {
            return Vec::new();
        }
        path
    }
}

/// Dijkstra's algorithm over a non-negative weighted adjacency matrix.
///
/// The minimum-distance unvisited vertex is found by an O(n) linear
/// scan, giving O(n^2) total; with n in the low hundreds a priority
/// queue would not pay for itself. Every finite entry counts as an
/// edge, so this expects distance-weighted graphs whose absent edges
/// are [`crate::graph::NO_EDGE`]; the binary epsilon graph encodes
/// absence as 0 and is not meaningful input here.
pub fn dijkstra(adjacency: ArrayView2<f64>, source: usize) -> Result<ShortestPaths> {
    let n = adjacency.nrows();
    if adjacency.ncols() != n {
        return Err(ReductionError::Configuration(format!(
            "adjacency matrix must be square, got {}x{}",
            n,
            adjacency.ncols()
        )));
    }
    if source >= n {
        return Err(ReductionError::Configuration(format!(
            "source vertex {source} out of range for {n} vertices"
        )));
    }

    let mut distances = vec![UNREACHABLE; n];
    let mut predecessors = vec![None; n];
    let mut visited = vec![false; n];
    distances[source] = 0.0;

    for _ in 0..n {
        // Unvisited vertex with the smallest tentative distance.
        let mut u = None;
        let mut min_dist = UNREACHABLE;
        for i in 0..n {
            if !visited[i] && distances[i] < min_dist {
                min_dist = distances[i];
                u = Some(i);
            }
        }
        // Whatever is left is unreachable.
        let Some(u) = u else { break };
        visited[u] = true;

        for v in 0..n {
            if visited[v] || !adjacency[[u, v]].is_finite() {
                continue;
            }
            let alt = distances[u] + adjacency[[u, v]];
            if alt < distances[v] {
                distances[v] = alt;
                predecessors[v] = Some(u);
            }
        }
    }

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

/// Shortest vertex sequence from `start` to `end`, empty when `end` is
/// unreachable.
pub fn shortest_path(
    adjacency: ArrayView2<f64>,
    start: usize,
    end: usize,
) -> Result<Vec<usize>> {
    if end >= adjacency.nrows() {
        return Err(ReductionError::Configuration(format!(
            "end vertex {end} out of range for {} vertices",
            adjacency.nrows()
        )));
    }
    let tree = dijkstra(adjacency, start)?;
    Ok(tree.path_to(end))
}

/// Geodesic distance between a single vertex pair, [`UNREACHABLE`] when
/// no path exists.
pub fn distance_between(adjacency: ArrayView2<f64>, start: usize, end: usize) -> Result<f64> {
    if end >= adjacency.nrows() {
        return Err(ReductionError::Configuration(format!(
            "end vertex {end} out of range for {} vertices",
            adjacency.nrows()
        )));
    }
    let tree = dijkstra(adjacency, start)?;
    Ok(tree.distance(end))
}

/// Full geodesic distance matrix: Dijkstra from every vertex, O(n^3).
pub fn geodesic_distances(adjacency: ArrayView2<f64>) -> Result<Array2<f64>> {
    let n = adjacency.nrows();
    if adjacency.ncols() != n {
        return Err(ReductionError::Configuration(format!(
            "adjacency matrix must be square, got {}x{}",
            n,
            adjacency.ncols()
        )));
    }

    let mut distances = Array2::from_elem((n, n), UNREACHABLE);
    for source in 0..n {
        let tree = dijkstra(adjacency, source)?;
        for (v, &d) in tree.distances().iter().enumerate() {
            distances[[source, v]] = d;
        }
    }
    Ok(distances)
}
