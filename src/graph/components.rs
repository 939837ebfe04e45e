use ndarray::{Array2, ArrayView2};

use crate::distance::euclidean;
use crate::error::{ReductionError, Result};
use crate::graph::has_edge;

/// Partitions the vertices of a weighted graph into connected components.
///
/// Traversal follows edges with a present weight (finite and non-zero),
/// so the same routine serves both distance-weighted and indicator
/// graphs. Components are ordered by their first-discovery vertex, i.e.
/// by ascending smallest index.
pub fn find_components(adjacency: ArrayView2<f64>) -> Vec<Vec<usize>> {
    let n = adjacency.nrows();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut component = Vec::new();
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            component.push(u);
            for v in 0..n {
                if !visited[v] && has_edge(adjacency[[u, v]]) {
                    visited[v] = true;
                    stack.push(v);
                }
            }
        }
        components.push(component);
    }

    components
}

/// Returns a connected copy of `adjacency`, bridging components until
/// one remains.
///
/// Each round scans every cross-component vertex pair, picks the
/// globally closest pair by Euclidean distance on the original
/// coordinates, and inserts that distance as a new symmetric edge.
/// Existing edges are never touched, and the caller's matrix is never
/// mutated. Every accepted bridge merges at least two components, so
/// the loop runs at most n - 1 times.
///
/// Fails with [`ReductionError::Connectivity`] when no finite bridge
/// exists or a bridge cannot merge its endpoints (a zero-length bridge
/// is indistinguishable from "no edge" and would loop forever).
pub fn connect_components(
    adjacency: ArrayView2<f64>,
    points: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    let n = adjacency.nrows();
    if adjacency.ncols() != n {
        return Err(ReductionError::Configuration(format!(
            "adjacency matrix must be square, got {}x{}",
            n,
            adjacency.ncols()
        )));
    }
    if points.nrows() != n {
        return Err(ReductionError::Configuration(format!(
            "point count {} does not match adjacency size {}",
            points.nrows(),
            n
        )));
    }

    let mut adjacency = adjacency.to_owned();
    let mut components = find_components(adjacency.view());

    while components.len() > 1 {
        let mut best: Option<(usize, usize, f64)> = None;
        for a in 0..components.len() {
            for b in (a + 1)..components.len() {
                for &i in &components[a] {
                    for &j in &components[b] {
                        let d = euclidean(points.row(i), points.row(j));
                        if d.is_finite() && best.is_none_or(|(_, _, best_d)| d < best_d) {
                            best = Some((i, j, d));
                        }
                    }
                }
            }
        }

        let Some((i, j, d)) = best else {
            return Err(ReductionError::Connectivity(format!(
                "no finite bridge between {} disconnected components",
                components.len()
            )));
        };

        adjacency[[i, j]] = d;
        adjacency[[j, i]] = d;
        log::debug!(
            "bridged vertices {i} and {j} at distance {d}, {} components before merge",
            components.len()
        );

        let merged = find_components(adjacency.view());
        if merged.len() >= components.len() {
            return Err(ReductionError::Connectivity(format!(
                "bridge {i}-{j} with weight {d} failed to reduce the component count"
            )));
        }
        components = merged;
    }

    Ok(adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{epsilon_graph, knn_graph, NO_EDGE};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn finds_components_of_an_indicator_graph() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let adjacency = epsilon_graph(points.view(), 1.5).unwrap();
        let components = find_components(adjacency.view());
        assert_eq!(components.len(), 1);
        let mut vertices = components[0].clone();
        vertices.sort_unstable();
        assert_eq!(vertices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn components_are_ordered_by_first_discovery() {
        // Two far clusters: {0, 2} and {1, 3}.
        let points = array![[0.0, 0.0], [100.0, 0.0], [1.0, 0.0], [101.0, 0.0]];
        let adjacency = epsilon_graph(points.view(), 2.0).unwrap();
        let components = find_components(adjacency.view());
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].iter().min(), Some(&0));
        assert_eq!(components[1].iter().min(), Some(&1));
    }

    #[test]
    fn isolated_vertices_form_singleton_components() {
        let adjacency = array![[0.0, NO_EDGE], [NO_EDGE, 0.0]];
        let components = find_components(adjacency.view());
        assert_eq!(components, vec![vec![0], vec![1]]);
    }

    #[test]
    fn connect_bridges_the_closest_cross_component_pair() {
        // k = 1 on two pairs of points leaves two components; the
        // closest cross pair is 1-2 at distance 8.
        let points = array![[0.0, 0.0], [1.0, 0.0], [9.0, 0.0], [10.0, 0.0]];
        let adjacency = knn_graph(points.view(), 1).unwrap();
        assert_eq!(find_components(adjacency.view()).len(), 2);

        let connected = connect_components(adjacency.view(), points.view()).unwrap();
        assert_eq!(find_components(connected.view()).len(), 1);
        assert_abs_diff_eq!(connected[[1, 2]], 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(connected[[2, 1]], 8.0, epsilon = 1e-12);

        // Original edges survive untouched and the input was not mutated.
        assert_abs_diff_eq!(connected[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(connected[[2, 3]], 1.0, epsilon = 1e-12);
        assert_eq!(adjacency[[1, 2]], NO_EDGE);
    }

    #[test]
    fn connect_handles_many_components() {
        let points = array![
            [0.0, 0.0],
            [0.5, 0.0],
            [20.0, 0.0],
            [20.5, 0.0],
            [40.0, 0.0],
            [40.5, 0.0]
        ];
        let adjacency = knn_graph(points.view(), 1).unwrap();
        assert_eq!(find_components(adjacency.view()).len(), 3);

        let connected = connect_components(adjacency.view(), points.view()).unwrap();
        assert_eq!(find_components(connected.view()).len(), 1);
    }

    #[test]
    fn connect_is_a_no_op_on_a_connected_graph() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        let adjacency = knn_graph(points.view(), 2).unwrap();
        let connected = connect_components(adjacency.view(), points.view()).unwrap();
        assert_eq!(adjacency, connected);
    }

    #[test]
    fn connect_surfaces_missing_finite_bridges() {
        // Disconnected vertices whose coordinates cannot produce a
        // finite bridging distance.
        let points = array![[f64::NAN, 0.0], [f64::NAN, 1.0]];
        let adjacency = array![[0.0, NO_EDGE], [NO_EDGE, 0.0]];
        let result = connect_components(adjacency.view(), points.view());
        assert!(matches!(result, Err(ReductionError::Connectivity(_))));
    }

    #[test]
    fn connect_surfaces_zero_length_bridges() {
        // Coincident points in different components: the best bridge has
        // weight 0, which the edge predicate cannot see.
        let points = array![[1.0, 1.0], [1.0, 1.0]];
        let adjacency = array![[0.0, NO_EDGE], [NO_EDGE, 0.0]];
        let result = connect_components(adjacency.view(), points.view());
        assert!(matches!(result, Err(ReductionError::Connectivity(_))));
    }
}
