use ndarray::{Array2, ArrayView1, ArrayView2};
use num_traits::Float;

/// Straight-line distance between two coordinate vectors.
pub fn euclidean<T>(a: ArrayView1<T>, b: ArrayView1<T>) -> T
where
    T: Float,
{
    let mut squared_dist = T::zero();
    for i in 0..a.len() {
        let diff = a[i] - b[i];
        squared_dist = squared_dist + diff * diff;
    }
    squared_dist.sqrt()
}

/// Symmetric matrix of pairwise Euclidean distances, zero diagonal.
///
/// Points are rows of `points`. O(n^2 d).
pub fn pairwise_distances(points: ArrayView2<f64>) -> Array2<f64> {
    let n = points.nrows();
    let mut distances = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(points.row(i), points.row(j));
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
    }
    distances
}
