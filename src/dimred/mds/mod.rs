use ndarray::{Array1, Array2, ArrayView2};

use crate::distance::pairwise_distances;
use crate::eigen::{self, EigenOptions};
use crate::error::{ReductionError, Result};

/// Outcome of a classical MDS run.
pub struct MdsResult {
    /// Embedded coordinates, `n x 2`: the recovered axis rescaled to the
    /// input's x extent and laid along the input's mean y.
    pub coordinates: Array2<f64>,
    /// Dominant eigenvalue of the double-centered matrix, clamped at
    /// zero before scaling.
    pub eigenvalue: f64,
    /// Dominant unit eigenvector; the raw 1-D configuration up to the
    /// `sqrt(eigenvalue)` scale.
    pub eigenvector: Array1<f64>,
    /// Eigensolver convergence flag; treat the embedding as an estimate
    /// when false.
    pub converged: bool,
}

/// Classical multidimensional scaling from a pairwise distance matrix.
///
/// Squares the distances, double-centers them (`B = -1/2 C D^2 C` with
/// `C = I - J/n`) and extracts the dominant eigenpair of `B`. Only one
/// output dimension is recovered; the 1-D coordinates are affinely
/// rescaled to match the x extent of `points` and placed at its mean y,
/// purely so the embedding lines up with the source data on screen.
///
/// `points` supplies those alignment coordinates and must have at least
/// two columns and one row per distance entry.
pub fn classical_mds(
    distances: ArrayView2<f64>,
    points: ArrayView2<f64>,
    options: EigenOptions,
) -> Result<MdsResult> {
    let n = distances.nrows();
    if distances.ncols() != n {
        return Err(ReductionError::Configuration(format!(
            "distance matrix must be square, got {}x{}",
            n,
            distances.ncols()
        )));
    }
    if n == 0 {
        return Err(ReductionError::Configuration(
            "distance matrix is empty".into(),
        ));
    }
    if points.nrows() != n {
        return Err(ReductionError::Configuration(format!(
            "point count {} does not match distance matrix size {}",
            points.nrows(),
            n
        )));
    }
    if points.ncols() < 2 {
        return Err(ReductionError::Configuration(format!(
            "alignment points must have at least two coordinates, got {}",
            points.ncols()
        )));
    }
    if distances.iter().any(|d| !d.is_finite()) {
        return Err(ReductionError::Configuration(
            "distance matrix contains non-finite entries".into(),
        ));
    }

    // B = -1/2 * C * D^2 * C with the centering matrix C = I - J/n.
    let d_squared = distances.mapv(|d| d * d);
    let centering = Array2::eye(n) - Array2::from_elem((n, n), 1.0 / n as f64);
    let b = centering.dot(&d_squared).dot(&centering) * -0.5;

    let dominant = eigen::dominant_eigenpair(b.view(), options)?;
    let eigenvalue = dominant.eigenvalue.max(0.0);
    let scale = eigenvalue.sqrt();
    let coords_1d: Vec<f64> = dominant.eigenvector.iter().map(|v| v * scale).collect();

    let coordinates = align_to_points(&coords_1d, points);

    Ok(MdsResult {
        coordinates,
        eigenvalue,
        eigenvector: dominant.eigenvector,
        converged: dominant.converged,
    })
}

/// Classical MDS over plain pairwise Euclidean distances of the points
/// themselves.
pub fn euclidean_mds(points: ArrayView2<f64>, options: EigenOptions) -> Result<MdsResult> {
    let distances = pairwise_distances(points);
    classical_mds(distances.view(), points, options)
}

/// Rescales 1-D coordinates to the x extent of the source points and
/// pins them to the source's mean y.
fn align_to_points(coords_1d: &[f64], points: ArrayView2<f64>) -> Array2<f64> {
    let n = coords_1d.len();

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_sum = 0.0;
    for row in points.rows() {
        x_min = x_min.min(row[0]);
        x_max = x_max.max(row[0]);
        y_sum += row[1];
    }
    let orig_width = x_max - x_min;
    let y_mean = y_sum / n as f64;

    let mut proj_min = f64::INFINITY;
    let mut proj_max = f64::NEG_INFINITY;
    let mut proj_sum = 0.0;
    for &v in coords_1d {
        proj_min = proj_min.min(v);
        proj_max = proj_max.max(v);
        proj_sum += v;
    }
    let proj_width = proj_max - proj_min;
    let proj_mean = proj_sum / n as f64;

    let scale = if proj_width > 0.0 && orig_width > 0.0 {
        orig_width / proj_width
    } else {
        1.0
    };
    let x_center = (x_min + x_max) / 2.0;

    let mut coordinates = Array2::zeros((n, 2));
    for (i, &v) in coords_1d.iter().enumerate() {
        coordinates[[i, 0]] = (v - proj_mean) * scale + x_center;
        coordinates[[i, 1]] = y_mean;
    }
    coordinates
}
