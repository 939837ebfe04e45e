use ndarray::{s, Array1, Array2, ArrayView2, Axis};

use crate::eigen::{self, EigenOptions};
use crate::error::{ReductionError, Result};

/// Principal component analysis over a dense point set.
///
/// Configuration only; [`Pca::compute`] is a pure function of its input
/// and nothing is retained between calls.
#[derive(Debug, Clone, Default)]
pub struct Pca {
    n_components: Option<usize>,
    eigen_options: EigenOptions,
}

impl Pca {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of components to retain; defaults to the input feature
    /// count.
    pub fn n_components(mut self, n_components: usize) -> Self {
        self.n_components = Some(n_components);
        self
    }

    pub fn eigen_options(mut self, options: EigenOptions) -> Self {
        self.eigen_options = options;
        self
    }

    /// Centers the features, eigendecomposes the covariance matrix and
    /// projects onto the leading `n_components` axes.
    pub fn compute(&self, points: ArrayView2<f64>) -> Result<PcaResult> {
        let (n_samples, n_features) = points.dim();
        if n_samples < 2 {
            return Err(ReductionError::Configuration(format!(
                "PCA requires at least two points, got {n_samples}"
            )));
        }
        let n_components = self.n_components.unwrap_or(n_features);
        if n_components < 1 || n_components > n_features {
            return Err(ReductionError::Configuration(format!(
                "n_components must be in 1..={n_features}, got {n_components}"
            )));
        }

        let mean = points
            .mean_axis(Axis(0))
            .expect("mean over a non-empty axis");
        let mut centered = points.to_owned();
        for mut row in centered.axis_iter_mut(Axis(0)) {
            row -= &mean;
        }

        let covariance = centered.t().dot(&centered) / (n_samples as f64 - 1.0);
        let eigen = eigen::eigen_symmetric(covariance.view(), self.eigen_options)?;

        // Spectrum arrives sorted descending; the basis is its leading
        // columns.
        let components = eigen.eigenvectors.slice(s![.., ..n_components]).to_owned();
        let projected = centered.dot(&components);

        let total_variance = eigen.eigenvalues.sum();
        let explained_variance = eigen
            .eigenvalues
            .slice(s![..n_components])
            .mapv(|v| v / total_variance);

        Ok(PcaResult {
            projected,
            components,
            eigenvalues: eigen.eigenvalues,
            explained_variance,
            mean,
            converged: eigen.converged,
        })
    }
}

/// Outcome of a PCA run.
pub struct PcaResult {
    /// Input projected onto the retained axes, `n x n_components`.
    pub projected: Array2<f64>,
    /// Retained principal axes as columns, `d x n_components`.
    pub components: Array2<f64>,
    /// Full covariance spectrum, descending.
    pub eigenvalues: Array1<f64>,
    /// Fraction of total variance captured by each retained component.
    pub explained_variance: Array1<f64>,
    /// Feature means subtracted before projection.
    pub mean: Array1<f64>,
    /// Eigensolver convergence flag; treat the spectrum as an estimate
    /// when false.
    pub converged: bool,
}

/// Projects points onto the leading principal axis and maps the scores
/// back into the original space.
///
/// The result is `n x d`: every point replaced by its closest point on
/// the first-component line through the mean.
pub fn project_onto_first_component(points: ArrayView2<f64>) -> Result<Array2<f64>> {
    let result = Pca::new().n_components(1).compute(points)?;
    let reconstructed = result.projected.dot(&result.components.t()) + &result.mean;
    Ok(reconstructed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn retained_basis_is_orthonormal_and_variance_ratios_sum_to_one() {
        let points = array![
            [2.5, 2.4],
            [0.5, 0.7],
            [2.2, 2.9],
            [1.9, 2.2],
            [3.1, 3.0],
            [2.3, 2.7],
            [2.0, 1.6],
            [1.0, 1.1],
            [1.5, 1.6],
            [1.1, 0.9]
        ];
        let result = Pca::new().compute(points.view()).unwrap();
        assert!(result.converged);

        for i in 0..2 {
            for j in 0..2 {
                let dot = result.components.column(i).dot(&result.components.column(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(dot, expected, epsilon = 1e-9);
            }
        }

        assert_abs_diff_eq!(result.explained_variance.sum(), 1.0, epsilon = 1e-9);
        assert!(result.explained_variance[0] >= result.explained_variance[1]);
        assert_eq!(result.projected.dim(), (10, 2));
    }

    #[test]
    fn collinear_data_loads_everything_on_the_first_component() {
        // Points along the direction (1, 2).
        let points = array![[0.0, 0.0], [1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let result = Pca::new().n_components(1).compute(points.view()).unwrap();
        assert_abs_diff_eq!(result.explained_variance[0], 1.0, epsilon = 1e-9);

        // The axis is (1, 2)/sqrt(5) up to sign.
        let axis = result.components.column(0);
        assert_abs_diff_eq!(axis[1] / axis[0], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn projection_is_centered_scores_on_the_axes() {
        let points = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let result = Pca::new().compute(points.view()).unwrap();
        assert_abs_diff_eq!(result.mean[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.mean[1], 2.0, epsilon = 1e-12);
        // Second component carries no variance.
        for i in 0..3 {
            assert_abs_diff_eq!(result.projected[[i, 1]], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn first_component_reconstruction_reproduces_collinear_input() {
        let points = array![[0.0, 0.0], [1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let reconstructed = project_onto_first_component(points.view()).unwrap();
        for i in 0..4 {
            assert_abs_diff_eq!(reconstructed[[i, 0]], points[[i, 0]], epsilon = 1e-9);
            assert_abs_diff_eq!(reconstructed[[i, 1]], points[[i, 1]], epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_bad_configurations() {
        let points = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(Pca::new().n_components(0).compute(points.view()).is_err());
        assert!(Pca::new().n_components(3).compute(points.view()).is_err());
        let single = array![[1.0, 2.0]];
        assert!(Pca::new().compute(single.view()).is_err());
    }
}
