use std::cmp::Ordering;

use ndarray::{Array1, Array2, ArrayView2};

use crate::error::{ReductionError, Result};

/// Convergence controls for the Jacobi eigensolver.
#[derive(Debug, Clone, Copy)]
pub struct EigenOptions {
    /// Upper bound on full sweeps over the off-diagonal entries.
    pub max_iterations: usize,
    /// Convergence threshold: the matrix counts as diagonalized once its
    /// off-diagonal Frobenius norm drops below `tolerance` times the
    /// input's Frobenius norm. Relative, so the knob is meaningful at
    /// any matrix scale.
    pub tolerance: f64,
}

impl Default for EigenOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-10,
        }
    }
}

/// Complete eigendecomposition of a symmetric matrix, sorted descending
/// by eigenvalue.
pub struct SymmetricEigen {
    pub eigenvalues: Array1<f64>,
    /// Unit-norm eigenvectors as columns; column `i` pairs with
    /// `eigenvalues[i]`.
    pub eigenvectors: Array2<f64>,
    /// False when the sweep budget ran out first. The decomposition is
    /// still the best available estimate and must be treated as such.
    pub converged: bool,
}

/// Dominant eigenpair, the head of the sorted spectrum.
pub struct DominantEigen {
    pub eigenvalue: f64,
    pub eigenvector: Array1<f64>,
    pub converged: bool,
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Rotations sweep the upper triangle until the off-diagonal norm drops
/// below `options.tolerance` (relative to the input's Frobenius norm) or
/// `options.max_iterations` sweeps are spent. Non-convergence is
/// reported through the `converged` flag and a warning, never as an
/// error. The input must be symmetric; only square shape is checked.
pub fn eigen_symmetric(matrix: ArrayView2<f64>, options: EigenOptions) -> Result<SymmetricEigen> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(ReductionError::Configuration(format!(
            "matrix must be square, got {}x{}",
            n,
            matrix.ncols()
        )));
    }
    if n == 0 {
        return Err(ReductionError::Configuration("matrix is empty".into()));
    }

    let mut a = matrix.to_owned();
    let mut vectors = Array2::eye(n);
    let mut converged = false;
    let threshold = options.tolerance * frobenius_norm(matrix);

    for _ in 0..options.max_iterations {
        if off_diagonal_norm(&a) <= threshold {
            converged = true;
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = if theta >= 0.0 {
                    1.0 / (theta + (1.0 + theta * theta).sqrt())
                } else {
                    -1.0 / (-theta + (1.0 + theta * theta).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;
                rotate(&mut a, &mut vectors, p, q, c, s);
            }
        }
    }
    // The budget may have been spent on exactly the sweep that finished
    // the job.
    if !converged && off_diagonal_norm(&a) <= threshold {
        converged = true;
    }
    if !converged {
        log::warn!(
            "Jacobi eigendecomposition did not converge within {} sweeps (off-diagonal norm {:.3e})",
            options.max_iterations,
            off_diagonal_norm(&a)
        );
    }

    // Sort the spectrum descending, carrying the eigenvector columns along.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        a[[j, j]]
            .partial_cmp(&a[[i, i]])
            .unwrap_or(Ordering::Equal)
    });

    let eigenvalues = Array1::from(order.iter().map(|&i| a[[i, i]]).collect::<Vec<_>>());
    let mut eigenvectors = Array2::zeros((n, n));
    for (dst, &src) in order.iter().enumerate() {
        eigenvectors.column_mut(dst).assign(&vectors.column(src));
    }

    Ok(SymmetricEigen {
        eigenvalues,
        eigenvectors,
        converged,
    })
}

/// Largest eigenpair of a symmetric matrix.
///
/// A slice of [`eigen_symmetric`]'s spectrum: the algebraically largest
/// eigenvalue and its eigenvector. Negative dominant eigenvalues are
/// returned as-is; clamping is the caller's decision.
pub fn dominant_eigenpair(matrix: ArrayView2<f64>, options: EigenOptions) -> Result<DominantEigen> {
    let eigen = eigen_symmetric(matrix, options)?;
    Ok(DominantEigen {
        eigenvalue: eigen.eigenvalues[0],
        eigenvector: eigen.eigenvectors.column(0).to_owned(),
        converged: eigen.converged,
    })
}

fn frobenius_norm(a: ArrayView2<f64>) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[[i, j]] * a[[i, j]];
            }
        }
    }
    sum.sqrt()
}

/// Two-sided Givens rotation in the (p, q) plane, accumulated into the
/// eigenvector matrix.
fn rotate(a: &mut Array2<f64>, vectors: &mut Array2<f64>, p: usize, q: usize, c: f64, s: f64) {
    let n = a.nrows();
    for k in 0..n {
        let akp = a[[k, p]];
        let akq = a[[k, q]];
        a[[k, p]] = c * akp - s * akq;
        a[[k, q]] = s * akp + c * akq;
    }
    for k in 0..n {
        let apk = a[[p, k]];
        let aqk = a[[q, k]];
        a[[p, k]] = c * apk - s * aqk;
        a[[q, k]] = s * apk + c * aqk;
    }
    for k in 0..n {
        let vkp = vectors[[k, p]];
        let vkq = vectors[[k, q]];
        vectors[[k, p]] = c * vkp - s * vkq;
        vectors[[k, q]] = s * vkp + c * vkq;
    }
}
