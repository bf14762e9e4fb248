use std::time::Instant;

use log::debug;
use ndarray::{s, Array2, Axis};

use crate::error::{AnalyzerError, Result};
use crate::utils::eigen::{sort_eigen_desc, symmetric_eigen};

/// Default projection dimensionality for 2-D plotting.
pub const DEFAULT_DIM: usize = 2;

/// Project a term-document matrix down to `dim` coordinates per document.
///
/// The input is a terms x documents matrix (raw or weighted); the output is
/// a `dim` x documents matrix whose column `j` is the low-dimensional
/// coordinate of document `j`:
///
/// 1. compute the row-wise mean over documents,
/// 2. subtract it (mean-center every document vector),
/// 3. compute the term covariance matrix with documents as samples,
/// 4. symmetrize it and eigen-decompose,
/// 5. sort eigenpairs by descending eigenvalue (stable on ties),
/// 6. keep the top `dim` eigenvectors,
/// 7. project the centered matrix onto them.
///
/// Symmetrizing before the decomposition keeps every eigenpair real, so no
/// complex components ever need discarding. The result is deterministic for
/// identical input; different eigensolvers may still flip eigenvector signs,
/// which reorients axes but never changes relative clustering.
///
/// Errors if `dim` is zero or exceeds the term count, or if the matrix has
/// no document columns. A pure transform: no state is kept between calls.
pub fn compute_pca(matrix: &Array2<f64>, dim: usize) -> Result<Array2<f64>> {
    if dim == 0 {
        return Err(AnalyzerError::ZeroDimension);
    }
    let (terms, docs) = matrix.dim();
    if terms < dim {
        return Err(AnalyzerError::DimensionTooLarge {
            requested: dim,
            terms,
        });
    }
    let started = Instant::now();

    // row-wise mean, one value per term
    let mean = match matrix.mean_axis(Axis(1)) {
        Some(mean) => mean,
        None => return Err(AnalyzerError::EmptyDocuments),
    };
    let centered = matrix - &mean.insert_axis(Axis(1));

    // sample covariance of the term rows; with a single document the
    // centered column is zero, so the clamped divisor keeps it a zero
    // matrix instead of NaN
    let divisor = docs.saturating_sub(1).max(1) as f64;
    let covariance = centered.dot(&centered.t()) / divisor;
    let covariance = (&covariance + &covariance.t()) * 0.5;

    let (values, vectors) = symmetric_eigen(&covariance);
    let (values, vectors) = sort_eigen_desc(&values, &vectors);

    // top eigenvectors as rows, dim x terms
    let basis = vectors.slice(s![.., ..dim]).t().to_owned();
    let projection = basis.dot(&centered);

    debug!(
        "projected {}x{} matrix to {} dimension(s), leading eigenvalue {:.6}, in {:?}",
        terms,
        docs,
        dim,
        values[0],
        started.elapsed()
    );
    Ok(projection)
}
