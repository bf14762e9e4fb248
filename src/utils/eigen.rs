use std::cmp::Ordering;

use ndarray::{Array1, Array2, Axis};
use num::Float;

/// Upper bound on full Jacobi sweeps. Symmetric matrices of the sizes seen
/// here converge in well under ten sweeps; the bound only caps pathological
/// inputs.
const MAX_SWEEPS: usize = 64;

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns `(eigenvalues, eigenvectors)` where the eigenvectors are the
/// columns of the returned matrix, paired by index with the eigenvalues.
/// No ordering is imposed here; see [`sort_eigen_desc`].
///
/// The iteration is fully deterministic: identical input yields identical
/// output, bit for bit. The caller is responsible for symmetry; rotation
/// pivots are chosen from the strict upper triangle.
///
/// # Arguments
/// * `matrix` - square symmetric matrix
///
/// # Returns
/// * `(Array1<F>, Array2<F>)` - eigenvalues and column eigenvectors
pub fn symmetric_eigen<F: Float>(matrix: &Array2<F>) -> (Array1<F>, Array2<F>) {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols(), "matrix must be square");

    let mut a = matrix.to_owned();
    let mut v = Array2::eye(n);
    if n < 2 {
        return (a.diag().to_owned(), v);
    }

    let zero = F::zero();
    let one = F::one();
    let two = one + one;

    let scale = frobenius(&a);
    if scale == zero {
        return (Array1::zeros(n), v);
    }
    let tol = F::epsilon() * scale;

    for _ in 0..MAX_SWEEPS {
        if off_diagonal(&a) <= tol {
            break;
        }
        for p in 0..n - 1 {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                // negligible against its diagonal neighborhood: zero it out
                // instead of rotating
                if apq.abs() <= F::epsilon() * (a[[p, p]].abs() + a[[q, q]].abs()) {
                    a[[p, q]] = zero;
                    a[[q, p]] = zero;
                    continue;
                }

                let theta = (a[[q, q]] - a[[p, p]]) / (two * apq);
                let t = if theta >= zero {
                    one / (theta + (one + theta * theta).sqrt())
                } else {
                    one / (theta - (one + theta * theta).sqrt())
                };
                let c = one / (t * t + one).sqrt();
                let s = t * c;

                // A <- Gt * A * G for the Givens rotation G in the (p, q) plane
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
                // accumulate the rotation into the eigenvector columns
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

/// Reorder eigenpairs by descending eigenvalue.
///
/// The sort is stable: equal eigenvalues keep the solver's original order,
/// so results are deterministic for identical input.
pub fn sort_eigen_desc<F: Float>(values: &Array1<F>, vectors: &Array2<F>) -> (Array1<F>, Array2<F>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[j].partial_cmp(&values[i]).unwrap_or(Ordering::Equal));

    let sorted_values = Array1::from_vec(order.iter().map(|&i| values[i]).collect());
    let sorted_vectors = vectors.select(Axis(1), &order);
    (sorted_values, sorted_vectors)
}

fn frobenius<F: Float>(a: &Array2<F>) -> F {
    a.iter().fold(F::zero(), |acc, &x| acc + x * x).sqrt()
}

fn off_diagonal<F: Float>(a: &Array2<F>) -> F {
    let n = a.nrows();
    let mut sum = F::zero();
    for p in 0..n {
        for q in 0..n {
            if p != q {
                sum = sum + a[[p, q]] * a[[p, q]];
            }
        }
    }
    sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn new(seed: u32) -> Self {
            Self(seed)
        }
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
        fn next_f64(&mut self) -> f64 {
            (self.next_u32() as f64 / u32::MAX as f64) * 2.0 - 1.0
        }
    }

    fn random_symmetric(rng: &mut Rng, n: usize) -> Array2<f64> {
        let mut a = Array2::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let x = rng.next_f64();
                a[[i, j]] = x;
                a[[j, i]] = x;
            }
        }
        a
    }

    #[test]
    fn known_two_by_two() {
        let a = arr2(&[[2.0, 1.0], [1.0, 2.0]]);
        let (values, vectors) = symmetric_eigen(&a);
        let (values, vectors) = sort_eigen_desc(&values, &vectors);

        assert!((values[0] - 3.0).abs() < 1e-12);
        assert!((values[1] - 1.0).abs() < 1e-12);

        // leading eigenvector is [1, 1] / sqrt(2) up to sign
        let ratio = vectors[[0, 0]] / vectors[[1, 0]];
        assert!((ratio - 1.0).abs() < 1e-9);
        // trailing eigenvector is [1, -1] / sqrt(2) up to sign
        let ratio = vectors[[0, 1]] / vectors[[1, 1]];
        assert!((ratio + 1.0).abs() < 1e-9);
    }

    #[test]
    fn diagonal_matrix_is_its_own_decomposition() {
        let a = arr2(&[[5.0, 0.0, 0.0], [0.0, -2.0, 0.0], [0.0, 0.0, 3.0]]);
        let (values, vectors) = symmetric_eigen(&a);
        let (values, vectors) = sort_eigen_desc(&values, &vectors);

        assert_eq!(values.to_vec(), vec![5.0, 3.0, -2.0]);
        // eigenvectors are the matching unit columns
        assert_eq!(vectors[[0, 0]].abs(), 1.0);
        assert_eq!(vectors[[2, 1]].abs(), 1.0);
        assert_eq!(vectors[[1, 2]].abs(), 1.0);
    }

    #[test]
    fn zero_and_single_element_matrices() {
        let zero: Array2<f64> = Array2::zeros((4, 4));
        let (values, vectors) = symmetric_eigen(&zero);
        assert!(values.iter().all(|&w| w == 0.0));
        assert_eq!(vectors, Array2::eye(4));

        let single = arr2(&[[7.5]]);
        let (values, _) = symmetric_eigen(&single);
        assert_eq!(values[0], 7.5);
    }

    #[test]
    fn reconstructs_random_matrices() {
        let mut rng = Rng::new(0x5EED_1234);
        for &n in &[2usize, 3, 5, 8, 13] {
            let a = random_symmetric(&mut rng, n);
            let (values, vectors) = symmetric_eigen(&a);

            // A * v_i == w_i * v_i for every eigenpair
            for i in 0..n {
                let v_i = vectors.column(i);
                let av = a.dot(&v_i);
                for k in 0..n {
                    assert!(
                        (av[k] - values[i] * v_i[k]).abs() < 1e-8,
                        "eigenpair {i} of {n}x{n} matrix violated at row {k}"
                    );
                }
            }

            // eigenvector columns are orthonormal
            let vtv = vectors.t().dot(&vectors);
            for i in 0..n {
                for j in 0..n {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!((vtv[[i, j]] - expected).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn decomposition_is_deterministic() {
        let mut rng = Rng::new(42);
        let a = random_symmetric(&mut rng, 6);
        let (w1, v1) = symmetric_eigen(&a);
        let (w2, v2) = symmetric_eigen(&a);
        assert_eq!(w1, w2);
        assert_eq!(v1, v2);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let values = Array1::from_vec(vec![1.0, 2.0, 1.0, 2.0]);
        let vectors = arr2(&[
            [10.0, 20.0, 30.0, 40.0],
            [11.0, 21.0, 31.0, 41.0],
            [12.0, 22.0, 32.0, 42.0],
            [13.0, 23.0, 33.0, 43.0],
        ]);
        let (sorted_values, sorted_vectors) = sort_eigen_desc(&values, &vectors);
        assert_eq!(sorted_values.to_vec(), vec![2.0, 2.0, 1.0, 1.0]);
        // original column order preserved within each tie group
        assert_eq!(sorted_vectors[[0, 0]], 20.0);
        assert_eq!(sorted_vectors[[0, 1]], 40.0);
        assert_eq!(sorted_vectors[[0, 2]], 10.0);
        assert_eq!(sorted_vectors[[0, 3]], 30.0);
    }

    #[test]
    fn works_for_f32() {
        let a = arr2(&[[4.0f32, 1.0], [1.0, 4.0]]);
        let (values, vectors) = symmetric_eigen(&a);
        let (values, vectors) = sort_eigen_desc(&values, &vectors);
        assert!((values[0] - 5.0).abs() < 1e-4);
        assert!((values[1] - 3.0).abs() < 1e-4);
        assert!((vectors[[0, 0]] / vectors[[1, 0]] - 1.0).abs() < 1e-3);
    }
}
