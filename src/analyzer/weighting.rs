use std::borrow::Cow;
use std::time::Instant;

use log::debug;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Per-cell transform of a raw count, independent of the other documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalWeight {
    /// 0 where the raw count is zero, 1 everywhere else
    Binary,
    /// the raw count itself
    TermFrequency,
    /// ln(t + 1), dampens high counts
    Log,
    /// ((t / max_j) + 1) / 2 against the raw column maximum
    AugNorm,
}

/// Per-term scalar derived from that term's distribution across all
/// documents, applied to scale the whole matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalWeight {
    /// 1, leaves rows unscaled
    Binary,
    /// 1 / sqrt(1 + sum_j t^2)
    Normal,
    /// (sum_j t) / (1 + document frequency)
    Gfldf,
    /// log2(documents / (1 + document frequency))
    Ldf,
    /// 1 - sum over positive cells of (p ln p) / ln documents, p = t / df
    Entropy,
}

impl LocalWeight {
    pub const COUNT: usize = 4;

    /// Map an arbitrary user-supplied index into range (modulo), never fail.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => LocalWeight::Binary,
            1 => LocalWeight::TermFrequency,
            2 => LocalWeight::Log,
            _ => LocalWeight::AugNorm,
        }
    }
}

impl GlobalWeight {
    pub const COUNT: usize = 5;

    /// Map an arbitrary user-supplied index into range (modulo), never fail.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => GlobalWeight::Binary,
            1 => GlobalWeight::Normal,
            2 => GlobalWeight::Gfldf,
            3 => GlobalWeight::Ldf,
            _ => GlobalWeight::Entropy,
        }
    }
}

/// Per-call memo of raw column maxima for the augmented-normal transform.
/// Scoped to a single [`weight_matrix`] invocation and discarded with it.
struct ColumnMax<'m> {
    base: &'m Array2<f64>,
    memo: Vec<Option<f64>>,
}

impl<'m> ColumnMax<'m> {
    fn new(base: &'m Array2<f64>) -> Self {
        Self {
            base,
            memo: vec![None; base.ncols()],
        }
    }

    fn get(&mut self, j: usize) -> f64 {
        if let Some(max) = self.memo[j] {
            return max;
        }
        let max = self.base.column(j).iter().fold(0.0_f64, |acc, &t| acc.max(t));
        self.memo[j] = Some(max);
        max
    }
}

/// Derive a weighted matrix from a raw count matrix.
///
/// Two fast paths skip the per-cell scan entirely:
/// - `Binary` + `Binary` returns a fresh 0/1-valued matrix;
/// - `TermFrequency` + `Binary` returns the base matrix itself, borrowed.
///   The returned matrix must be treated as read-only either way.
///
/// All other combinations run the two-pass derivation: every cell gets the
/// local transform of its raw count (with the raw matrix as context), then
/// each row is scaled by the global weight computed from the raw matrix.
pub fn weight_matrix<'a>(
    base: &'a Array2<f64>,
    local: LocalWeight,
    global: GlobalWeight,
) -> Cow<'a, Array2<f64>> {
    match (local, global) {
        (LocalWeight::Binary, GlobalWeight::Binary) => {
            return Cow::Owned(base.mapv(|t| if t > 0.0 { 1.0 } else { 0.0 }));
        }
        (LocalWeight::TermFrequency, GlobalWeight::Binary) => {
            return Cow::Borrowed(base);
        }
        _ => {}
    }

    let started = Instant::now();
    let (terms, docs) = base.dim();
    let mut column_max = ColumnMax::new(base);
    let mut weighted = Array2::zeros(base.raw_dim());

    for i in 0..terms {
        for j in 0..docs {
            let t = base[[i, j]];
            weighted[[i, j]] = match local {
                LocalWeight::Binary => {
                    if t > 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                LocalWeight::TermFrequency => t,
                LocalWeight::Log => (t + 1.0).ln(),
                LocalWeight::AugNorm => {
                    let max = column_max.get(j);
                    // all-zero column: take the t -> 0 limit of the formula
                    if max > 0.0 {
                        ((t / max) + 1.0) / 2.0
                    } else {
                        0.5
                    }
                }
            };
        }

        let g = global_weight(base, global, i);
        if g != 1.0 {
            for j in 0..docs {
                weighted[[i, j]] *= g;
            }
        }
    }

    debug!(
        "weighted {}x{} matrix with {:?}/{:?} in {:?}",
        terms,
        docs,
        local,
        global,
        started.elapsed()
    );
    Cow::Owned(weighted)
}

/// Global weight of row `i`, computed from the raw matrix.
fn global_weight(base: &Array2<f64>, scheme: GlobalWeight, i: usize) -> f64 {
    let row = base.row(i);
    let docs = base.ncols();
    match scheme {
        GlobalWeight::Binary => 1.0,
        GlobalWeight::Normal => {
            let sum = row.iter().map(|&t| t * t).sum::<f64>() + 1.0;
            (1.0 / sum).sqrt()
        }
        GlobalWeight::Gfldf => {
            let gf = row.sum();
            let df = document_frequency(&row);
            gf / (1.0 + df)
        }
        GlobalWeight::Ldf => {
            let df = document_frequency(&row);
            (docs as f64 / (1.0 + df)).log2()
        }
        GlobalWeight::Entropy => {
            let df = document_frequency(&row);
            let log_docs = (docs as f64).ln();
            // a single document makes the normalizer ln(1) = 0; the
            // distribution is trivially certain, weight stays 1
            if log_docs == 0.0 {
                return 1.0;
            }
            let mut sum = 0.0;
            for &t in row.iter() {
                if t > 0.0 {
                    let p = t / df;
                    sum += (p * p.ln()) / log_docs;
                }
            }
            1.0 - sum
        }
    }
}

#[inline]
fn document_frequency(row: &ndarray::ArrayView1<'_, f64>) -> f64 {
    row.iter().filter(|&&t| t > 0.0).count() as f64
}
