use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use tdm_projector::{compute_pca, weight_matrix, GlobalWeight, LocalWeight};

/// tiny deterministic PRNG (xorshift32)
struct Rng(u32);
impl Rng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

/// Synthetic sparse-ish count matrix: most cells zero, the rest small counts.
fn synthetic_counts(terms: usize, documents: usize) -> Array2<f64> {
    let mut rng = Rng(0xDEAD_BEEF);
    Array2::from_shape_fn((terms, documents), |_| {
        let roll = rng.next_u32();
        if roll % 5 == 0 {
            (roll % 9 + 1) as f64
        } else {
            0.0
        }
    })
}

fn weighting_benchmark(c: &mut Criterion) {
    let base = synthetic_counts(2500, 400);

    c.bench_function("weight_log_entropy_2500x400", |b| {
        b.iter(|| weight_matrix(&base, LocalWeight::Log, GlobalWeight::Entropy))
    });

    c.bench_function("weight_augnorm_normal_2500x400", |b| {
        b.iter(|| weight_matrix(&base, LocalWeight::AugNorm, GlobalWeight::Normal))
    });
}

fn pca_benchmark(c: &mut Criterion) {
    let base = synthetic_counts(100, 400);
    let weighted = weight_matrix(&base, LocalWeight::Log, GlobalWeight::Normal).into_owned();

    c.bench_function("pca_100x400_to_2d", |b| {
        b.iter(|| compute_pca(&weighted, 2).unwrap())
    });
}

criterion_group!(benches, weighting_benchmark, pca_benchmark);
criterion_main!(benches);
