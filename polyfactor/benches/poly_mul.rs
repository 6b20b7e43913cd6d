use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use polyfactor::math::other::random_elements;
use polyfactor::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

criterion_main!(benches);
criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = poly_mul<6>,
              poly_mul<7>,
              poly_mul<8>,
);

fn poly_mul<const LOG2_SIZE: usize>(c: &mut Criterion) {
    let product_degree = LOG2_SIZE + 1;
    let mut group = c.benchmark_group(format!(
        "Multiplication of GF(2) Polynomials of Degree 2^{LOG2_SIZE} (Product Degree: 2^{product_degree})"
    ));

    let mut rng = StdRng::seed_from_u64(LOG2_SIZE as u64);
    let mut new_poly = || Polynomial::<F2>::new(random_elements((1 << LOG2_SIZE) + 1, &mut rng));
    let poly_0 = new_poly();
    let poly_1 = new_poly();

    let id = BenchmarkId::new("Generic", product_degree);
    group.bench_function(id, |b| b.iter(|| poly_0.clone() * poly_1.clone()));

    let sparse_0 = SparseGf2Polynomial::from(&poly_0);
    let sparse_1 = SparseGf2Polynomial::from(&poly_1);
    let id = BenchmarkId::new("Sparse", product_degree);
    group.bench_function(id, |b| b.iter(|| sparse_0.clone() * sparse_1.clone()));

    let dense_0 = Gf2Bitset::try_from(&poly_0).unwrap();
    let dense_1 = Gf2Bitset::try_from(&poly_1).unwrap();
    let id = BenchmarkId::new("Dense", product_degree);
    group.bench_function(id, |b| b.iter(|| dense_0.try_mul(&dense_1)));

    group.finish();
}
