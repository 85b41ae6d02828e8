use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evobox::evolution::{Optimizer, OptimizerOptions};
use evobox::space::SearchSpace;

fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|&v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
            .sum::<f64>()
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize_rastrigin");
    for population in [50, 200, 1000].iter() {
        group.bench_function(&format!("population_{}", population), |b| {
            b.iter(|| {
                let space =
                    SearchSpace::new(vec![-5.12; 5], vec![5.12; 5]).unwrap();
                let mut optimizer =
                    Optimizer::with_seed(space, rastrigin as fn(&[f64]) -> f64, 42);
                let options = OptimizerOptions::builder()
                    .population_count(*population)
                    .max_iters(50)
                    .build();

                let result = optimizer.run(black_box(&options));
                assert!(result.is_ok());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_optimize);
criterion_main!(benches);
