use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use qprs_core::QpModel;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_box_qp(num_var: usize, num_con: usize, rng: &mut SmallRng) -> QpModel {
    let mut model = QpModel::new(num_var, num_con).unwrap();
    for var in 0..num_var {
        model
            .set_quadratic_objective(var, var, 1.0 + rng.gen::<f64>() * 0.1)
            .unwrap();
        model
            .set_linear_objective(var, rng.gen::<f64>() - 0.5)
            .unwrap();
        model.set_variable_bound(var, -1.0, 1.0).unwrap();
    }
    for con in 0..num_con {
        for var in 0..num_var {
            model
                .set_constraint_coeff(con, var, rng.gen::<f64>() * 0.5 - 0.25)
                .unwrap();
        }
        let slack = rng.gen::<f64>() + 0.5;
        model.set_constraint_bound(con, -slack, slack).unwrap();
    }
    model
}

fn build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("qp_model_build");
    let mut rng = SmallRng::seed_from_u64(42);
    group.bench_function("n=50_m=25", |b| b.iter(|| random_box_qp(50, 25, &mut rng)));
    group.finish();
}

fn solve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("qp_solve");
    let mut rng = SmallRng::seed_from_u64(42);
    group.bench_function("n=50_m=25", |b| {
        b.iter_batched(
            || random_box_qp(50, 25, &mut rng),
            |mut model| {
                model.solve().unwrap();
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("n=150_m=75", |b| {
        b.iter_batched(
            || random_box_qp(150, 75, &mut rng),
            |mut model| {
                model.solve().unwrap();
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, build_benchmark, solve_benchmark);
criterion_main!(benches);
