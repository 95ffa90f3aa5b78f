use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use lipidai::data::{LipidDataset, LipidFeatures, LipidRecord};
use lipidai::inference::LdlPredictor;
use lipidai::training::{RandomForest, Trainer, TrainerConfig};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn create_lipid_data(n_rows: usize) -> LipidDataset {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let records: Vec<LipidRecord> = (0..n_rows)
        .map(|_| {
            let tc = rng.gen_range(120.0..320.0);
            let hdl_c = rng.gen_range(25.0..90.0);
            let tg = rng.gen_range(40.0..400.0);
            // Friedewald plus noise
            let ldl_c = tc - hdl_c - tg / 5.0 + rng.gen_range(-8.0..8.0);
            LipidRecord { features: LipidFeatures::new(tc, hdl_c, tg), ldl_c }
        })
        .collect();

    LipidDataset::from_records(&records)
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10); // Fewer samples for training benchmarks

    for n_rows in [1000, 5000, 20000].iter() {
        let dataset = create_lipid_data(*n_rows);

        group.bench_with_input(
            BenchmarkId::new("forest_fit", n_rows),
            &dataset,
            |b, ds| {
                b.iter(|| {
                    let mut forest = RandomForest::new(100)
                        .with_max_depth(20)
                        .with_min_samples_leaf(5)
                        .with_random_state(42);
                    forest.fit(black_box(&ds.features), black_box(&ds.target)).unwrap();
                    forest
                })
            },
        );
    }

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    // Train model once
    let dataset = create_lipid_data(5000);
    let config = TrainerConfig::new("bench.csv");
    let (artifact, _) = Trainer::new(config).fit_dataset(&dataset).unwrap();
    let predictor = LdlPredictor::new(artifact);

    group.bench_function("single_panel", |b| {
        let panel = LipidFeatures::new(205.0, 48.0, 160.0);
        b.iter(|| predictor.predict(black_box(&panel)).unwrap())
    });

    for n_rows in [100, 1000, 10000].iter() {
        let test = create_lipid_data(*n_rows);

        group.bench_with_input(
            BenchmarkId::new("forest_predict", n_rows),
            &test,
            |b, ds| {
                b.iter(|| predictor.artifact().forest.predict(black_box(&ds.features)).unwrap())
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_training, bench_prediction);
criterion_main!(benches);
