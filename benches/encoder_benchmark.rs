use criterion::{black_box, criterion_group, criterion_main, Criterion};

use amanita::{OneHotSchema, ReferenceDataset, UserRecord};

fn reference_dataset(rows: usize) -> ReferenceDataset {
    let columns: Vec<String> = [
        "cap-shape",
        "cap-surface",
        "cap-color",
        "bruises",
        "odor",
        "gill-attachment",
        "gill-spacing",
        "gill-size",
        "gill-color",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    let codes = ["a", "b", "c", "f", "k", "n", "p", "s", "w", "x", "y"];
    let data = (0..rows)
        .map(|i| {
            (0..columns.len())
                .map(|j| codes[(i * 7 + j * 3) % codes.len()].to_string())
                .collect()
        })
        .collect();

    ReferenceDataset::from_records(columns, data).expect("valid synthetic frame")
}

fn sample_record(dataset: &ReferenceDataset) -> UserRecord {
    dataset.record(0).expect("dataset has rows")
}

fn bench_schema_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("SchemaDerivation");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for &rows in &[50usize, 500, 5000] {
        let dataset = reference_dataset(rows);
        group.bench_function(format!("rows_{}", rows), |b| {
            b.iter(|| OneHotSchema::from_dataset(black_box(&dataset)))
        });
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encoding");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Per-request cost is a function of schema width, not dataset size;
    // the dataset only shapes how many indicator columns exist.
    for &rows in &[50usize, 5000] {
        let dataset = reference_dataset(rows);
        let schema = OneHotSchema::from_dataset(&dataset);
        let record = sample_record(&dataset);
        group.bench_function(format!("encode_rows_{}", rows), |b| {
            b.iter(|| schema.encode(black_box(&record)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schema_derivation, bench_encoding);
criterion_main!(benches);
