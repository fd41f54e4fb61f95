use amanita::{service, ArtifactStore, Classifier, MushroomClass, UserRecord};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding mushroom_rf.onnx and mushrooms_mini.csv
    /// (defaults to $AMANITA_DATA, then the platform data dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Override a feature of the demo records, e.g. --set odor=f
    #[arg(short, long, value_name = "FEATURE=CODE")]
    set: Vec<String>,
}

fn parse_overrides(pairs: &[String]) -> Result<Vec<(String, String)>, anyhow::Error> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(feature, code)| (feature.to_string(), code.to_string()))
                .ok_or_else(|| anyhow::anyhow!("expected FEATURE=CODE, got '{}'", pair))
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Mushroom Edibility Demo ===");

    let store = args
        .data_dir
        .map(ArtifactStore::new)
        .unwrap_or_else(ArtifactStore::new_default);
    store.ensure_present()?;

    let start_time = Instant::now();
    info!("Initializing inference service...");

    let classifier = service::init_with(service::ServiceConfig {
        store: Some(store),
        runtime: Default::default(),
    })?;

    let build_time = start_time.elapsed();
    info!(
        "=== Service Ready (schema width {}, took {:.2?}) ===",
        classifier.info().schema_width,
        build_time
    );

    let overrides = parse_overrides(&args.set)?;

    // Sample specimens in UCI code form. The first is a classic edible row
    // (almond odor), the second a known poisonous one (pungent odor).
    let samples: Vec<(&str, &[(&str, &str)])> = vec![
        (
            "field mushroom",
            &[
                ("cap-shape", "x"),
                ("cap-surface", "s"),
                ("cap-color", "y"),
                ("bruises", "t"),
                ("odor", "a"),
                ("gill-attachment", "f"),
                ("gill-spacing", "c"),
                ("gill-size", "b"),
                ("gill-color", "k"),
            ],
        ),
        (
            "suspect specimen",
            &[
                ("cap-shape", "x"),
                ("cap-surface", "s"),
                ("cap-color", "n"),
                ("bruises", "t"),
                ("odor", "p"),
                ("gill-attachment", "f"),
                ("gill-spacing", "c"),
                ("gill-size", "n"),
                ("gill-color", "k"),
            ],
        ),
    ];

    info!("=== Running Classifications ({} specimens) ===", samples.len());
    let classify_start = Instant::now();

    for (name, codes) in &samples {
        let mut record: UserRecord = codes
            .iter()
            .map(|&(feature, code)| (feature.to_string(), code.to_string()))
            .collect();
        for (feature, code) in &overrides {
            record.insert(feature.clone(), code.clone());
        }

        info!("Classifying '{}' (elapsed: {:.2?})", name, classify_start.elapsed());
        process_record(&classifier, name, &record)?;
    }

    info!("=== Demo Complete ===");
    info!("Total time: {:.2?}", start_time.elapsed());
    info!("Classification time: {:.2?}", classify_start.elapsed());

    Ok(())
}

fn process_record(
    classifier: &Classifier,
    name: &str,
    record: &UserRecord,
) -> Result<(), Box<dyn std::error::Error>> {
    match classifier.predict(record) {
        Ok(prediction) => {
            println!("\n{}:", name);
            match prediction.class {
                MushroomClass::Edible => println!("  EDIBLE (class id {})", prediction.class_id),
                MushroomClass::Poisonous => {
                    println!("  POISONOUS / UNSAFE (class id {})", prediction.class_id)
                }
            }
            if let Some(probabilities) = &prediction.probabilities {
                println!("  Probabilities: {:?}", probabilities);
            }
            if !prediction.off_schema.is_empty() {
                println!(
                    "  Warning: codes outside the reference schema for: {}",
                    prediction.off_schema.join(", ")
                );
            }
            println!("  Never rely solely on automated predictions to decide what to eat.");
        }
        Err(e) => {
            eprintln!("\nError classifying '{}': {}", name, e);
            eprintln!("Consider:");
            eprintln!("  - Supplying a code for every feature column");
            eprintln!("  - Using only codes offered by feature options");
            return Err(e.into());
        }
    }

    Ok(())
}
