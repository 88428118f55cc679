//! Demo driver: load a data directory, run one recompute pass, and print the
//! legend, distribution, and top-contributors summaries.

use statmap::engine::Engine;
use statmap::{DataStore, FileProvider, StatmapError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(data_dir) = std::env::args().nth(1) else {
        eprintln!("usage: statmap <data-dir>");
        return ExitCode::FAILURE;
    };

    match run(&data_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", e.title(), e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(data_dir: &str) -> Result<(), StatmapError> {
    let provider = FileProvider::new(data_dir);
    let store = DataStore::load(&provider)?;

    let category = store
        .category_names()
        .next()
        .ok_or_else(|| StatmapError::Validation("no categories defined".to_string()))?
        .to_string();

    let mut engine = Engine::new(store, &category, "Census")?;
    let selection = engine.selection();
    let unit_ids = engine
        .store()
        .unit_ids(selection.year, selection.geounit_type.key());
    engine.recompute(&unit_ids);

    let snapshot = engine.snapshot();
    println!("{}", engine.store().manifest().title);
    println!(
        "{} / {} - {} of {} units visible",
        engine.selection().category,
        engine.selection().active_field,
        snapshot.styles.values().filter(|s| s.visible).count(),
        unit_ids.len()
    );

    let (min, max) = snapshot.legend();
    if min.is_empty() {
        println!("no data for this selection");
        return Ok(());
    }
    println!("range: {} .. {}", min, max);

    if let Some(hist) = &snapshot.histogram {
        println!("distribution ({} bins):", hist.bin_count);
        for (i, (label, count)) in hist.labels.iter().zip(&hist.counts).enumerate() {
            if *count > 0 {
                println!("  bin {:>3} (<={}): {}", i, label, count);
            }
        }
    }

    if let Some(top) = &snapshot.top_units {
        println!("top contributors (third of {}):", top.total);
        for row in &top.rows {
            println!("  {:>12}  {}", row.unit_id, row.value);
        }
    }

    Ok(())
}
