use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{Cell, Table as ComfyTable};
use indicatif::{ProgressBar, ProgressStyle};

use reelseed_core::generate::relationships::PrimaryFlagPolicy;
use reelseed_core::seed::{self, SeedScript, SeedSettings};
use reelseed_core::MovieIds;

use crate::args::GenerateArgs;
use crate::commands::load_config;

pub fn run(args: &GenerateArgs) -> Result<()> {
    let (config, source) = load_config(args.config.as_deref())?;
    if let Some(ref path) = source {
        eprintln!("Using config {}", path.display());
    }

    let movie_ids_path = args
        .movie_ids
        .clone()
        .unwrap_or_else(|| config.generate.movie_ids.clone());
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.generate.output.clone());

    let movies = MovieIds::load(&movie_ids_path)
        .with_context(|| format!("Failed to load movie ids from {}", movie_ids_path.display()))?;
    eprintln!(
        "Loaded {} movie ids from {}",
        movies.len(),
        movie_ids_path.display()
    );

    let mut settings =
        SeedSettings::from_config(&config, clock_seed(), Utc::now().naive_utc());
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if args.no_transaction {
        settings.transactional = false;
    }
    if args.one_primary_per_group {
        settings.primary_flags = PrimaryFlagPolicy::OnePerGroup;
    }

    let total_requested: usize = seed::plan(&config)?.iter().map(|p| p.requested).sum();
    let pb = ProgressBar::new(total_requested as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Generating {msg:<20} {bar:40.cyan/dim} {pos}/{len}")?,
    );
    let report: &dyn Fn(&str, usize, usize) = &|table, done, _total| {
        pb.set_message(table.to_string());
        pb.set_position(done as u64);
    };

    let script = seed::generate(&config, &settings, &movies, Some(report))?;
    pb.finish_and_clear();

    script
        .write_to(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    print_summary(&script);
    eprintln!(
        "Wrote {} rows to {} (seed {})",
        script.total_rows(),
        output_path.display(),
        settings.seed
    );

    Ok(())
}

/// Seed used when neither the command line nor the config pins one.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn print_summary(script: &SeedScript) {
    let mut t = ComfyTable::new();
    t.set_header(vec!["Section", "Table", "Requested", "Produced"]);
    for section in &script.sections {
        let produced = if section.is_short() {
            format!("{} (short)", section.produced)
        } else {
            section.produced.to_string()
        };
        t.add_row(vec![
            Cell::new(section.section.banner()),
            Cell::new(section.section.table()),
            Cell::new(section.requested),
            Cell::new(produced),
        ]);
    }
    println!("{}", t);
}
