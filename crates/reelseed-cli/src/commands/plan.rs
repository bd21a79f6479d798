use anyhow::Result;
use comfy_table::{Cell, Table as ComfyTable};

use reelseed_core::seed;

use crate::args::PlanArgs;
use crate::commands::load_config;

pub fn run(args: &PlanArgs) -> Result<()> {
    let (config, source) = load_config(args.config.as_deref())?;
    match source {
        Some(path) => eprintln!("Using config {}", path.display()),
        None => eprintln!("No config file found, using built-in defaults"),
    }

    let planned = seed::plan(&config)?;

    let mut t = ComfyTable::new();
    t.set_header(vec!["#", "Section", "Depends on", "Requested", "Expected"]);
    for (i, step) in planned.iter().enumerate() {
        let parents: Vec<&str> = step
            .section
            .depends_on()
            .iter()
            .map(|s| s.table())
            .collect();
        let expected = match step.vocabulary_limit {
            Some(limit) if step.requested > limit => {
                format!("{} (vocabulary of {})", step.expected(), limit)
            }
            _ => step.expected().to_string(),
        };
        t.add_row(vec![
            Cell::new(i + 1),
            Cell::new(step.section.table()),
            Cell::new(parents.join(", ")),
            Cell::new(step.requested),
            Cell::new(expected),
        ]);
    }
    println!("{}", t);

    let total: usize = planned.iter().map(|p| p.expected()).sum();
    eprintln!(
        "{} sections, up to {} rows (relationship tables may come out shorter)",
        planned.len(),
        total
    );

    Ok(())
}
