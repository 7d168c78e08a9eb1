//! Catalog browsing commands for CLI.

use clap::Subcommand;
use rotation_core::{Catalog, Config, SearchOptions, TICK_LENGTHS};
use serde_json::json;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List tick blocks and every section with its abilities
    Sections {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fuzzy-search ability names
    Search {
        /// Search text
        query: String,
        /// Maximum number of results (overrides search.max_results)
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CatalogAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;

    match action {
        CatalogAction::Sections { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&sections_json(&catalog))?);
            } else {
                print_sections(&catalog);
            }
        }
        CatalogAction::Search { query, limit, json } => {
            let options = SearchOptions {
                max_results: limit.unwrap_or(config.search.max_results),
                ..config.search
            };
            let results = catalog.search(&query, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No matches.");
            } else {
                for entry in results {
                    println!("{:<32} {}", entry.name, entry.section);
                }
            }
        }
    }
    Ok(())
}

fn sections_json(catalog: &Catalog) -> serde_json::Value {
    let sections: Vec<_> = catalog
        .sections()
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "abilities": s.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({ "ticks": TICK_LENGTHS, "sections": sections })
}

fn print_sections(catalog: &Catalog) {
    let ticks: Vec<String> = catalog.tick_palette().iter().map(|p| p.palette_id()).collect();
    println!("Ticks: {}", ticks.join(" "));
    for section in catalog.sections() {
        println!();
        println!("{} ({})", section.name, section.entries.len());
        for entry in &section.entries {
            println!("  {}", entry.name);
        }
    }
}
