use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, dry_run: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let report = app
        .store
        .normalize(dry_run)
        .context("Failed to save normalized memory bank")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => {
            for (from, to) in &report.renamed {
                println!("  {} -> {}", from, terminal::paint(to, Color::BOLD, use_color));
            }
            for phrase in &report.collisions {
                println!(
                    "  {}",
                    terminal::paint(&format!("duplicate phrase: {}", phrase), Color::YELLOW, use_color)
                );
            }

            println!(
                "\n{} of {} records changed ({} renamed, {} redefined, {} contexts dropped)",
                report.changed,
                report.examined,
                report.renamed.len(),
                report.redefined,
                report.dropped_source_contexts
            );
            if dry_run {
                println!("Dry run, nothing saved.");
            } else if report.saved {
                println!("Memory bank saved.");
            }
        }
    }

    Ok(())
}
