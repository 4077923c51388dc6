use anyhow::Result;

use crate::app::App;
use crate::commands::list;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, query: &str, raw: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    if !raw {
        let lessons = app.catalog.search(&app.store, query);
        if lessons.is_empty() && matches!(format, OutputFormat::Plain) {
            println!("No results found for '{}'.", query);
            return Ok(());
        }
        return list::print_lessons(&lessons, format, use_color);
    }

    let records = app.catalog.search_raw(&app.store, query);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No results found for '{}'.", query);
                return Ok(());
            }

            for record in &records {
                println!("{}", terminal::paint(&record.phrase, terminal::Color::BOLD, use_color));
                println!("  {}", record.meaning_or_definition());
                if let Some(context) = record.corrected_context.as_deref().or(record.source_context.as_deref()) {
                    println!("  {}", terminal::paint(context, terminal::Color::DIM, use_color));
                }
            }

            println!("\n{} results", records.len());
        }
    }

    Ok(())
}
