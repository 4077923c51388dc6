use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, phrase: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let Some(lesson) = app.catalog.show(&app.store, phrase) else {
        bail!("Phrase not found: {}", phrase);
    };
    let record = app.store.find(phrase);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "lesson": lesson,
                "record": record,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_lesson(&lesson, use_color));

            if let Some(record) = record {
                if let Some(context) = record.corrected_context.as_deref() {
                    println!("\n{} {}", terminal::paint("Context:", Color::DIM, use_color), context);
                }
                if let Some(text) = record.lesson_text.as_deref() {
                    println!();
                    println!("{}", "\u{2500}".repeat(40));
                    println!("{}", terminal::render_lesson_text(text, use_color));
                }
                println!("\n{} {}", terminal::paint("Added:", Color::DIM, use_color), record.date_added);
            }
        }
    }

    Ok(())
}
