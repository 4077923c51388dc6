use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, sentence: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    if sentence.trim().is_empty() {
        bail!("No sentence provided");
    }

    let session = app.session()?;
    let outcome = session.submit(&mut app.store, sentence)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint("Correction", Color::BOLD, use_color));
            println!("{}", "\u{2500}".repeat(40));
            println!("{}", outcome.corrector_output.trim());
            println!();

            let header = if outcome.phrase.is_empty() {
                "Lesson".to_string()
            } else {
                format!("Lesson: {}", outcome.phrase)
            };
            println!("{}", terminal::paint(&header, Color::BOLD, use_color));
            println!("{}", "\u{2500}".repeat(40));
            println!("{}", terminal::render_lesson_text(&outcome.lesson_text, use_color));

            if outcome.lesson_html.is_none() {
                println!("\n{}", terminal::paint("Lesson was not saved.", Color::RED, use_color));
            }
        }
    }

    Ok(())
}
