use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, phrase: &str, context: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    if phrase.trim().is_empty() {
        bail!("No phrase provided");
    }

    let session = app.session()?;
    let (lesson_text, lesson_html) = session.teacher().teach(&mut app.store, phrase.trim(), context.trim());

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "phrase": phrase.trim(),
                "lessonText": lesson_text,
                "lessonHtml": lesson_html,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_lesson_text(&lesson_text, use_color));
            if lesson_html.is_none() {
                println!("\n{}", terminal::paint("Lesson was not saved.", Color::RED, use_color));
            }
        }
    }

    Ok(())
}
