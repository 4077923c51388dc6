use anyhow::Result;

use phrasenav_lib::memory::{AddStatus, PhraseInput};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    phrase: &str,
    meaning: &str,
    context: Option<String>,
    corrected: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let status = app.store.add(PhraseInput {
        source_context: context,
        corrected_context: corrected,
        ..PhraseInput::new(phrase, meaning)
    });

    match format {
        OutputFormat::Json => {
            let kind = match status {
                AddStatus::Added(_) => "added",
                AddStatus::Updated(_) => "updated",
                AddStatus::InvalidPhrase => "invalid",
            };
            let value = serde_json::json!({
                "status": kind,
                "phrase": status.phrase(),
                "message": status.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            let color = match status {
                AddStatus::InvalidPhrase => Color::RED,
                _ => Color::GREEN,
            };
            println!("{}", terminal::paint(&status.to_string(), color, use_color));
        }
    }

    Ok(())
}
