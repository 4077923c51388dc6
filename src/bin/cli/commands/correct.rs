use anyhow::{bail, Result};

use phrasenav_lib::corrector::TeachingTargetResolver;
use phrasenav_lib::tutor::corrector_html;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, text: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    if text.trim().is_empty() {
        bail!("No text provided");
    }

    let session = app.session()?;
    let output = session.corrector().correct(text.trim());
    let target = TeachingTargetResolver::new().resolve(&output);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "output": output,
                "html": corrector_html(&output),
                "target": target,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("{}", output.trim());
            if let Some(target) = target {
                println!();
                println!(
                    "{} {}",
                    terminal::paint("Phrase to learn:", Color::DIM, use_color),
                    terminal::paint(&target.phrase, Color::BOLD, use_color)
                );
                println!("{} {}", terminal::paint("Context:", Color::DIM, use_color), target.context);
            }
        }
    }

    Ok(())
}
