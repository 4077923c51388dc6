use anyhow::Result;

use phrasenav_lib::memory::SampleEntry;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, count: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entries = app.store.sample(count, &mut rand::thread_rng());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            for entry in &entries {
                match entry {
                    SampleEntry::Error { error } => println!("{}", error),
                    SampleEntry::Phrase(view) => {
                        println!("{}", terminal::paint(&view.phrase, Color::BOLD, use_color));
                        if !view.meaning.is_empty() {
                            println!("  {}", view.meaning);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
