use anyhow::Result;

use phrasenav_lib::review::evaluate_answer;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, phrase: &str, answer: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let evaluation = evaluate_answer(&app.store, phrase, answer);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        OutputFormat::Plain => {
            let color = if evaluation.correct { Color::GREEN } else { Color::YELLOW };
            println!("{}", terminal::paint(&evaluation.feedback, color, use_color));
            println!("Score: {:.2}", evaluation.score);
        }
    }

    Ok(())
}
