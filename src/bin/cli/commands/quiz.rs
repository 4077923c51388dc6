use anyhow::Result;

use phrasenav_lib::review::QuizResult;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, choices: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let result = app.quiz.generate(&app.store, choices, &mut rand::thread_rng());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Plain => match result {
            QuizResult::Error { error } => println!("{}", error),
            QuizResult::Question(question) => {
                println!("{}", terminal::paint(&question.question, Color::BOLD, use_color));
                println!();
                for (i, choice) in question.choices.iter().enumerate() {
                    let label = (b'A' + (i % 26) as u8) as char;
                    println!("  {}) {}", label, choice);
                }
                match question.correct_choice() {
                    Some(_) => {
                        let label = (b'A' + (question.correct_index as usize % 26) as u8) as char;
                        println!("\n{}", terminal::paint(&format!("Answer: {}", label), Color::DIM, use_color));
                    }
                    None => println!(
                        "\n{}",
                        terminal::paint("No stored meaning for this phrase, not scorable.", Color::YELLOW, use_color)
                    ),
                }
            }
        },
    }

    Ok(())
}
