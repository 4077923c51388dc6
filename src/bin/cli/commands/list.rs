use anyhow::Result;

use phrasenav_lib::lessons::DerivedLesson;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, raw: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    if raw {
        let records = app.catalog.raw(&app.store);
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
            OutputFormat::Plain => {
                let rows: Vec<(&str, &str, &str)> = records
                    .iter()
                    .map(|r| (r.phrase.as_str(), r.meaning.as_str(), r.date_added.as_str()))
                    .collect();
                print_table(&rows, use_color);
            }
        }
        return Ok(());
    }

    let lessons = app.catalog.list_phrases(&app.store);
    print_lessons(&lessons, format, use_color)
}

/// Print derived lessons as JSON or a phrase/definition table
pub fn print_lessons(lessons: &[DerivedLesson], format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(lessons)?);
        }
        OutputFormat::Plain => {
            let rows: Vec<(&str, &str, &str)> = lessons
                .iter()
                .map(|l| (l.phrase.as_str(), l.definition.as_str(), ""))
                .collect();
            print_table(&rows, use_color);
        }
    }
    Ok(())
}

fn print_table(rows: &[(&str, &str, &str)], use_color: bool) {
    if rows.is_empty() {
        println!("No phrases stored.");
        return;
    }

    let phrase_w = rows
        .iter()
        .map(|(p, _, _)| p.chars().count())
        .max()
        .unwrap_or(6)
        .clamp(6, 32);
    let meaning_w = 50;
    let with_date = rows.iter().any(|(_, _, d)| !d.is_empty());

    if with_date {
        println!("{:<phrase_w$} {:<meaning_w$} Added", "Phrase", "Meaning");
        println!(
            "{} {} {}",
            "\u{2500}".repeat(phrase_w),
            "\u{2500}".repeat(meaning_w),
            "\u{2500}".repeat(19)
        );
    } else {
        println!("{:<phrase_w$} Meaning", "Phrase");
        println!("{} {}", "\u{2500}".repeat(phrase_w), "\u{2500}".repeat(meaning_w));
    }

    for (phrase, meaning, date) in rows {
        let phrase = phrase_cell(phrase, phrase_w, use_color);
        let meaning = terminal::truncate(meaning, meaning_w);
        if with_date {
            println!("{} {:<meaning_w$} {}", phrase, meaning, date);
        } else {
            println!("{} {}", phrase, meaning);
        }
    }

    println!("\n{} phrases", rows.len());
}

/// Phrase column, padded before painting so escape codes don't count
/// toward the width
fn phrase_cell(phrase: &str, width: usize, use_color: bool) -> String {
    let padded = format!("{:<width$}", terminal::truncate(phrase, width));
    terminal::paint(&padded, terminal::Color::BOLD, use_color)
}
