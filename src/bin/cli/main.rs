mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use phrasenav_lib::review::DEFAULT_CHOICES;

#[derive(Parser)]
#[command(name = "phrasenav-cli", about = "Phrase tutor and memory bank CLI", version)]
struct Cli {
    /// Configuration file (default: <config dir>/phrasenav/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a specific memory bank file
    #[arg(long, global = true)]
    memory_file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Correct a sentence, learn the suggested phrase and store the lesson
    Submit {
        /// Sentence to correct (use "-" to read from stdin)
        sentence: Option<String>,
    },

    /// Run only the corrector on a piece of text
    Correct {
        /// Text to correct (use "-" to read from stdin)
        text: Option<String>,
    },

    /// Ask the tutor for a lesson on a phrase and store it
    Teach {
        /// Phrase to learn
        phrase: String,
        /// Sentence the phrase was used in
        #[arg(long, default_value = "")]
        context: String,
    },

    /// Add or update a phrase directly
    Add {
        /// Phrase text
        phrase: String,
        /// Meaning of the phrase
        #[arg(long, default_value = "")]
        meaning: String,
        /// Sentence the phrase came from
        #[arg(long)]
        context: Option<String>,
        /// Corrected sentence using the phrase
        #[arg(long)]
        corrected: Option<String>,
    },

    /// List stored phrases with derived definitions
    List {
        /// Print stored records as they are on disk
        #[arg(long)]
        raw: bool,
    },

    /// Search stored phrases
    Search {
        /// Search query (empty matches everything)
        query: String,
        /// Search stored fields instead of derived lessons
        #[arg(long)]
        raw: bool,
    },

    /// Show the lesson stored for one phrase
    Show {
        /// Phrase (case-insensitive)
        phrase: String,
    },

    /// Generate a multiple-choice quiz question
    Quiz {
        /// Number of choices
        #[arg(long, default_value_t = DEFAULT_CHOICES)]
        choices: usize,
    },

    /// Check a free-text answer against a stored meaning
    Evaluate {
        /// Phrase being answered
        phrase: String,
        /// The learner's answer
        answer: String,
    },

    /// Pick random phrases for review
    Sample {
        /// Number of phrases
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Show memory bank statistics
    Stats,

    /// Re-derive phrases and definitions for every stored record
    Normalize {
        /// Report changes without saving
        #[arg(long)]
        dry_run: bool,
    },
}

/// Read text from stdin when it is missing or "-"
fn resolve_text(text: Option<String>) -> String {
    match text.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            buf
        }
        Some(_) => text.unwrap_or_default(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let Some(command) = cli.command else {
        eprintln!("No command given. Run with --help for usage.");
        std::process::exit(1);
    };

    let mut app = app::App::new(cli.config.as_deref(), cli.memory_file)?;

    match command {
        Command::Submit { sentence } => {
            let sentence = resolve_text(sentence);
            commands::submit::run(&mut app, &sentence, &cli.format, use_color)?;
        }
        Command::Correct { text } => {
            let text = resolve_text(text);
            commands::correct::run(&app, &text, &cli.format, use_color)?;
        }
        Command::Teach { phrase, context } => {
            commands::teach::run(&mut app, &phrase, &context, &cli.format, use_color)?;
        }
        Command::Add { phrase, meaning, context, corrected } => {
            commands::add::run(
                &mut app,
                &phrase,
                &meaning,
                context,
                corrected,
                &cli.format,
                use_color,
            )?;
        }
        Command::List { raw } => {
            commands::list::run(&app, raw, &cli.format, use_color)?;
        }
        Command::Search { query, raw } => {
            commands::search::run(&app, &query, raw, &cli.format, use_color)?;
        }
        Command::Show { phrase } => {
            commands::show::run(&app, &phrase, &cli.format, use_color)?;
        }
        Command::Quiz { choices } => {
            commands::quiz::run(&app, choices, &cli.format, use_color)?;
        }
        Command::Evaluate { phrase, answer } => {
            commands::evaluate::run(&app, &phrase, &answer, &cli.format, use_color)?;
        }
        Command::Sample { count } => {
            commands::sample::run(&app, count, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Normalize { dry_run } => {
            commands::normalize::run(&mut app, dry_run, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
