//! Standardized lesson layout
//!
//! Every stored lesson is rewritten into a fixed set of labeled lines:
//!
//! ```text
//! What to improve: <note or "(none)">
//! Phrase to learn: <<phrase>>
//! Definition: <sentence>
//! Examples:
//! <example 1>
//! <example 2>
//! Notes: <optional>
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// Placeholder written when the tutor gave no improvement note
pub const NO_IMPROVEMENT_NOTE: &str = "(none)";

fn code_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("Invalid regex"))
}

fn inline_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]*)`").expect("Invalid regex"))
}

fn asterisk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*?").expect("Invalid regex"))
}

fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("Invalid regex"))
}

fn escaped_emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&lt;&lt;(.*?)&gt;&gt;").expect("Invalid regex"))
}

fn improve_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)(?i:what to improve)[ \t]*[:\-]?[ \t]*(.*?)(?:\n[ \t]*\n|\n(?i:phrase to learn|definition)[ \t]*[:\-]|\z)",
        )
        .expect("Invalid regex")
    })
}

fn notes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)(?im:^[ \t]*notes)[ \t]*[:\-][ \t]*(.+)").expect("Invalid regex"))
}

/// Strip Markdown the tutor was told not to produce and normalize blank lines
pub fn sanitize_lesson_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = code_fence_re().replace_all(text, "");
    let text = inline_code_re().replace_all(&text, "$1");
    let text = asterisk_re().replace_all(&text, "");
    let text = text.replace("__", "");
    let text = blank_lines_re().replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Render lesson text as HTML: escape markup, turn `<<x>>` into
/// `<strong>x</strong>` and newlines into `<br>`
pub fn to_html(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    let emphasized = escaped_emphasis_re().replace_all(&escaped, "<strong>$1</strong>");
    emphasized.replace('\n', "<br>")
}

/// The "What to improve" note of a raw lesson, if present
pub fn extract_what_to_improve(text: &str) -> Option<String> {
    let caps = improve_re().captures(text)?;
    let note = caps[1].trim();
    (!note.is_empty()).then(|| note.to_string())
}

/// The trailing "Notes" section of a raw lesson, if present
pub fn extract_notes(text: &str) -> Option<String> {
    let caps = notes_re().captures(text)?;
    let notes = caps[1].trim();
    (!notes.is_empty()).then(|| notes.to_string())
}

/// A lesson in the fixed labeled layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardLesson {
    pub what_to_improve: String,
    pub phrase: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub notes: Option<String>,
}

impl StandardLesson {
    /// Render as plain text, one label per line
    pub fn render(&self) -> String {
        // Labels open lines, so the note stays on one
        let note = self.what_to_improve.split_whitespace().collect::<Vec<_>>().join(" ");
        let what_to_improve = if note.is_empty() { NO_IMPROVEMENT_NOTE } else { note.as_str() };

        let mut lines = vec![
            format!("What to improve: {}", what_to_improve),
            format!("Phrase to learn: <<{}>>", self.phrase),
            format!("Definition: {}", self.definition),
            "Examples:".to_string(),
        ];
        lines.extend(self.examples.iter().cloned());
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            lines.push(format!("Notes: {}", notes.trim()));
        }
        lines.join("\n")
    }

    /// Render as HTML
    pub fn render_html(&self) -> String {
        to_html(&self.render())
    }
}
