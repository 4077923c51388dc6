use phrasenav_lib::lessons::markup::strip_emphasis;
use phrasenav_lib::lessons::DerivedLesson;
use std::sync::OnceLock;

use regex::{Captures, Regex};

static MARKER_RE: OnceLock<Regex> = OnceLock::new();

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap `text` in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render lesson text for the terminal: `<<x>>` markers become bold, or
/// plain text without colors
pub fn render_lesson_text(text: &str, use_color: bool) -> String {
    if !use_color {
        return strip_emphasis(text);
    }
    let re = MARKER_RE.get_or_init(|| Regex::new(r"<<([^>]*)>>").expect("Invalid regex"));
    re.replace_all(text, |caps: &Captures| {
        format!("{}{}{}", Color::BOLD, &caps[1], Color::RESET)
    })
    .to_string()
}

/// Render a derived lesson as a labeled block
pub fn render_lesson(lesson: &DerivedLesson, use_color: bool) -> String {
    let mut lines = vec![paint(&lesson.phrase, Color::BOLD, use_color)];

    let definition = if lesson.definition.is_empty() {
        paint("(no definition)", Color::DIM, use_color)
    } else {
        lesson.definition.clone()
    };
    lines.push(format!("  {}", definition));

    for example in &lesson.examples {
        lines.push(format!("  {} {}", paint("\u{2022}", Color::CYAN, use_color), example));
    }

    lines.join("\n")
}

/// Truncate to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lesson_plain() {
        let lesson = DerivedLesson {
            phrase: "crash".to_string(),
            definition: String::new(),
            examples: vec!["I'm going to crash.".to_string()],
        };
        assert_eq!(
            render_lesson(&lesson, false),
            "crash\n  (no definition)\n  \u{2022} I'm going to crash."
        );
    }

    #[test]
    fn test_lesson_text_markers() {
        assert_eq!(render_lesson_text("Say <<crash>> now", false), "Say crash now");
        assert_eq!(
            render_lesson_text("Say <<crash>>", true),
            format!("Say {}crash{}", Color::BOLD, Color::RESET)
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long phrase", 10), "a very ...");
    }
}
