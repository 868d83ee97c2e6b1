//! Result presentation: tidy the model's plain text and shape it into
//! the panel the page renders.
//!
//! ## Why tidy at all?
//!
//! Even well-prompted models return text with incidental artefacts —
//! Windows line endings, trailing spaces, runs of blank lines. A few
//! cheap, deterministic string rules fix those without touching
//! content, and keeping them here (rather than in the prompt) keeps
//! the prompt focused on what to say, not how to format it.
//!
//! The panel itself is a plain view model: the template layer decides
//! markup, this module decides *what* is shown — mode-specific title,
//! accent, and the response split into visually separated lines.

use crate::session::Mode;
use once_cell::sync::Lazy;
use regex::Regex;

/// Accent colour of the result panel, keyed by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// Warm amber for explanations.
    Amber,
    /// Blue for question lists.
    Blue,
}

impl Accent {
    /// CSS class carried into the template.
    pub fn css_class(self) -> &'static str {
        match self {
            Accent::Amber => "panel-amber",
            Accent::Blue => "panel-blue",
        }
    }
}

/// Everything the template needs to render the result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub title: &'static str,
    pub accent: Accent,
    /// Response text split on newlines; each entry renders as its own
    /// visually separated line.
    pub lines: Vec<String>,
}

/// Build the panel for a successful result under the given mode.
///
/// Callers must not invoke this before the first success — the page
/// renders no panel at all while `last_result` is `None`.
pub fn panel(mode: Mode, result: &str) -> ResultPanel {
    let (title, accent) = match mode {
        Mode::ExplainSimple => ("Easy Explanation", Accent::Amber),
        Mode::TopQuestions => ("Top 10 Questions", Accent::Blue),
    };
    ResultPanel {
        title,
        accent,
        lines: tidy_response(result)
            .split('\n')
            .map(str::to_owned)
            .collect(),
    }
}

static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Deterministic cleanup of the raw model text.
///
/// Rules, in order: CRLF → LF, trailing whitespace stripped per line,
/// runs of three or more newlines collapsed to a blank line, outer
/// whitespace trimmed.
pub fn tidy_response(raw: &str) -> String {
    let unix = raw.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = unix
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    RE_BLANK_RUNS
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_panel_is_amber_and_titled() {
        let p = panel(Mode::ExplainSimple, "It's like a ball rolling.");
        assert_eq!(p.title, "Easy Explanation");
        assert_eq!(p.accent, Accent::Amber);
    }

    #[test]
    fn questions_panel_is_blue_and_titled() {
        let p = panel(Mode::TopQuestions, "1. Why?\n2. How?");
        assert_eq!(p.title, "Top 10 Questions");
        assert_eq!(p.accent.css_class(), "panel-blue");
    }

    #[test]
    fn newlines_become_separate_lines() {
        let p = panel(Mode::ExplainSimple, "a\nb");
        assert_eq!(p.lines, vec!["a", "b"]);
    }

    #[test]
    fn tidy_normalises_crlf() {
        assert_eq!(tidy_response("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn tidy_strips_trailing_spaces() {
        assert_eq!(tidy_response("line   \nnext\t"), "line\nnext");
    }

    #[test]
    fn tidy_collapses_blank_runs() {
        assert_eq!(tidy_response("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn tidy_trims_outer_whitespace() {
        assert_eq!(tidy_response("\n\n  hello  \n\n"), "hello");
    }
}
