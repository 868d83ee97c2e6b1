//! Page rendering: the askama template and its view model.
//!
//! [`PageTemplate`] is a flat projection of one [`Session`] — widget
//! selection states precomputed as booleans, the notice and panel
//! reduced to strings and CSS classes — so the template stays free of
//! logic beyond loops and conditionals. Askama escapes everything by
//! default; model output is never trusted as markup.

use crate::pipeline::collect;
use crate::pipeline::present::{self, ResultPanel};
use crate::session::{InputSource, Mode, Notice, Session};
use askama::Template;

/// A notice banner, reduced to a CSS class and its message.
pub struct NoticeView {
    pub css_class: &'static str,
    pub message: String,
}

impl NoticeView {
    fn from(notice: &Notice) -> Self {
        match notice {
            Notice::Info(m) => NoticeView {
                css_class: "notice-info",
                message: m.clone(),
            },
            Notice::Warning(m) => NoticeView {
                css_class: "notice-warning",
                message: m.clone(),
            },
            Notice::Error(m) => NoticeView {
                css_class: "notice-error",
                message: m.clone(),
            },
        }
    }
}

/// The result panel, reduced to strings the template can loop over.
pub struct PanelView {
    pub title: &'static str,
    pub accent_class: &'static str,
    pub lines: Vec<String>,
}

impl PanelView {
    fn from(panel: ResultPanel) -> Self {
        PanelView {
            title: panel.title,
            accent_class: panel.accent.css_class(),
            lines: panel.lines,
        }
    }
}

/// The whole single page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct PageTemplate {
    pub mode_explain: bool,
    pub mode_questions: bool,
    pub source_paste: bool,
    pub source_pdf: bool,
    pub input_text: String,
    pub char_count: usize,
    pub max_chars: usize,
    pub submit_label: &'static str,
    pub notice: Option<NoticeView>,
    pub panel: Option<PanelView>,
}

impl PageTemplate {
    /// Project a session onto the template.
    pub fn for_session(session: &Session) -> Self {
        PageTemplate {
            mode_explain: session.mode == Mode::ExplainSimple,
            mode_questions: session.mode == Mode::TopQuestions,
            source_paste: session.input_source == InputSource::PastedText,
            source_pdf: session.input_source == InputSource::UploadedPdf,
            input_text: session.input_text.clone(),
            char_count: collect::char_count(&session.input_text),
            max_chars: session.max_input_chars(),
            submit_label: match session.mode {
                Mode::ExplainSimple => "✨ Explain Simply",
                Mode::TopQuestions => "❓ Top 10 Questions",
            },
            notice: session.notice.as_ref().map(NoticeView::from),
            panel: session
                .last_result
                .as_deref()
                .map(|r| PanelView::from(present::panel(session.mode, r))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{update, Action};

    fn rendered(session: &Session) -> String {
        PageTemplate::for_session(session).render().unwrap()
    }

    #[test]
    fn fresh_session_renders_no_panel() {
        let s = Session::new(1000);
        let html = rendered(&s);
        assert!(html.contains("Explain Like I'm 5"));
        assert!(!html.contains("<section class=\"result-panel"));
    }

    #[test]
    fn result_lines_render_separately() {
        let mut s = Session::new(1000);
        s.last_result = Some("a\nb".into());
        let html = rendered(&s);
        assert!(html.contains("<p class=\"result-line\">a</p>"));
        assert!(html.contains("<p class=\"result-line\">b</p>"));
    }

    #[test]
    fn explain_mode_panel_is_titled_and_amber() {
        let mut s = Session::new(1000);
        s.last_result = Some("It's like a ball rolling.".into());
        let html = rendered(&s);
        assert!(html.contains("Easy Explanation"));
        assert!(html.contains("class=\"result-panel panel-amber\""));
        assert!(html.contains("ball rolling."));
    }

    #[test]
    fn questions_mode_panel_is_blue() {
        let mut s = Session::new(1000);
        update(&mut s, Action::ModeSelected(Mode::TopQuestions));
        s.last_result = Some("1. Why?".into());
        let html = rendered(&s);
        assert!(html.contains("Top 10 Questions"));
        assert!(html.contains("class=\"result-panel panel-blue\""));
    }

    #[test]
    fn model_output_is_escaped() {
        let mut s = Session::new(1000);
        s.last_result = Some("<script>alert(1)</script>".into());
        let html = rendered(&s);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn input_text_round_trips_into_the_textarea() {
        let mut s = Session::new(1000);
        update(&mut s, Action::InputEdited("Newton & his laws".into()));
        let html = rendered(&s);
        assert!(html.contains("Newton &amp; his laws"));
        assert!(html.contains("1000 characters"));
    }

    #[test]
    fn warning_notice_renders_with_its_class() {
        let mut s = Session::new(1000);
        update(&mut s, Action::Submitted);
        let html = rendered(&s);
        assert!(html.contains("class=\"notice notice-warning\""));
        assert!(html.contains("Please provide some text"));
    }

    #[test]
    fn pdf_source_shows_the_upload_form() {
        let mut s = Session::new(1000);
        update(&mut s, Action::SourceSelected(InputSource::UploadedPdf));
        let html = rendered(&s);
        assert!(html.contains("action=\"/upload\""));
        assert!(!html.contains("<textarea"));
    }
}
