//! # TitleBar Component
//!
//! Top status line: application name, model, selection count, and the
//! current status message. Stateless — all fields are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    pub model_name: String,
    pub status_message: String,
    pub selection_count: usize,
}

/// Builds the title text from the props.
fn format_title(model_name: &str, status_message: &str, selection_count: usize) -> String {
    let mut title = format!("Lumi (model: {model_name})");
    if selection_count > 0 {
        title.push_str(&format!(" | {selection_count} selected"));
    }
    if !status_message.is_empty() {
        title.push_str(&format!(" | {status_message}"));
    }
    title
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = format_title(&self.model_name, &self.status_message, self.selection_count);
        frame.render_widget(Span::raw(text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_title_default() {
        assert_eq!(format_title("gpt-4o", "", 0), "Lumi (model: gpt-4o)");
    }

    #[test]
    fn test_format_title_with_status() {
        assert_eq!(
            format_title("gpt-4o", "Thinking...", 0),
            "Lumi (model: gpt-4o) | Thinking..."
        );
    }

    #[test]
    fn test_format_title_with_selection_and_status() {
        assert_eq!(
            format_title("gpt-4o", "Ready", 3),
            "Lumi (model: gpt-4o) | 3 selected | Ready"
        );
    }
}
