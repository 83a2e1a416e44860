//! # Chat Panel Component
//!
//! Scrollable view of the conversation transcript.
//!
//! Messages render as bordered blocks (role in the title); notices render as
//! dimmed inline lines. While a request is in flight a spinner row sits at
//! the bottom. The panel sticks to the bottom until the user scrolls up.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::completion::Role;
use crate::core::state::TranscriptEntry;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Scroll state for the chat panel. Must be persisted in the parent TuiState.
pub struct ChatPanelState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Last rendered content height (for scroll clamping between frames).
    pub content_height: u16,
    /// Last known viewport height (for page scrolling).
    pub viewport_height: u16,
}

impl Default for ChatPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanelState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn scroll_by(&mut self, delta: i32) {
        let current = self.scroll_state.offset();
        let y = (current.y as i32 + delta).clamp(0, self.max_offset() as i32) as u16;
        self.scroll_state.set_offset(Position { x: current.x, y });
        // Scrolling back to the bottom re-enables stick-to-bottom
        self.stick_to_bottom = y >= self.max_offset();
    }
}

impl EventHandler for ChatPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-(self.viewport_height.max(1) as i32)),
            TuiEvent::ScrollPageDown => self.scroll_by(self.viewport_height.max(1) as i32),
            _ => return None,
        }
        Some(())
    }
}

/// A transcript entry measured and prepared for rendering.
struct RenderedEntry<'a> {
    paragraph: Paragraph<'a>,
    height: u16,
}

impl<'a> RenderedEntry<'a> {
    fn new(entry: &'a TranscriptEntry, content_width: u16) -> Self {
        match entry {
            TranscriptEntry::Message { role, content } => {
                let (title, style) = match role {
                    Role::User => ("you", Style::default().fg(Color::Cyan)),
                    Role::Assistant => ("advisor", Style::default().fg(Color::Green)),
                    Role::System => ("system", Style::default().fg(Color::Yellow)),
                };
                let border_style = style.add_modifier(Modifier::DIM);
                let paragraph = Paragraph::new(content.trim())
                    .block(
                        Block::bordered()
                            .title(title)
                            .border_style(border_style)
                            .title_style(border_style),
                    )
                    .style(style)
                    .wrap(Wrap { trim: true });
                let inner_width = content_width.saturating_sub(2);
                let height = paragraph.line_count(inner_width) as u16;
                RenderedEntry { paragraph, height }
            }
            TranscriptEntry::Notice(text) => {
                let paragraph = Paragraph::new(text.as_str())
                    .style(
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )
                    .wrap(Wrap { trim: true });
                let height = paragraph.line_count(content_width) as u16;
                RenderedEntry { paragraph, height }
            }
        }
    }
}

/// Transient render wrapper for the chat panel.
pub struct ChatPanel<'a> {
    pub state: &'a mut ChatPanelState,
    pub entries: &'a [TranscriptEntry],
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl ChatPanel<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.entries.is_empty() && !self.is_loading {
            let hint = Paragraph::new(
                "Ask the advisor anything about your routine.\n\
                 Ctrl+G generates one from your selected products.",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
            frame.render_widget(hint, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // room for the scrollbar

        let mut rendered: Vec<RenderedEntry> = self
            .entries
            .iter()
            .map(|entry| RenderedEntry::new(entry, content_width))
            .collect();

        if self.is_loading {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let paragraph = Paragraph::new(format!("{spinner} Working on a reply...")).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            rendered.push(RenderedEntry {
                paragraph,
                height: 1,
            });
        }

        let total_height: u16 = rendered.iter().map(|r| r.height).sum();
        self.state.content_height = total_height;
        self.state.viewport_height = area.height;

        if self.state.stick_to_bottom {
            let y = total_height.saturating_sub(area.height);
            self.state.scroll_state.set_offset(Position { x: 0, y });
        } else {
            // Content may have shrunk since the last frame
            let current = self.state.scroll_state.offset();
            let max_y = total_height.saturating_sub(area.height);
            if current.y > max_y {
                self.state.scroll_state.set_offset(Position {
                    x: current.x,
                    y: max_y,
                });
            }
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for entry in &rendered {
            let rect = Rect::new(0, y_offset, content_width, entry.height);
            scroll_view.render_widget(entry.paragraph.clone(), rect);
            y_offset += entry.height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
