//! # InputBox Component
//!
//! Single-line text input for the chat form. Cursor-addressable editing;
//! emits `Submit` on Enter with the drained buffer.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the input box.
pub enum InputEvent {
    Submit(String),
    Changed,
}

pub struct InputBox {
    buffer: String,
    /// Cursor position in chars (not bytes).
    cursor: usize,
    /// Dimmed when another panel has focus.
    pub dimmed: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            dimmed: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.buffer
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn insert(&mut self, c: char) {
        let index = self.byte_index();
        self.buffer.insert(index, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.buffer.remove(index);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let index = self.byte_index();
            self.buffer.remove(index);
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(*c);
                Some(InputEvent::Changed)
            }
            TuiEvent::Paste(data) => {
                // Single-line input: pasted newlines become spaces
                for c in data.chars() {
                    self.insert(if c == '\n' || c == '\r' { ' ' } else { c });
                }
                Some(InputEvent::Changed)
            }
            TuiEvent::Backspace => {
                self.backspace();
                Some(InputEvent::Changed)
            }
            TuiEvent::Delete => {
                self.delete();
                Some(InputEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
                None
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        let prefix: String = self.buffer.chars().take(self.cursor).collect();
        let prefix_width = prefix.width();

        // Keep the cursor visible when the buffer overflows the box
        let skip_width = prefix_width.saturating_sub(inner_width.saturating_sub(1));
        let visible: String = if skip_width > 0 {
            let mut skipped = 0;
            self.buffer
                .chars()
                .skip_while(|c| {
                    if skipped < skip_width {
                        skipped += c.to_string().width();
                        true
                    } else {
                        false
                    }
                })
                .collect()
        } else {
            self.buffer.clone()
        };

        let input = Paragraph::new(visible)
            .block(
                Block::bordered()
                    .title(" Message ")
                    .border_style(border_style)
                    .title_style(border_style),
            )
            .style(Style::default().add_modifier(if self.dimmed {
                Modifier::DIM
            } else {
                Modifier::empty()
            }));
        frame.render_widget(input, area);

        if !self.dimmed {
            let cursor_x = area.x + 1 + (prefix_width - skip_width) as u16;
            frame.set_cursor_position(Position::new(
                cursor_x.min(area.x + area.width.saturating_sub(2)),
                area.y + 1,
            ));
        }
    }
}
