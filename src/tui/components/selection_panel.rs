//! # Selection Panel Component
//!
//! The user's chosen products, in insertion order, with a remove cursor.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::selection::SelectionSet;

/// Persistent cursor state for the selection panel.
pub struct SelectionPanelState {
    pub cursor: usize,
    pub list_state: ListState,
}

impl Default for SelectionPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPanelState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Transient render wrapper for the selection panel.
pub struct SelectionPanel<'a> {
    pub state: &'a mut SelectionPanelState,
    pub selection: &'a SelectionSet,
    pub focused: bool,
}

impl SelectionPanel<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Selected ({}) ", self.selection.len()))
            .title_style(border_style)
            .title_bottom(if self.focused {
                Line::from(" Del remove ").centered()
            } else {
                Line::default()
            })
            .padding(Padding::horizontal(1));

        if self.selection.is_empty() {
            let empty = Paragraph::new("Nothing selected yet.\nSpace on a product adds it.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.state.clamp(self.selection.len());

        let items: Vec<ListItem> = self
            .selection
            .items()
            .iter()
            .enumerate()
            .map(|(i, product)| {
                let style = if self.focused && i == self.state.cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Magenta)
                };
                let brand_style = if self.focused && i == self.state.cursor {
                    style
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(product.name.clone(), style),
                    Span::styled(format!("  {}", product.brand), brand_style),
                ]))
            })
            .collect();

        self.state.list_state.select(Some(self.state.cursor));
        frame.render_stateful_widget(
            List::new(items).block(block),
            area,
            &mut self.state.list_state,
        );
    }
}
