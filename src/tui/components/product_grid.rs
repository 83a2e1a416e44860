//! # Product Grid Component
//!
//! The catalog browser: one row per product with a selection marker, plus a
//! detail footer describing the highlighted product (the hover overlay of a
//! pointer-driven UI, reinterpreted for the keyboard).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ProductGridState` lives in `TuiState`
//! - `ProductGrid` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::catalog::Product;
use crate::core::selection::SelectionSet;

/// Persistent cursor state for the grid.
pub struct ProductGridState {
    pub cursor: usize,
    pub list_state: ListState,
}

impl Default for ProductGridState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductGridState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.list_state.select(None);
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    /// Keep the cursor inside the current row count (the visible list shrinks
    /// when the filter changes).
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Transient render wrapper for the product grid.
pub struct ProductGrid<'a> {
    pub state: &'a mut ProductGridState,
    pub products: &'a [Product],
    pub selection: &'a SelectionSet,
    pub title: String,
    pub empty_text: String,
    pub error: Option<&'a str>,
    pub focused: bool,
}

impl ProductGrid<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title.clone())
            .title_style(border_style)
            .title_bottom(if self.focused {
                Line::from(" Space select  Ctrl+K category ").centered()
            } else {
                Line::default()
            })
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Fetch failures show inline; previously loaded rows stay visible below.
        let (error_area, body_area) = if self.error.is_some() {
            let [e, b] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
            (Some(e), b)
        } else {
            (None, inner)
        };
        if let (Some(error_area), Some(error)) = (error_area, self.error) {
            let line = Paragraph::new(format!("! {error}"))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::DIM));
            frame.render_widget(line, error_area);
        }

        if self.products.is_empty() {
            let empty = Paragraph::new(self.empty_text.clone())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, body_area);
            return;
        }

        self.state.clamp(self.products.len());

        let [list_area, detail_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(body_area);

        let items: Vec<ListItem> = self
            .products
            .iter()
            .enumerate()
            .map(|(i, product)| {
                let selected = self.selection.contains(product.id);
                let marker = if selected { "* " } else { "  " };

                let style = if self.focused && i == self.state.cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if selected {
                    Style::default().fg(Color::Magenta)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let brand_style = if self.focused && i == self.state.cursor {
                    style
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(product.name.clone(), style),
                    Span::styled(format!("  {}", product.brand), brand_style),
                ]))
            })
            .collect();

        self.state.list_state.select(Some(self.state.cursor));
        frame.render_stateful_widget(List::new(items), list_area, &mut self.state.list_state);

        // Detail footer: the highlighted product's description and image URL
        if let Some(product) = self.products.get(self.state.cursor) {
            let width = detail_area.width.max(1) as usize;
            let wrapped = textwrap::wrap(&product.description, width);
            let mut lines: Vec<Line> = wrapped
                .iter()
                .take((detail_area.height.saturating_sub(1)) as usize)
                .map(|l| Line::from(l.to_string()))
                .collect();
            lines.push(Line::from(Span::styled(
                product.image.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            )));
            let detail = Paragraph::new(lines)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(detail, detail_area);
        }
    }
}
