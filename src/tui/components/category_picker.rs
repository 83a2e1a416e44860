//! # Category Picker Component
//!
//! Overlay for switching the active category filter. Opened with Ctrl+K.
//! The first entry clears the filter (full catalog).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CategoryPickerState` lives in `TuiState` (None = hidden)
//! - `CategoryPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::event::TuiEvent;

/// Persistent state for the category picker overlay.
pub struct CategoryPickerState {
    /// `None` = "All categories", `Some(c)` = a concrete category.
    pub options: Vec<Option<String>>,
    pub selected: usize,
    pub list_state: ListState,
}

impl CategoryPickerState {
    pub fn new(categories: Vec<String>) -> Self {
        let mut options = vec![None];
        options.extend(categories.into_iter().map(Some));
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            options,
            selected: 0,
            list_state,
        }
    }

    /// Handle a key event, returning a CategoryPickerEvent if the overlay
    /// should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<CategoryPickerEvent> {
        match event {
            TuiEvent::Escape => Some(CategoryPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.options.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => self
                .options
                .get(self.selected)
                .map(|option| CategoryPickerEvent::Select(option.clone())),
            _ => None,
        }
    }
}

/// Events emitted by the category picker.
pub enum CategoryPickerEvent {
    Select(Option<String>),
    Dismiss,
}

/// Transient render wrapper for the category picker overlay.
pub struct CategoryPicker<'a> {
    state: &'a mut CategoryPickerState,
    active_category: Option<&'a str>,
}

impl<'a> CategoryPicker<'a> {
    pub fn new(state: &'a mut CategoryPickerState, active_category: Option<&'a str>) -> Self {
        Self {
            state,
            active_category,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Categories ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.options.len() == 1 {
            let empty = Paragraph::new("No categories yet.\nLoad the catalog first (Ctrl+L).")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let label = match option {
                    Some(category) => category.as_str(),
                    None => "All categories",
                };
                let is_active = option.as_deref() == self.active_category;
                let active_marker = if is_active { " *" } else { "" };

                let name_width = inner_width.saturating_sub(active_marker.len());
                let name = truncate_str(label, name_width);

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let mut spans = vec![Span::styled(name, style)];
                if !active_marker.is_empty() {
                    spans.push(Span::styled(active_marker, style));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.len() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        format!("{}...", &s[..max_width - 3])
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
