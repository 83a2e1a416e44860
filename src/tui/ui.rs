use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    CategoryPicker, ChatPanel, ProductGrid, SelectionPanel, TitleBar,
};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};

    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    // Title bar
    let mut title_bar = TitleBar {
        model_name: app.model_name.clone(),
        status_message: app.status_message.clone(),
        selection_count: app.selection.len(),
    };
    title_bar.render(frame, title_area);

    // Main area: catalog column on the left, transcript on the right
    let [left_area, chat_area] =
        Layout::horizontal([Percentage(42), Percentage(58)]).areas(main_area);
    let [grid_area, selection_area] =
        Layout::vertical([Percentage(62), Percentage(38)]).areas(left_area);

    let visible = app.visible_products();
    let title = match &app.active_category {
        Some(category) => format!(" Products · {category} "),
        None => String::from(" Products "),
    };
    let empty_text = if app.catalog.is_empty() {
        match &app.catalog_error {
            Some(_) => String::from("Catalog unavailable.\nCtrl+L retries."),
            None => String::from("Loading catalog..."),
        }
    } else {
        String::from("No products in this category.\nCtrl+K picks another.")
    };
    let mut grid = ProductGrid {
        state: &mut tui.grid,
        products: &visible,
        selection: &app.selection,
        title,
        empty_text,
        error: app.catalog_error.as_deref(),
        focused: tui.focus == Focus::Grid && tui.category_picker.is_none(),
    };
    grid.render(frame, grid_area);

    let mut selection_panel = SelectionPanel {
        state: &mut tui.selection_panel,
        selection: &app.selection,
        focused: tui.focus == Focus::Selection && tui.category_picker.is_none(),
    };
    selection_panel.render(frame, selection_area);

    let mut chat_panel = ChatPanel {
        state: &mut tui.chat,
        entries: &app.transcript,
        is_loading: app.is_loading,
        spinner_frame,
    };
    chat_panel.render(frame, chat_area);

    // Input box
    tui.input_box.dimmed = tui.focus != Focus::Input || tui.category_picker.is_some();
    tui.input_box.render(frame, input_area);

    // Category picker overlay on top of everything
    if let Some(ref mut picker_state) = tui.category_picker {
        let mut picker = CategoryPicker::new(picker_state, app.active_category.as_deref());
        picker.render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Role;
    use crate::core::state::TranscriptEntry;
    use crate::test_support::{sample_catalog, test_app};
    use crate::tui::components::CategoryPickerState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;

    /// Flattens the rendered buffer into a newline-joined string.
    fn terminal_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                match buffer.cell(Position::new(x, y)) {
                    Some(cell) => text.push_str(cell.symbol()),
                    None => text.push(' '),
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_draw_ui_empty_app() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = test_app();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let text = terminal_text(&terminal);
        assert!(text.contains("Lumi (model: test-model)"));
        assert!(text.contains("Nothing selected yet."));
    }

    #[test]
    fn test_draw_ui_renders_catalog_and_transcript() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.catalog = sample_catalog();
        app.selection.toggle(app.catalog[0].clone());
        app.transcript.push(TranscriptEntry::Message {
            role: Role::User,
            content: "What order do I apply these?".to_string(),
        });
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let text = terminal_text(&terminal);
        assert!(text.contains("Rose Cleanser"));
        assert!(text.contains("What order do I apply these?"));
        assert!(text.contains("1 selected"));
    }

    #[test]
    fn test_draw_ui_category_filter_hides_other_products() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.catalog = sample_catalog();
        app.active_category = Some("skincare".to_string());
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let text = terminal_text(&terminal);
        assert!(text.contains("Rose Cleanser")); // skincare
        assert!(!text.contains("Velvet Lipstick")); // makeup, filtered out
    }

    #[test]
    fn test_draw_ui_with_picker_overlay() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.catalog = sample_catalog();
        let mut tui = TuiState::new();
        tui.category_picker = Some(CategoryPickerState::new(app.categories()));
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let text = terminal_text(&terminal);
        assert!(text.contains("All categories"));
        assert!(text.contains("skincare"));
    }

    #[test]
    fn test_draw_ui_loading_spinner() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.is_loading = true;
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 3)).unwrap();

        let text = terminal_text(&terminal);
        assert!(text.contains("Working on a reply..."));
    }
}
