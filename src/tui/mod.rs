//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. Network
//! work never happens on the UI thread: the reducer returns an `Effect`, the
//! loop spawns it on a tokio task, and the task reports back through an
//! `std::sync::mpsc` channel of actions drained every iteration.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a completion in flight): draws every ~80ms so the
//!   spinner stays smooth.
//! - **Idle**: sleeps up to 250ms in the event poll and only redraws on
//!   events or background actions.

pub mod component;
pub mod components;
pub mod event;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::catalog::{CatalogClient, CatalogError};
use crate::completion::{CompletionProvider, CompletionRequest, OpenAiProvider};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{CategoryPickerEvent, CategoryPickerState, ChatPanelState, InputBox, InputEvent, ProductGridState, SelectionPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Grid,
    Selection,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Input => Focus::Grid,
            Focus::Grid => Focus::Selection,
            Focus::Selection => Focus::Input,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub focus: Focus,
    pub input_box: InputBox,
    pub grid: ProductGridState,
    pub selection_panel: SelectionPanelState,
    pub chat: ChatPanelState,
    /// Category picker overlay (None = hidden).
    pub category_picker: Option<CategoryPickerState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Grid, // Start browsing; typing switches to Input
            input_box: InputBox::new(),
            grid: ProductGridState::new(),
            selection_panel: SelectionPanelState::new(),
            chat: ChatPanelState::new(),
            category_picker: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse capture, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build a provider from the resolved config's credentials.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    let api_key = config
        .api_key
        .clone()
        .expect("API key must be set (endpoint.api_key in ~/.lumi/config.toml or OPENAI_API_KEY env var)");
    Arc::new(OpenAiProvider::new(
        api_key,
        Some(config.endpoint_base_url.clone()),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let catalog_client = config
        .catalog_url
        .clone()
        .map(|url| Arc::new(CatalogClient::new(url)));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Initial catalog fetch
    match &catalog_client {
        Some(client) => spawn_catalog_load(client.clone(), tx.clone()),
        None => {
            app.catalog_error = Some(
                "no catalog URL configured — set catalog.url in ~/.lumi/config.toml".to_string(),
            );
        }
    }

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits
            if matches!(tui_event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Ctrl+K opens the category picker
            if matches!(tui_event, TuiEvent::OpenCategoryPicker) {
                tui.category_picker = Some(CategoryPickerState::new(app.categories()));
                continue;
            }

            // Ctrl+G requests a routine over the current selection
            if matches!(tui_event, TuiEvent::GenerateRoutine) {
                let effect = update(&mut app, Action::GenerateRoutine);
                run_effect(effect, &app, &catalog_client, &tx, &mut should_quit);
                continue;
            }

            // Ctrl+L re-fetches the catalog
            if matches!(tui_event, TuiEvent::ReloadCatalog) {
                let effect = update(&mut app, Action::ReloadCatalog);
                run_effect(effect, &app, &catalog_client, &tx, &mut should_quit);
                continue;
            }

            // When the category picker is open, it owns the keyboard
            if let Some(ref mut picker) = tui.category_picker {
                if let Some(picker_event) = picker.handle_event(&tui_event) {
                    match picker_event {
                        CategoryPickerEvent::Select(category) => {
                            update(&mut app, Action::SelectCategory(category));
                            tui.grid.reset();
                            tui.category_picker = None;
                        }
                        CategoryPickerEvent::Dismiss => {
                            tui.category_picker = None;
                        }
                    }
                }
                continue;
            }

            // Transcript scrolling works regardless of focus
            if matches!(
                tui_event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.chat.handle_event(&tui_event);
                continue;
            }

            if matches!(tui_event, TuiEvent::FocusNext) {
                tui.focus = tui.focus.next();
                continue;
            }

            // Focus-local dispatch
            match tui.focus {
                Focus::Input => {
                    if matches!(tui_event, TuiEvent::Escape) {
                        tui.focus = Focus::Grid;
                        continue;
                    }
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&tui_event)
                    {
                        let effect = update(&mut app, Action::SubmitChat(text));
                        run_effect(effect, &app, &catalog_client, &tx, &mut should_quit);
                    }
                }
                Focus::Grid => {
                    let visible = app.visible_products();
                    match &tui_event {
                        TuiEvent::CursorUp => tui.grid.move_up(),
                        TuiEvent::CursorDown => tui.grid.move_down(visible.len()),
                        // Space or Enter toggles the highlighted product
                        TuiEvent::InputChar(' ') | TuiEvent::Submit => {
                            if let Some(product) = visible.get(tui.grid.cursor) {
                                update(&mut app, Action::ToggleProduct(product.clone()));
                            }
                        }
                        TuiEvent::Escape => {}
                        // Typing switches back to the input box and forwards the key
                        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                            tui.focus = Focus::Input;
                            tui.input_box.handle_event(&tui_event);
                        }
                        _ => {}
                    }
                }
                Focus::Selection => {
                    match &tui_event {
                        TuiEvent::CursorUp => tui.selection_panel.move_up(),
                        TuiEvent::CursorDown => tui.selection_panel.move_down(app.selection.len()),
                        // Delete (or Enter) removes the highlighted entry
                        TuiEvent::Delete | TuiEvent::Backspace | TuiEvent::Submit => {
                            let id = app
                                .selection
                                .items()
                                .get(tui.selection_panel.cursor)
                                .map(|p| p.id);
                            if let Some(id) = id {
                                update(&mut app, Action::RemoveSelected(id));
                                tui.selection_panel.clamp(app.selection.len());
                            }
                        }
                        TuiEvent::Escape => {}
                        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                            tui.focus = Focus::Input;
                            tui.input_box.handle_event(&tui_event);
                        }
                        _ => {}
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (catalog loads, completion replies)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            run_effect(effect, &app, &catalog_client, &tx, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Executes the effect a reducer call returned.
fn run_effect(
    effect: Effect,
    app: &App,
    catalog_client: &Option<Arc<CatalogClient>>,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::SpawnCompletion => spawn_completion(app, tx.clone()),
        Effect::LoadCatalog => match catalog_client {
            Some(client) => spawn_catalog_load(client.clone(), tx.clone()),
            None => {
                let _ = tx.send(Action::CatalogLoaded(Err(CatalogError::Config(
                    "no catalog URL configured".to_string(),
                ))));
            }
        },
        Effect::Quit => *should_quit = true,
        Effect::None => {}
    }
}

fn spawn_completion(app: &App, tx: mpsc::Sender<Action>) {
    info!("Spawning completion request");

    // Clone what we need for the async task
    let provider = app.provider.clone();
    let conversation = app.conversation.clone();
    let model = app.model_name.clone();
    let max_tokens = app.max_reply_tokens;

    tokio::spawn(async move {
        let request = CompletionRequest {
            conversation: &conversation,
            model: &model,
            max_tokens,
        };
        let result = provider.complete(request).await;
        if tx.send(Action::CompletionFinished(result)).is_err() {
            warn!("Failed to send completion result: receiver dropped");
        }
    });
}

fn spawn_catalog_load(client: Arc<CatalogClient>, tx: mpsc::Sender<Action>) {
    info!("Spawning catalog fetch");
    tokio::spawn(async move {
        let result = client.fetch().await;
        if tx.send(Action::CatalogLoaded(result)).is_err() {
            warn!("Failed to send catalog result: receiver dropped");
        }
    });
}
