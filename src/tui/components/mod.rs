//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, following the rest of the TUI layer:
//!
//! - **Stateless components** receive everything as props and just render:
//!   `TitleBar`.
//! - **Stateful components** keep persistent state in `TuiState` and are
//!   wrapped each frame by a transient struct borrowing that state plus
//!   props: `ProductGrid`, `SelectionPanel`, `ChatPanel`, `CategoryPicker`,
//!   `InputBox`.
//!
//! Each component file is self-contained: state types, event types, rendering
//! and tests all live together.

pub mod category_picker;
pub mod chat_panel;
pub mod input_box;
pub mod product_grid;
pub mod selection_panel;
pub mod title_bar;

pub use category_picker::{CategoryPicker, CategoryPickerEvent, CategoryPickerState};
pub use chat_panel::{ChatPanel, ChatPanelState};
pub use input_box::{InputBox, InputEvent};
pub use product_grid::{ProductGrid, ProductGridState};
pub use selection_panel::{SelectionPanel, SelectionPanelState};
pub use title_bar::TitleBar;
