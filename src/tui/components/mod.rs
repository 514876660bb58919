//! # TUI Components
//!
//! Stateless components receive all data as props (struct fields) and
//! just render: `TabBar`, `CurrentLocationScreen`. Stateful components
//! also own local state and emit high-level events through
//! [`crate::tui::component::EventHandler`]: `SearchScreen`.
//!
//! Each component file is self-contained: state, event types, rendering,
//! and its tests live together.

pub mod current_location;
pub mod search_screen;
pub mod tab_bar;

pub use current_location::CurrentLocationScreen;
pub use search_screen::{SearchEvent, SearchScreen};
pub use tab_bar::TabBar;
