//! # Core Application Logic
//!
//! Configuration and wiring shared by every surface. It knows nothing
//! about any specific UI technology.
//!
//! ```text
//!                ┌──────────────────────────────┐
//!                │           CORE               │
//!                │                              │
//!                │  • config (settings)         │
//!                │  • provider wiring           │
//!                └──────────────┬───────────────┘
//!                               │
//!            ┌──────────────────┼──────────────────┐
//!            ▼                  ▼                  ▼
//!     ┌────────────┐     ┌────────────┐     ┌────────────┐
//!     │  location  │     │  geocode   │     │    TUI     │
//!     │  resolver  │     │  client    │     │  adapter   │
//!     └────────────┘     └────────────┘     └────────────┘
//! ```

pub mod config;
