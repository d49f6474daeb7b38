//! TUI module for sortviz.
//!
//! Holds the terminal front-end's application state and key handling, so
//! everything except terminal I/O can be tested without a terminal. The
//! drawing code lives in the `sort-tui` binary.

#[cfg(feature = "tui")]
pub mod sort_app;
