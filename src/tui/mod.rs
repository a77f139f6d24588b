//! Interactive terminal UI.
//!
//! - `runner`: entry point and event loop
//! - `event`: terminal event polling
//! - `message`: what the loop reacts to
//! - `state`: focus, cursors, overlays and the detail view
//! - `update`: key and message handling
//! - `render`: frame rendering
//! - `widgets`: reusable components

pub mod event;
pub mod message;
pub mod render;
pub mod runner;
pub mod state;
pub mod theme;
pub mod update;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
