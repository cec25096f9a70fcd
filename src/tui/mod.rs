//! Interactive plot viewer
//!
//! Full-screen ratatui view that keeps one panel alive and repaints it on
//! every frame, so terminal resizes and granularity changes are picked up
//! immediately.

pub mod app;
pub mod event;
pub mod terminal;

pub use app::ViewerApp;
pub use terminal::run_viewer;
