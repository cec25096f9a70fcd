//! Configuration module for banker
//!
//! - Path resolution (env override or platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BankerPaths;
pub use settings::{PlotSettings, Settings};
