//! banker - terminal personal finance with pluggable balance plotting
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: error types
//! - `models`: accounts, transactions, money and `TransactionList`
//! - `storage`: JSON file storage layer
//! - `services`: business logic, including the balance history controller
//! - `plot`: plotting backends behind the panel/factory traits
//! - `cli` / `display`: command handlers and terminal formatting
//! - `tui`: full-screen plot viewer (feature `ratatui`)
//!
//! # Example
//!
//! ```rust,ignore
//! use banker::plot::{select_backend, Capabilities, PlotHost, PlotOptions};
//! use banker::services::{BalanceController, Granularity};
//!
//! let caps = Capabilities::compiled();
//! let backend = select_backend(None, &settings.plot, &caps)?;
//! let controller = BalanceController::new(transactions, &settings);
//! let mut panel = backend
//!     .factory(&caps)?
//!     .create_panel(&PlotHost::new("Checking", 80, 20), &controller);
//!
//! let series = controller.balance_history(Granularity::Weekly, None);
//! panel.plot_balance(&series.totals, &PlotOptions::for_series(&series));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod plot;
pub mod services;
pub mod storage;

#[cfg(feature = "ratatui")]
pub mod tui;

pub use error::BankerError;
