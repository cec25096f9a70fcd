//! Plot and backend CLI commands

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::config::{PlotSettings, Settings};
use crate::error::{BankerError, BankerResult};
use crate::plot::{self, Capabilities, PlotBackend, PlotHost, PlotOptions};
use crate::services::balance::{BalanceController, Granularity};
use crate::services::import::parse_date;
use crate::services::{AccountService, TransactionService};
use crate::storage::Storage;

/// Default SVG canvas in pixels
const SVG_SIZE: (u16, u16) = (800, 480);

#[derive(Args, Debug, Default)]
pub struct PlotArgs {
    /// Account name or ID (default: all accounts)
    #[arg(short, long)]
    pub account: Option<String>,
    /// Plotting backend (default: first available in settings order)
    #[arg(short, long, value_enum)]
    pub backend: Option<PlotBackend>,
    /// Bucket size
    #[arg(short, long, value_enum)]
    pub granularity: Option<Granularity>,
    /// Last date to plot (default: last transaction)
    #[arg(long)]
    pub until: Option<String>,
    /// Width in columns (pixels for svg)
    #[arg(long)]
    pub width: Option<u16>,
    /// Height in rows (pixels for svg)
    #[arg(long)]
    pub height: Option<u16>,
    /// Write the plot to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Open the full-screen viewer
    #[arg(short, long, conflicts_with = "output")]
    pub interactive: bool,
}

/// List every backend and whether it can be used
pub fn handle_backends_command(settings: &Settings) -> BankerResult<()> {
    let caps = Capabilities::compiled();
    let plot = &settings.plot;

    for (backend, probe) in plot::probe_all(&caps) {
        let status = if plot.disabled_backends.contains(&backend) {
            "disabled in settings".to_string()
        } else {
            match probe {
                Ok(()) => "available".to_string(),
                Err(missing) => missing.to_string(),
            }
        };
        println!("{:<6} {}", backend.name(), status);
    }

    match plot::select_backend(None, plot, &caps) {
        Ok(backend) => println!("\nDefault: {}", backend),
        Err(e) => println!("\n{}", e),
    }
    Ok(())
}

/// Plot balance history with the selected backend
pub fn handle_plot_command(
    storage: &Storage,
    settings: &Settings,
    args: PlotArgs,
) -> BankerResult<()> {
    let caps = Capabilities::compiled();
    let backend = choose_backend(&args, &settings.plot, &caps)?;
    let granularity = args.granularity.unwrap_or(settings.plot.granularity);
    let until = args
        .until
        .as_deref()
        .map(|s| {
            parse_date(s.trim(), &settings.date_format)
                .ok_or_else(|| BankerError::Validation(format!("Invalid date: '{}'", s)))
        })
        .transpose()?;

    let controller = build_controller(storage, settings, args.account.as_deref())?;

    let (width, height) = match backend {
        PlotBackend::Svg => (
            args.width.unwrap_or(SVG_SIZE.0),
            args.height.unwrap_or(SVG_SIZE.1),
        ),
        _ => (
            args.width.unwrap_or(settings.plot.width),
            args.height.unwrap_or(settings.plot.height),
        ),
    };
    let host = PlotHost::new(controller.label(), width, height);

    let factory = backend.factory(&caps)?;
    let mut panel = factory.create_panel(&host, &controller);
    tracing::info!(%backend, ?granularity, "plotting balance history");

    if args.interactive {
        return run_interactive(controller, panel, granularity, until);
    }

    let series = controller.balance_history(granularity, until);
    panel.plot_balance(&series.totals, &PlotOptions::for_series(&series));

    match (panel.paint()?, args.output) {
        (None, _) => println!("No transactions to plot."),
        (Some(rendered), Some(path)) => {
            std::fs::write(&path, rendered)?;
            println!("Wrote {} plot to {}", backend, path.display());
        }
        (Some(rendered), None) => println!("{}", rendered),
    }

    Ok(())
}

/// Interactive plots need a terminal backend; without an explicit request the
/// settings order is filtered down to those.
fn choose_backend(
    args: &PlotArgs,
    settings: &PlotSettings,
    caps: &Capabilities,
) -> BankerResult<PlotBackend> {
    if !args.interactive {
        return plot::select_backend(args.backend, settings, caps);
    }

    if let Some(backend) = args.backend {
        if !backend.renders_to_terminal() {
            return Err(BankerError::Validation(format!(
                "The {} backend cannot be shown interactively",
                backend
            )));
        }
    }

    let terminal_only = PlotSettings {
        backend_order: settings
            .backend_order
            .iter()
            .copied()
            .filter(PlotBackend::renders_to_terminal)
            .collect(),
        ..settings.clone()
    };
    plot::select_backend(args.backend, &terminal_only, caps)
}

fn build_controller(
    storage: &Storage,
    settings: &Settings,
    account: Option<&str>,
) -> BankerResult<BalanceController> {
    let transactions = TransactionService::new(storage);

    match account {
        Some(identifier) => {
            let account = AccountService::new(storage).require(identifier)?;
            let list = transactions.list(Some(account.id))?;
            Ok(BalanceController::new(list, settings).with_label(account.name))
        }
        None => Ok(BalanceController::new(transactions.list(None)?, settings)),
    }
}

#[cfg(feature = "ratatui")]
fn run_interactive(
    controller: BalanceController,
    panel: Box<dyn plot::BalancePanel>,
    granularity: Granularity,
    until: Option<NaiveDate>,
) -> BankerResult<()> {
    crate::tui::run_viewer(controller, panel, granularity, until)
        .map_err(|e| BankerError::Tui(e.to_string()))
}

#[cfg(not(feature = "ratatui"))]
fn run_interactive(
    _controller: BalanceController,
    _panel: Box<dyn plot::BalancePanel>,
    _granularity: Granularity,
    _until: Option<NaiveDate>,
) -> BankerResult<()> {
    Err(crate::error::PlotLibraryUnavailable {
        library: plot::RATATUI.name,
        package: plot::RATATUI.package,
    }
    .into())
}
