//! Panel and factory traits shared by every plotting backend
//!
//! A `PanelFactory` builds a `BalancePanel` bound to a `PlotHost`. Panels
//! start `Empty`; each `plot_balance` call replaces whatever was plotted
//! before. Empty or malformed totals (NaN, infinities) leave the panel
//! `Empty`, which paints nothing.

use chrono::NaiveDate;

use crate::error::BankerResult;
use crate::models::Money;
use crate::services::balance::{BalanceController, BalanceSeries, Granularity};

use super::PlotBackend;

/// The region a panel draws into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotHost {
    pub title: String,
    /// Columns for terminal backends, pixels for vector output
    pub width: u16,
    /// Rows for terminal backends, pixels for vector output
    pub height: u16,
}

impl PlotHost {
    pub fn new(title: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }
}

/// Backend-specific hints passed alongside the totals
///
/// Backends use what they can draw and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotOptions {
    /// Date of the first bucket, for axis labels
    pub start: Option<NaiveDate>,
    pub granularity: Granularity,
    /// Overrides the host title
    pub title: Option<String>,
}

impl PlotOptions {
    pub fn for_series(series: &BalanceSeries) -> Self {
        Self {
            start: series.start,
            granularity: series.granularity,
            title: None,
        }
    }

    /// Label for bucket `index`: its start date when known, else the index
    pub fn bucket_label(&self, index: usize) -> String {
        match self.start {
            Some(start) => self
                .granularity
                .bucket_start(start, index)
                .format("%Y-%m-%d")
                .to_string(),
            None => index.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Nothing plotted yet; paints nothing
    Empty,
    /// Holds data; repaints it on every request
    Populated,
}

/// Builds panels for one backend
pub trait PanelFactory {
    fn backend(&self) -> PlotBackend;

    /// Create a new panel bound to `parent`
    fn create_panel(&self, parent: &PlotHost, controller: &BalanceController)
        -> Box<dyn BalancePanel>;
}

/// A drawable balance plot
pub trait BalancePanel {
    /// Replace the plotted data. Safe to call with no data.
    fn plot_balance(&mut self, totals: &[f64], options: &PlotOptions);

    fn state(&self) -> PanelState;

    /// Render the current data; `None` while `Empty`
    ///
    /// Failures from the plotting library are returned as
    /// `BankerError::Render` and are not retried.
    fn paint(&self) -> BankerResult<Option<String>>;

    /// The host region changed size
    fn resize(&mut self, width: u16, height: u16);

    /// Draw straight into a terminal frame region
    ///
    /// Returns `false` when the panel has nothing to draw or cannot draw
    /// natively, in which case callers fall back to [`BalancePanel::paint`].
    #[cfg(feature = "ratatui")]
    fn render_into(
        &self,
        _area: ratatui::layout::Rect,
        _buf: &mut ratatui::buffer::Buffer,
    ) -> bool {
        false
    }
}

/// Data held by a panel between paints
#[derive(Debug, Clone, Default)]
pub(crate) struct PlottedSeries {
    totals: Vec<f64>,
    options: PlotOptions,
}

impl PlottedSeries {
    pub(crate) fn replace(&mut self, totals: &[f64], options: &PlotOptions) {
        self.options = options.clone();
        if totals.iter().any(|v| !v.is_finite()) {
            tracing::warn!("ignoring balance series with non-finite totals");
            self.totals.clear();
        } else {
            self.totals = totals.to_vec();
        }
    }

    pub(crate) fn state(&self) -> PanelState {
        if self.totals.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Populated
        }
    }

    pub(crate) fn totals(&self) -> &[f64] {
        &self.totals
    }

    pub(crate) fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Y range with 5% padding; flat series get one unit either side
    pub(crate) fn y_bounds(&self) -> (f64, f64) {
        let min = self.totals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }

        let range = max - min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        (min - pad, max + pad)
    }

    pub(crate) fn title<'a>(&'a self, host: &'a str) -> &'a str {
        self.options.title.as_deref().unwrap_or(host)
    }
}

/// Format a total in major units with a currency symbol
pub(crate) fn format_total(symbol: &str, total: f64) -> String {
    Money::from_major_units(total).format_with_symbol(symbol)
}
