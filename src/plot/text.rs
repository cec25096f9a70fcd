//! Plain-text balance plot
//!
//! Always available: renders one table row per bucket with a bar scaled
//! between the lowest and highest balance. Long series are sampled evenly
//! down to the rows the host can show, always keeping the first and last
//! bucket.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::error::BankerResult;
use crate::services::balance::BalanceController;

use super::panel::{format_total, PlottedSeries};
use super::{BalancePanel, PanelFactory, PanelState, PlotBackend, PlotHost, PlotOptions};

const BAR: char = '█';

/// Rows taken by the title and table borders
const CHROME_ROWS: u16 = 4;

/// Columns reserved for the date and balance cells
const LABEL_COLUMNS: u16 = 36;

pub struct TextPanelFactory;

impl PanelFactory for TextPanelFactory {
    fn backend(&self) -> PlotBackend {
        PlotBackend::Text
    }

    fn create_panel(
        &self,
        parent: &PlotHost,
        controller: &BalanceController,
    ) -> Box<dyn BalancePanel> {
        Box::new(TextPanel::new(parent.clone(), controller.currency_symbol()))
    }
}

pub struct TextPanel {
    host: PlotHost,
    currency_symbol: String,
    series: PlottedSeries,
}

impl TextPanel {
    pub fn new(host: PlotHost, currency_symbol: impl Into<String>) -> Self {
        Self {
            host,
            currency_symbol: currency_symbol.into(),
            series: PlottedSeries::default(),
        }
    }

    fn bar_width(&self) -> usize {
        usize::from(self.host.width.saturating_sub(LABEL_COLUMNS).max(10))
    }

    fn max_rows(&self) -> usize {
        usize::from(self.host.height.saturating_sub(CHROME_ROWS).max(1))
    }

    fn render(&self) -> String {
        let totals = self.series.totals();
        let options = self.series.options();
        let (low, high) = self.series.y_bounds();
        let bar_width = self.bar_width() as f64;

        let mut builder = Builder::default();
        builder.push_record([
            options.granularity.unit_label().to_string(),
            "Balance".to_string(),
            String::new(),
        ]);

        for index in sample_indices(totals.len(), self.max_rows()) {
            let total = totals[index];
            let filled = ((total - low) / (high - low) * bar_width).round() as usize;
            builder.push_record([
                options.bucket_label(index),
                format_total(&self.currency_symbol, total),
                BAR.to_string().repeat(filled),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::psql());
        table.modify(Columns::single(1), Alignment::right());

        format!("{}\n{}", self.series.title(&self.host.title), table)
    }
}

impl BalancePanel for TextPanel {
    fn plot_balance(&mut self, totals: &[f64], options: &PlotOptions) {
        self.series.replace(totals, options);
    }

    fn state(&self) -> PanelState {
        self.series.state()
    }

    fn paint(&self) -> BankerResult<Option<String>> {
        Ok(match self.state() {
            PanelState::Empty => None,
            PanelState::Populated => Some(self.render()),
        })
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.host.width = width;
        self.host.height = height;
    }
}

/// Up to `rows` indices spread evenly over `0..len`, including both ends
fn sample_indices(len: usize, rows: usize) -> Vec<usize> {
    if len <= rows {
        return (0..len).collect();
    }
    if rows <= 1 {
        return vec![len - 1];
    }

    let mut indices: Vec<usize> = (0..rows).map(|i| i * (len - 1) / (rows - 1)).collect();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::balance::Granularity;
    use chrono::NaiveDate;

    fn panel(width: u16, height: u16) -> TextPanel {
        TextPanel::new(PlotHost::new("Checking", width, height), "$")
    }

    #[test]
    fn test_empty_panel_paints_nothing() {
        let mut panel = panel(80, 20);
        assert_eq!(panel.paint().unwrap(), None);

        panel.plot_balance(&[], &PlotOptions::default());
        assert_eq!(panel.paint().unwrap(), None);
    }

    #[test]
    fn test_rows_and_bars() {
        let mut panel = panel(80, 20);
        let options = PlotOptions {
            start: NaiveDate::from_ymd_opt(2024, 3, 1),
            granularity: Granularity::Daily,
            title: None,
        };
        panel.plot_balance(&[0.0, 50.0, 100.0], &options);

        let out = panel.paint().unwrap().unwrap();
        assert!(out.starts_with("Checking\n"));
        assert!(out.contains("2024-03-01"));
        assert!(out.contains("2024-03-03"));
        assert!(out.contains("$100.00"));

        let bar_lengths: Vec<usize> = out
            .lines()
            .filter(|line| line.contains("2024-03"))
            .map(|line| line.chars().filter(|c| *c == BAR).count())
            .collect();
        assert_eq!(bar_lengths.len(), 3);
        assert!(bar_lengths[0] < bar_lengths[1]);
        assert!(bar_lengths[1] < bar_lengths[2]);
    }

    #[test]
    fn test_replot_replaces_previous_data() {
        let mut panel = panel(80, 20);
        panel.plot_balance(&[1.0, 2.0], &PlotOptions::default());
        panel.plot_balance(&[7.0], &PlotOptions::default());

        let out = panel.paint().unwrap().unwrap();
        assert!(out.contains("$7.00"));
        assert!(!out.contains("$2.00"));
    }

    #[test]
    fn test_title_option_overrides_host() {
        let mut panel = panel(80, 20);
        let options = PlotOptions {
            title: Some("Savings".into()),
            ..PlotOptions::default()
        };
        panel.plot_balance(&[1.0], &options);
        assert!(panel.paint().unwrap().unwrap().starts_with("Savings\n"));
    }

    #[test]
    fn test_resize_limits_rows() {
        let mut panel = panel(80, 40);
        let totals: Vec<f64> = (0..100).map(f64::from).collect();
        panel.plot_balance(&totals, &PlotOptions::default());
        panel.resize(80, 9);

        let out = panel.paint().unwrap().unwrap();
        // title + header + separator + 5 rows
        assert_eq!(out.lines().count(), 8);
        assert!(out.contains("$99.00"));
        assert!(out.contains("$0.00"));
    }

    #[test]
    fn test_sample_indices() {
        assert_eq!(sample_indices(3, 10), vec![0, 1, 2]);
        assert_eq!(sample_indices(10, 1), vec![9]);
        assert_eq!(sample_indices(11, 3), vec![0, 5, 10]);
        assert!(sample_indices(0, 5).is_empty());
    }
}
