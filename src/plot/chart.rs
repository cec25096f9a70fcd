//! Terminal line chart backed by ratatui

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};

use crate::error::BankerResult;
use crate::services::balance::BalanceController;

use super::panel::{format_total, PlottedSeries};
use super::{BalancePanel, PanelFactory, PanelState, PlotBackend, PlotHost, PlotOptions};

pub struct ChartPanelFactory;

impl PanelFactory for ChartPanelFactory {
    fn backend(&self) -> PlotBackend {
        PlotBackend::Chart
    }

    fn create_panel(
        &self,
        parent: &PlotHost,
        controller: &BalanceController,
    ) -> Box<dyn BalancePanel> {
        Box::new(ChartPanel::new(parent.clone(), controller.currency_symbol()))
    }
}

pub struct ChartPanel {
    host: PlotHost,
    currency_symbol: String,
    series: PlottedSeries,
}

impl ChartPanel {
    pub fn new(host: PlotHost, currency_symbol: impl Into<String>) -> Self {
        Self {
            host,
            currency_symbol: currency_symbol.into(),
            series: PlottedSeries::default(),
        }
    }

    /// Draw the chart into `area` of `buf`. Does nothing while empty.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.series.state() == PanelState::Empty {
            return;
        }

        let points: Vec<(f64, f64)> = self
            .series
            .totals()
            .iter()
            .enumerate()
            .map(|(i, total)| (i as f64, *total))
            .collect();
        let last = points.len().saturating_sub(1);
        let options = self.series.options();
        let (low, high) = self.series.y_bounds();

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&points);

        let x_axis = Axis::default()
            .title(options.granularity.unit_label())
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, last.max(1) as f64])
            .labels(vec![
                Span::raw(options.bucket_label(0)),
                Span::raw(options.bucket_label(last)),
            ]);

        let y_axis = Axis::default()
            .title("Balance")
            .style(Style::default().fg(Color::Gray))
            .bounds([low, high])
            .labels(vec![
                Span::raw(format_total(&self.currency_symbol, low)),
                Span::raw(format_total(&self.currency_symbol, (low + high) / 2.0)),
                Span::raw(format_total(&self.currency_symbol, high)),
            ]);

        let block = Block::default()
            .title(format!(" {} ", self.series.title(&self.host.title)))
            .borders(Borders::ALL);

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

impl BalancePanel for ChartPanel {
    fn plot_balance(&mut self, totals: &[f64], options: &PlotOptions) {
        self.series.replace(totals, options);
    }

    fn state(&self) -> PanelState {
        self.series.state()
    }

    fn paint(&self) -> BankerResult<Option<String>> {
        if self.state() == PanelState::Empty {
            return Ok(None);
        }

        let area = Rect::new(0, 0, self.host.width, self.host.height);
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);

        Ok(Some(buffer_to_string(&buf)))
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.host.width = width;
        self.host.height = height;
    }

    fn render_into(&self, area: Rect, buf: &mut Buffer) -> bool {
        if self.state() == PanelState::Empty {
            return false;
        }
        self.render(area, buf);
        true
    }
}

/// Flatten a buffer to newline-separated rows with trailing blanks trimmed
fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width);
    if width == 0 {
        return String::new();
    }

    buf.content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ChartPanel {
        ChartPanel::new(PlotHost::new("Checking", 60, 15), "$")
    }

    #[test]
    fn test_empty_panel_paints_nothing() {
        let mut panel = panel();
        assert_eq!(panel.paint().unwrap(), None);

        panel.plot_balance(&[], &PlotOptions::default());
        assert_eq!(panel.state(), PanelState::Empty);
        assert_eq!(panel.paint().unwrap(), None);
    }

    #[test]
    fn test_paint_fills_host_area() {
        let mut panel = panel();
        panel.plot_balance(&[10.0, 20.0, 15.0], &PlotOptions::default());

        let out = panel.paint().unwrap().unwrap();
        assert_eq!(out.lines().count(), 15);
        assert!(out.contains("Checking"));
        assert!(out.lines().all(|line| line.chars().count() <= 60));
    }

    #[test]
    fn test_replot_and_resize() {
        let mut panel = panel();
        panel.plot_balance(&[1.0, 2.0], &PlotOptions::default());
        panel.plot_balance(&[5.0, 9.0, 3.0, 4.0], &PlotOptions::default());
        assert_eq!(panel.state(), PanelState::Populated);

        panel.resize(40, 10);
        let out = panel.paint().unwrap().unwrap();
        assert_eq!(out.lines().count(), 10);
    }

    #[test]
    fn test_render_into_larger_buffer() {
        let mut panel = panel();
        panel.plot_balance(&[3.0, 1.0], &PlotOptions::default());

        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        assert!(buffer_to_string(&buf).contains('│') || buffer_to_string(&buf).contains('┌'));
    }

    #[test]
    fn test_render_into_reports_whether_it_drew() {
        let mut panel = panel();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        assert!(!panel.render_into(area, &mut buf));

        panel.plot_balance(&[3.0, 1.0], &PlotOptions::default());
        assert!(panel.render_into(area, &mut buf));
        assert!(buffer_to_string(&buf).contains("Checking"));
    }
}
