//! SVG balance plot drawn with Plotters
//!
//! Host dimensions are pixels. Plotters is built without font support, so
//! the title is attached as an SVG `<title>` element instead of drawn text.

use plotters::prelude::*;

use crate::error::{BankerError, BankerResult};
use crate::services::balance::BalanceController;

use super::panel::PlottedSeries;
use super::{BalancePanel, PanelFactory, PanelState, PlotBackend, PlotHost, PlotOptions};

const MARGIN: u32 = 16;

pub struct SvgPanelFactory;

impl PanelFactory for SvgPanelFactory {
    fn backend(&self) -> PlotBackend {
        PlotBackend::Svg
    }

    fn create_panel(
        &self,
        parent: &PlotHost,
        _controller: &BalanceController,
    ) -> Box<dyn BalancePanel> {
        Box::new(SvgPanel::new(parent.clone()))
    }
}

pub struct SvgPanel {
    host: PlotHost,
    series: PlottedSeries,
}

impl SvgPanel {
    pub fn new(host: PlotHost) -> Self {
        Self {
            host,
            series: PlottedSeries::default(),
        }
    }

    fn draw(&self, out: &mut String) -> BankerResult<()> {
        let size = (
            u32::from(self.host.width).max(1),
            u32::from(self.host.height).max(1),
        );
        let root = SVGBackend::with_string(out, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let totals = self.series.totals();
        let x_max = totals.len().saturating_sub(1).max(1) as f64;
        let (low, high) = self.series.y_bounds();

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .build_cartesian_2d(0f64..x_max, low..high)
            .map_err(render_err)?;

        if low < 0.0 && high > 0.0 {
            chart
                .draw_series(LineSeries::new(vec![(0.0, 0.0), (x_max, 0.0)], &RED))
                .map_err(render_err)?;
        }

        chart
            .draw_series(LineSeries::new(
                totals.iter().enumerate().map(|(i, total)| (i as f64, *total)),
                &BLUE,
            ))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

impl BalancePanel for SvgPanel {
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

        let mut svg = String::new();
        self.draw(&mut svg)?;

        let title = self.series.title(&self.host.title);
        Ok(Some(with_title(svg, title)))
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.host.width = width;
        self.host.height = height;
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> BankerError {
    BankerError::Render(err.to_string())
}

/// Insert a `<title>` as the first child of the root `<svg>` element
fn with_title(mut svg: String, title: &str) -> String {
    if title.is_empty() {
        return svg;
    }

    let insert_at = svg
        .find("<svg")
        .and_then(|start| svg[start..].find('>').map(|end| start + end + 1));

    if let Some(pos) = insert_at {
        svg.insert_str(pos, &format!("\n<title>{}</title>", escape_xml(title)));
    }
    svg
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
