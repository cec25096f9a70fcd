//! Plot viewer state
//!
//! Holds one panel for the lifetime of the viewer and replots it whenever
//! the granularity changes.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::error::BankerResult;
use crate::plot::{BalancePanel, PlotHost, PlotOptions};
use crate::services::balance::{BalanceController, Granularity};

use super::event::Event;

pub struct ViewerApp {
    controller: BalanceController,
    panel: Box<dyn BalancePanel>,
    granularity: Granularity,
    /// Last day included in every replot
    until: Option<NaiveDate>,
    /// Set when the last paint failed
    pub error: Option<String>,
    pub should_quit: bool,
}

impl ViewerApp {
    pub fn new(
        controller: BalanceController,
        panel: Box<dyn BalancePanel>,
        granularity: Granularity,
        until: Option<NaiveDate>,
    ) -> Self {
        let mut app = Self {
            controller,
            panel,
            granularity,
            until,
            error: None,
            should_quit: false,
        };
        app.replot();
        app
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn title(&self) -> String {
        format!("{} ({})", self.controller.label(), self.granularity.unit_label())
    }

    fn replot(&mut self) {
        let series = self.controller.balance_history(self.granularity, self.until);
        let options = PlotOptions {
            title: Some(self.title()),
            ..PlotOptions::for_series(&series)
        };
        self.panel.plot_balance(&series.totals, &options);
    }

    fn cycle_granularity(&mut self) {
        self.granularity = match self.granularity {
            Granularity::Daily => Granularity::Weekly,
            Granularity::Weekly => Granularity::Monthly,
            Granularity::Monthly => Granularity::Daily,
        };
        tracing::debug!(granularity = ?self.granularity, "viewer granularity changed");
        self.replot();
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Failed(reason) => {
                tracing::warn!(%reason, "terminal event source failed");
                self.should_quit = true;
            }
            // The next draw resizes the panel to the frame
            Event::Resize(_, _) | Event::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('g') | KeyCode::Tab => self.cycle_granularity(),
            _ => {}
        }
    }

    /// Fit the panel to `host` and paint it
    pub fn paint(&mut self, host: &PlotHost) -> BankerResult<Option<String>> {
        self.panel.resize(host.width, host.height);
        self.panel.paint()
    }

    /// Fit the panel to `area` and let it draw into `buf` directly
    ///
    /// `false` means the panel drew nothing and [`ViewerApp::paint`] should
    /// be used instead.
    pub fn render_native(&mut self, area: Rect, buf: &mut Buffer) -> bool {
        self.panel.resize(area.width, area.height);
        self.panel.render_into(area, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{AccountId, Money, Transaction, TransactionList};
    use crate::plot::chart::ChartPanel;
    use crate::plot::text::TextPanel;

    fn controller(list: TransactionList) -> BalanceController {
        BalanceController::new(list, &Settings::default()).with_label("Checking")
    }

    fn app(list: TransactionList) -> ViewerApp {
        let panel = Box::new(TextPanel::new(PlotHost::new("", 80, 20), "$"));
        ViewerApp::new(controller(list), panel, Granularity::Daily, None)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app(TransactionList::new());
            app.handle_event(key(code));
            assert!(app.should_quit);
        }

        let mut app = app(TransactionList::new());
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[test]
    fn test_empty_account_paints_nothing() {
        let mut app = app(TransactionList::new());
        assert_eq!(app.paint(&PlotHost::new("", 80, 20)).unwrap(), None);
    }

    #[test]
    fn test_granularity_cycle_replots() {
        let account = AccountId::new();
        let list: TransactionList = (1..=40)
            .map(|day| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(day);
                Transaction::new(account, date, Money::from_cents(100), "")
            })
            .collect();
        let mut app = app(list);
        let host = PlotHost::new("", 80, 60);

        let daily = app.paint(&host).unwrap().unwrap();
        assert!(daily.starts_with("Checking (Days)"));

        app.handle_event(key(KeyCode::Char('g')));
        assert_eq!(app.granularity(), Granularity::Weekly);
        let weekly = app.paint(&host).unwrap().unwrap();
        assert!(weekly.starts_with("Checking (Weeks)"));
        assert!(weekly.lines().count() < daily.lines().count());
    }

    #[test]
    fn test_until_limits_every_replot() {
        let account = AccountId::new();
        let list: TransactionList = [(1, 10_000), (2, 500), (20, 99_900)]
            .into_iter()
            .map(|(day, cents)| Transaction::new(account, date(day), Money::from_cents(cents), ""))
            .collect();
        let panel = Box::new(TextPanel::new(PlotHost::new("", 80, 60), "$"));
        let mut app = ViewerApp::new(controller(list), panel, Granularity::Daily, Some(date(2)));
        let host = PlotHost::new("", 80, 60);

        let daily = app.paint(&host).unwrap().unwrap();
        assert!(daily.contains("$105.00"));
        assert!(!daily.contains("$1104.00"));
        assert!(!daily.contains("2024-01-20"));

        app.handle_event(key(KeyCode::Char('g')));
        let weekly = app.paint(&host).unwrap().unwrap();
        assert!(weekly.contains("$105.00"));
        assert!(!weekly.contains("$1104.00"));
    }

    #[test]
    fn test_chart_panel_renders_into_frame_buffer() {
        let list: TransactionList = [date(1), date(5)]
            .into_iter()
            .map(|d| Transaction::new(AccountId::new(), d, Money::from_cents(2_500), ""))
            .collect();
        let panel = Box::new(ChartPanel::new(PlotHost::new("", 80, 20), "$"));
        let mut app = ViewerApp::new(controller(list), panel, Granularity::Daily, None);

        let area = Rect::new(0, 0, 50, 12);
        let mut buf = Buffer::empty(area);
        assert!(app.render_native(area, &mut buf));

        let top: String = buf.content[..50].iter().map(|cell| cell.symbol()).collect();
        assert!(top.contains("Checking (Days)"));
    }

    #[test]
    fn test_text_panel_falls_back_to_paint() {
        let list: TransactionList =
            [Transaction::new(AccountId::new(), date(1), Money::from_cents(100), "")]
                .into_iter()
                .collect();
        let mut app = app(list);

        let area = Rect::new(0, 0, 50, 12);
        let mut buf = Buffer::empty(area);
        assert!(!app.render_native(area, &mut buf));
        assert!(app.paint(&PlotHost::new("", 50, 12)).unwrap().is_some());
    }
}
