//! Terminal setup, teardown and the viewer loop
//!
//! The panic hook restores the terminal before the original hook prints.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use chrono::NaiveDate;
use std::io::{self, Stdout};
use std::panic;

use crate::plot::{BalancePanel, PlotHost};
use crate::services::balance::{BalanceController, Granularity};

use super::app::ViewerApp;
use super::event::EventHandler;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const HELP: &str = " q quit · g granularity";

pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Show `panel` full screen until the user quits
///
/// Every replot stops at `until` when it is set.
pub fn run_viewer(
    controller: BalanceController,
    panel: Box<dyn BalancePanel>,
    granularity: Granularity,
    until: Option<NaiveDate>,
) -> Result<()> {
    let mut app = ViewerApp::new(controller, panel, granularity, until);
    let mut terminal = init_terminal()?;
    let events = EventHandler::default();

    let outcome = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| draw(frame, &mut app))?;

            app.handle_event(events.next()?);
            if app.should_quit {
                return Ok(());
            }
        }
    })();

    restore_terminal()?;
    outcome
}

fn draw(frame: &mut Frame, app: &mut ViewerApp) {
    let [plot_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    if app.render_native(plot_area, frame.buffer_mut()) {
        app.error = None;
        render_footer(frame, app, footer_area);
        return;
    }

    let host = PlotHost::new(app.title(), plot_area.width, plot_area.height);
    match app.paint(&host) {
        Ok(Some(text)) => {
            app.error = None;
            frame.render_widget(Paragraph::new(text), plot_area);
        }
        Ok(None) => {
            app.error = None;
            let empty = Paragraph::new("No transactions to plot")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, plot_area);
        }
        Err(e) => app.error = Some(e.to_string()),
    }

    render_footer(frame, app, footer_area);
}

fn render_footer(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let footer = match &app.error {
        Some(error) => {
            Paragraph::new(format!(" {}", error)).style(Style::default().fg(Color::Red))
        }
        None => Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(footer, area);
}
