//! Application state and TUI event loop for Meter Monitor.
//!
//! [`App`] owns the theme, the active tab, and the analysis result. Every
//! view renders straight from the analysis; switching tabs never mutates
//! the underlying data.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Tabs,
    Frame, Terminal,
};

use meter_core::formatting;
use meter_data::analysis::UsageAnalysis;

use crate::themes::Theme;
use crate::{cost_view, table_view, trends_view};

// ── TabView ───────────────────────────────────────────────────────────────────

/// Which tab the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabView {
    /// Raw readings table.
    Readings,
    /// Monthly usage table with a usage bar chart.
    Monthly,
    /// Annual cost comparison.
    Costs,
    /// Per-type usage trends.
    Trends,
}

impl TabView {
    /// All tabs in display order.
    pub const ALL: [TabView; 4] = [
        TabView::Readings,
        TabView::Monthly,
        TabView::Costs,
        TabView::Trends,
    ];

    /// Tab labels in display order.
    pub fn titles() -> Vec<&'static str> {
        vec!["Readings", "Monthly", "Costs", "Trends"]
    }

    /// Resolve a tab from its CLI name; unknown names fall back to the
    /// readings tab.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "monthly" => TabView::Monthly,
            "costs" => TabView::Costs,
            "trends" => TabView::Trends,
            _ => TabView::Readings,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Meter Monitor TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Currently selected tab.
    pub tab: TabView,
    /// The analysis result every view renders from.
    pub analysis: UsageAnalysis,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, tab: TabView, analysis: UsageAnalysis) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab,
            analysis,
            should_quit: false,
        }
    }

    /// Run the dashboard event loop until the user quits.
    ///
    /// The loop is synchronous: there is no background producer, so a
    /// simple `crossterm::event::poll` with a 250 ms tick is all the
    /// responsiveness the dashboard needs.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Event handling ────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.tab = self.tab.prev(),
            KeyCode::Char('1') => self.tab = TabView::Readings,
            KeyCode::Char('2') => self.tab = TabView::Monthly,
            KeyCode::Char('3') => self.tab = TabView::Costs,
            KeyCode::Char('4') => self.tab = TabView::Trends,
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the full dashboard: header, tab bar, and the active view.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.area());

        frame.render_widget(self.header_line(), chunks[0]);

        let tabs = Tabs::new(TabView::titles())
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active);
        frame.render_widget(tabs, chunks[1]);

        let body = chunks[2];
        match self.tab {
            TabView::Readings => {
                if self.analysis.readings.is_empty() {
                    table_view::render_no_data(frame, body, &self.theme);
                } else {
                    table_view::render_readings_table(
                        frame,
                        body,
                        &self.analysis.readings,
                        &self.theme,
                    );
                }
            }
            TabView::Monthly => self.render_monthly(frame, body),
            TabView::Costs => {
                cost_view::render_cost_view(frame, body, self.analysis.annual.as_ref(), &self.theme)
            }
            TabView::Trends => {
                trends_view::render_trends_view(frame, body, &self.analysis, &self.theme)
            }
        }
    }

    /// Monthly tab: rollup table above the usage bar chart.
    fn render_monthly(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        if self.analysis.monthly.is_empty() {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        }

        let chunks =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area);
        table_view::render_monthly_table(frame, chunks[0], &self.analysis.monthly, &self.theme);
        trends_view::render_monthly_bars(frame, chunks[1], &self.analysis.monthly, &self.theme);
    }

    /// Title line with the loaded-data banner.
    fn header_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled("⚡ Meter Monitor", self.theme.header)];

        if let (Some(first), Some(last)) = (self.analysis.first_date(), self.analysis.last_date())
        {
            spans.push(Span::styled(
                format!(
                    "  {} readings from {} to {}",
                    self.analysis.readings.len(),
                    formatting::format_date(first),
                    formatting::format_date(last)
                ),
                self.theme.dim,
            ));
        }

        Line::from(spans)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
