use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect the terminal background from the `COLORFGBG` environment
/// variable (`"foreground;background"`; background 0–6 is dark, 7–15 is
/// light). Absent or unparseable values fall back to dark.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// All UI styles used by the meter-ui views.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Chrome ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Tables ───────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Domain accents ───────────────────────────────────────────────────────
    /// Readings sourced from a bill.
    pub source_bill: Style,
    /// Manually recorded readings.
    pub source_manual: Style,
    /// Solar feed-in credits.
    pub credit: Style,
    /// Sparklines and bar charts.
    pub chart: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            source_bill: Style::default().fg(Color::Cyan),
            source_manual: Style::default().fg(Color::DarkGray),
            credit: Style::default().fg(Color::Green),
            chart: Style::default().fg(Color::Cyan),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            source_bill: Style::default().fg(Color::Blue),
            source_manual: Style::default().fg(Color::Gray),
            credit: Style::default().fg(Color::Green),
            chart: Style::default().fg(Color::Blue),
        }
    }

    /// Resolve a theme by name; `"auto"` and unknown names fall back to
    /// background detection.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                BackgroundType::Dark => Self::dark(),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
