//! Usage trend views: per-type statistics with sparklines, and the
//! monthly usage bar chart.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Sparkline},
    Frame,
};

use meter_core::formatting;
use meter_data::analysis::{MonthlySummary, TypeUsageStats, UsageAnalysis};

use crate::table_view::render_no_data;
use crate::themes::Theme;

/// Render per-type usage statistics and daily-usage sparklines into `area`.
///
/// Each reading type gets an equal share of the vertical space: a stats
/// line (mean / max / min / day count) above a sparkline of its daily
/// series.
pub fn render_trends_view(frame: &mut Frame, area: Rect, analysis: &UsageAnalysis, theme: &Theme) {
    if analysis.type_stats.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let constraints: Vec<Constraint> = analysis
        .type_stats
        .iter()
        .map(|_| Constraint::Ratio(1, analysis.type_stats.len() as u32))
        .collect();
    let chunks = Layout::vertical(constraints).split(area);

    for (stats, chunk) in analysis.type_stats.iter().zip(chunks.iter()) {
        render_type_trend(frame, *chunk, analysis, stats, theme);
    }
}

/// Render the monthly total-usage bar chart into `area`.
pub fn render_monthly_bars(
    frame: &mut Frame,
    area: Rect,
    monthly: &[MonthlySummary],
    theme: &Theme,
) {
    let totals: Vec<(String, u64)> = monthly
        .iter()
        .map(|summary| {
            let total: f64 = summary.period.usage_by_type.values().sum();
            (summary.period.month.clone(), total.max(0.0).round() as u64)
        })
        .collect();
    let data: Vec<(&str, u64)> = totals
        .iter()
        .map(|(month, total)| (month.as_str(), *total))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Monthly Usage (kWh) "),
        )
        .data(data.as_slice())
        .bar_width(8)
        .bar_gap(1)
        .bar_style(theme.chart)
        .value_style(theme.value)
        .label_style(theme.dim);

    frame.render_widget(chart, area);
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// One reading type's stats line and sparkline.
fn render_type_trend(
    frame: &mut Frame,
    area: Rect,
    analysis: &UsageAnalysis,
    stats: &TypeUsageStats,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", stats.reading_type));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);

    let stats_line = Line::from(vec![
        Span::styled("avg ", theme.label),
        Span::styled(
            format!("{}/day", formatting::format_kwh(stats.mean_daily, 2)),
            theme.value,
        ),
        Span::styled("   max ", theme.label),
        Span::styled(formatting::format_number(stats.max_daily, 2), theme.text),
        Span::styled("   min ", theme.label),
        Span::styled(formatting::format_number(stats.min_daily, 2), theme.text),
        Span::styled("   days ", theme.label),
        Span::styled(stats.days.to_string(), theme.text),
    ]);
    frame.render_widget(Paragraph::new(stats_line), chunks[0]);

    let sparkline = Sparkline::default()
        .data(sparkline_data(analysis, &stats.reading_type))
        .style(theme.chart);
    frame.render_widget(sparkline, chunks[1]);
}

/// Scale a type's daily series into sparkline bars.
///
/// Usage is fractional kWh; bars are integers, so values are scaled by 100
/// to keep sub-kWh variation visible. Negative usage (a declining meter)
/// clamps to zero.
fn sparkline_data(analysis: &UsageAnalysis, reading_type: &str) -> Vec<u64> {
    analysis
        .daily_usage
        .iter()
        .filter(|point| point.reading_type == reading_type)
        .map(|point| (point.usage * 100.0).max(0.0).round() as u64)
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
