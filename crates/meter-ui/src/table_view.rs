//! Readings and monthly tables for the Meter Monitor TUI.
//!
//! Renders bordered [`ratatui::widgets::Table`]s: the raw readings list
//! with source tags, and the monthly rollup with per-type usage columns,
//! observed-day counts, and the month's estimated cost.

use std::collections::BTreeSet;

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use meter_core::formatting;
use meter_core::models::Reading;
use meter_data::analysis::MonthlySummary;

use crate::themes::Theme;

/// Render the raw readings table into `area`.
pub fn render_readings_table(
    frame: &mut Frame,
    area: Rect,
    readings: &[Reading],
    theme: &Theme,
) {
    let header_cells = ["Date", "Type", "Reading (kWh)", "Source"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = readings
        .iter()
        .enumerate()
        .map(|(i, reading)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let source_style = if reading.source == "bill" {
                theme.source_bill
            } else {
                theme.source_manual
            };
            Row::new(vec![
                Cell::from(formatting::format_date(reading.date)),
                Cell::from(reading.reading_type.clone()),
                Cell::from(formatting::format_number(reading.value, 0)),
                Cell::from(reading.source.clone()).style(source_style),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Length(18),
        Constraint::Length(15),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Meter Readings ({}) ", readings.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the monthly usage/cost table into `area`.
///
/// Reading-type columns are discovered from the data, so new categories in
/// the input grow the table rather than being dropped.
pub fn render_monthly_table(
    frame: &mut Frame,
    area: Rect,
    monthly: &[MonthlySummary],
    theme: &Theme,
) {
    let types: Vec<String> = monthly
        .iter()
        .flat_map(|m| m.period.usage_by_type.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut header_cells: Vec<Cell> = vec![Cell::from("Month").style(theme.table_header)];
    for ty in &types {
        header_cells.push(Cell::from(ty.clone()).style(theme.table_header));
    }
    header_cells.push(Cell::from("Days").style(theme.table_header));
    header_cells.push(Cell::from("Cost").style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let mut rows: Vec<Row> = monthly
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let mut cells: Vec<Cell> = vec![Cell::from(summary.period.month.clone())];
            for ty in &types {
                let usage = summary.period.usage_by_type.get(ty).copied().unwrap_or(0.0);
                cells.push(Cell::from(formatting::format_number(usage, 1)));
            }
            cells.push(Cell::from(summary.period.days_observed.to_string()));
            cells.push(Cell::from(formatting::format_currency(summary.cost.total_cost)));
            Row::new(cells).style(style)
        })
        .collect();

    // Totals row across all months.
    let mut total_cells: Vec<Cell> = vec![Cell::from("TOTAL")];
    for ty in &types {
        let total: f64 = monthly
            .iter()
            .filter_map(|m| m.period.usage_by_type.get(ty))
            .sum();
        total_cells.push(Cell::from(formatting::format_number(total, 1)));
    }
    let total_days: u32 = monthly.iter().map(|m| m.period.days_observed).sum();
    let total_cost: f64 = monthly.iter().map(|m| m.cost.total_cost).sum();
    total_cells.push(Cell::from(total_days.to_string()));
    total_cells.push(Cell::from(formatting::format_currency(total_cost)));
    rows.push(Row::new(total_cells).style(theme.table_total));

    let mut widths = vec![Constraint::Length(9)];
    widths.extend(types.iter().map(|_| Constraint::Length(16)));
    widths.push(Constraint::Length(6));
    widths.push(Constraint::Length(12));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Total Usage by Month (kWh) "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when nothing could be derived.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No meter readings loaded", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Each reading type needs at least two readings to derive usage.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Meter Monitor "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
