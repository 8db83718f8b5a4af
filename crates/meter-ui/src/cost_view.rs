//! Annual cost comparison view: current plan vs comparison plan.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use meter_core::costs::{ANYTIME, CONTROLLED_LOAD, SOLAR, UsageByType};
use meter_core::formatting;
use meter_core::models::normalize_reading_type;
use meter_data::analysis::{AnnualEstimate, PlanComparison};

use crate::themes::Theme;

/// Render the annual comparison into `area`.
///
/// `annual` is `None` when the data window spans zero days; a hint is
/// shown instead of the panels.
pub fn render_cost_view(
    frame: &mut Frame,
    area: Rect,
    annual: Option<&PlanComparison>,
    theme: &Theme,
) {
    let Some(comparison) = annual else {
        render_insufficient_data(frame, area, theme);
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(area);
    render_usage_summary(frame, chunks[0], &comparison.current, theme);

    let panels = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(chunks[1]);

    render_plan_panel(frame, panels[0], " Current Plan ", &comparison.current, theme);
    render_plan_panel(
        frame,
        panels[1],
        " Comparison Plan ",
        &comparison.comparison,
        theme,
    );
    render_difference_panel(frame, panels[2], comparison, theme);
}

// ── Panels ────────────────────────────────────────────────────────────────────

/// Projected annual usage per category, with the extrapolation basis.
fn render_usage_summary(frame: &mut Frame, area: Rect, estimate: &AnnualEstimate, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            format!(
                "Based on {} days of data (extrapolated to 365 days)",
                estimate.days_in_data
            ),
            theme.dim,
        )),
        Line::from(vec![
            Span::styled("Anytime ", theme.label),
            Span::styled(
                format!(
                    "{}/yr",
                    formatting::format_kwh(usage_for(&estimate.usage_by_type, ANYTIME), 0)
                ),
                theme.value,
            ),
            Span::styled("   Controlled load ", theme.label),
            Span::styled(
                format!(
                    "{}/yr",
                    formatting::format_kwh(usage_for(&estimate.usage_by_type, CONTROLLED_LOAD), 0)
                ),
                theme.value,
            ),
            Span::styled("   Solar ", theme.label),
            Span::styled(
                format!(
                    "{}/yr",
                    formatting::format_kwh(usage_for(&estimate.usage_by_type, SOLAR), 0)
                ),
                theme.value,
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Annual Usage Estimates "),
        ),
        area,
    );
}

/// One plan's itemised annual cost.
fn render_plan_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    estimate: &AnnualEstimate,
    theme: &Theme,
) {
    let cost = &estimate.cost;
    let lines = vec![
        Line::from(vec![
            Span::styled("Total ", theme.label),
            Span::styled(formatting::format_currency(cost.total_cost), theme.value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Anytime          ", theme.label),
            Span::styled(formatting::format_currency(cost.anytime_cost), theme.text),
        ]),
        Line::from(vec![
            Span::styled("Controlled load  ", theme.label),
            Span::styled(
                formatting::format_currency(cost.controlled_load_cost),
                theme.text,
            ),
        ]),
        Line::from(vec![
            Span::styled("Supply charges   ", theme.label),
            Span::styled(formatting::format_currency(cost.supply_cost), theme.text),
        ]),
        Line::from(vec![
            Span::styled("Solar credit    ", theme.label),
            Span::styled(
                format!("-{}", formatting::format_currency(cost.solar_credit)),
                theme.credit,
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

/// Savings (or extra cost) of switching to the comparison plan.
fn render_difference_panel(
    frame: &mut Frame,
    area: Rect,
    comparison: &PlanComparison,
    theme: &Theme,
) {
    let delta = &comparison.delta;
    let savings_style = if delta.annual_savings >= 0.0 {
        theme.success
    } else {
        theme.error
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Annual savings ", theme.label),
            Span::styled(
                formatting::format_currency(delta.annual_savings),
                savings_style,
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Monthly   ", theme.label),
            Span::styled(
                formatting::format_currency(delta.monthly_savings),
                savings_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Percentage  ", theme.label),
            Span::styled(format!("{:.1}%", delta.savings_percent), savings_style),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Difference ")),
        area,
    );
}

/// Shown when the annual projection has no basis (zero-day window).
fn render_insufficient_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Not enough data for an annual projection",
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Readings must span more than a single day.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Annual Cost Estimation "),
        ),
        area,
    );
}

/// Sum the usage recorded under any spelling of the canonical `key`.
fn usage_for(usage: &UsageByType, key: &str) -> f64 {
    usage
        .iter()
        .filter(|(raw, _)| normalize_reading_type(raw) == key)
        .map(|(_, kwh)| kwh)
        .sum()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use meter_core::costs::{CostBreakdown, PlanDelta};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_comparison() -> PlanComparison {
        let usage: UsageByType = [
            ("anytime".to_string(), 3_650.0),
            ("solar".to_string(), 1_200.0),
        ]
        .into_iter()
        .collect();

        PlanComparison {
            current: AnnualEstimate {
                usage_by_type: usage.clone(),
                days_in_data: 30,
                cost: CostBreakdown {
                    anytime_cost: 912.5,
                    supply_cost: 620.5,
                    solar_credit: 96.0,
                    total_cost: 1_437.0,
                    ..Default::default()
                },
            },
            comparison: AnnualEstimate {
                usage_by_type: usage,
                days_in_data: 30,
                cost: CostBreakdown {
                    anytime_cost: 839.5,
                    supply_cost: 565.75,
                    solar_credit: 120.0,
                    total_cost: 1_285.25,
                    ..Default::default()
                },
            },
            delta: PlanDelta {
                annual_savings: 151.75,
                monthly_savings: 12.65,
                savings_percent: 10.6,
            },
        }
    }

    #[test]
    fn test_render_cost_view_does_not_panic() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let comparison = make_comparison();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_cost_view(frame, area, Some(&comparison), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_cost_view_without_projection_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_cost_view(frame, area, None, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_usage_for_normalises_keys() {
        let usage: UsageByType = [("Anytime".to_string(), 100.0)].into_iter().collect();
        assert!((usage_for(&usage, ANYTIME) - 100.0).abs() < 1e-9);
        assert_eq!(usage_for(&usage, SOLAR), 0.0);
    }
}
