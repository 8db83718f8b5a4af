mod bootstrap;

use anyhow::{bail, Context, Result};
use meter_core::formatting;
use meter_core::settings::Settings;
use meter_core::tariff::TariffPlan;
use meter_data::analysis::analyze_readings;
use meter_data::reader::load_readings;
use meter_ui::app::{App, TabView};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Meter Monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let readings = load_readings(&settings.file)
        .with_context(|| format!("could not load readings from {}", settings.file.display()))?;

    if let (Some(first), Some(last)) = (readings.first(), readings.last()) {
        tracing::info!(
            "Loaded {} readings from {} to {}",
            readings.len(),
            formatting::format_date(first.date),
            formatting::format_date(last.date)
        );
    }

    let plan_file = bootstrap::discover_plan_file(settings.plan_file.as_deref());
    let current_plan = TariffPlan::load_from(&plan_file)
        .with_context(|| format!("could not load tariff plan from {}", plan_file.display()))?;

    // The comparison plan is transient user input: loaded when a file is
    // named, preset otherwise, never written back anywhere.
    let comparison_plan = match settings.compare_file.as_deref() {
        Some(path) if path.exists() => TariffPlan::load_from(path)
            .with_context(|| format!("could not load comparison plan from {}", path.display()))?,
        Some(path) => bail!("comparison plan file not found: {}", path.display()),
        None => TariffPlan::comparison_preset(),
    };

    let analysis = analyze_readings(readings, &current_plan, &comparison_plan);

    let app = App::new(
        &settings.theme,
        TabView::from_name(&settings.tab),
        analysis,
    );
    app.run()?;

    Ok(())
}
