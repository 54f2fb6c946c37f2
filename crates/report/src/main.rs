use anyhow::Context;

use marquee_report::{InMemorySource, JsonSnapshotSource, ReportConfig, SalesDataSource};

fn main() -> anyhow::Result<()> {
    marquee_observability::init();

    let config = ReportConfig::from_env().with_snapshot_arg(std::env::args().nth(1));

    let source: Box<dyn SalesDataSource> = match &config.snapshot {
        Some(path) => Box::new(
            JsonSnapshotSource::load(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?,
        ),
        None => {
            tracing::warn!("no snapshot configured; using the demo catalog");
            Box::new(InMemorySource::demo().context("building demo catalog")?)
        }
    };

    let report = marquee_report::build_report(source.as_ref(), &config)
        .context("building sales report")?;

    tracing::info!(
        tickets = report.totals.total_tickets_sold,
        revenue = %report.totals.total_revenue,
        events_with_sales = report.breakdown.len(),
        "sales report ready"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
