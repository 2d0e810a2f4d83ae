use backend::dashboards::d100_sales_overview::DashboardSession;
use backend::shared::config::load_config;
use backend::shared::data::load_dataset;
use backend::shared::format::{format_money, format_number, format_percent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Create the log directory
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let dataset = Arc::new(load_dataset(&config.data).await?);
    tracing::info!(
        "Dataset {} loaded at {}",
        dataset.id(),
        dataset.loaded_at().format("%Y-%m-%d %H:%M:%S")
    );

    let mut session = DashboardSession::new(dataset);
    session.set_filters(config.filter.clone());

    let view = session.view();
    let facets = session.facets();

    let output = serde_json::json!({
        "view": &*view,
        "facets": facets,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    let kpis = &view.kpis;
    tracing::info!(
        "Summary: {} orders, {} customers, revenue {}, AOV {}, margin {}",
        format_number(kpis.total_orders),
        format_number(kpis.unique_customer_count),
        format_money(kpis.total_revenue),
        format_money(kpis.average_order_value),
        format_percent(kpis.margin_percent)
    );

    Ok(())
}
