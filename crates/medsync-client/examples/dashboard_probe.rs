//! Wires the data-sync layer end to end against the configured endpoint:
//! probe connectivity, fetch inventory and the dashboard snapshot, and
//! print what came back (and from where).
//!
//! ```sh
//! MEDSYNC_SCRIPT_URL=https://script.example/exec \
//!     cargo run -p medsync-client --example dashboard_probe
//! ```

use std::sync::Arc;

use medsync_client::store::{DashboardStore, InventoryStore};
use medsync_client::{ClientConfig, ConnectionMonitor, SupplyService};
use medsync_core::{count_below_minimum, total_stock_value};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClientConfig::load_or_default(None);
    println!("endpoint: {}", config.script_url());

    let service = Arc::new(SupplyService::from_config(&config)?);

    let monitor = ConnectionMonitor::new(service.clone());
    let online = monitor.probe().await;
    println!("connection: {}", if online { "online" } else { "offline" });

    let inventory = InventoryStore::new(service.clone());
    let source = inventory.fetch().await?;
    let items = inventory.items().await;
    println!(
        "inventory: {} items ({:?}), {} below minimum, {:.2} total value",
        items.len(),
        source,
        count_below_minimum(&items),
        total_stock_value(&items),
    );

    let dashboard = Arc::new(DashboardStore::new(service));
    let source = dashboard.fetch().await?;
    if let Some(snapshot) = dashboard.snapshot().await {
        println!(
            "dashboard ({:?}): {} alerts, {} recent activities",
            source,
            snapshot.alerts.len(),
            snapshot.recent_activities.len(),
        );
    }

    Ok(())
}
