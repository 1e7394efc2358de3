use clap::Parser;
use cuvee::adapters::{csv_io, InMemoryHistory, InMemoryInventory};
use cuvee::api::server::{self, AppContext};
use cuvee::config::Settings;
use cuvee::domain::ports::InventoryStore;
use cuvee::utils::logger;
use cuvee::CliConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_logger(cli.verbose);

    let settings = Settings::resolve(&cli)?;
    tracing::info!(bind = %settings.bind, tolerance = settings.tolerance, "starting cuvee");

    let store = Arc::new(InMemoryInventory::new());
    if let Some(seed) = &cli.seed {
        let tanks = csv_io::import_path(seed)?;
        let count = tanks.len();
        for tank in tanks {
            store.upsert(tank)?;
        }
        tracing::info!(count, seed = %seed.display(), "seeded inventory from CSV");
    }

    let ctx = AppContext {
        store,
        history: Arc::new(InMemoryHistory::new()),
        settings,
    };
    server::run(ctx).await?;
    Ok(())
}
