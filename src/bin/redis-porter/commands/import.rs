// Import command implementation

use anyhow::{Context, Result};
use std::path::Path;

use redis_porter::{import_database, PorterConfig, Store};

use super::print_failures;

/// Execute the import command
pub async fn execute_import(
    store: &mut dyn Store,
    path: &Path,
    config: &PorterConfig,
    flush: bool,
) -> Result<()> {
    let report = import_database(store, path, &config.import_options(flush))
        .await
        .with_context(|| format!("Failed to import from {}", path.display()))?;

    if let Some(flushed) = report.flushed {
        println!("Flushed {} key(s) before import", flushed);
    }
    println!(
        "Imported {} key(s) with {} command(s)",
        report.run.succeeded(),
        report.commands
    );
    println!("Import {}", report.run);
    print_failures(&report.run);

    Ok(())
}
