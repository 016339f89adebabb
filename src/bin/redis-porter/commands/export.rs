// Export command implementation

use anyhow::{Context, Result};
use std::path::Path;

use redis_porter::{export_database, PorterConfig, Store};

use super::print_failures;

/// Execute the export command
pub async fn execute_export(
    store: &mut dyn Store,
    path: &Path,
    config: &PorterConfig,
) -> Result<()> {
    let report = export_database(store, path, &config.export_options())
        .await
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    match &report.written {
        Some(written) => println!("Wrote {} key(s) to {}", report.run.succeeded(), written.display()),
        None => println!("No keys were found, {} was not created", path.display()),
    }
    println!("Export {}", report.run);
    print_failures(&report.run);

    Ok(())
}
