// Command implementations

mod export;
mod import;

pub use export::execute_export;
pub use import::execute_import;

use redis_porter::RunReport;

/// Print the keys that did not make it through a run
fn print_failures(report: &RunReport) {
    for failure in report.failures() {
        if let Some(reason) = failure.outcome.reason() {
            eprintln!("  - {}: {}", failure.key, reason);
        }
    }
}
