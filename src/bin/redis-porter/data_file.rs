// Data file checks applied before connecting

use anyhow::{anyhow, Result};
use std::path::Path;

use crate::cli::Mode;

/// Validate the data file path for the given mode
///
/// The path must not be a directory and must carry a `.json` extension.
/// An export never overwrites an existing file; an import needs the file to exist.
pub fn validate(path: &Path, mode: Mode) -> Result<()> {
    if path.is_dir() {
        return Err(anyhow!("{} is a directory", path.display()));
    }

    match mode {
        Mode::Export if path.exists() => {
            return Err(anyhow!(
                "{} already exists, refusing to overwrite it",
                path.display()
            ));
        }
        Mode::Import if !path.exists() => {
            return Err(anyhow!("{} does not exist", path.display()));
        }
        _ => {}
    }

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(anyhow!("{} is not a .json file", path.display()));
    }

    Ok(())
}
