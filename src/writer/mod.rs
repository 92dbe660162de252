pub mod manifest;
pub mod maps;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialise `value` as JSON into `path`.
fn write_json<T: Serialize>(value: &T, path: &Path, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .with_context(|| format!("Serialising {}", path.display()))?;

    std::fs::write(path, json).with_context(|| format!("Writing {}", path.display()))
}
