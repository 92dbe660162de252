//! Dump the unified numbering so an atlas builder can lay out the shared
//! tilesets in unified-index order.

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::model::ProcessedProject;

pub const DEFAULT_MANIFEST: &str = "remap_manifest.json";

pub fn emit(project: &ProcessedProject, out_dir: &Path, name: &str, compact: bool) -> Result<()> {
    let path = out_dir.join(name);
    super::write_json(&project.manifest, &path, compact)?;
    info!(
        "Wrote {} ({} geometry classes)",
        path.display(),
        project.manifest.geometries.len()
    );
    Ok(())
}
