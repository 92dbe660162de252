//! Write every rewritten map back out under its original file name.

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::model::ProcessedProject;

pub fn emit(project: &ProcessedProject, out_dir: &Path, compact: bool) -> Result<()> {
    for doc in &project.maps {
        let path = out_dir.join(&doc.name);
        super::write_json(&doc.map, &path, compact)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
