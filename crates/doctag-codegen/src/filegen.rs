//! Writing artifacts to disk

use crate::artifact::Artifact;
use crate::error::{GenerateError, GenerateResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Write every artifact into `output_dir`, creating it if needed.
///
/// Files whose contents are already up to date are left untouched so that
/// build scripts do not see spurious modifications. Returns the paths of all
/// artifacts, written or not, in input order.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> GenerateResult<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| GenerateError::io(output_dir, e))?;

    let mut paths = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = output_dir.join(&artifact.file_name);

        let unchanged = fs::read_to_string(&path)
            .map(|existing| existing == artifact.contents)
            .unwrap_or(false);
        if unchanged {
            tracing::debug!("Unchanged {}", path.display());
        } else {
            fs::write(&path, &artifact.contents).map_err(|e| GenerateError::io(&path, e))?;
            tracing::info!("Wrote {}", path.display());
        }
        paths.push(path);
    }

    Ok(paths)
}
