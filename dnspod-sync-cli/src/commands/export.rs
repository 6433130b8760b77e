//! `dnspod-sync export`

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dnspod_sync_core::types::DomainExport;
use dnspod_sync_core::{DnspodApi, Exporter, IdentityCodec};

pub async fn run(
    api: Arc<dyn DnspodApi>,
    domain: Option<&str>,
    output: &Path,
    concurrency: usize,
) -> Result<()> {
    let exporter = Exporter::new(api, IdentityCodec::new()).with_concurrency(concurrency);
    let exports = exporter.export(domain).await?;

    let written = write_exports(&exports, output)?;
    for path in &written {
        println!("{}", path.display());
    }
    tracing::info!(
        "Exported {} domain(s) into {}",
        exports.len(),
        output.display()
    );
    Ok(())
}

/// Write the `.tf` and `.sh` file of every export into `dir`.
///
/// Existing files are overwritten; the script is made executable on unix.
pub fn write_exports(exports: &[DomainExport], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(exports.len() * 2);
    for export in exports {
        let config_path = dir.join(export.config_file_name());
        fs::write(&config_path, &export.config)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        let script_path = dir.join(export.script_file_name());
        fs::write(&script_path, &export.script)
            .with_context(|| format!("Failed to write {}", script_path.display()))?;
        make_executable(&script_path)?;

        written.push(config_path);
        written.push(script_path);
    }
    Ok(written)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to chmod {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
