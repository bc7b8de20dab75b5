//! Entry point script for an unpacked image

use crate::{errors::RegistryError, storage::write_file};
use std::{
    fs::Permissions,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

/// File name of the runscript inside an image's root directory
pub const RUNSCRIPT_NAME: &str = "singularity";

/// Write an executable shell script at `<base_dir>/singularity` that runs `cmd`
pub async fn create_runscript<P: AsRef<Path>>(
    cmd: &str,
    base_dir: P,
) -> Result<PathBuf, RegistryError> {
    let path = base_dir.as_ref().join(RUNSCRIPT_NAME);
    let content = format!("#!/bin/sh\n\n{}", cmd);
    let path = write_file(&path, content).await?;
    tokio::fs::set_permissions(&path, Permissions::from_mode(0o755)).await?;
    log::info!("wrote runscript {:?}", path);
    Ok(path)
}
