//! Local files written on behalf of the registry client

use crate::errors::RegistryError;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use tokio::{fs, fs::File, io::AsyncWriteExt};

/// Write `content` to `path`, creating or truncating it, and return the path
pub async fn write_file<P, C>(path: P, content: C) -> Result<PathBuf, RegistryError>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    let path = path.as_ref();
    log::debug!("writing {} bytes to {:?}", content.as_ref().len(), path);
    fs::write(path, content).await?;
    Ok(path.to_path_buf())
}

/// Streaming writer for large downloads
///
/// Data goes to a `.part` file next to the destination. Only a committed
/// writer leaves anything at the destination path, so an interrupted
/// download never looks like a complete archive.
#[derive(Debug)]
pub struct FileWriter {
    temp_file: File,
    temp_path: PathBuf,
    dest_path: PathBuf,
    size: u64,
}

impl FileWriter {
    /// Start writing a new file which will appear at `dest_path` on commit
    pub async fn begin(dest_path: &Path) -> Result<FileWriter, RegistryError> {
        if let Some(parent) = dest_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let temp_path = temp_path_for(dest_path);
        let temp_file = File::create(&temp_path).await?;
        Ok(FileWriter {
            temp_file,
            temp_path,
            dest_path: dest_path.to_path_buf(),
            size: 0,
        })
    }

    pub async fn write_all(&mut self, chunk: &[u8]) -> Result<(), RegistryError> {
        self.temp_file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Number of bytes written so far
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Flush and move the finished file into place
    pub async fn commit(mut self) -> Result<PathBuf, RegistryError> {
        self.temp_file.flush().await?;
        let FileWriter {
            temp_file,
            temp_path,
            dest_path,
            size,
        } = self;
        std::mem::drop(temp_file);
        fs::rename(&temp_path, &dest_path).await?;
        log::debug!("committed {} bytes to {:?}", size, dest_path);
        Ok(dest_path)
    }

    /// Delete the temporary file backing this writer
    pub async fn remove_temp(self) -> Result<(), RegistryError> {
        let FileWriter {
            temp_file,
            temp_path,
            ..
        } = self;
        std::mem::drop(temp_file);
        fs::remove_file(temp_path).await?;
        Ok(())
    }
}

fn temp_path_for(dest_path: &Path) -> PathBuf {
    let mut name = dest_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(".part");
    dest_path.with_file_name(name)
}
