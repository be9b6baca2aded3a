use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{
    fs::{OpenOptions, create_dir_all, metadata, read_dir, remove_dir_all, remove_file},
    io::AsyncWriteExt,
};

use crate::error::{ContextExt, ConvertErr};

/// Entries of a directory, not recursive, sorted by path.
pub async fn read_dir_sorted(path: &Path) -> Result<Vec<PathBuf>, ConvertErr> {
    let mut entries = read_dir(path)
        .await
        .with_context(|| format!("read directory: {}", path.display()))?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Regular file whose extension is exactly `ext`.
pub async fn has_ext(path: &Path, ext: &str) -> bool {
    Some(ext) == path.extension().unwrap_or_default().to_str()
        && metadata(path).await.is_ok_and(|meta| meta.is_file())
}

pub async fn ensure_dir(path: &Path) -> Result<(), ConvertErr> {
    create_dir_all(path)
        .await
        .with_context(|| format!("create directory: {}", path.display()))
}

/// Removes whatever is at `path` and creates an empty directory in its place.
pub async fn recreate_dir(path: &Path) -> Result<(), ConvertErr> {
    remove_dir_if_exists(path).await?;
    ensure_dir(path).await
}

pub async fn remove_dir_if_exists(path: &Path) -> Result<(), ConvertErr> {
    match remove_dir_all(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            Err(e).with_context(|| format!("remove directory: {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Writes `content` to `path`, replacing a previous file.
pub async fn write_file(path: &Path, content: &[u8]) -> Result<(), ConvertErr> {
    if let Some(prefix) = path.parent() {
        ensure_dir(prefix).await?;
    }
    match remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            return Err(e).with_context(|| format!("remove file: {}", path.display()));
        }
        _ => {}
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
        .with_context(|| format!("open file: {}", path.display()))?;
    file.write_all(content)
        .await
        .with_context(|| format!("write to file: {}", path.display()))?;
    Ok(())
}
