//! `ImageStore` writing photos into a capability-scoped upload directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ImageStore, ImageStoreError, ImageUpload};
use crate::domain::{ImageUrl, TraceId};

/// URL prefix the upload directory is served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

const MAX_EXTENSION_LEN: usize = 8;

/// Stores each upload under a fresh UUID file name; only a sanitised
/// extension survives from the client-supplied name.
#[derive(Clone)]
pub struct FsImageStore {
    dir: Arc<Dir>,
    root: PathBuf,
}

impl FsImageStore {
    /// Open `root`, creating it when missing.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            root,
        })
    }

    /// Directory files are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Lowercased ASCII-alphanumeric extension of `file_name`, if any.
fn sanitised_extension(file_name: Option<&str>) -> Option<String> {
    let extension = Path::new(file_name?).extension()?.to_str()?;
    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| extension.to_ascii_lowercase())
}

fn stored_name(file_name: Option<&str>) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match sanitised_extension(file_name) {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem,
    }
}

/// File name behind a URL produced by this store, if it is one.
fn stored_file(url: &ImageUrl) -> Option<&str> {
    let name = url.as_ref().strip_prefix(UPLOADS_ROUTE)?.strip_prefix('/')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.');
    (valid && !name.starts_with('.')).then_some(name)
}

fn copy_into(dir: &Dir, source: &Path, name: &str) -> io::Result<u64> {
    let mut source = File::open(source)?;
    let mut target = dir.create(name)?;
    let copied = io::copy(&mut source, &mut target)?;
    target.sync_all()?;
    Ok(copied)
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<ImageUrl, ImageStoreError> {
        let name = stored_name(upload.file_name.as_deref());
        let dir = Arc::clone(&self.dir);
        let source = upload.path.clone();
        let target = name.clone();

        let bytes = TraceId::spawn_blocking(move || copy_into(&dir, &source, &target))
            .await
            .map_err(|err| ImageStoreError::io(err.to_string()))?
            .map_err(|err| ImageStoreError::io(err.to_string()))?;

        debug!(file = %name, bytes, "stored project image");
        Ok(ImageUrl::new(format!("{UPLOADS_ROUTE}/{name}")))
    }

    async fn remove(&self, url: &ImageUrl) -> Result<(), ImageStoreError> {
        let Some(name) = stored_file(url) else {
            return Ok(());
        };
        let dir = Arc::clone(&self.dir);
        let target = name.to_owned();
        let removed = TraceId::spawn_blocking(move || match dir.remove_file(&target) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
        .await
        .map_err(|err| ImageStoreError::io(err.to_string()))?;
        removed.map_err(|err| ImageStoreError::io(err.to_string()))?;
        debug!(file = %name, "removed project image");
        Ok(())
    }
}
