//! Port for storing uploaded project photos.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ImageUrl;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// Writing the image failed.
        Io { message: String } => "image store io failed: {message}",
    }
}

/// Upload spooled to a temporary file by the inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub path: PathBuf,
    /// Client-supplied file name, used only for its extension.
    pub file_name: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `upload` and return the public URL it is served from.
    async fn store(&self, upload: &ImageUpload) -> Result<ImageUrl, ImageStoreError>;

    /// Delete an image previously returned by [`ImageStore::store`]. Unknown
    /// or foreign URLs are ignored.
    async fn remove(&self, url: &ImageUrl) -> Result<(), ImageStoreError>;
}
