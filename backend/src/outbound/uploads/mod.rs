//! Filesystem storage for uploaded project photos.

mod fs_image_store;

pub use fs_image_store::{FsImageStore, UPLOADS_ROUTE};
