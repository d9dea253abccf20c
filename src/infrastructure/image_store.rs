//! Vehicle photo storage
//!
//! Photos are decoded and re-encoded as JPEG under `<data_dir>/images/`.

use crate::error::{Error, Result};
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let dir = data_dir.join("images");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Copy an image into the store. Returns the stored path.
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        if !source.is_file() {
            return Err(Error::FileNotFound(source.display().to_string()));
        }

        let image = image::open(source)?.to_rgb8();
        let target = self.dir.join(format!("{}.jpg", Uuid::new_v4()));
        image.save_with_format(&target, ImageFormat::Jpeg)?;

        info!(source = %source.display(), stored = %target.display(), "stored vehicle image");
        Ok(target)
    }

    /// Remove a stored image. Paths outside the store are left alone.
    pub fn remove(&self, stored: &Path) -> Result<bool> {
        if !stored.starts_with(&self.dir) || !stored.exists() {
            return Ok(false);
        }
        fs::remove_file(stored)?;
        Ok(true)
    }
}
