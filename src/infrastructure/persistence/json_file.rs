//! Whole-file JSON list storage shared by the file repositories

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A JSON file holding a single array of records.
///
/// Each load re-reads the file and each save rewrites it in full.
pub struct JsonListFile<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> JsonListFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Use `file_name` inside `store_dir`, creating the directory if needed
    pub fn open(store_dir: &Path, file_name: &str) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        Ok(Self {
            path: store_dir.join(file_name),
            _record: PhantomData,
        })
    }

    /// Load all records.
    ///
    /// A missing file is an empty list. An unreadable file is also treated as
    /// empty; a copy is kept next to it as `<name>.unreadable` before the next
    /// save can overwrite it.
    pub fn load(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, Vec<T>>(reader) {
            Ok(records) => {
                debug!(path = %self.path.display(), count = records.len(), "loaded records");
                Ok(records)
            }
            Err(err) => {
                let backup = self.path.with_extension("json.unreadable");
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "could not parse record file, treating it as empty"
                );
                fs::copy(&self.path, &backup)?;
                Ok(Vec::new())
            }
        }
    }

    /// Replace the file contents with `records`
    pub fn save(&self, records: &[T]) -> Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }
}
