use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::GeneratedOrderRecord;

/// File holding the last generated player order as its JSON blob.
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw blob as stored, or `None` if nothing has been generated yet.
    pub fn load_blob(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let blob = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read order file {}", self.path.display()))?;
        Ok(Some(blob))
    }

    /// Previous order for re-seeding; an unreadable blob is treated as absent.
    pub fn load(&self) -> Result<Option<GeneratedOrderRecord>> {
        let blob = self.load_blob()?;
        Ok(GeneratedOrderRecord::decode_prior(blob.as_deref()))
    }

    /// Replaces the stored order. Writes to a temp file first, then renames.
    pub fn save(&self, record: &GeneratedOrderRecord) -> Result<()> {
        let json = record.to_json().context("Failed to serialize player order")?;
        self.ensure_parent_dir()?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).context("Failed to write order file")?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e)
                .with_context(|| format!("Failed to replace order file {}", self.path.display()));
        }

        info!("Saved player order to {}", self.path.display());
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).context("Failed to create order directory")
            }
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
