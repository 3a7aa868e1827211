use super::backend::StorageBackend;
use super::Bucket;
use crate::error::{CuidaError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Filesystem backend: one `<key>.json` file per bucket under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn bucket_path(&self, bucket: Bucket) -> PathBuf {
        self.root.join(format!("{}.json", bucket.key()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CuidaError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, bucket: Bucket) -> Result<Option<String>> {
        let path = self.bucket_path(bucket);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CuidaError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, bucket: Bucket, raw: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.bucket_path(bucket);

        // Atomic write; the tmp file never outlives a failed attempt
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", bucket.key(), Uuid::new_v4()));
        let written = fs::write(&tmp, raw).and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(CuidaError::Io(e));
        }

        Ok(())
    }

    fn remove(&self, bucket: Bucket) -> Result<()> {
        let path = self.bucket_path(bucket);
        if path.exists() {
            fs::remove_file(path).map_err(CuidaError::Io)?;
        }
        Ok(())
    }

    fn location(&self, bucket: Bucket) -> PathBuf {
        self.bucket_path(bucket)
    }

    fn available(&self) -> bool {
        // A missing root is fine (created on first write); a file in its place is not.
        !self.root.exists() || self.root.is_dir()
    }
}
