use super::Bucket;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `Storage` handles the "what" (typing, empty and corrupt buckets).
pub trait StorageBackend {
    /// Read the raw JSON stored under a bucket's key.
    /// Returns Ok(None) if nothing is stored.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, bucket: Bucket) -> Result<Option<String>>;

    /// Replace the value stored under a bucket's key.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, bucket: Bucket, raw: &str) -> Result<()>;

    /// Remove the bucket. Removing an absent bucket is not an error.
    fn remove(&self, bucket: Bucket) -> Result<()>;

    /// Where the bucket lives. For FsBackend, the real path. For MemBackend, a virtual path.
    fn location(&self, bucket: Bucket) -> PathBuf;

    /// Whether the underlying store can be used at all.
    fn available(&self) -> bool;
}
