//! # Storage Layer
//!
//! All persisted state lives in a handful of named **buckets**, each holding a
//! single JSON value:
//!
//! | Bucket | Key | Value |
//! |--------|-----|-------|
//! | [`Bucket::User`] | `cdm_user` | one `UserProfile` object, or absent |
//! | [`Bucket::Moods`] | `cdm_moods` | array of `MoodEntry` |
//! | [`Bucket::Priorities`] | `cdm_priorities` | array of `PriorityItem` |
//! | [`Bucket::Diary`] | `cdm_diary` | array of `DiaryEntry` |
//! | [`Bucket::Habits`] | `cdm_habits` | array of `Habit` |
//! | [`Bucket::Theme`] | `cdm_theme` | `"light"` or `"dark"` |
//!
//! There is no indexing and no transaction support. Every mutation is a
//! read-modify-write of the whole bucket; the last write wins.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`] does raw I/O: read, write and remove the
//!   string stored under a bucket's key.
//! - [`Storage`] adds typing on top: (de)serialization, the empty-bucket
//!   fallback and corrupt-data reporting.
//!
//! ## Reading Buckets
//!
//! [`Storage::read`] never hides a parse failure. It returns a
//! [`BucketRead`]:
//! - `Empty`: nothing stored under the key yet
//! - `Loaded(value)`: parsed successfully
//! - `Corrupt(err)`: something is stored but is not valid for the type
//!
//! The collection helpers turn `Empty` into an empty list and `Corrupt` into
//! [`CuidaError::CorruptBucket`], so damaged data is reported instead of
//! being overwritten by the next write.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per bucket in a data
//!   directory, written atomically.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.

use crate::error::{CuidaError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    User,
    Moods,
    Priorities,
    Diary,
    Habits,
    Theme,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::User,
        Bucket::Moods,
        Bucket::Priorities,
        Bucket::Diary,
        Bucket::Habits,
        Bucket::Theme,
    ];

    /// The persisted key for this bucket.
    pub fn key(&self) -> &'static str {
        match self {
            Bucket::User => "cdm_user",
            Bucket::Moods => "cdm_moods",
            Bucket::Priorities => "cdm_priorities",
            Bucket::Diary => "cdm_diary",
            Bucket::Habits => "cdm_habits",
            Bucket::Theme => "cdm_theme",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of reading a bucket.
#[derive(Debug)]
pub enum BucketRead<T> {
    Loaded(T),
    Empty,
    Corrupt(serde_json::Error),
}

/// State of one bucket, as reported by [`Storage::inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BucketState {
    Empty,
    Ok { records: usize },
    Corrupt { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketReport {
    pub bucket: &'static str,
    pub location: PathBuf,
    #[serde(flatten)]
    pub state: BucketState,
}

pub struct Storage<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> Storage<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn available(&self) -> bool {
        self.backend.available()
    }

    pub fn read<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<BucketRead<T>> {
        let raw = match self.backend.read(bucket)? {
            Some(raw) => raw,
            None => return Ok(BucketRead::Empty),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(BucketRead::Loaded(value)),
            Err(err) => {
                error!(bucket = bucket.key(), %err, "bucket holds unreadable data");
                Ok(BucketRead::Corrupt(err))
            }
        }
    }

    /// Load a single-value bucket. `None` when empty.
    pub fn load_record<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Option<T>> {
        match self.read(bucket)? {
            BucketRead::Loaded(value) => Ok(Some(value)),
            BucketRead::Empty => Ok(None),
            BucketRead::Corrupt(source) => Err(CuidaError::CorruptBucket {
                bucket: bucket.key(),
                source,
            }),
        }
    }

    /// Load an array bucket. An empty bucket is an empty list.
    pub fn load_collection<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Vec<T>> {
        Ok(self.load_record(bucket)?.unwrap_or_default())
    }

    pub fn save_record<T: Serialize + ?Sized>(&self, bucket: Bucket, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(bucket, &raw)?;
        debug!(bucket = bucket.key(), bytes = raw.len(), "bucket written");
        Ok(())
    }

    pub fn save_collection<T: Serialize>(&self, bucket: Bucket, items: &[T]) -> Result<()> {
        self.save_record(bucket, items)
    }

    pub fn clear(&self, bucket: Bucket) -> Result<()> {
        self.backend.remove(bucket)?;
        debug!(bucket = bucket.key(), "bucket cleared");
        Ok(())
    }

    /// Report the state of every bucket without modifying anything.
    pub fn inspect(&self) -> Result<Vec<BucketReport>> {
        let mut reports = Vec::with_capacity(Bucket::ALL.len());
        for bucket in Bucket::ALL {
            let state = match self.read::<serde_json::Value>(bucket)? {
                BucketRead::Empty => BucketState::Empty,
                BucketRead::Corrupt(err) => BucketState::Corrupt {
                    reason: err.to_string(),
                },
                BucketRead::Loaded(value) => self.check_shape(bucket, value),
            };
            reports.push(BucketReport {
                bucket: bucket.key(),
                location: self.backend.location(bucket),
                state,
            });
        }
        Ok(reports)
    }

    fn check_shape(&self, bucket: Bucket, value: serde_json::Value) -> BucketState {
        use crate::model::{DiaryEntry, Habit, MoodEntry, PriorityItem, Theme, UserProfile};

        let typed: std::result::Result<usize, serde_json::Error> = match bucket {
            Bucket::User => serde_json::from_value::<UserProfile>(value).map(|_| 1),
            Bucket::Theme => serde_json::from_value::<Theme>(value).map(|_| 1),
            Bucket::Moods => serde_json::from_value::<Vec<MoodEntry>>(value).map(|v| v.len()),
            Bucket::Priorities => {
                serde_json::from_value::<Vec<PriorityItem>>(value).map(|v| v.len())
            }
            Bucket::Diary => serde_json::from_value::<Vec<DiaryEntry>>(value).map(|v| v.len()),
            Bucket::Habits => serde_json::from_value::<Vec<Habit>>(value).map(|v| v.len()),
        };
        match typed {
            Ok(records) => BucketState::Ok { records },
            Err(err) => BucketState::Corrupt {
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MoodEntry, Theme};
    use crate::store::mem_backend::MemBackend;

    fn make_storage() -> Storage<MemBackend> {
        Storage::with_backend(MemBackend::new())
    }

    #[test]
    fn empty_bucket_reads_as_empty() {
        let storage = make_storage();
        assert!(matches!(
            storage.read::<Vec<MoodEntry>>(Bucket::Moods).unwrap(),
            BucketRead::Empty
        ));
        let moods: Vec<MoodEntry> = storage.load_collection(Bucket::Moods).unwrap();
        assert!(moods.is_empty());
    }

    #[test]
    fn corrupt_bucket_is_reported_not_emptied() {
        let storage = make_storage();
        storage.backend.write(Bucket::Moods, "{not json").unwrap();

        assert!(matches!(
            storage.read::<Vec<MoodEntry>>(Bucket::Moods).unwrap(),
            BucketRead::Corrupt(_)
        ));

        let err = storage.load_collection::<MoodEntry>(Bucket::Moods).unwrap_err();
        assert!(matches!(
            err,
            CuidaError::CorruptBucket {
                bucket: "cdm_moods",
                ..
            }
        ));
        // The damaged value is left in place
        assert_eq!(
            storage.backend.read(Bucket::Moods).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn record_round_trip_and_clear() {
        let storage = make_storage();
        storage.save_record(Bucket::Theme, &Theme::Dark).unwrap();
        assert_eq!(
            storage.load_record::<Theme>(Bucket::Theme).unwrap(),
            Some(Theme::Dark)
        );
        assert_eq!(
            storage.backend.read(Bucket::Theme).unwrap().as_deref(),
            Some("\"dark\"")
        );

        storage.clear(Bucket::Theme).unwrap();
        assert_eq!(storage.load_record::<Theme>(Bucket::Theme).unwrap(), None);
    }

    #[test]
    fn inspect_reports_each_bucket() {
        let storage = make_storage();
        storage.backend.write(Bucket::Moods, "[]").unwrap();
        storage.backend.write(Bucket::Habits, "[{\"id\":1}]").unwrap();
        storage.backend.write(Bucket::Diary, "oops").unwrap();

        let reports = storage.inspect().unwrap();
        assert_eq!(reports.len(), Bucket::ALL.len());

        let state_of = |key: &str| {
            reports
                .iter()
                .find(|r| r.bucket == key)
                .map(|r| r.state.clone())
                .unwrap()
        };
        assert_eq!(state_of("cdm_user"), BucketState::Empty);
        assert_eq!(state_of("cdm_moods"), BucketState::Ok { records: 0 });
        assert!(matches!(state_of("cdm_habits"), BucketState::Corrupt { .. }));
        assert!(matches!(state_of("cdm_diary"), BucketState::Corrupt { .. }));
    }

    #[test]
    fn bucket_keys_are_stable() {
        let keys: Vec<&str> = Bucket::ALL.iter().map(|b| b.key()).collect();
        assert_eq!(
            keys,
            vec![
                "cdm_user",
                "cdm_moods",
                "cdm_priorities",
                "cdm_diary",
                "cdm_habits",
                "cdm_theme"
            ]
        );
    }
}
