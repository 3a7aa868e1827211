use super::sort_newest_first;
use crate::error::Result;
use crate::model::{new_id, now_millis, DiaryEntry, NewDiaryEntry};
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 20;

pub fn add<B: StorageBackend>(
    storage: &Storage<B>,
    user_id: &str,
    new_entry: NewDiaryEntry,
) -> Result<DiaryEntry> {
    let mut entries: Vec<DiaryEntry> = storage.load_collection(Bucket::Diary)?;

    let entry = DiaryEntry {
        id: new_id("diary"),
        user_id: user_id.to_string(),
        emotion: new_entry.emotion,
        color: new_entry.color,
        title: new_entry.title,
        content: new_entry.content,
        tags: new_entry.tags,
        timestamp: now_millis(),
    };
    entries.push(entry.clone());
    storage.save_collection(Bucket::Diary, &entries)?;

    debug!(user_id, emotion = %entry.emotion, "diary entry added");
    Ok(entry)
}

pub fn list<B: StorageBackend>(
    storage: &Storage<B>,
    user_id: &str,
    limit: usize,
) -> Result<Vec<DiaryEntry>> {
    let mut entries: Vec<DiaryEntry> = storage
        .load_collection::<DiaryEntry>(Bucket::Diary)?
        .into_iter()
        .filter(|e| e.user_id == user_id)
        .collect();

    sort_newest_first(&mut entries, |e| (e.timestamp, e.id.as_str()));
    entries.truncate(limit);
    Ok(entries)
}
