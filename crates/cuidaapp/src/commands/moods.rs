use super::sort_newest_first;
use crate::error::Result;
use crate::model::{new_id, now_millis, MoodEntry, MoodValue};
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};
use tracing::debug;

/// Number of moods returned when callers do not ask for a limit: one week of check-ins.
pub const DEFAULT_LIMIT: usize = 7;

pub fn add<B: StorageBackend>(
    storage: &Storage<B>,
    user_id: &str,
    value: MoodValue,
    comment: Option<String>,
) -> Result<MoodEntry> {
    let mut moods: Vec<MoodEntry> = storage.load_collection(Bucket::Moods)?;

    let entry = MoodEntry {
        id: new_id("mood"),
        user_id: user_id.to_string(),
        value,
        comment,
        timestamp: now_millis(),
    };
    moods.push(entry.clone());
    storage.save_collection(Bucket::Moods, &moods)?;

    debug!(user_id, mood = value.get(), "mood recorded");
    Ok(entry)
}

/// The user's most recent moods, newest first, at most `limit` of them.
pub fn list<B: StorageBackend>(
    storage: &Storage<B>,
    user_id: &str,
    limit: usize,
) -> Result<Vec<MoodEntry>> {
    let mut moods: Vec<MoodEntry> = storage
        .load_collection::<MoodEntry>(Bucket::Moods)?
        .into_iter()
        .filter(|m| m.user_id == user_id)
        .collect();

    sort_newest_first(&mut moods, |m| (m.timestamp, m.id.as_str()));
    moods.truncate(limit);
    Ok(moods)
}
