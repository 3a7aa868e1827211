//! Daily priorities.
//!
//! The store does not cap how many priorities a day holds; clients check
//! [`DAILY_PRIORITY_LIMIT`](crate::model::DAILY_PRIORITY_LIMIT) before adding.
//! Toggling or deleting an unknown id is a silent no-op; the returned flag
//! tells callers whether anything matched.

use crate::error::Result;
use crate::model::{new_id, now_millis, PriorityItem};
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};
use chrono::NaiveDate;
use tracing::debug;

pub fn add<B: StorageBackend>(
    storage: &Storage<B>,
    user_id: &str,
    text: &str,
    date: NaiveDate,
) -> Result<PriorityItem> {
    let mut items: Vec<PriorityItem> = storage.load_collection(Bucket::Priorities)?;

    let item = PriorityItem {
        id: new_id("prio"),
        user_id: user_id.to_string(),
        text: text.to_string(),
        completed: false,
        date,
        timestamp: now_millis(),
    };
    items.push(item.clone());
    storage.save_collection(Bucket::Priorities, &items)?;

    debug!(user_id, %date, "priority added");
    Ok(item)
}

/// The user's priorities for `date`, in the order they were added.
pub fn list<B: StorageBackend>(
    storage: &Storage<B>,
    user_id: &str,
    date: NaiveDate,
) -> Result<Vec<PriorityItem>> {
    Ok(storage
        .load_collection::<PriorityItem>(Bucket::Priorities)?
        .into_iter()
        .filter(|p| p.user_id == user_id && p.date == date)
        .collect())
}

pub fn toggle<B: StorageBackend>(storage: &Storage<B>, id: &str, completed: bool) -> Result<bool> {
    let mut items: Vec<PriorityItem> = storage.load_collection(Bucket::Priorities)?;

    let Some(item) = items.iter_mut().find(|p| p.id == id) else {
        debug!(id, "toggle: no such priority");
        return Ok(false);
    };
    item.completed = completed;
    storage.save_collection(Bucket::Priorities, &items)?;
    Ok(true)
}

pub fn delete<B: StorageBackend>(storage: &Storage<B>, id: &str) -> Result<bool> {
    let mut items: Vec<PriorityItem> = storage.load_collection(Bucket::Priorities)?;
    let before = items.len();
    items.retain(|p| p.id != id);

    if items.len() == before {
        debug!(id, "delete: no such priority");
        return Ok(false);
    }
    storage.save_collection(Bucket::Priorities, &items)?;
    Ok(true)
}
