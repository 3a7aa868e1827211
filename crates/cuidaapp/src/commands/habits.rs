//! Habit tracker.
//!
//! See [`Habit::toggle`] for the streak contract: a completion counter, not a
//! consecutive-day computation.

use crate::error::Result;
use crate::model::Habit;
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};
use chrono::NaiveDate;
use tracing::debug;

pub fn add<B: StorageBackend>(storage: &Storage<B>, user_id: &str, title: &str) -> Result<Habit> {
    let mut habits: Vec<Habit> = storage.load_collection(Bucket::Habits)?;

    let habit = Habit::new(user_id, title);
    habits.push(habit.clone());
    storage.save_collection(Bucket::Habits, &habits)?;

    debug!(user_id, id = %habit.id, "habit added");
    Ok(habit)
}

/// The user's habits, in the order they were created.
pub fn list<B: StorageBackend>(storage: &Storage<B>, user_id: &str) -> Result<Vec<Habit>> {
    Ok(storage
        .load_collection::<Habit>(Bucket::Habits)?
        .into_iter()
        .filter(|h| h.user_id == user_id)
        .collect())
}

/// Flip completion of `date`. Returns the updated habit, or `None` (and
/// changes nothing) when the id is unknown.
pub fn toggle<B: StorageBackend>(
    storage: &Storage<B>,
    habit_id: &str,
    date: NaiveDate,
) -> Result<Option<Habit>> {
    let mut habits: Vec<Habit> = storage.load_collection(Bucket::Habits)?;

    let Some(habit) = habits.iter_mut().find(|h| h.id == habit_id) else {
        debug!(habit_id, "toggle: no such habit");
        return Ok(None);
    };
    let done = habit.toggle(date);
    let updated = habit.clone();
    storage.save_collection(Bucket::Habits, &habits)?;

    debug!(habit_id, %date, done, streak = updated.streak, "habit toggled");
    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn make_storage() -> Storage<MemBackend> {
        Storage::with_backend(MemBackend::new())
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_habit_starts_empty() {
        let storage = make_storage();
        let habit = add(&storage, "u1", "Meditate").unwrap();
        assert_eq!(habit.streak, 0);
        assert!(habit.completed_dates.is_empty());
        assert_eq!(list(&storage, "u1").unwrap(), vec![habit]);
    }

    #[test]
    fn list_keeps_insertion_order_per_user() {
        let storage = make_storage();
        let a = add(&storage, "u1", "A").unwrap();
        add(&storage, "u2", "Other").unwrap();
        let b = add(&storage, "u1", "B").unwrap();
        let titles: Vec<String> = list(&storage, "u1")
            .unwrap()
            .into_iter()
            .map(|h| h.title)
            .collect();
        assert_eq!(titles, vec![a.title, b.title]);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let storage = make_storage();
        let habit = add(&storage, "u1", "Read").unwrap();

        let done = toggle(&storage, &habit.id, day("2024-06-01")).unwrap().unwrap();
        assert_eq!(done.streak, 1);
        assert!(done.completed_dates.contains(&day("2024-06-01")));

        let undone = toggle(&storage, &habit.id, day("2024-06-01")).unwrap().unwrap();
        assert_eq!(undone.streak, 0);
        assert!(undone.completed_dates.is_empty());

        assert_eq!(list(&storage, "u1").unwrap()[0], undone);
    }

    #[test]
    fn toggle_persists() {
        let storage = make_storage();
        let habit = add(&storage, "u1", "Run").unwrap();
        toggle(&storage, &habit.id, day("2024-06-01")).unwrap();
        toggle(&storage, &habit.id, day("2024-06-03")).unwrap();

        let stored = &list(&storage, "u1").unwrap()[0];
        assert_eq!(stored.streak, 2);
        assert_eq!(stored.completed_dates.len(), 2);
    }

    #[test]
    fn toggle_unknown_habit_is_no_op() {
        let storage = make_storage();
        add(&storage, "u1", "Run").unwrap();
        let raw_before = storage.backend.read(Bucket::Habits).unwrap();

        assert_eq!(toggle(&storage, "habit-missing", day("2024-06-01")).unwrap(), None);
        assert_eq!(storage.backend.read(Bucket::Habits).unwrap(), raw_before);
    }
}
