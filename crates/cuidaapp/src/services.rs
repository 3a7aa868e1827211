//! # Service Interfaces
//!
//! The contracts clients rely on, independent of where data lives:
//! - [`AuthService`]: the device profile and its lifecycle
//! - [`DbService`]: per-user moods, priorities, diary entries and habits
//! - [`PreferenceService`]: UI preferences
//! - [`ServiceSet`]: one coherent implementation of all of the above
//!
//! [`CuidaApi`](crate::api::CuidaApi) is built with exactly one `ServiceSet`
//! and never picks an implementation itself, so the backing store can change
//! without touching calling code.
//!
//! ## Local Implementation
//!
//! [`LocalService`] keeps everything in a [`Storage`] bucket set and delegates
//! each call to the matching [`commands`](crate::commands) function, pausing
//! first when simulated latency is on.

use crate::commands;
use crate::error::Result;
use crate::latency::{CallKind, Latency};
use crate::model::{
    DiaryEntry, Habit, MoodEntry, MoodValue, NewDiaryEntry, PriorityItem, ProfilePatch, Theme,
    UserProfile,
};
use crate::store::backend::StorageBackend;
use crate::store::{BucketReport, Storage};
use chrono::NaiveDate;

pub trait AuthService {
    /// Return the stored profile with this email, or create one. The password is not checked.
    fn login_with_email(&mut self, email: &str, password: &str) -> Result<UserProfile>;

    /// Create a fresh profile, replacing any stored one.
    fn register_with_email(&mut self, email: &str, password: &str) -> Result<UserProfile>;

    fn logout(&mut self) -> Result<()>;

    /// The logged-in profile, if any. Never fails just because no store exists.
    fn current_user(&self) -> Result<Option<UserProfile>>;

    /// Shallow-merge `patch` into the stored profile.
    fn update_profile(&mut self, uid: &str, patch: ProfilePatch) -> Result<UserProfile>;
}

pub trait DbService {
    // --- Moods ---

    fn add_mood(
        &mut self,
        user_id: &str,
        value: MoodValue,
        comment: Option<String>,
    ) -> Result<MoodEntry>;

    /// Newest first, at most `limit`.
    fn get_moods(&self, user_id: &str, limit: usize) -> Result<Vec<MoodEntry>>;

    // --- Priorities ---

    fn add_priority(&mut self, user_id: &str, text: &str, date: NaiveDate)
        -> Result<PriorityItem>;

    fn get_priorities(&self, user_id: &str, date: NaiveDate) -> Result<Vec<PriorityItem>>;

    /// Returns whether a priority with this id existed.
    fn toggle_priority(&mut self, id: &str, completed: bool) -> Result<bool>;

    /// Returns whether a priority with this id existed.
    fn delete_priority(&mut self, id: &str) -> Result<bool>;

    // --- Diary ---

    fn add_diary_entry(&mut self, user_id: &str, entry: NewDiaryEntry) -> Result<DiaryEntry>;

    /// Newest first, at most `limit`.
    fn get_diary_entries(&self, user_id: &str, limit: usize) -> Result<Vec<DiaryEntry>>;

    // --- Habits ---

    fn add_habit(&mut self, user_id: &str, title: &str) -> Result<Habit>;

    fn get_habits(&self, user_id: &str) -> Result<Vec<Habit>>;

    /// Returns the updated habit, or `None` for an unknown id.
    fn toggle_habit(&mut self, habit_id: &str, date: NaiveDate) -> Result<Option<Habit>>;

    // --- User data ---

    fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>>;

    fn create_user_profile(&mut self, profile: &UserProfile) -> Result<()>;
}

pub trait PreferenceService {
    fn theme(&self) -> Result<Theme>;

    fn set_theme(&mut self, theme: Theme) -> Result<()>;
}

/// A complete backend: every service from one implementation.
pub trait ServiceSet: AuthService + DbService + PreferenceService {
    /// Report the health of the underlying storage.
    fn inspect(&self) -> Result<Vec<BucketReport>>;
}

/// The local-storage implementation of every service.
pub struct LocalService<B: StorageBackend> {
    storage: Storage<B>,
    latency: Latency,
}

impl<B: StorageBackend> LocalService<B> {
    pub fn new(backend: B, latency: Latency) -> Self {
        Self {
            storage: Storage::with_backend(backend),
            latency,
        }
    }

    pub fn storage(&self) -> &Storage<B> {
        &self.storage
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }
}

impl<B: StorageBackend> AuthService for LocalService<B> {
    fn login_with_email(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        self.latency.pause(CallKind::Auth);
        commands::auth::login(&self.storage, email, password)
    }

    fn register_with_email(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        self.latency.pause(CallKind::Auth);
        commands::auth::register(&self.storage, email, password)
    }

    fn logout(&mut self) -> Result<()> {
        self.latency.pause(CallKind::Quick);
        commands::auth::logout(&self.storage)
    }

    fn current_user(&self) -> Result<Option<UserProfile>> {
        commands::auth::current_user(&self.storage)
    }

    fn update_profile(&mut self, uid: &str, patch: ProfilePatch) -> Result<UserProfile> {
        self.latency.pause(CallKind::Standard);
        commands::auth::update_profile(&self.storage, uid, patch)
    }
}

impl<B: StorageBackend> DbService for LocalService<B> {
    fn add_mood(
        &mut self,
        user_id: &str,
        value: MoodValue,
        comment: Option<String>,
    ) -> Result<MoodEntry> {
        self.latency.pause(CallKind::Standard);
        commands::moods::add(&self.storage, user_id, value, comment)
    }

    fn get_moods(&self, user_id: &str, limit: usize) -> Result<Vec<MoodEntry>> {
        self.latency.pause(CallKind::Standard);
        commands::moods::list(&self.storage, user_id, limit)
    }

    fn add_priority(
        &mut self,
        user_id: &str,
        text: &str,
        date: NaiveDate,
    ) -> Result<PriorityItem> {
        self.latency.pause(CallKind::Standard);
        commands::priorities::add(&self.storage, user_id, text, date)
    }

    fn get_priorities(&self, user_id: &str, date: NaiveDate) -> Result<Vec<PriorityItem>> {
        self.latency.pause(CallKind::Standard);
        commands::priorities::list(&self.storage, user_id, date)
    }

    fn toggle_priority(&mut self, id: &str, completed: bool) -> Result<bool> {
        self.latency.pause(CallKind::Quick);
        commands::priorities::toggle(&self.storage, id, completed)
    }

    fn delete_priority(&mut self, id: &str) -> Result<bool> {
        self.latency.pause(CallKind::Quick);
        commands::priorities::delete(&self.storage, id)
    }

    fn add_diary_entry(&mut self, user_id: &str, entry: NewDiaryEntry) -> Result<DiaryEntry> {
        self.latency.pause(CallKind::Standard);
        commands::diary::add(&self.storage, user_id, entry)
    }

    fn get_diary_entries(&self, user_id: &str, limit: usize) -> Result<Vec<DiaryEntry>> {
        self.latency.pause(CallKind::Standard);
        commands::diary::list(&self.storage, user_id, limit)
    }

    fn add_habit(&mut self, user_id: &str, title: &str) -> Result<Habit> {
        self.latency.pause(CallKind::Standard);
        commands::habits::add(&self.storage, user_id, title)
    }

    fn get_habits(&self, user_id: &str) -> Result<Vec<Habit>> {
        self.latency.pause(CallKind::Standard);
        commands::habits::list(&self.storage, user_id)
    }

    fn toggle_habit(&mut self, habit_id: &str, date: NaiveDate) -> Result<Option<Habit>> {
        self.latency.pause(CallKind::Quick);
        commands::habits::toggle(&self.storage, habit_id, date)
    }

    fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.latency.pause(CallKind::Quick);
        commands::profile::get(&self.storage, uid)
    }

    fn create_user_profile(&mut self, profile: &UserProfile) -> Result<()> {
        self.latency.pause(CallKind::Quick);
        commands::profile::create(&self.storage, profile)
    }
}

impl<B: StorageBackend> PreferenceService for LocalService<B> {
    fn theme(&self) -> Result<Theme> {
        commands::theme::get(&self.storage)
    }

    fn set_theme(&mut self, theme: Theme) -> Result<()> {
        commands::theme::set(&self.storage, theme)
    }
}

impl<B: StorageBackend> ServiceSet for LocalService<B> {
    fn inspect(&self) -> Result<Vec<BucketReport>> {
        self.storage.inspect()
    }
}
