//! # API Facade
//!
//! The API layer is a **thin facade** over one [`ServiceSet`]. It serves as the
//! single entry point for every client, whatever implementation backs it.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Holds** the implementation it was constructed with; it never selects one
//! - **Scopes** data calls by an explicit [`Session`] rather than an ambient
//!   "current user"
//! - **Normalizes inputs** (raw mood numbers into [`MoodValue`], default limits)
//! - **Derives views** such as the mood chart and the tip of the day
//!
//! ## What the API Does NOT Do
//!
//! - **Persistence logic**: that belongs in `commands/*.rs`
//! - **Presentation**: it returns data structures, not strings
//! - **Caller policies**: e.g. it reports remaining priority slots but still
//!   accepts a fourth priority
//!
//! ## Sessions
//!
//! [`CuidaApi::session`] turns the stored profile into a [`Session`]. Clients
//! keep it and pass it to each data call; [`CuidaApi::require_session`] fails
//! with [`CuidaError::NotLoggedIn`] when nobody is logged in.
//!
//! ## Generic Over ServiceSet
//!
//! - Production: `CuidaApi<LocalService<FsBackend>>`
//! - Testing: `CuidaApi<LocalService<MemBackend>>`

use crate::commands::insights::{self, ChartPoint};
use crate::commands::{diary, moods};
use crate::error::{CuidaError, Result};
use crate::model::{
    DiaryEntry, Feature, Habit, MoodEntry, MoodValue, NewDiaryEntry, PriorityItem, ProfilePatch,
    Theme, UserProfile, DAILY_PRIORITY_LIMIT,
};
use crate::services::ServiceSet;
use crate::session::Session;
use crate::store::BucketReport;
use chrono::NaiveDate;
use tracing::debug;

/// Default page sizes for list calls made without an explicit limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    pub moods: usize,
    pub diary: usize,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            moods: moods::DEFAULT_LIMIT,
            diary: diary::DEFAULT_LIMIT,
        }
    }
}

/// The main API facade.
///
/// Generic over `ServiceSet` so the implementation is chosen by whoever builds it.
pub struct CuidaApi<S: ServiceSet> {
    services: S,
    limits: ListLimits,
}

impl<S: ServiceSet> CuidaApi<S> {
    pub fn new(services: S) -> Self {
        Self {
            services,
            limits: ListLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ListLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    // --- Auth ---

    pub fn register(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        self.services.register_with_email(email, password)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        self.services.login_with_email(email, password)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.services.logout()
    }

    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        self.services.current_user()
    }

    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.services.current_user()?.as_ref().map(Session::from))
    }

    pub fn require_session(&self) -> Result<Session> {
        self.session()?.ok_or(CuidaError::NotLoggedIn)
    }

    /// The session's profile. Fails with `NotLoggedIn` if it is no longer stored.
    /// The profile behind `session`. A stored profile with another uid means the
    /// session is stale.
    pub fn profile(&self, session: &Session) -> Result<UserProfile> {
        self.services
            .get_user_profile(session.user_id())?
            .filter(|profile| profile.uid == session.user_id())
            .ok_or(CuidaError::NotLoggedIn)
    }

    pub fn update_profile(
        &mut self,
        session: &Session,
        patch: ProfilePatch,
    ) -> Result<UserProfile> {
        self.services.update_profile(session.user_id(), patch)
    }

    // --- Moods ---

    pub fn add_mood(
        &mut self,
        session: &Session,
        value: u8,
        comment: Option<String>,
    ) -> Result<MoodEntry> {
        let value = MoodValue::try_from(value)?;
        self.services.add_mood(session.user_id(), value, comment)
    }

    pub fn moods(&self, session: &Session, limit: Option<usize>) -> Result<Vec<MoodEntry>> {
        let limit = limit.unwrap_or(self.limits.moods);
        self.services.get_moods(session.user_id(), limit)
    }

    /// Chart of the latest week of moods, oldest first.
    pub fn mood_chart(&self, session: &Session, today: NaiveDate) -> Result<Vec<ChartPoint>> {
        let recent = self
            .services
            .get_moods(session.user_id(), insights::CHART_DAYS)?;
        Ok(insights::mood_chart(&recent, today))
    }

    // --- Priorities ---

    pub fn add_priority(
        &mut self,
        session: &Session,
        text: &str,
        date: NaiveDate,
    ) -> Result<PriorityItem> {
        self.services.add_priority(session.user_id(), text, date)
    }

    pub fn priorities(&self, session: &Session, date: NaiveDate) -> Result<Vec<PriorityItem>> {
        self.services.get_priorities(session.user_id(), date)
    }

    /// How many more priorities fit in the day's limit.
    pub fn remaining_priority_slots(&self, session: &Session, date: NaiveDate) -> Result<usize> {
        let taken = self.priorities(session, date)?.len();
        Ok(DAILY_PRIORITY_LIMIT.saturating_sub(taken))
    }

    pub fn toggle_priority(&mut self, id: &str, completed: bool) -> Result<bool> {
        self.services.toggle_priority(id, completed)
    }

    pub fn delete_priority(&mut self, id: &str) -> Result<bool> {
        self.services.delete_priority(id)
    }

    // --- Diary ---

    pub fn add_diary_entry(
        &mut self,
        session: &Session,
        entry: NewDiaryEntry,
    ) -> Result<DiaryEntry> {
        self.services.add_diary_entry(session.user_id(), entry)
    }

    pub fn diary_entries(
        &self,
        session: &Session,
        limit: Option<usize>,
    ) -> Result<Vec<DiaryEntry>> {
        let limit = limit.unwrap_or(self.limits.diary);
        self.services.get_diary_entries(session.user_id(), limit)
    }

    // --- Habits ---

    pub fn add_habit(&mut self, session: &Session, title: &str) -> Result<Habit> {
        self.services.add_habit(session.user_id(), title)
    }

    pub fn habits(&self, session: &Session) -> Result<Vec<Habit>> {
        self.services.get_habits(session.user_id())
    }

    pub fn toggle_habit(&mut self, habit_id: &str, date: NaiveDate) -> Result<Option<Habit>> {
        self.services.toggle_habit(habit_id, date)
    }

    // --- Preferences ---

    pub fn theme(&self) -> Result<Theme> {
        self.services.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.services.set_theme(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.services.theme()?.toggled();
        self.services.set_theme(next)?;
        debug!(theme = %next, "theme toggled");
        Ok(next)
    }

    // --- Goal-specific helpers ---

    pub fn daily_tip(&self, profile: &UserProfile, day: NaiveDate) -> &'static str {
        insights::daily_tip(profile.goal, day)
    }

    pub fn feature_unlocked(&self, profile: &UserProfile, feature: Feature) -> bool {
        feature.is_unlocked_for(profile.goal)
    }

    // --- Maintenance ---

    pub fn doctor(&self) -> Result<Vec<BucketReport>> {
        self.services.inspect()
    }
}
