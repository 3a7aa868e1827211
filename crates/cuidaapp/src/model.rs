//! # Domain Model
//!
//! Plain records persisted in the store's buckets. No record owns another:
//! every collection is flat and keyed by the owning user's id.
//!
//! ## Wire Format
//!
//! Records serialize as camelCase JSON so that existing data directories stay
//! readable:
//! - timestamps (`createdAt`, `timestamp`) are epoch milliseconds
//! - calendar days (`date`, `completedDates`) are `YYYY-MM-DD` strings
//! - enums are lowercase strings (`"basic"`, `"anxiety"`, `"happy"`, ...)
//!
//! ## Habit Streaks
//!
//! [`Habit::streak`] is a **completion counter**: marking a day done adds one,
//! un-marking it removes one (never below zero). It is not derived from
//! `completed_dates` and can drift from calendar continuity.
//! [`Habit::current_run`] is the consecutive-day run, computed on demand.
//!
//! ## Ids
//!
//! Ids are `<prefix>-<uuid v7>`: time-ordered like the millisecond ids of
//! earlier data, but unique even when two records are created in the same
//! millisecond. Ids are opaque strings, so older ids remain valid.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CuidaError;

/// Maximum number of priorities a user picks for one day.
///
/// Callers enforce it; the store accepts any number.
pub const DAILY_PRIORITY_LIMIT: usize = 3;

/// Generate a new time-based record id, e.g. `mood-0190f1c2-...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::now_v7())
}

/// Current time truncated to whole milliseconds, the precision records persist with.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGoal {
    Anxiety,
    Focus,
    Productivity,
}

impl UserGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserGoal::Anxiety => "anxiety",
            UserGoal::Focus => "focus",
            UserGoal::Productivity => "productivity",
        }
    }
}

impl fmt::Display for UserGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserGoal {
    type Err = CuidaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anxiety" => Ok(UserGoal::Anxiety),
            "focus" => Ok(UserGoal::Focus),
            "productivity" => Ok(UserGoal::Productivity),
            other => Err(CuidaError::InvalidInput(format!(
                "unknown goal '{}' (expected anxiety, focus or productivity)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Basic,
    Premium,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Basic => f.write_str("basic"),
            Plan::Premium => f.write_str("premium"),
        }
    }
}

impl FromStr for Plan {
    type Err = CuidaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(CuidaError::InvalidInput(format!(
                "unknown plan '{}' (expected basic or premium)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<UserGoal>,
    #[serde(default)]
    pub plan: Plan,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub level: u32,
    pub xp: u64,
    #[serde(default)]
    pub badges: BTreeSet<String>,
}

impl UserProfile {
    /// A fresh basic-plan profile seeded from an email address.
    ///
    /// The display name is the local part of the address.
    pub fn from_email(uid: String, email: &str) -> Self {
        Self {
            uid,
            email: email.to_string(),
            display_name: Some(email_local_part(email).to_string()),
            photo_url: None,
            bio: None,
            age_range: None,
            goal: None,
            plan: Plan::Basic,
            created_at: now_millis(),
            level: 1,
            xp: 0,
            badges: BTreeSet::new(),
        }
    }

    /// First word of the display name, or the email's local part.
    pub fn first_name(&self) -> &str {
        self.display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .unwrap_or_else(|| email_local_part(&self.email))
    }
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// A partial profile update. Present fields overwrite, absent ones are kept.
///
/// `uid` and `created_at` identify the profile and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<UserGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<BTreeSet<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_goal(mut self, goal: UserGoal) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Shallow merge onto `profile`.
    pub fn apply(self, mut profile: UserProfile) -> UserProfile {
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(name) = self.display_name {
            profile.display_name = Some(name);
        }
        if let Some(url) = self.photo_url {
            profile.photo_url = Some(url);
        }
        if let Some(bio) = self.bio {
            profile.bio = Some(bio);
        }
        if let Some(range) = self.age_range {
            profile.age_range = Some(range);
        }
        if let Some(goal) = self.goal {
            profile.goal = Some(goal);
        }
        if let Some(plan) = self.plan {
            profile.plan = plan;
        }
        if let Some(level) = self.level {
            profile.level = level;
        }
        if let Some(xp) = self.xp {
            profile.xp = xp;
        }
        if let Some(badges) = self.badges {
            profile.badges = badges;
        }
        profile
    }
}

/// Mood on an ordinal 1..=5 scale, 1 being the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodValue(u8);

impl MoodValue {
    pub const NEUTRAL: MoodValue = MoodValue(3);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MoodValue {
    type Error = CuidaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(MoodValue(value))
        } else {
            Err(CuidaError::InvalidMood(value))
        }
    }
}

impl From<MoodValue> for u8 {
    fn from(value: MoodValue) -> Self {
        value.0
    }
}

impl fmt::Display for MoodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub value: MoodValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityItem {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub completed: bool,
    pub date: NaiveDate,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Calm,
    Neutral,
    Sad,
    Anxious,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Calm,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Anxious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Calm => "calm",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Anxious => "anxious",
        }
    }

    /// Display color for entries tagged with this emotion.
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Happy => "#22c55e",
            Emotion::Calm => "#3b82f6",
            Emotion::Neutral => "#9ca3af",
            Emotion::Sad => "#6366f1",
            Emotion::Anxious => "#ef4444",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = CuidaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| {
                CuidaError::InvalidInput(format!(
                    "unknown emotion '{}' (expected happy, calm, neutral, sad or anxious)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    pub user_id: String,
    pub emotion: Emotion,
    pub color: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Diary entry as submitted by a client; the store assigns id, owner and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiaryEntry {
    pub emotion: Emotion,
    pub color: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl NewDiaryEntry {
    /// Entry colored with the emotion's palette color and no tags.
    pub fn new(emotion: Emotion, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            emotion,
            color: emotion.color().to_string(),
            title: title.into(),
            content: content.into(),
            tags: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub streak: u32,
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: new_id("habit"),
            user_id: user_id.into(),
            title: title.into(),
            frequency: Frequency::Daily,
            streak: 0,
            completed_dates: BTreeSet::new(),
            created_at: now_millis(),
        }
    }

    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Flip completion for `date`. Returns whether the date is now completed.
    ///
    /// Adding a date bumps `streak` by one; removing it takes one off, floored at zero.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            self.streak = self.streak.saturating_sub(1);
            false
        } else {
            self.completed_dates.insert(date);
            self.streak += 1;
            true
        }
    }

    /// Consecutive completed days ending at `today`.
    ///
    /// An unfinished `today` does not break the run: counting then starts at
    /// yesterday.
    pub fn current_run(&self, today: NaiveDate) -> u32 {
        let mut day = if self.is_done_on(today) {
            today
        } else {
            match today.pred_opt() {
                Some(yesterday) => yesterday,
                None => return 0,
            }
        };

        let mut run = 0;
        while self.is_done_on(day) {
            run += 1;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        run
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = CuidaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CuidaError::InvalidInput(format!(
                "unknown theme '{}' (expected light or dark)",
                other
            ))),
        }
    }
}

/// Areas of the app; some are reserved for users with a matching goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Mood,
    Priorities,
    Diary,
    Habits,
    Grounding,
    FocusTimer,
    Organization,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Mood,
        Feature::Priorities,
        Feature::Diary,
        Feature::Habits,
        Feature::Grounding,
        Feature::FocusTimer,
        Feature::Organization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Mood => "mood",
            Feature::Priorities => "priorities",
            Feature::Diary => "diary",
            Feature::Habits => "habits",
            Feature::Grounding => "grounding",
            Feature::FocusTimer => "focus_timer",
            Feature::Organization => "organization",
        }
    }

    /// The goal a user must have chosen to use this feature, if any.
    pub fn required_goal(&self) -> Option<UserGoal> {
        match self {
            Feature::Grounding => Some(UserGoal::Anxiety),
            Feature::FocusTimer => Some(UserGoal::Focus),
            Feature::Organization => Some(UserGoal::Productivity),
            Feature::Mood | Feature::Priorities | Feature::Diary | Feature::Habits => None,
        }
    }

    pub fn is_unlocked_for(&self, goal: Option<UserGoal>) -> bool {
        match self.required_goal() {
            None => true,
            Some(required) => goal == Some(required),
        }
    }
}
