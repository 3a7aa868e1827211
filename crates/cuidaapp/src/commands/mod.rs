//! # Command Layer
//!
//! This module contains the **core business logic** of the local service.
//! Each domain lives in its own submodule as plain functions over a
//! [`Storage`](crate::store::Storage).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Read a bucket, apply the operation, write the bucket back
//! - Scope every query by the owning user's id
//! - Return plain data (`MoodEntry`, `Habit`, ...), never formatted strings
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or exit codes
//! - **Session handling**: callers pass the user id explicitly
//! - **Caller policies**: e.g. the daily priority limit is left to clients
//! - **Latency simulation**: that belongs to the service wrapper
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run
//! against [`MemBackend`](crate::store::mem_backend::MemBackend) and cover
//! every branch: not-found no-ops, ordering, limits and corrupt buckets.
//!
//! ## Command Modules
//!
//! - [`auth`]: Login, registration, logout, profile updates
//! - [`profile`]: Profile passthrough by uid
//! - [`moods`]: Mood check-ins
//! - [`priorities`]: Daily priorities
//! - [`diary`]: Emotional diary
//! - [`habits`]: Habit tracker
//! - [`theme`]: Light/dark preference
//! - [`insights`]: Mood chart and daily tips derived from stored data

pub mod auth;
pub mod diary;
pub mod habits;
pub mod insights;
pub mod moods;
pub mod priorities;
pub mod profile;
pub mod theme;

use chrono::{DateTime, Utc};

/// Sort newest first. Equal timestamps fall back to the (time-ordered) id.
pub(crate) fn sort_newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, &str)) {
    items.sort_by(|a, b| {
        let (ta, ia) = key(a);
        let (tb, ib) = key(b);
        tb.cmp(&ta).then_with(|| ib.cmp(ia))
    });
}
