//! # cuidaapp
//!
//! The persistence and service layer of Cuida de Mim, a personal wellness
//! journal: mood check-ins, daily priorities, an emotional diary and a habit
//! tracker, all stored locally as JSON.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Clients (the `cuida` CLI, tests, future UIs)            │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                     │
//! │  - Generic over one injected service implementation      │
//! │  - Explicit `Session` instead of an ambient current user │
//! │  - Insights computed from service data                   │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Services (services.rs)                                  │
//! │  - `AuthService`, `DbService`, `PreferenceService`       │
//! │  - `LocalService`: the local-storage implementation      │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Commands (commands/*)                                   │
//! │  - Business logic per domain, no I/O beyond the store    │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Store (store/*)                                         │
//! │  - Named JSON buckets over a `StorageBackend`            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is UI agnostic: functions take plain Rust values and return
//! plain data, never printing or exiting.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod latency;
pub mod model;
pub mod services;
pub mod session;
pub mod store;
