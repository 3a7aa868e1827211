//! # CLI Behavior
//!
//! This is **one possible UI client** for Cuida de Mim, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output formatting.
//!
//! ## Sessions
//!
//! `register` and `login` store the profile in the data directory; every later
//! invocation picks the session back up from there. Data commands fail with
//! "Not logged in" until one of them has run.
//!
//! ## Daily Priorities
//!
//! Users pick at most three priorities per day. The library only reports the
//! remaining slots; `priority add` is where the limit is enforced.
//!
//! ## Output
//!
//! `--output text` (the default) prints styled, column-fitted text.
//! `--output json` prints the same data as JSON for scripting.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers that call the API
//! - `render`: output formatting (lines, columns, relative times, JSON)
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
