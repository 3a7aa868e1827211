//! # Cuida CLI Architecture
//!
//! `cuida` is a terminal client for the Cuida de Mim journal. The binary is
//! intentionally thin: the CLI lives in `src/cli/`, while this file only invokes
//! `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/cuidaapp/`: the UI-agnostic library (storage, services, facade)
//! - `crates/cuida/`: this CLI, depending on `cuidaapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/cuida/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal and JSON output (render.rs, styles.rs)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/cuidaapp/src/api.rs)                     │
//! │  - Session-scoped calls over one injected service set       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Services + Commands + Store (crates/cuidaapp/src/*)        │
//! │  - Business logic and JSON buckets on disk                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the CLI layer returns plain data. The CLI is responsible
//! for argument parsing, logging setup, rendering and exit codes.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests against the in-memory backend, integration tests
//!   against temp directories.
//! - **CLI**: rendering helpers are unit tested; end-to-end tests in
//!   `tests/` run the binary with `CUIDA_DATA` pointing at a temp directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
