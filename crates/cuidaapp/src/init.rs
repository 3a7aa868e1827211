//! # Data Directory and Context Setup
//!
//! All buckets live in a single data directory. It is resolved once per
//! process, in this order:
//!
//! 1. An explicit override (the CLI's `--data <dir>`).
//! 2. The `CUIDA_DATA` environment variable, mostly used by tests to isolate state.
//! 3. The OS-appropriate data directory, via the `directories` crate.
//!
//! [`initialize`] then loads [`CuidaConfig`] from that directory and builds the
//! [`CuidaApi`] over the file-backed local service.
//!
//! ## Mock vs Real
//!
//! Only the local implementation exists. With `use_mock = false` the context
//! still uses it and logs a warning, so a misconfigured client keeps working
//! against local data rather than failing.

use crate::api::CuidaApi;
use crate::config::CuidaConfig;
use crate::error::{CuidaError, Result};
use crate::latency::Latency;
use crate::services::LocalService;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable overriding the data directory.
pub const DATA_ENV: &str = "CUIDA_DATA";

pub struct CuidaContext {
    pub api: CuidaApi<LocalService<FsBackend>>,
    pub config: CuidaConfig,
    pub data_dir: PathBuf,
}

/// Pick the data directory: override, then `CUIDA_DATA`, then the platform default.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "cuidademim", "cuida")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CuidaError::Config("Could not determine data directory".to_string()))
}

/// Resolve the data directory, load configuration and build the API.
///
/// The directory is not created here; the first write creates it.
pub fn initialize(data_override: Option<PathBuf>) -> Result<CuidaContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = CuidaConfig::load(&data_dir)?;
    Ok(build_context(data_dir, config))
}

/// Build the context for an already-resolved directory and configuration.
pub fn build_context(data_dir: PathBuf, config: CuidaConfig) -> CuidaContext {
    if !config.use_mock {
        warn!("use_mock is false but no remote backend exists; using local storage");
    }
    let latency = if config.simulate_latency {
        Latency::simulated()
    } else {
        Latency::none()
    };
    debug!(
        data_dir = %data_dir.display(),
        simulate_latency = config.simulate_latency,
        "initializing"
    );

    let service = LocalService::new(FsBackend::new(data_dir.clone()), latency);
    let api = CuidaApi::new(service).with_limits(config.list_limits());

    CuidaContext {
        api,
        config,
        data_dir,
    }
}
