//! Single-profile authentication over the `cdm_user` bucket.
//!
//! There is no credential check: passwords are accepted and dropped. The
//! bucket holds at most one profile, so logging in or registering as someone
//! else replaces it.

use crate::error::{CuidaError, Result};
use crate::model::{new_id, ProfilePatch, UserProfile};
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};
use tracing::{debug, info, warn};

/// Return the stored profile when its email matches; otherwise create and
/// store a fresh one for `email`.
pub fn login<B: StorageBackend>(
    storage: &Storage<B>,
    email: &str,
    _password: &str,
) -> Result<UserProfile> {
    if let Some(stored) = storage.load_record::<UserProfile>(Bucket::User)? {
        if stored.email == email {
            debug!(uid = %stored.uid, "login matched stored profile");
            return Ok(stored);
        }
    }

    let profile = UserProfile::from_email(new_id("user"), email);
    storage.save_record(Bucket::User, &profile)?;
    info!(uid = %profile.uid, "created profile on login");
    Ok(profile)
}

/// Always create a fresh profile, replacing whatever is stored.
pub fn register<B: StorageBackend>(
    storage: &Storage<B>,
    email: &str,
    _password: &str,
) -> Result<UserProfile> {
    let profile = UserProfile::from_email(new_id("user"), email);
    storage.save_record(Bucket::User, &profile)?;
    info!(uid = %profile.uid, "registered profile");
    Ok(profile)
}

pub fn logout<B: StorageBackend>(storage: &Storage<B>) -> Result<()> {
    storage.clear(Bucket::User)
}

/// The stored profile, or `None` when nobody is logged in or no persistent
/// store is available.
pub fn current_user<B: StorageBackend>(storage: &Storage<B>) -> Result<Option<UserProfile>> {
    if !storage.available() {
        debug!("no persistent store available, no current user");
        return Ok(None);
    }
    storage.load_record(Bucket::User)
}

/// Merge `patch` into the stored profile.
///
/// Fails with [`CuidaError::NoProfile`] when nothing is stored. The device
/// holds a single profile, so a `uid` that does not match it still updates it.
pub fn update_profile<B: StorageBackend>(
    storage: &Storage<B>,
    uid: &str,
    patch: ProfilePatch,
) -> Result<UserProfile> {
    let stored = storage
        .load_record::<UserProfile>(Bucket::User)?
        .ok_or(CuidaError::NoProfile)?;

    if stored.uid != uid {
        warn!(requested = uid, stored = %stored.uid, "profile update for a different uid");
    }

    let updated = patch.apply(stored);
    storage.save_record(Bucket::User, &updated)?;
    debug!(uid, "profile updated");
    Ok(updated)
}
