use crate::error::Result;
use crate::model::UserProfile;
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};
use tracing::trace;

/// The stored profile, if any.
///
/// The device holds one profile, so `uid` does not select it; callers that
/// need ownership compare `profile.uid` themselves.
pub fn get<B: StorageBackend>(storage: &Storage<B>, uid: &str) -> Result<Option<UserProfile>> {
    let profile = storage.load_record::<UserProfile>(Bucket::User)?;
    trace!(uid, found = profile.is_some(), "profile lookup");
    Ok(profile)
}

/// Store `profile` as the device profile, replacing any other.
pub fn create<B: StorageBackend>(storage: &Storage<B>, profile: &UserProfile) -> Result<()> {
    storage.save_record(Bucket::User, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn create_then_get() {
        let storage = Storage::with_backend(MemBackend::new());
        let profile = UserProfile::from_email("user-7".into(), "c@z.com");
        create(&storage, &profile).unwrap();

        assert_eq!(get(&storage, "user-7").unwrap(), Some(profile));
    }

    #[test]
    fn get_returns_stored_profile_for_any_uid() {
        let storage = Storage::with_backend(MemBackend::new());
        let profile = UserProfile::from_email("user-7".into(), "c@z.com");
        create(&storage, &profile).unwrap();

        assert_eq!(get(&storage, "user-8").unwrap(), Some(profile));
    }

    #[test]
    fn get_on_empty_store() {
        let storage = Storage::with_backend(MemBackend::new());
        assert_eq!(get(&storage, "user-7").unwrap(), None);
    }
}
