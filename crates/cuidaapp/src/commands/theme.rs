use crate::error::Result;
use crate::model::Theme;
use crate::store::backend::StorageBackend;
use crate::store::{Bucket, Storage};

/// The saved theme; light when nothing is saved.
pub fn get<B: StorageBackend>(storage: &Storage<B>) -> Result<Theme> {
    Ok(storage.load_record(Bucket::Theme)?.unwrap_or_default())
}

pub fn set<B: StorageBackend>(storage: &Storage<B>, theme: Theme) -> Result<()> {
    storage.save_record(Bucket::Theme, &theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn defaults_to_light_and_persists() {
        let storage = Storage::with_backend(MemBackend::new());
        assert_eq!(get(&storage).unwrap(), Theme::Light);

        set(&storage, Theme::Dark).unwrap();
        assert_eq!(get(&storage).unwrap(), Theme::Dark);
        assert_eq!(get(&storage).unwrap().toggled(), Theme::Light);
    }
}
