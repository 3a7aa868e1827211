use chrono::NaiveDate;
use cuidaapp::api::CuidaApi;
use cuidaapp::error::CuidaError;
use cuidaapp::latency::Latency;
use cuidaapp::model::{Emotion, NewDiaryEntry, Theme};
use cuidaapp::services::LocalService;
use cuidaapp::session::Session;
use cuidaapp::store::backend::StorageBackend;
use cuidaapp::store::fs_backend::FsBackend;
use cuidaapp::store::{Bucket, BucketState};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

fn api_at(dir: &TempDir) -> CuidaApi<LocalService<FsBackend>> {
    CuidaApi::new(LocalService::new(
        FsBackend::new(dir.path().to_path_buf()),
        Latency::none(),
    ))
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    assert_eq!(backend.read(Bucket::Moods).unwrap(), None);

    backend.write(Bucket::Moods, "[]").unwrap();
    assert_eq!(backend.read(Bucket::Moods).unwrap(), Some("[]".to_string()));

    backend.remove(Bucket::Moods).unwrap();
    assert_eq!(backend.read(Bucket::Moods).unwrap(), None);

    // Removing again is fine
    backend.remove(Bucket::Moods).unwrap();
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();

    backend.write(Bucket::Theme, "\"dark\"").unwrap();
    backend.write(Bucket::Theme, "\"light\"").unwrap();

    let expected_path = dir.path().join("cdm_theme.json");
    assert_eq!(backend.location(Bucket::Theme), expected_path);
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "\"light\"");

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_failed_rename_leaves_no_tmp_file() {
    let (dir, backend) = setup();

    // A directory where the bucket file should be makes the rename fail
    let blocked = dir.path().join("cdm_moods.json");
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("keep"), "x").unwrap();

    let err = backend.write(Bucket::Moods, "[]").unwrap_err();
    assert!(matches!(err, CuidaError::Io(_)));
    assert!(blocked.is_dir());

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("data");
    let backend = FsBackend::new(root.clone());

    assert!(backend.available());
    backend.write(Bucket::Habits, "[]").unwrap();
    assert!(root.join("cdm_habits.json").exists());
}

#[test]
fn test_fs_backend_unavailable_when_root_is_a_file() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("not-a-dir");
    fs::write(&root, "x").unwrap();

    let backend = FsBackend::new(root);
    assert!(!backend.available());
}

#[test]
fn test_bucket_files_use_stable_keys() {
    let (dir, backend) = setup();
    for bucket in Bucket::ALL {
        assert_eq!(
            backend.location(bucket),
            dir.path().join(format!("{}.json", bucket.key()))
        );
    }
}

#[test]
fn test_data_survives_reopening() {
    let dir = TempDir::new().unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();

    let (session, habit_id) = {
        let mut api = api_at(&dir);
        api.register("a@x.com", "pw").unwrap();
        let session = api.require_session().unwrap();
        api.add_mood(&session, 4, Some("good".into())).unwrap();
        api.add_priority(&session, "Call mom", day).unwrap();
        api.add_diary_entry(
            &session,
            NewDiaryEntry::new(Emotion::Happy, "Sunday", "Lunch with family"),
        )
        .unwrap();
        let habit = api.add_habit(&session, "Read").unwrap();
        api.toggle_habit(&habit.id, day).unwrap();
        api.set_theme(Theme::Dark).unwrap();
        (session, habit.id)
    };

    let api = api_at(&dir);
    assert_eq!(api.require_session().unwrap(), session);
    assert_eq!(api.moods(&session, None).unwrap()[0].comment.as_deref(), Some("good"));
    assert_eq!(api.priorities(&session, day).unwrap()[0].text, "Call mom");
    let diary = api.diary_entries(&session, None).unwrap();
    assert_eq!(diary[0].emotion, Emotion::Happy);
    assert_eq!(diary[0].color, Emotion::Happy.color());
    let habits = api.habits(&session).unwrap();
    assert_eq!(habits[0].id, habit_id);
    assert_eq!(habits[0].streak, 1);
    assert_eq!(api.theme().unwrap(), Theme::Dark);
}

#[test]
fn test_corrupt_file_is_reported_not_overwritten() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cdm_diary.json"), "{ truncated").unwrap();

    let mut api = api_at(&dir);
    let session = Session::new("u1", "u1@x.com");

    let err = api.diary_entries(&session, None).unwrap_err();
    assert!(matches!(err, CuidaError::CorruptBucket { bucket: "cdm_diary", .. }));

    // A write must not replace the damaged file with a fresh list
    assert!(api
        .add_diary_entry(&session, NewDiaryEntry::new(Emotion::Sad, "t", "c"))
        .is_err());
    assert_eq!(
        fs::read_to_string(dir.path().join("cdm_diary.json")).unwrap(),
        "{ truncated"
    );

    let report = api.doctor().unwrap();
    let diary = report.iter().find(|r| r.bucket == "cdm_diary").unwrap();
    assert!(matches!(diary.state, BucketState::Corrupt { .. }));
    assert_eq!(diary.location, dir.path().join("cdm_diary.json"));
}
