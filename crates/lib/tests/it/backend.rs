//! Backend persistence across reopen.

use devlog::backend::database::InMemory;

use crate::helpers::*;

#[tokio::test]
async fn in_memory_snapshot_keeps_sessions_and_sharing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devlog.json");

    let devlog = test_devlog();
    let (alice, token) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let entry = create_entry(&devlog, &alice, "persisted").await;
    devlog
        .update_visibility(&entry.uuid, true, &[], "a@x.com")
        .await
        .unwrap();
    devlog.logout(&token).await.unwrap();

    let in_memory = devlog
        .backend()
        .as_any()
        .downcast_ref::<InMemory>()
        .expect("backend should be InMemory");
    in_memory.save_to_file(&path).await.unwrap();

    let reopened = devlog_over(Box::new(InMemory::load_from_file(&path).await.unwrap()));
    assert!(!reopened.verify_session(&token).await.unwrap().is_valid());
    assert!(reopened.login("a@x.com", "pw123").await.is_ok());
    assert!(reopened.shared_entry(&entry.uuid, None).await.is_ok());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn sqlite_file_keeps_state() {
    use devlog::backend::database::SqlxBackend;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devlog.db");

    let (entry_id, token) = {
        let backend = SqlxBackend::open_sqlite(&path).await.unwrap();
        let devlog = devlog_over(Box::new(backend));
        let (alice, token) = signed_in_user(&devlog, "Alice", "a@x.com").await;
        let entry = create_entry(&devlog, &alice, "on disk").await;
        devlog
            .update_visibility(&entry.uuid, false, &["b@x.com".to_string()], "a@x.com")
            .await
            .unwrap();
        devlog.logout(&token).await.unwrap();
        (entry.uuid, token)
    };

    let backend = SqlxBackend::open_sqlite(&path).await.unwrap();
    let devlog = devlog_over(Box::new(backend));
    assert!(!devlog.verify_session(&token).await.unwrap().is_valid());
    assert!(devlog.shared_entry(&entry_id, Some("b@x.com")).await.is_ok());
    assert!(devlog.shared_entry(&entry_id, None).await.is_err());
    assert!(
        devlog
            .signup(&new_user("Again", "a@x.com", "x"))
            .await
            .unwrap_err()
            .is_conflict()
    );
}
