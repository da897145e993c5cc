//! Sharing-settings and share-link read tests.

use devlog::access::{DisclosureState, can_view};

use crate::helpers::*;

#[tokio::test]
async fn collaborator_scenario() {
    let devlog = test_devlog();
    let (alice, _) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let (_, _) = signed_in_user(&devlog, "Bob", "b@x.com").await;
    let entry = create_entry(&devlog, &alice, "Day 1").await;
    let id = &entry.uuid;

    devlog
        .update_visibility(id, false, &["b@x.com".to_string()], "a@x.com")
        .await
        .unwrap();

    assert!(devlog.shared_entry(id, Some("b@x.com")).await.is_ok());
    assert!(devlog.shared_entry(id, Some("c@x.com")).await.unwrap_err().is_read_denied());
    assert!(devlog.shared_entry(id, None).await.unwrap_err().is_read_denied());
}

#[tokio::test]
async fn public_entry_is_readable_anonymously() {
    let devlog = test_devlog();
    let (alice, _) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let entry = create_entry(&devlog, &alice, "Launch notes").await;

    let vis = devlog
        .update_visibility(&entry.uuid, true, &[], "a@x.com")
        .await
        .unwrap();
    assert_eq!(vis.state(), DisclosureState::Public);

    let read = devlog.shared_entry(&entry.uuid, None).await.unwrap();
    assert_eq!(read.journal_title, "Launch notes");
    assert_eq!(read.author_first_name, "Alice");
}

#[tokio::test]
async fn allow_list_survives_public_toggle() {
    let devlog = test_devlog();
    let (alice, _) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let entry = create_entry(&devlog, &alice, "t").await;
    let allowed = vec!["b@x.com".to_string()];

    devlog
        .update_visibility(&entry.uuid, true, &allowed, "a@x.com")
        .await
        .unwrap();
    let vis = devlog
        .update_visibility(&entry.uuid, false, &allowed, "a@x.com")
        .await
        .unwrap();

    assert_eq!(vis.state(), DisclosureState::Shared);
    assert!(can_view(&vis, Some("b@x.com")));
    assert!(!can_view(&vis, None));
}

#[tokio::test]
async fn allow_list_is_normalized() {
    let devlog = test_devlog();
    let (alice, _) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let entry = create_entry(&devlog, &alice, "t").await;

    let vis = devlog
        .update_visibility(
            &entry.uuid,
            false,
            &[
                " Bob@X.com".to_string(),
                "bob@x.com".to_string(),
                "".to_string(),
                "carol@x.com".to_string(),
            ],
            "a@x.com",
        )
        .await
        .unwrap();
    assert_eq!(
        vis.allowed_emails,
        vec!["bob@x.com".to_string(), "carol@x.com".to_string()]
    );
    assert!(devlog.shared_entry(&entry.uuid, Some("BOB@x.com")).await.is_ok());
}

#[tokio::test]
async fn collaborator_cannot_reshare() {
    let devlog = test_devlog();
    let (alice, _) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let entry = create_entry(&devlog, &alice, "t").await;
    devlog
        .update_visibility(&entry.uuid, false, &["b@x.com".to_string()], "a@x.com")
        .await
        .unwrap();

    let err = devlog
        .update_visibility(
            &entry.uuid,
            false,
            &["b@x.com".to_string(), "c@x.com".to_string()],
            "b@x.com",
        )
        .await
        .unwrap_err();
    assert!(err.is_permission_denied());

    // Nothing changed
    assert!(devlog.shared_entry(&entry.uuid, Some("c@x.com")).await.is_err());
}

#[tokio::test]
async fn entries_listed_newest_first() {
    let devlog = test_devlog();
    let (alice, _) = signed_in_user(&devlog, "Alice", "a@x.com").await;
    let (bob, _) = signed_in_user(&devlog, "Bob", "b@x.com").await;

    let older = devlog
        .create_entry(
            &alice,
            devlog::journal::NewEntry {
                journal_title: "older".to_string(),
                created_at: chrono::DateTime::from_timestamp(1_700_000_000, 0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let newer = create_entry(&devlog, &alice, "newer").await;
    create_entry(&devlog, &bob, "bob's").await;

    let ids: Vec<_> = devlog
        .entries_for(&alice)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.uuid)
        .collect();
    assert_eq!(ids, vec![newer.uuid, older.uuid]);
}
