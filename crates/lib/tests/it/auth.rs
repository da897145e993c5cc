//! Identity and session tests through the public `Devlog` API.

use devlog::{Devlog, SigningSecret, backend::database::InMemory, token::InvalidReason};

use crate::helpers::*;

#[tokio::test]
async fn signup_login_verify_logout() {
    let devlog = test_devlog();

    let identity = devlog
        .signup(&new_user("Jane", "jane@x.com", "pw123"))
        .await
        .unwrap();
    let login = devlog.login("jane@x.com", "pw123").await.unwrap();
    assert_eq!(login.user, identity);

    let claims = devlog
        .verify_session(&login.token)
        .await
        .unwrap()
        .into_claims()
        .expect("fresh token should verify");
    assert_eq!(claims.email, "jane@x.com");
    assert_eq!(claims.uuid, identity.uuid);
    assert_eq!(claims.exp, login.expires_at);

    devlog.logout(&login.token).await.unwrap();
    let verification = devlog.verify_session(&login.token).await.unwrap();
    assert!(!verification.is_valid());
}

#[tokio::test]
async fn duplicate_signup_creates_nothing() {
    let devlog = test_devlog();
    let first = devlog
        .signup(&new_user("Jane", "jane@x.com", "pw123"))
        .await
        .unwrap();

    let err = devlog
        .signup(&new_user("Imposter", "JANE@x.com", "other"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    // Original password still works, the imposter's does not
    let login = devlog.login("jane@x.com", "pw123").await.unwrap();
    assert_eq!(login.user.uuid, first.uuid);
    assert!(devlog.login("jane@x.com", "other").await.is_err());
}

#[tokio::test]
async fn new_login_after_logout_is_valid() {
    let devlog = test_devlog();
    let (_, old_token) = signed_in_user(&devlog, "Jane", "jane@x.com").await;
    devlog.logout(&old_token).await.unwrap();

    let fresh = devlog.login("jane@x.com", "pw123").await.unwrap();
    assert_ne!(fresh.token, old_token);
    assert!(devlog.verify_session(&fresh.token).await.unwrap().is_valid());
}

#[tokio::test]
async fn token_from_other_server_is_rejected() {
    let ours = test_devlog();
    let theirs = Devlog::open(
        Box::new(InMemory::new()),
        SigningSecret::new("a-different-secret").unwrap(),
    );
    let (_, foreign) = signed_in_user(&theirs, "Mallory", "m@x.com").await;

    let verification = ours.verify_session(&foreign).await.unwrap();
    assert_eq!(
        verification,
        devlog::token::Verification::Invalid(InvalidReason::BadSignature)
    );
}

#[tokio::test]
async fn logout_of_garbage_is_not_an_error() {
    let devlog = test_devlog();
    devlog.logout("").await.unwrap();
    devlog.logout("definitely-not-a-token").await.unwrap();
    assert_eq!(devlog.purge_expired_revocations().await.unwrap(), 0);
}
