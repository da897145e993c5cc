use devlog::{
    Devlog, SigningSecret,
    backend::{BackendImpl, database::InMemory},
    journal::{JournalEntry, NewEntry},
    user::{NewUser, UserIdentity},
};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

/// Create a Devlog over a fresh in-memory backend
pub fn test_devlog() -> Devlog {
    devlog_over(Box::new(InMemory::new()))
}

pub fn devlog_over(backend: Box<dyn BackendImpl>) -> Devlog {
    Devlog::open(backend, SigningSecret::new(TEST_SECRET).unwrap())
}

pub fn new_user(first_name: &str, email: &str, password: &str) -> NewUser {
    NewUser {
        first_name: first_name.to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Sign up and log in; returns the identity and a session token
pub async fn signed_in_user(devlog: &Devlog, first_name: &str, email: &str) -> (UserIdentity, String) {
    let identity = devlog
        .signup(&new_user(first_name, email, "pw123"))
        .await
        .expect("signup should succeed");
    let login = devlog
        .login(email, "pw123")
        .await
        .expect("login should succeed");
    (identity, login.token)
}

pub async fn create_entry(devlog: &Devlog, author: &UserIdentity, title: &str) -> JournalEntry {
    devlog
        .create_entry(
            author,
            NewEntry {
                journal_title: title.to_string(),
                journal_content: "notes".to_string(),
                journal_tags: vec!["rust".to_string()],
                ..Default::default()
            },
        )
        .await
        .expect("entry creation should succeed")
}
