//!
//! The `Devlog` handle.
//!
//! Every operation the HTTP boundary exposes is a method here. Handlers resolve
//! the caller through [`Devlog::verify_session`] and pass the resulting identity
//! (or email) in; this module applies the ownership and visibility rules.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    Clock, Result, SystemClock,
    access::{AccessError, EntryVisibility, can_manage, can_view, normalize_allowed_emails},
    backend::BackendImpl,
    email::{looks_like_email, normalize_email},
    journal::{EntryId, EntryUpdate, JournalEntry, JournalError, NewEntry},
    token::{SigningSecret, TokenService, Verification},
    user::{
        NewUser, UserError, UserIdentity, UserRecord,
        crypto::{hash_password, verify_against_dummy, verify_password},
    },
};


/// Result of a successful login.
#[derive(Clone, Debug)]
pub struct LoginOutcome {
    /// Signed session token for the cookie
    pub token: String,
    /// Expiry of `token` (Unix seconds)
    pub expires_at: i64,
    pub user: UserIdentity,
}

/// Internal state for Devlog
///
/// Devlog itself is just a cheap-to-clone handle wrapping `Arc<DevlogInternal>`.
struct DevlogInternal {
    backend: Arc<dyn BackendImpl>,
    tokens: TokenService,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DevlogInternal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevlogInternal")
            .field("backend", &self.backend.kind_name())
            .field("tokens", &self.tokens)
            .field("clock", &self.clock)
            .finish()
    }
}

/// Access-control core over a storage backend.
///
/// ## Example
///
/// ```
/// # use devlog::{Devlog, SigningSecret, backend::database::InMemory, user::NewUser};
/// # #[tokio::main]
/// # async fn main() -> devlog::Result<()> {
/// let secret = SigningSecret::new("a-long-random-server-secret")?;
/// let devlog = Devlog::open(Box::new(InMemory::new()), secret);
///
/// devlog
///     .signup(&NewUser {
///         first_name: "Jane".into(),
///         last_name: "Doe".into(),
///         email: "jane@x.com".into(),
///         password: "pw123".into(),
///     })
///     .await?;
/// let login = devlog.login("jane@x.com", "pw123").await?;
/// assert!(devlog.verify_session(&login.token).await?.is_valid());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Devlog {
    inner: Arc<DevlogInternal>,
}

impl Devlog {
    /// Build a handle over `backend`, signing tokens with `secret`.
    pub fn open(backend: Box<dyn BackendImpl>, secret: SigningSecret) -> Self {
        Self::with_clock(backend, secret, Arc::new(SystemClock))
    }

    /// Like [`Devlog::open`] but reading time from `clock`.
    #[cfg(any(test, feature = "testing"))]
    pub fn open_with_clock(
        backend: Box<dyn BackendImpl>,
        secret: SigningSecret,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_clock(backend, secret, clock)
    }

    fn with_clock(
        backend: Box<dyn BackendImpl>,
        secret: SigningSecret,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let backend: Arc<dyn BackendImpl> = Arc::from(backend);
        let tokens = TokenService::new(secret, backend.clone(), clock.clone());
        Self {
            inner: Arc::new(DevlogInternal {
                backend,
                tokens,
                clock,
            }),
        }
    }

    /// The storage backend.
    pub fn backend(&self) -> &dyn BackendImpl {
        self.inner.backend.as_ref()
    }

    /// Lifetime of issued session tokens in seconds.
    pub fn session_ttl_secs(&self) -> i64 {
        self.inner.tokens.ttl_secs()
    }

    // === Identities and sessions ===

    /// Create an identity.
    ///
    /// The email is normalized before the uniqueness check, so `Jane@X.com` and
    /// `jane@x.com` collide.
    pub async fn signup(&self, new_user: &NewUser) -> Result<UserIdentity> {
        let email = normalize_email(&new_user.email);
        let first_name = new_user.first_name.trim();
        let last_name = new_user.last_name.trim();

        let invalid = |reason: &str| -> crate::Error {
            UserError::InvalidSignup {
                reason: reason.to_string(),
            }
            .into()
        };
        if first_name.is_empty() || last_name.is_empty() {
            return Err(invalid("first_name and last_name are required"));
        }
        if !looks_like_email(&email) {
            return Err(invalid("email is not a valid address"));
        }
        if new_user.password.is_empty() {
            return Err(invalid("password is required"));
        }

        let record = UserRecord {
            uuid: uuid::Uuid::new_v4(),
            email,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash: hash_password(&new_user.password)?,
            created_at: self.inner.clock.now_secs(),
        };
        let identity = record.identity();

        self.inner.backend.insert_user(record).await?;
        info!(uuid = %identity.uuid, "Created user");
        Ok(identity)
    }

    /// Check credentials and issue a session token.
    ///
    /// An unknown email and a wrong password both fail with
    /// [`UserError::InvalidCredentials`] after the same amount of hashing work.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = normalize_email(email);

        let Some(record) = self.inner.backend.find_user_by_email(&email).await? else {
            verify_against_dummy(password);
            debug!("Login rejected");
            return Err(UserError::InvalidCredentials.into());
        };

        if let Err(e) = verify_password(password, record.password_hash()) {
            debug!("Login rejected");
            return Err(e);
        }

        let user = record.identity();
        let issued = self.inner.tokens.issue(&user)?;
        info!(uuid = %user.uuid, "User logged in");

        Ok(LoginOutcome {
            token: issued.token,
            expires_at: issued.claims.exp,
            user,
        })
    }

    /// Verify a presented session token.
    ///
    /// Rejections come back as [`Verification::Invalid`]; `Err` means storage failed.
    pub async fn verify_session(&self, token: &str) -> Result<Verification> {
        let verification = self.inner.tokens.verify(token).await?;
        if let Verification::Invalid(reason) = &verification {
            debug!(%reason, "Session token rejected");
        }
        Ok(verification)
    }

    /// Revoke a session token. Safe to call with any string, any number of times.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.inner.tokens.revoke(token).await?;
        info!("User logged out");
        Ok(())
    }

    /// Drop revocation records for tokens that have expired on their own.
    pub async fn purge_expired_revocations(&self) -> Result<u64> {
        let purged = self
            .inner
            .backend
            .purge_revocations(self.inner.clock.now_secs())
            .await?;
        if purged > 0 {
            info!(purged, "Purged expired revocation records");
        }
        Ok(purged)
    }

    // === Journal entries ===

    /// Create a private entry owned by `author`.
    pub async fn create_entry(&self, author: &UserIdentity, input: NewEntry) -> Result<JournalEntry> {
        let entry = JournalEntry::new(author, input, self.inner.clock.now_utc())?;
        self.inner.backend.insert_entry(entry.clone()).await?;
        debug!(entry_id = %entry.uuid, "Created journal entry");
        Ok(entry)
    }

    /// Entries authored by `author`, newest first.
    pub async fn entries_for(&self, author: &UserIdentity) -> Result<Vec<JournalEntry>> {
        self.inner.backend.list_entries_by_author(&author.uuid).await
    }

    /// Fetch an entry for an authenticated reader.
    pub async fn entry_for(&self, id: &EntryId, requester_email: &str) -> Result<JournalEntry> {
        let entry = self.load_entry(id).await?;
        if !can_view(&entry.visibility, Some(requester_email)) {
            return Err(AccessError::NotVisible {
                entry_id: id.clone(),
            }
            .into());
        }
        Ok(entry)
    }

    /// Replace the content of an entry. Owner only.
    pub async fn update_entry(
        &self,
        id: &EntryId,
        acting_email: &str,
        update: EntryUpdate,
    ) -> Result<JournalEntry> {
        update.validate()?;
        let mut entry = self.owned_entry(id, acting_email).await?;
        update.apply(&mut entry, self.inner.clock.now_utc());

        if !self.inner.backend.update_entry_content(&entry).await? {
            return Err(JournalError::EntryNotFound {
                entry_id: id.clone(),
            }
            .into());
        }
        Ok(entry)
    }

    /// Delete an entry. Owner only.
    pub async fn delete_entry(&self, id: &EntryId, acting_email: &str) -> Result<()> {
        self.owned_entry(id, acting_email).await?;
        if !self.inner.backend.delete_entry(id).await? {
            return Err(JournalError::EntryNotFound {
                entry_id: id.clone(),
            }
            .into());
        }
        info!(entry_id = %id, "Deleted journal entry");
        Ok(())
    }

    // === Sharing ===

    /// Replace an entry's sharing settings. Owner only.
    ///
    /// Ownership is checked before `allowed_emails` is normalized and
    /// de-duplicated; both fields are then written together.
    pub async fn update_visibility(
        &self,
        id: &EntryId,
        is_public: bool,
        allowed_emails: &[String],
        acting_email: &str,
    ) -> Result<EntryVisibility> {
        self.owned_entry(id, acting_email).await?;
        let allowed = normalize_allowed_emails(allowed_emails)?;

        let updated = self
            .inner
            .backend
            .set_visibility(id, is_public, &allowed, self.inner.clock.now_utc())
            .await?
            .ok_or_else(|| JournalError::EntryNotFound {
                entry_id: id.clone(),
            })?;

        info!(
            entry_id = %id,
            state = ?updated.visibility.state(),
            collaborators = updated.visibility.allowed_emails.len(),
            "Updated sharing settings"
        );
        Ok(updated.visibility)
    }

    /// Fetch an entry through its share link.
    ///
    /// `requester_email` is `None` for anonymous callers, who can only read
    /// public entries.
    pub async fn shared_entry(
        &self,
        id: &EntryId,
        requester_email: Option<&str>,
    ) -> Result<JournalEntry> {
        let entry = self.load_entry(id).await?;
        if !can_view(&entry.visibility, requester_email) {
            debug!(entry_id = %id, anonymous = requester_email.is_none(), "Share read denied");
            return Err(AccessError::NotShared {
                entry_id: id.clone(),
            }
            .into());
        }
        Ok(entry)
    }

    async fn load_entry(&self, id: &EntryId) -> Result<JournalEntry> {
        self.inner
            .backend
            .get_entry(id)
            .await?
            .ok_or_else(|| {
                JournalError::EntryNotFound {
                    entry_id: id.clone(),
                }
                .into()
            })
    }

    async fn owned_entry(&self, id: &EntryId, acting_email: &str) -> Result<JournalEntry> {
        let entry = self.load_entry(id).await?;
        if !can_manage(&entry.visibility, acting_email) {
            debug!(entry_id = %id, "Rejected change by non-owner");
            return Err(AccessError::NotOwner {
                entry_id: id.clone(),
            }
            .into());
        }
        Ok(entry)
    }
}
