//! JSON snapshot persistence for the InMemory backend.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Deserializer, Serialize};
use tokio::{io::AsyncWriteExt, sync::RwLock};

use super::InMemory;
use crate::{
    Error, Result,
    backend::errors::BackendError,
    journal::{EntryId, JournalEntry},
    user::UserRecord,
};

/// The current snapshot format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

fn is_v0(v: &u8) -> bool {
    *v == 0
}

fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    users: HashMap<String, UserRecord>,
    #[serde(default)]
    revoked_tokens: HashMap<String, i64>,
    #[serde(default)]
    entries: HashMap<EntryId, JournalEntry>,
}

pub(crate) async fn save_to_file<P: AsRef<Path>>(backend: &InMemory, path: P) -> Result<()> {
    let snapshot = Snapshot {
        version: PERSISTENCE_VERSION,
        users: backend.users.read().await.clone(),
        revoked_tokens: backend.revoked_tokens.read().await.clone(),
        entries: backend.entries.read().await.clone(),
    };

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| -> Error { BackendError::SerializationFailed { source: e }.into() })?;

    // Temp file plus rename: readers see the old snapshot or the new one, never a partial write
    let path = path.as_ref();
    let temp_path = path.with_extension("json.tmp");
    write_synced(&temp_path, json.as_bytes())
        .await
        .map_err(|e| -> Error { BackendError::FileIo { source: e }.into() })?;
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| -> Error { BackendError::FileIo { source: e }.into() })
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemory> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => {
            let snapshot: Snapshot = serde_json::from_str(&json).map_err(|e| -> Error {
                BackendError::DeserializationFailed { source: e }.into()
            })?;
            Ok(InMemory {
                users: RwLock::new(snapshot.users),
                revoked_tokens: RwLock::new(snapshot.revoked_tokens),
                entries: RwLock::new(snapshot.entries),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InMemory::new()),
        Err(e) => Err(BackendError::FileIo { source: e }.into()),
    }
}
