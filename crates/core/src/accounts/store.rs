//! Durable storage for the account registry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::user::UserId;

/// Serialized form of one account. Rentals are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Stored credential.
    pub password: String,
    /// Account number; absent in very old files.
    #[serde(default)]
    pub user_id: UserId,
}

/// Everything read back from, or written to, an [`AccountStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Next account number to hand out, when the store recorded one.
    pub next_user_id: Option<UserId>,
    /// Accounts in registration order.
    pub records: Vec<AccountRecord>,
    /// Rows that could not be decoded.
    pub skipped: usize,
}

/// Read/write contract for account persistence.
///
/// `save` always receives the whole registry and replaces whatever was
/// stored before.
pub trait AccountStore {
    /// Read every stored account. A store that does not exist yet is empty.
    fn load(&self) -> Result<AccountSnapshot>;

    /// Replace the stored registry with `snapshot`.
    fn save(&self, snapshot: &AccountSnapshot) -> Result<()>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Envelope {
        #[serde(default)]
        next_user_id: Option<UserId>,
        users: Vec<Value>,
    },
    Legacy(Vec<Value>),
}

#[derive(Serialize)]
struct StoredEnvelope<'a> {
    next_user_id: Option<UserId>,
    users: &'a [AccountRecord],
}

/// Account store backed by a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonAccountStore {
    path: PathBuf,
}

impl JsonAccountStore {
    /// Store accounts in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountStore for JsonAccountStore {
    fn load(&self) -> Result<AccountSnapshot> {
        if !self.path.exists() {
            debug!("no account store at {}", self.path.display());
            return Ok(AccountSnapshot::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let document: StoredDocument = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;

        let (next_user_id, rows) = match document {
            StoredDocument::Envelope {
                next_user_id,
                users,
            } => (next_user_id, users),
            StoredDocument::Legacy(users) => (None, users),
        };

        let mut snapshot = AccountSnapshot {
            next_user_id,
            ..AccountSnapshot::default()
        };
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<AccountRecord>(row) {
                Ok(record) => snapshot.records.push(record),
                Err(err) => {
                    warn!(
                        "skipping account row {index} in {}: {err}",
                        self.path.display()
                    );
                    snapshot.skipped += 1;
                }
            }
        }
        Ok(snapshot)
    }

    fn save(&self, snapshot: &AccountSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let document = StoredEnvelope {
            next_user_id: snapshot.next_user_id,
            users: &snapshot.records,
        };
        let serialised =
            serde_json::to_vec_pretty(&document).context("failed to serialize accounts")?;
        fs::write(&self.path, serialised)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn record(name: &str, email: &str, user_id: UserId) -> AccountRecord {
        AccountRecord {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            user_id,
        }
    }

    #[test]
    fn missing_file_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonAccountStore::new(dir.path().join("users.json"));
        assert_eq!(store.load()?, AccountSnapshot::default());
        Ok(())
    }

    #[test]
    fn save_then_load() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonAccountStore::new(dir.path().join("nested").join("users.json"));
        let snapshot = AccountSnapshot {
            next_user_id: Some(3),
            records: vec![record("Ada", "ada@example.com", 1), record("Bo", "bo@example.com", 2)],
            skipped: 0,
        };
        store.save(&snapshot)?;

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        assert_eq!(raw["next_user_id"], json!(3));
        assert_eq!(raw["users"][1]["email"], json!("bo@example.com"));

        assert_eq!(store.load()?, snapshot);
        Ok(())
    }

    #[test]
    fn reads_bare_list_and_skips_bad_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("users.json");
        let legacy = json!([
            {"name": "Ada", "email": "ada@example.com", "password": "pw", "user_id": 1},
            {"name": "No Email", "password": "pw"},
            {"name": "Old", "email": "old@example.com", "password": "pw"}
        ]);
        fs::write(&path, serde_json::to_vec(&legacy)?)?;

        let snapshot = JsonAccountStore::new(&path).load()?;
        assert_eq!(snapshot.next_user_id, None);
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[1].user_id, 0);
        Ok(())
    }

    #[test]
    fn corrupt_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("users.json");
        fs::write(&path, "{ not json")?;
        assert!(JsonAccountStore::new(&path).load().is_err());
        Ok(())
    }
}
