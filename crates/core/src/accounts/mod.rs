//! Account registry and its persistence contract.

mod store;
mod user;

use std::collections::HashMap;

use tracing::warn;

pub use store::{AccountRecord, AccountSnapshot, AccountStore, JsonAccountStore};
pub use user::{User, UserId};

use crate::error::RentalError;

/// Outcome of rebuilding the registry from a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryReport {
    /// Accounts restored.
    pub loaded: usize,
    /// Rows dropped, either undecodable or repeating an email.
    pub skipped: usize,
}

/// Lowercase and trim an email so it can be used as a registry key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Every known account, keyed by normalised email, in registration order.
///
/// Account numbers are handed out below `UserId::MAX`; once the counter
/// reaches it, registration is refused.
#[derive(Debug)]
pub struct AccountRegistry {
    users: Vec<User>,
    index: HashMap<String, usize>,
    next_user_id: UserId,
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            index: HashMap::new(),
            next_user_id: 1,
        }
    }
}

impl AccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the registry from stored records. Rentals start empty.
    pub fn restore(snapshot: AccountSnapshot) -> (Self, RegistryReport) {
        let mut registry = Self::new();
        let mut report = RegistryReport {
            loaded: 0,
            skipped: snapshot.skipped,
        };
        let mut highest: UserId = 0;

        for record in snapshot.records {
            let email = normalize_email(&record.email);
            if registry.index.contains_key(&email) {
                warn!("skipping duplicate stored account {email}");
                report.skipped += 1;
                continue;
            }
            highest = highest.max(record.user_id);
            registry.insert(User::new(record.user_id, record.name, email, record.password));
            report.loaded += 1;
        }

        let count = UserId::try_from(registry.len()).unwrap_or(UserId::MAX);
        let floor = highest.max(count).saturating_add(1);
        registry.next_user_id = snapshot.next_user_id.unwrap_or(floor).max(floor);
        if registry.next_user_id == UserId::MAX {
            warn!("account numbers exhausted; new registrations will be refused");
        }
        (registry, report)
    }

    /// Capture the registry in its stored form.
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            next_user_id: Some(self.next_user_id),
            records: self
                .users
                .iter()
                .map(|user| AccountRecord {
                    name: user.name().to_string(),
                    email: user.email().to_string(),
                    password: user.password().to_string(),
                    user_id: user.user_id(),
                })
                .collect(),
            skipped: 0,
        }
    }

    /// Create a new account with the next sequential id.
    pub fn register(
        &mut self,
        name: &str,
        password: &str,
        email: &str,
    ) -> Result<&User, RentalError> {
        let email = normalize_email(email);
        if self.index.contains_key(&email) {
            return Err(RentalError::AlreadyExists);
        }
        let user_id = self.next_user_id;
        self.next_user_id = user_id
            .checked_add(1)
            .ok_or(RentalError::RegistryFull)?;
        let slot = self.insert(User::new(user_id, name, email, password));
        Ok(&self.users[slot])
    }

    /// Check credentials and return the matching account.
    pub fn login(&self, email: &str, password: &str) -> Result<&User, RentalError> {
        let user = self.get(email).ok_or(RentalError::NotFound)?;
        if !user.verify_password(password) {
            return Err(RentalError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Look up an account by email, in any letter case.
    pub fn get(&self, email: &str) -> Option<&User> {
        let slot = *self.index.get(&normalize_email(email))?;
        self.users.get(slot)
    }

    /// Mutable lookup by email, in any letter case.
    pub fn get_mut(&mut self, email: &str) -> Option<&mut User> {
        let slot = *self.index.get(&normalize_email(email))?;
        self.users.get_mut(slot)
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no accounts exist.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Account number the next registration will receive.
    pub fn next_user_id(&self) -> UserId {
        self.next_user_id
    }

    fn insert(&mut self, user: User) -> usize {
        let slot = self.users.len();
        self.index.insert(user.email().to_string(), slot);
        self.users.push(user);
        slot
    }
}
