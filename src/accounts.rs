//! Local account registry and the active-session pointer.
//!
//! Accounts live under the `users` key and the session under `currentUser` (the raw email).
//! Authentication outcomes are plain booleans; only storage failures surface as errors.

use crate::errors::StorageError;
use crate::models::UserAccount;
use crate::storage::{CURRENT_USER_KEY, SharedStore, USERS_KEY, load_json, save_json};
use tracing::{info, warn};

pub struct AccountStore {
    store: SharedStore,
    current: Option<UserAccount>,
}

impl AccountStore {
    /// Creates a store with no active session. Call [`AccountStore::restore_session`] to
    /// pick up a persisted one.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    pub async fn signup(
        &mut self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<bool, StorageError> {
        let mut users = self.users();
        if users.iter().any(|user| user.email == email) {
            return Ok(false);
        }

        let account = UserAccount {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        users.push(account.clone());
        save_json(self.store.as_ref(), USERS_KEY, &users).await?;

        self.begin_session(account).await?;
        info!(email, "account created");
        Ok(true)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, StorageError> {
        let found = self
            .users()
            .into_iter()
            .find(|user| user.email == email && user.password == password);

        match found {
            Some(account) => {
                self.begin_session(account).await?;
                info!(email, "logged in");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.store.remove(CURRENT_USER_KEY).await?;
        self.current = None;
        Ok(())
    }

    /// Re-establishes the persisted session if it still names a registered account.
    pub fn restore_session(&mut self) {
        self.current = None;
        let Some(email) = self.store.get(CURRENT_USER_KEY) else {
            return;
        };

        match self.users().into_iter().find(|user| user.email == email) {
            Some(account) => {
                info!(email = %account.email, "session restored");
                self.current = Some(account);
            }
            None => warn!(email = %email, "persisted session names no account"),
        }
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn users(&self) -> Vec<UserAccount> {
        load_json(self.store.as_ref(), USERS_KEY)
    }

    async fn begin_session(&mut self, account: UserAccount) -> Result<(), StorageError> {
        self.store.set(CURRENT_USER_KEY, account.email.clone()).await?;
        self.current = Some(account);
        Ok(())
    }
}
