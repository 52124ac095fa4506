//! Flat key-value account store
//!
//! Usernames map to per-account stats and a personal top-10 board. The
//! password token is basic obfuscation for a browser toy, not a security
//! boundary; nothing here should be trusted with real credentials.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::highscores::Leaderboard;

/// Why a registration or login was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    UsernameTooShort,
    PasswordTooShort,
    UsernameTaken,
    UnknownUser,
    WrongPassword,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AccountError::UsernameTooShort => "username must be at least 3 characters",
            AccountError::PasswordTooShort => "password must be at least 4 characters",
            AccountError::UsernameTaken => "username already exists",
            AccountError::UnknownUser => "username not found",
            AccountError::WrongPassword => "incorrect password",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for AccountError {}

/// Per-account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub password_token: String,
    pub best_score: u32,
    pub best_level: u32,
    pub games_played: u32,
    pub leaderboard: Leaderboard,
}

impl Account {
    fn new(password_token: String) -> Self {
        Self {
            password_token,
            best_score: 0,
            best_level: 1,
            games_played: 0,
            leaderboard: Leaderboard::new(),
        }
    }
}

/// All known accounts, persisted as one JSON blob
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountStore {
    pub accounts: HashMap<String, Account>,
}

/// 32-bit rolling string hash. Obfuscation only.
fn obfuscate(password: &str) -> String {
    let mut hash: i32 = 0;
    for c in password.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash.to_string()
}

impl AccountStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rainbow_run_accounts";

    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Usernames are trimmed before validation.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), AccountError> {
        let username = username.trim();
        if username.chars().count() < 3 {
            return Err(AccountError::UsernameTooShort);
        }
        if password.chars().count() < 4 {
            return Err(AccountError::PasswordTooShort);
        }
        if self.accounts.contains_key(username) {
            return Err(AccountError::UsernameTaken);
        }
        self.accounts
            .insert(username.to_string(), Account::new(obfuscate(password)));
        Ok(())
    }

    /// Verify credentials for login
    pub fn login(&self, username: &str, password: &str) -> Result<(), AccountError> {
        let account = self
            .accounts
            .get(username.trim())
            .ok_or(AccountError::UnknownUser)?;
        if account.password_token != obfuscate(password) {
            return Err(AccountError::WrongPassword);
        }
        Ok(())
    }

    /// Record a finished run against an account: bumps games played, best
    /// score/level, and the personal top-10.
    pub fn record_run(
        &mut self,
        username: &str,
        score: u32,
        level: u32,
        timestamp: f64,
    ) -> Option<usize> {
        let account = self.accounts.get_mut(username)?;
        account.games_played += 1;
        account.best_score = account.best_score.max(score);
        account.best_level = account.best_level.max(level);
        account.leaderboard.add(score, level, timestamp, username)
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Load the store from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(store) = serde_json::from_str::<AccountStore>(&json) {
                    log::info!("Loaded {} accounts", store.accounts.len());
                    return store;
                }
            }
        }

        Self::new()
    }

    /// Save the store to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_validates_lengths_and_uniqueness() {
        let mut store = AccountStore::new();
        assert_eq!(
            store.register("ab", "secret"),
            Err(AccountError::UsernameTooShort)
        );
        assert_eq!(
            store.register("eric", "abc"),
            Err(AccountError::PasswordTooShort)
        );
        assert_eq!(store.register("eric", "tacos"), Ok(()));
        assert_eq!(
            store.register("eric", "other"),
            Err(AccountError::UsernameTaken)
        );
    }

    #[test]
    fn login_checks_token() {
        let mut store = AccountStore::new();
        store.register("eric", "tacos").unwrap();
        assert_eq!(store.login("eric", "tacos"), Ok(()));
        assert_eq!(
            store.login("eric", "nachos"),
            Err(AccountError::WrongPassword)
        );
        assert_eq!(
            store.login("nobody", "tacos"),
            Err(AccountError::UnknownUser)
        );
    }

    #[test]
    fn usernames_are_trimmed() {
        let mut store = AccountStore::new();
        store.register("  eric  ", "tacos").unwrap();
        assert_eq!(store.login("eric", "tacos"), Ok(()));
    }

    #[test]
    fn record_run_tracks_bests_and_top_ten() {
        let mut store = AccountStore::new();
        store.register("eric", "tacos").unwrap();

        store.record_run("eric", 500, 2, 0.0);
        store.record_run("eric", 300, 3, 1.0);

        let account = store.get("eric").unwrap();
        assert_eq!(account.games_played, 2);
        assert_eq!(account.best_score, 500);
        assert_eq!(account.best_level, 3);
        assert_eq!(account.leaderboard.entries.len(), 2);
        assert_eq!(account.leaderboard.top_score(), Some(500));
    }

    #[test]
    fn record_run_for_unknown_user_is_ignored() {
        let mut store = AccountStore::new();
        assert_eq!(store.record_run("ghost", 100, 1, 0.0), None);
    }
}
