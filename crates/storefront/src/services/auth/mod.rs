//! Customer accounts.
//!
//! Accounts live in the same key/value store as the cart: a JSON list under
//! [`keys::USERS`], plus [`keys::LOGGED_IN_USER`] and [`keys::TOKEN`] for the
//! single signed-in session.

mod error;

pub use error::AuthError;

use std::sync::{Arc, Mutex};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use bazaar_core::Email;

use crate::models::{Account, CurrentUser};
use crate::storage::{KeyValueStore, StorageError, keys, read_json, read_list, write_json};

/// Registration form fields.
#[derive(Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    /// Membership agreement.
    #[serde(default)]
    pub accept_terms: bool,
    /// Privacy notice.
    #[serde(default)]
    pub accept_privacy: bool,
}

/// Login form fields.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("accept_terms", &self.accept_terms)
            .field("accept_privacy", &self.accept_privacy)
            .finish()
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration, login and the current session.
#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn KeyValueStore>,
    lock: Arc<Mutex<()>>,
}

impl AccountService {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Register a new account and sign it in.
    ///
    /// Checks run in order: every field filled, email has an `@`, both
    /// consents given, email not already registered.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation as an `AuthError`, or
    /// `AuthError::Storage` / `AuthError::PasswordHash` on server faults.
    pub fn register(&self, form: RegisterForm) -> Result<CurrentUser, AuthError> {
        let required = [
            &form.first_name,
            &form.last_name,
            &form.email,
            &form.phone,
            &form.password,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(&form.email)?;

        if !form.accept_terms || !form.accept_privacy {
            return Err(AuthError::ConsentRequired);
        }

        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        let mut accounts = self.accounts()?;
        if accounts.iter().any(|account| account.email == email) {
            return Err(AuthError::AlreadyExists);
        }

        let account = Account {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email,
            phone: form.phone.trim().to_string(),
            password_hash: hash_password(&form.password)?,
            created_at: Utc::now(),
        };
        let user = CurrentUser::from(&account);

        accounts.push(account);
        write_json(self.storage.as_ref(), keys::USERS, &accounts)?;
        self.start_session(&user)?;

        tracing::info!(email = %user.email, "Account registered");
        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::MissingPassword` or
    /// `AuthError::AccountNotFound` for bad input, or `AuthError::Storage`.
    pub fn login(&self, form: &LoginForm) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(&form.email)?;
        if form.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        let account = self
            .accounts()?
            .into_iter()
            .find(|account| account.email == email)
            .ok_or(AuthError::AccountNotFound)?;
        verify_password(&form.password, &account.password_hash)?;

        let user = CurrentUser::from(&account);
        self.start_session(&user)?;

        tracing::info!(email = %user.email, "Logged in");
        Ok(user)
    }

    /// End the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the storage backend fails.
    pub fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        self.storage.remove(keys::LOGGED_IN_USER)?;
        self.storage.remove(keys::TOKEN)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The signed-in account, if any.
    ///
    /// A session marker that is not a recognisable account reads as `None`
    /// even though [`Self::is_logged_in`] still reports it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the storage backend fails.
    pub fn current_user(&self) -> Result<Option<CurrentUser>, AuthError> {
        Ok(read_json(self.storage.as_ref(), keys::LOGGED_IN_USER)?)
    }

    /// Whether someone is signed in: any non-empty `loggedInUser` marker.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the storage backend fails.
    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        let marker = self.storage.get(keys::LOGGED_IN_USER)?;
        Ok(marker.is_some_and(|value| !value.trim().is_empty()))
    }

    fn accounts(&self) -> Result<Vec<Account>, StorageError> {
        read_list(self.storage.as_ref(), keys::USERS)
    }

    fn start_session(&self, user: &CurrentUser) -> Result<(), StorageError> {
        write_json(self.storage.as_ref(), keys::LOGGED_IN_USER, user)?;
        self.storage
            .set(keys::TOKEN, &Uuid::new_v4().to_string())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::AccountNotFound)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::AccountNotFound)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> (AccountService, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (AccountService::new(storage.clone()), storage)
    }

    fn form() -> RegisterForm {
        RegisterForm {
            first_name: "Ayla".to_string(),
            last_name: "Demir".to_string(),
            email: "ayla@example.com".to_string(),
            phone: "5551234567".to_string(),
            password: "correct horse".to_string(),
            accept_terms: true,
            accept_privacy: true,
        }
    }

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_signs_in() {
        let (accounts, storage) = service();
        let user = accounts.register(form()).unwrap();

        assert_eq!(user.email.as_str(), "ayla@example.com");
        assert!(accounts.is_logged_in().unwrap());
        assert_eq!(accounts.current_user().unwrap(), Some(user));
        assert!(storage.get(keys::TOKEN).unwrap().is_some());
    }

    #[test]
    fn test_register_stores_hash_not_password() {
        let (accounts, storage) = service();
        accounts.register(form()).unwrap();

        let raw = storage.get(keys::USERS).unwrap().unwrap();
        assert!(!raw.contains("correct horse"));
        assert!(raw.contains("$argon2"));
    }

    #[test]
    fn test_register_blank_field() {
        let (accounts, _) = service();
        let err = accounts
            .register(RegisterForm {
                phone: "  ".to_string(),
                ..form()
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        assert_eq!(err.user_message(), "Please fill in all fields");
    }

    #[test]
    fn test_register_checks_fields_before_email() {
        let (accounts, _) = service();
        let err = accounts
            .register(RegisterForm {
                email: "not-an-email".to_string(),
                password: String::new(),
                ..form()
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[test]
    fn test_register_invalid_email() {
        let (accounts, _) = service();
        let err = accounts
            .register(RegisterForm {
                email: "ayla.example.com".to_string(),
                accept_terms: false,
                ..form()
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[test]
    fn test_register_requires_both_consents() {
        let (accounts, _) = service();
        let err = accounts
            .register(RegisterForm {
                accept_privacy: false,
                ..form()
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::ConsentRequired));
        assert!(!accounts.is_logged_in().unwrap());
    }

    #[test]
    fn test_register_duplicate_email() {
        let (accounts, _) = service();
        accounts.register(form()).unwrap();

        let err = accounts.register(form()).unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
        assert!(err.is_validation());
    }

    #[test]
    fn test_login_round_trip() {
        let (accounts, _) = service();
        accounts.register(form()).unwrap();
        accounts.logout().unwrap();
        assert!(!accounts.is_logged_in().unwrap());

        let user = accounts
            .login(&login_form("ayla@example.com", "correct horse"))
            .unwrap();
        assert_eq!(user.first_name, "Ayla");
        assert!(accounts.is_logged_in().unwrap());
    }

    #[test]
    fn test_login_wrong_password() {
        let (accounts, _) = service();
        accounts.register(form()).unwrap();
        accounts.logout().unwrap();

        let err = accounts
            .login(&login_form("ayla@example.com", "wrong"))
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountNotFound));
        assert_eq!(err.user_message(), "Customer account not found");
        assert!(!accounts.is_logged_in().unwrap());
    }

    #[test]
    fn test_login_validation_order() {
        let (accounts, _) = service();
        assert!(matches!(
            accounts.login(&login_form("nobody", "")),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            accounts.login(&login_form("nobody@example.com", "")),
            Err(AuthError::MissingPassword)
        ));
        assert!(matches!(
            accounts.login(&login_form("nobody@example.com", "secret")),
            Err(AuthError::AccountNotFound)
        ));
    }

    #[test]
    fn test_form_debug_redacts_password() {
        let debug = format!("{:?} {:?}", form(), login_form("a@b", "hunter2"));
        assert!(!debug.contains("correct horse"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_logout_removes_session_keys() {
        let (accounts, storage) = service();
        accounts.register(form()).unwrap();
        accounts.logout().unwrap();

        assert_eq!(storage.get(keys::LOGGED_IN_USER).unwrap(), None);
        assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
        // Logging out twice is fine
        accounts.logout().unwrap();
    }

    #[test]
    fn test_any_non_empty_marker_counts_as_logged_in() {
        let (accounts, storage) = service();
        storage
            .set(keys::LOGGED_IN_USER, r#"{"name":"Ayla","email":"a@b.c"}"#)
            .unwrap();
        storage.set(keys::TOKEN, "logged_in_token").unwrap();

        assert!(accounts.is_logged_in().unwrap());
        assert_eq!(accounts.current_user().unwrap(), None);
    }

    #[test]
    fn test_blank_marker_is_logged_out() {
        let (accounts, storage) = service();
        storage.set(keys::LOGGED_IN_USER, "  ").unwrap();
        assert!(!accounts.is_logged_in().unwrap());
    }
}
