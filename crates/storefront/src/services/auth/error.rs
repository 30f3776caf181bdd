//! Account error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during registration, login or logout.
///
/// Validation variants carry the message shown inline on the form; see
/// [`AuthError::user_message`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// A registration field was left blank.
    #[error("missing required fields")]
    MissingFields,

    /// The email address does not contain an `@`.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] bazaar_core::EmailError),

    /// One of the consent boxes was not ticked.
    #[error("consent not given")]
    ConsentRequired,

    /// The login password was left blank.
    #[error("missing password")]
    MissingPassword,

    /// No account matches the given email and password.
    #[error("account not found")]
    AccountNotFound,

    /// An account with this email already exists.
    #[error("account already exists")]
    AlreadyExists,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Storage error.
    #[error("account storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message to show next to the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Please fill in all fields",
            Self::InvalidEmail(_) => "Please enter a valid email address",
            Self::ConsentRequired => "You need to give consent to register",
            Self::MissingPassword => "Please fill in the password field",
            Self::AccountNotFound => "Customer account not found",
            Self::AlreadyExists => "An account with this email already exists",
            Self::PasswordHash | Self::Storage(_) => "Something went wrong, please try again",
        }
    }

    /// Whether this is a form validation failure rather than a server fault.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::PasswordHash | Self::Storage(_))
    }
}
