use thiserror::Error;

use crate::shared::{media::UploadError, password::PasswordError};
use crate::users::repository::user_repository::UserRepositoryError;

/// Outcome of an account operation that did not succeed. Missing fields, bad
/// credentials, role mismatch and unknown users are answered with 400 and the
/// message itself, the rest are logged and hidden behind each endpoint's
/// generic failure.
#[derive(Debug, Error)]
pub enum UserError {
  #[error("Something is missing")]
  MissingField,

  // Unknown email and wrong password share this message.
  #[error("Incorrect email or password.")]
  InvalidCredentials,

  #[error("Account doesn't exist with current role.")]
  RoleMismatch,

  #[error("Invalid role.")]
  InvalidRole,

  #[error("User not found.")]
  NotFound,

  #[error(transparent)]
  Repository(#[from] UserRepositoryError),

  #[error("Upload failed: {0}")]
  Upload(#[from] UploadError),

  #[error(transparent)]
  Password(#[from] PasswordError),

  #[error("Token signing failed: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),
}

impl UserError {
  pub fn is_client_error(&self) -> bool {
    matches!(
      self,
      UserError::MissingField
        | UserError::InvalidCredentials
        | UserError::RoleMismatch
        | UserError::NotFound
    )
  }
}
