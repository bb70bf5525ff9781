use actix_web::{error::BlockingError, web};
use thiserror::Error;

/// bcrypt work factor applied to every stored password.
pub const HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
  #[error("Hashing error: {0}")]
  HashingError(#[from] bcrypt::BcryptError),

  #[error("Blocking pool error: {0}")]
  BlockingError(#[from] BlockingError),
}

// bcrypt is CPU bound, both calls run on the blocking thread pool.

pub async fn hash_password(password: String) -> Result<String, PasswordError> {
  let hash = web::block(move || bcrypt::hash(password, HASH_COST)).await??;
  Ok(hash)
}

pub async fn verify_password(
  password: String,
  hash: String,
) -> Result<bool, PasswordError> {
  let matches = web::block(move || bcrypt::verify(password, &hash)).await??;
  Ok(matches)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[actix_rt::test]
  async fn test_hash_is_not_plaintext_and_verifies() {
    let hash = hash_password("p".to_string()).await.unwrap();

    assert_ne!(hash, "p");
    assert!(hash.starts_with("$2b$10$"));
    assert!(verify_password("p".to_string(), hash.clone()).await.unwrap());
    assert!(!verify_password("q".to_string(), hash).await.unwrap());
  }

  #[actix_rt::test]
  async fn test_verify_against_malformed_hash_fails() {
    let result =
      verify_password("p".to_string(), "not-a-hash".to_string()).await;
    assert!(matches!(result, Err(PasswordError::HashingError(_))));
  }
}
