use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponseRto<U> {
  pub message: String,
  pub success: bool,
  pub user: U,
}

impl<U> UserResponseRto<U> {
  pub fn new(message: impl Into<String>, user: U) -> Self {
    Self {
      message: message.into(),
      success: true,
      user,
    }
  }
}
