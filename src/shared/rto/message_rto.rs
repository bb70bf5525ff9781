use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRto {
  pub message: String,
  pub success: bool,
}

impl From<&str> for MessageRto {
  fn from(message: &str) -> Self {
    Self {
      message: String::from(message),
      success: true,
    }
  }
}
