use serde::Deserialize;
use validator_derive::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginUserDto {
  #[serde(default)]
  #[validate(length(min = 1))]
  pub email: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub password: String,
  /// Compared against the stored role after parsing.
  #[serde(default)]
  #[validate(length(min = 1))]
  pub role: String,
}
