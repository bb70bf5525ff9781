use serde::Deserialize;
use validator_derive::Validate;

/// Absent and empty required fields are both rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
  #[serde(default)]
  #[validate(length(min = 1))]
  pub fullname: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub email: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub phone_number: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub password: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub role: String,
  /// Data URI or remote URL of the avatar.
  #[serde(default)]
  pub profile_photo: Option<String>,
}
