use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::role::Role;

/// Stored account. Serializes with the password hash; use `UserRto` for
/// anything that leaves the service after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub id: String,
  pub fullname: String,
  pub email: String,
  pub phone_number: String,
  pub password: String,
  pub role: Role,
  pub profile: Profile,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
  pub profile_photo: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bio: Option<String>,
  pub skills: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resume: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resume_original_name: Option<String>,
}
