use serde::{Deserialize, Serialize};

use crate::shared::role::Role;
use crate::users::model::user::Profile;

/// User as returned to clients: no password hash, no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRto {
  #[serde(rename = "_id")]
  pub id: String,
  pub fullname: String,
  pub email: String,
  pub phone_number: String,
  pub role: Role,
  pub profile: Profile,
}
