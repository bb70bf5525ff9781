use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Role {
  #[serde(rename = "candidate")]
  Candidate,
  #[serde(rename = "recruiter")]
  Recruiter,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Candidate => "candidate",
      Role::Recruiter => "recruiter",
    }
  }
}

impl FromStr for Role {
  type Err = UnknownRole;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "candidate" => Ok(Role::Candidate),
      "recruiter" => Ok(Role::Recruiter),
      other => Err(UnknownRole(other.to_string())),
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
