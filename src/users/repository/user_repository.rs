use std::sync::Arc;

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use sqlx::types::Json;
use sqlx::Row;
use sqlx::{postgres::PgRow, Pool, Postgres};
use thiserror::Error;

use crate::shared::role::{Role, UnknownRole};
use crate::users::model::user::Profile;
use crate::{shared::database::Database, users::model::user::User};

const USER_COLUMNS: &str = "id, fullname, email, phone_number, password, \
  role, profile, created_at, updated_at";

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("Database error: {0}")]
  DatabaseError(#[from] sqlx::Error),

  #[error("Stored role is invalid: {0}")]
  InvalidRole(#[from] UnknownRole),

  #[error("Email already registered: {0}")]
  DuplicateEmail(String),

  #[error("User not found: {0}")]
  NotFound(String),
}

/// Persistent collection of user records. Email uniqueness is enforced here.
pub trait UserRepository {
  async fn find_by_email(
    &self,
    email: &str,
  ) -> Result<Option<User>, UserRepositoryError>;
  async fn find_by_id(
    &self,
    id: &str,
  ) -> Result<Option<User>, UserRepositoryError>;
  async fn create(
    &self,
    create_user: CreateUser,
  ) -> Result<User, UserRepositoryError>;
  /// Writes every field of `user` back and refreshes `updated_at`.
  async fn save(&self, user: &User) -> Result<User, UserRepositoryError>;
}

pub struct UserRepositoryImpl {
  pool: Arc<Pool<Postgres>>,
}

impl UserRepositoryImpl {
  pub fn new(database: Arc<Database>) -> Self {
    Self {
      pool: database.pool.clone(),
    }
  }
}

impl UserRepository for UserRepositoryImpl {
  async fn find_by_email(
    &self,
    email: &str,
  ) -> Result<Option<User>, UserRepositoryError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1");
    sqlx::query(&query)
      .bind(email)
      .fetch_optional(&*self.pool)
      .await?
      .map(User::try_from)
      .transpose()
  }

  async fn find_by_id(
    &self,
    id: &str,
  ) -> Result<Option<User>, UserRepositoryError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1");
    sqlx::query(&query)
      .bind(id)
      .fetch_optional(&*self.pool)
      .await?
      .map(User::try_from)
      .transpose()
  }

  async fn create(
    &self,
    create_user: CreateUser,
  ) -> Result<User, UserRepositoryError> {
    let query = format!(
      r#"
      INSERT INTO users (id, fullname, email, phone_number, password, role, profile)
      VALUES ($1, $2, $3, $4, $5, $6, $7)
      RETURNING {USER_COLUMNS}
    "#
    );
    let row = sqlx::query(&query)
      .bind(nanoid!())
      .bind(&create_user.fullname)
      .bind(&create_user.email)
      .bind(&create_user.phone_number)
      .bind(&create_user.password)
      .bind(create_user.role.as_str())
      .bind(Json(&create_user.profile))
      .fetch_one(&*self.pool)
      .await
      .map_err(|error| map_unique_violation(error, &create_user.email))?;
    User::try_from(row)
  }

  async fn save(&self, user: &User) -> Result<User, UserRepositoryError> {
    let query = format!(
      r#"
      UPDATE users
      SET fullname = $2, email = $3, phone_number = $4, password = $5,
          role = $6, profile = $7, updated_at = NOW()
      WHERE id = $1
      RETURNING {USER_COLUMNS}
    "#
    );
    sqlx::query(&query)
      .bind(&user.id)
      .bind(&user.fullname)
      .bind(&user.email)
      .bind(&user.phone_number)
      .bind(&user.password)
      .bind(user.role.as_str())
      .bind(Json(&user.profile))
      .fetch_optional(&*self.pool)
      .await
      .map_err(|error| map_unique_violation(error, &user.email))?
      .map(User::try_from)
      .unwrap_or_else(|| Err(UserRepositoryError::NotFound(user.id.clone())))
  }
}

fn map_unique_violation(error: sqlx::Error, email: &str) -> UserRepositoryError {
  match error {
    sqlx::Error::Database(ref database_error)
      if database_error.is_unique_violation() =>
    {
      UserRepositoryError::DuplicateEmail(email.to_string())
    }
    error => UserRepositoryError::DatabaseError(error),
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
  pub fullname: String,
  pub email: String,
  pub phone_number: String,
  /// Already hashed.
  pub password: String,
  pub role: Role,
  pub profile: Profile,
}

impl TryFrom<PgRow> for User {
  type Error = UserRepositoryError;

  fn try_from(row: PgRow) -> Result<Self, Self::Error> {
    let role: String = row.try_get("role")?;
    let Json(profile) = row.try_get::<Json<Profile>, _>("profile")?;
    Ok(Self {
      id: row.try_get("id")?,
      fullname: row.try_get("fullname")?,
      email: row.try_get("email")?,
      phone_number: row.try_get("phone_number")?,
      password: row.try_get("password")?,
      role: role.parse()?,
      profile,
      created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
      updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
  }
}

#[cfg(test)]
pub mod tests {
  use chrono::Utc;
  use nanoid::nanoid;

  use super::{CreateUser, UserRepository, UserRepositoryError};
  use crate::users::model::user::User;
  use std::sync::{Arc, RwLock};

  /// Clones share the same records.
  #[derive(Clone)]
  pub struct InMemoryUserRepository {
    pub users: Arc<RwLock<Vec<User>>>,
  }

  impl InMemoryUserRepository {
    pub fn new() -> Self {
      Self {
        users: Arc::new(RwLock::new(Vec::new())),
      }
    }
  }

  impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
      &self,
      email: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
      let users = self.users.read().unwrap(); // Acquire read lock
      Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(
      &self,
      id: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
      let users = self.users.read().unwrap();
      Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn create(
      &self,
      user: CreateUser,
    ) -> Result<User, UserRepositoryError> {
      let mut users = self.users.write().unwrap(); // Acquire write lock
      if users.iter().any(|existing| existing.email == user.email) {
        return Err(UserRepositoryError::DuplicateEmail(user.email));
      }
      let now = Utc::now();
      let user = User {
        id: nanoid!(),
        fullname: user.fullname,
        email: user.email,
        phone_number: user.phone_number,
        password: user.password,
        role: user.role,
        profile: user.profile,
        created_at: now,
        updated_at: now,
      };
      users.push(user.clone());
      Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User, UserRepositoryError> {
      let mut users = self.users.write().unwrap();
      if users
        .iter()
        .any(|existing| existing.email == user.email && existing.id != user.id)
      {
        return Err(UserRepositoryError::DuplicateEmail(user.email.clone()));
      }
      let stored = users
        .iter_mut()
        .find(|existing| existing.id == user.id)
        .ok_or_else(|| UserRepositoryError::NotFound(user.id.clone()))?;
      *stored = User {
        updated_at: Utc::now(),
        ..user.clone()
      };
      Ok(stored.clone())
    }
  }

  mod in_memory {
    use super::*;
    use crate::{shared::role::Role, users::model::user::Profile};

    fn create_user(email: &str) -> CreateUser {
      CreateUser {
        fullname: "Jo".to_string(),
        email: email.to_string(),
        phone_number: "1".to_string(),
        password: "hash".to_string(),
        role: Role::Candidate,
        profile: Profile::default(),
      }
    }

    #[actix_rt::test]
    async fn test_create_assigns_id_and_rejects_duplicate_email() {
      let repository = InMemoryUserRepository::new();

      let user = repository.create(create_user("jo@x.com")).await.unwrap();
      assert!(!user.id.is_empty());

      let duplicate = repository.create(create_user("jo@x.com")).await;
      assert!(matches!(
        duplicate,
        Err(UserRepositoryError::DuplicateEmail(_))
      ));
    }

    #[actix_rt::test]
    async fn test_save_overwrites_and_finds_by_id() {
      let repository = InMemoryUserRepository::new();
      let mut user = repository.create(create_user("jo@x.com")).await.unwrap();

      user.fullname = "Joanna".to_string();
      let saved = repository.save(&user).await.unwrap();
      assert!(saved.updated_at >= user.updated_at);

      let found = repository.find_by_id(&user.id).await.unwrap().unwrap();
      assert_eq!(found.fullname, "Joanna");
      assert!(repository.find_by_id("missing").await.unwrap().is_none());
    }
  }
}
