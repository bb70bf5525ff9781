use std::sync::Arc;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub struct Database {
  pub pool: Arc<Pool<Postgres>>,
}

impl Database {
  pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
    let pool = prepare_pool(database_url).await?;
    Ok(Self {
      pool: Arc::new(pool),
    })
  }

  pub async fn migrate(&self) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(&*self.pool).await
  }
}

pub async fn prepare_pool(
  database_url: &str,
) -> Result<Pool<Postgres>, sqlx::Error> {
  PgPoolOptions::new()
    .max_connections(10)
    .connect(database_url)
    .await
}
