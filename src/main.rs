mod shared;
mod users;

use std::io;
use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_multipart::form::{text::TextConfig, MultipartFormConfig};
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use shared::config::Config;
use shared::database::Database;
use shared::http_error::json_error_handler;
use shared::media::{cloudinary::CloudinaryUploader, MediaUploader};
use users::repository::user_repository::{UserRepository, UserRepositoryImpl};
use users::{login, logout, multipart_error_handler, register, update_profile};

/// Largest accepted request body (inline avatar or resume file).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

// This struct represents state
pub struct AppState<UR: UserRepository, MU: MediaUploader> {
  pub user_repository: UR,
  pub media_uploader: MU,
  pub config: Config,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  dotenvy::dotenv().ok();
  env_logger::init_from_env(Env::default().default_filter_or("info"));

  let app_config = Config::default();

  let database = Database::new(&app_config.database_url)
    .await
    .map_err(io::Error::other)?;
  database.migrate().await.map_err(io::Error::other)?;
  let database = Arc::new(database);

  let media_uploader = CloudinaryUploader::new(app_config.cloudinary.clone())
    .map_err(io::Error::other)?;

  let server_address = app_config.server_address.clone();
  log::info!("Listening on http://{}", server_address);

  HttpServer::new(move || {
    App::new().wrap(Logger::default()).configure(|cfg| {
      let user_repository = UserRepositoryImpl::new(database.clone());
      config(
        cfg,
        user_repository,
        media_uploader.clone(),
        app_config.clone(),
      )
    })
  })
  .bind(server_address)?
  .run()
  .await
}

// Function to initialize the App
fn config<UR: UserRepository + 'static, MU: MediaUploader + 'static>(
  cfg: &mut web::ServiceConfig,
  user_repository: UR,
  media_uploader: MU,
  app_config: Config,
) {
  // Rate limit per peer IP address
  let governor_config = GovernorConfigBuilder::default()
    .requests_per_second(app_config.rate_limit.per_second)
    .burst_size(app_config.rate_limit.burst)
    .finish()
    .unwrap_or_default();

  cfg
    .app_data(web::Data::new(app_config.clone()))
    .app_data(web::Data::new(AppState {
      user_repository,
      media_uploader,
      config: app_config,
    }))
    .app_data(
      web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(json_error_handler),
    )
    .app_data(
      MultipartFormConfig::default()
        .total_limit(MAX_BODY_BYTES)
        .memory_limit(MAX_BODY_BYTES)
        .error_handler(multipart_error_handler),
    )
    // Browsers usually send text parts without a content type
    .app_data(TextConfig::default().validate_content_type(false))
    .service(
      web::scope("/api/v1/user")
        .wrap(Governor::new(&governor_config))
        .route("/register", web::post().to(register::<UR, MU>))
        .route("/login", web::post().to(login::<UR, MU>))
        .route("/logout", web::get().to(logout))
        .route("/profile/update", web::post().to(update_profile::<UR, MU>)),
    );
}
