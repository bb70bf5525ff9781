pub mod dto;
pub mod error;
pub mod model;
pub mod repository;
pub mod rto;

use actix_multipart::{form::MultipartForm, MultipartError};
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::error::InternalError;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use dto::login_user_dto::LoginUserDto;
use dto::register_user_dto::RegisterUserDto;
use dto::update_profile_dto::{UpdateProfileDto, UpdateProfileForm};
use error::UserError;
use model::session_token_claims::{
  SessionTokenClaims, SESSION_COOKIE, SESSION_TTL_SECONDS,
};
use model::user::{Profile, User};
use repository::user_repository::{CreateUser, UserRepository};
use rto::user_response_rto::UserResponseRto;
use rto::user_rto::UserRto;
use validator::Validate;

use crate::shared::http_error::{bad_request, server_error};
use crate::shared::media::{MediaUploader, ResourceType, UploadOptions};
use crate::shared::middleware::session_middleware::AuthenticatedUser;
use crate::shared::password::{hash_password, verify_password};
use crate::shared::role::Role;
use crate::shared::rto::message_rto::MessageRto;
use crate::AppState;

const REGISTER_FAILED: &str = "Server error";
const UPDATE_PROFILE_FAILED: &str =
  "An error occurred while updating the profile.";

pub async fn register<
  UR: UserRepository + 'static,
  MU: MediaUploader + 'static,
>(
  data: web::Data<AppState<UR, MU>>,
  payload: web::Json<RegisterUserDto>,
) -> impl Responder {
  if payload.validate().is_err() {
    return bad_request(UserError::MissingField.to_string());
  }

  // The created record goes back as stored, hash included.
  match create_account(&data, payload.into_inner()).await {
    Ok(user) => HttpResponse::Created()
      .content_type("application/json")
      .json(UserResponseRto::new("Account created successfully.", user)),
    Err(error) => failure(error, REGISTER_FAILED),
  }
}

async fn create_account<UR: UserRepository, MU: MediaUploader>(
  data: &AppState<UR, MU>,
  dto: RegisterUserDto,
) -> Result<User, UserError> {
  let role: Role = dto.role.parse().map_err(|_| UserError::InvalidRole)?;
  let password = hash_password(dto.password).await?;

  let profile_photo = match dto.profile_photo.as_deref() {
    Some(source) if !source.is_empty() => {
      data.media_uploader.upload(source).await?.secure_url
    }
    _ => String::new(),
  };

  let user = data
    .user_repository
    .create(CreateUser {
      fullname: dto.fullname,
      email: dto.email,
      phone_number: dto.phone_number,
      password,
      role,
      profile: Profile {
        profile_photo,
        ..Profile::default()
      },
    })
    .await?;
  Ok(user)
}

pub async fn login<UR: UserRepository + 'static, MU: MediaUploader + 'static>(
  data: web::Data<AppState<UR, MU>>,
  payload: web::Json<LoginUserDto>,
) -> impl Responder {
  if payload.validate().is_err() {
    return bad_request(UserError::MissingField.to_string());
  }

  match authenticate(&data, payload.into_inner()).await {
    Ok((user, token)) => HttpResponse::Ok()
      .content_type("application/json")
      .cookie(session_cookie(token, data.config.cookie_secure))
      .json(UserResponseRto::new(
        format!("Welcome back {}", user.fullname),
        UserRto::from(user),
      )),
    Err(error) if error.is_client_error() => bad_request(error.to_string()),
    Err(error) => {
      // No body on unexpected login failures.
      log::error!("Login failed: {}", error);
      HttpResponse::InternalServerError().finish()
    }
  }
}

async fn authenticate<UR: UserRepository, MU: MediaUploader>(
  data: &AppState<UR, MU>,
  dto: LoginUserDto,
) -> Result<(User, String), UserError> {
  let user = data
    .user_repository
    .find_by_email(&dto.email)
    .await?
    .ok_or(UserError::InvalidCredentials)?;

  if !verify_password(dto.password, user.password.clone()).await? {
    return Err(UserError::InvalidCredentials);
  }

  if dto.role.parse::<Role>().ok() != Some(user.role) {
    return Err(UserError::RoleMismatch);
  }

  let token = SessionTokenClaims::new(&user.id).sign(&data.config.jwt_secret)?;
  Ok((user, token))
}

pub async fn logout() -> impl Responder {
  HttpResponse::Ok()
    .content_type("application/json")
    .cookie(cleared_session_cookie())
    .json(MessageRto::from("Logged out successfully."))
}

pub async fn update_profile<
  UR: UserRepository + 'static,
  MU: MediaUploader + 'static,
>(
  data: web::Data<AppState<UR, MU>>,
  auth: AuthenticatedUser,
  MultipartForm(form): MultipartForm<UpdateProfileForm>,
) -> impl Responder {
  match apply_profile_update(&data, &auth.user_id, form.into()).await {
    Ok(user) => HttpResponse::Ok()
      .content_type("application/json")
      .json(UserResponseRto::new(
        "Profile updated successfully.",
        UserRto::from(user),
      )),
    Err(error) => failure(error, UPDATE_PROFILE_FAILED),
  }
}

/// Uploaded resume as referenced from the profile.
struct StoredResume {
  url: String,
  original_name: String,
}

async fn apply_profile_update<UR: UserRepository, MU: MediaUploader>(
  data: &AppState<UR, MU>,
  user_id: &str,
  mut dto: UpdateProfileDto,
) -> Result<User, UserError> {
  // Upload first: a failure here leaves the stored record untouched.
  let resume = match dto.resume.take() {
    Some(file) => {
      let uploaded = data
        .media_uploader
        .upload_bytes(
          file.bytes,
          &file.file_name,
          UploadOptions {
            resource_type: ResourceType::Auto,
          },
        )
        .await?;
      Some(StoredResume {
        url: uploaded.secure_url,
        original_name: file.file_name,
      })
    }
    None => None,
  };

  let mut user = data
    .user_repository
    .find_by_id(user_id)
    .await?
    .ok_or(UserError::NotFound)?;

  merge_profile_update(&mut user, dto, resume);

  let user = data.user_repository.save(&user).await?;
  Ok(user)
}

fn merge_profile_update(
  user: &mut User,
  dto: UpdateProfileDto,
  resume: Option<StoredResume>,
) {
  if let Some(fullname) = dto.fullname {
    user.fullname = fullname;
  }
  if let Some(email) = dto.email {
    user.email = email;
  }
  if let Some(phone_number) = dto.phone_number {
    user.phone_number = phone_number;
  }
  if let Some(bio) = dto.bio {
    user.profile.bio = Some(bio);
  }
  if let Some(skills) = dto.skills {
    user.profile.skills = skills;
  }
  if let Some(resume) = resume {
    log::info!("Updated resume URL: {}", resume.url);
    user.profile.resume = Some(resume.url);
    user.profile.resume_original_name = Some(resume.original_name);
  }
}

fn failure(error: UserError, fallback: &str) -> HttpResponse {
  if error.is_client_error() {
    return bad_request(error.to_string());
  }
  log::error!("{}", error);
  server_error(fallback)
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, token)
    .path("/")
    .max_age(Duration::seconds(SESSION_TTL_SECONDS))
    .same_site(SameSite::Strict)
    .http_only(true)
    .secure(secure)
    .finish()
}

fn cleared_session_cookie() -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .max_age(Duration::ZERO)
    .finish()
}

/// Malformed multipart bodies fail like any other profile update error.
pub fn multipart_error_handler(
  error: MultipartError,
  _request: &HttpRequest,
) -> actix_web::Error {
  log::error!("Rejected profile update body: {}", error);
  InternalError::from_response(error, server_error(UPDATE_PROFILE_FAILED))
    .into()
}

// Transform User domain to RTO
impl From<User> for UserRto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      fullname: user.fullname,
      email: user.email,
      phone_number: user.phone_number,
      role: user.role,
      profile: user.profile,
    }
  }
}
