pub mod dto;
pub mod model;
pub mod repository;
pub mod rto;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use dto::create_user_dto::CreateUserDto;
use dto::update_user_dto::UpdateUserDto;
use model::user::{User, DEFAULT_ROLE};
use nanoid::nanoid;
use repository::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};
use rto::user_rto::UserRto;
use validator::Validate;

use crate::auth::rto::auth_rto::AuthRto;
use crate::auth::token::issue_token;
use crate::shared::api_error::ApiError;
use crate::shared::http_error::HttpError;
use crate::shared::rto::message_rto::MessageRto;
use crate::AppState;

#[utoipa::path(
  post,
  path = "/api/register",
  request_body = CreateUserDto,
  responses(
    (status = 201, description = "User created", body = AuthRto),
    (status = 400, description = "Missing field or email taken", body = HttpError),
    (status = 500, description = "Registration failed", body = HttpError)
  )
)]
pub async fn register_user<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  dto: web::Json<CreateUserDto>,
) -> Result<HttpResponse, ApiError> {
  const FAILED: &str = "Registration failed";

  dto.validate()?;

  // The store enforces uniqueness as well; this check only spares a bcrypt
  // round for the common case.
  match data
    .user_repository
    .find_one(FindOneProperty::Email(&dto.email))
    .await
  {
    Ok(_) => return Err(ApiError::UserAlreadyExists),
    Err(UserRepositoryError::NotFound) => {}
    Err(error) => return Err(ApiError::internal(FAILED, error)),
  }

  let password_hash = data
    .hasher
    .hash_password(&dto.password)
    .await
    .map_err(|error| ApiError::internal(FAILED, error))?;
  let user = User::from(dto.into_inner(), password_hash);

  data
    .user_repository
    .create(user.clone())
    .await
    .map_err(repository_error(FAILED))?;
  log::info!("Registered user {}", user.id);

  let token = issue_token(&data.config.jwt_secret, &user.id)
    .map_err(|error| ApiError::internal(FAILED, error))?;

  Ok(
    HttpResponse::Created()
      .content_type("application/json")
      .append_header((header::LOCATION, format!("/api/users/{}", &user.id)))
      .json(AuthRto {
        token,
        user: UserRto::from(user),
      }),
  )
}

#[utoipa::path(
  get,
  path = "/api/users",
  responses(
    (status = 200, description = "All users", body = Vec<UserRto>),
    (status = 500, description = "Failed to fetch users", body = HttpError)
  )
)]
pub async fn list_users<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
) -> Result<HttpResponse, ApiError> {
  let users = data
    .user_repository
    .find_all()
    .await
    .map_err(repository_error("Failed to fetch users"))?;

  Ok(
    HttpResponse::Ok().json(
      users.into_iter().map(UserRto::from).collect::<Vec<_>>(),
    ),
  )
}

#[utoipa::path(
  get,
  path = "/api/users/{id}",
  params(("id" = String, Path, description = "User id")),
  responses(
    (status = 200, description = "The user", body = UserRto),
    (status = 404, description = "User not found", body = HttpError),
    (status = 500, description = "Failed to fetch user", body = HttpError)
  )
)]
pub async fn get_user<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
  let user = data
    .user_repository
    .find_one(FindOneProperty::Id(&id))
    .await
    .map_err(repository_error("Failed to fetch user"))?;

  Ok(HttpResponse::Ok().json(UserRto::from(user)))
}

#[utoipa::path(
  put,
  path = "/api/users/{id}",
  params(("id" = String, Path, description = "User id")),
  request_body = UpdateUserDto,
  responses(
    (status = 200, description = "The updated user", body = UserRto),
    (status = 400, description = "Email taken by another user", body = HttpError),
    (status = 404, description = "User not found", body = HttpError),
    (status = 500, description = "Failed to update user", body = HttpError)
  )
)]
pub async fn update_user<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  id: web::Path<String>,
  dto: web::Json<UpdateUserDto>,
) -> Result<HttpResponse, ApiError> {
  const FAILED: &str = "Failed to update user";

  let mut user = data
    .user_repository
    .find_one(FindOneProperty::Id(&id))
    .await
    .map_err(repository_error(FAILED))?;

  let dto = dto.into_inner();
  let password_hash = match dto.password.as_deref() {
    Some(password) => Some(
      data
        .hasher
        .hash_password(password)
        .await
        .map_err(|error| ApiError::internal(FAILED, error))?,
    ),
    None => None,
  };
  user.apply(dto, password_hash);

  // Find-then-replace: concurrent updates of one record are last-writer-wins.
  data
    .user_repository
    .update(&user)
    .await
    .map_err(repository_error(FAILED))?;

  Ok(HttpResponse::Ok().json(UserRto::from(user)))
}

#[utoipa::path(
  delete,
  path = "/api/users/{id}",
  params(("id" = String, Path, description = "User id")),
  responses(
    (status = 200, description = "User deleted", body = MessageRto),
    (status = 404, description = "User not found", body = HttpError),
    (status = 500, description = "Failed to delete user", body = HttpError)
  )
)]
pub async fn delete_user<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
  data
    .user_repository
    .delete(&id)
    .await
    .map_err(repository_error("Failed to delete user"))?;
  log::info!("Deleted user {}", id);

  Ok(HttpResponse::Ok().json(MessageRto::from("User deleted successfully")))
}

/// Maps store errors onto client errors, hiding anything unexpected behind
/// `message`.
fn repository_error(
  message: &'static str,
) -> impl FnOnce(UserRepositoryError) -> ApiError {
  move |error| match error {
    UserRepositoryError::NotFound => ApiError::UserNotFound,
    UserRepositoryError::DuplicateEmail(_) => ApiError::UserAlreadyExists,
    error => ApiError::internal(message, error),
  }
}

impl User {
  fn from(dto: CreateUserDto, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: nanoid!(),
      name: dto.name,
      dob: dto.dob,
      email: dto.email,
      password_hash,
      role: dto.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
      status: dto.status.unwrap_or_default(),
      created_at: now,
      updated_at: now,
    }
  }

  fn apply(&mut self, dto: UpdateUserDto, password_hash: Option<String>) {
    if let Some(name) = dto.name {
      self.name = name;
    }
    if let Some(dob) = dto.dob {
      self.dob = Some(dob);
    }
    if let Some(email) = dto.email {
      self.email = email;
    }
    if let Some(password_hash) = password_hash {
      self.password_hash = password_hash;
    }
    if let Some(role) = dto.role {
      self.role = role;
    }
    if let Some(status) = dto.status {
      self.status = status;
    }
    self.updated_at = Utc::now();
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use actix_web::http::StatusCode;
  use chrono::NaiveDate;
  use fake::{
    faker::{
      internet::en::{Password, SafeEmail},
      name::raw::Name,
    },
    locales::EN,
    Fake,
  };
  use nanoid::nanoid;

  use super::*;
  use crate::{
    auth::token::decode_token,
    helpers::tests::{app_state, http_request, parse_http_response},
    shared::hash_worker::{HashWorkerError, MockHasher},
    users::{
      model::user::Status,
      repository::in_memory_user_repository::InMemoryUserRepository,
    },
  };

  fn create_dto() -> CreateUserDto {
    CreateUserDto {
      name: Name(EN).fake(),
      dob: NaiveDate::from_ymd_opt(2000, 1, 1),
      email: SafeEmail().fake(),
      password: Password(12..13).fake(),
      role: None,
      status: None,
    }
  }

  #[actix_web::test]
  async fn test_register_user_successful() {
    let jwt_secret = nanoid!();
    let repository = InMemoryUserRepository::new();
    let dto = create_dto();

    let responder = register_user(
      web::Data::new(app_state(repository.clone(), &jwt_secret)),
      web::Json(dto.clone()),
    )
    .await;
    let rto: AuthRto =
      parse_http_response(responder, &http_request(), StatusCode::CREATED)
        .await;

    let users = repository.users.read().unwrap().clone();
    assert_eq!(users.len(), 1);
    assert_eq!(rto.user.id, users[0].id);
    assert_eq!(rto.user.email, dto.email);
    assert_eq!(rto.user.role, DEFAULT_ROLE);
    assert_eq!(rto.user.status, Status::Active);
    assert_ne!(users[0].password_hash, dto.password);
    assert_eq!(
      decode_token(&jwt_secret, &rto.token).unwrap().user_id,
      users[0].id
    );
  }

  #[actix_web::test]
  async fn test_register_user_already_exists() {
    let dto = create_dto();
    let repository = InMemoryUserRepository::new();
    repository
      .users
      .write()
      .unwrap()
      .push(User::from(dto.clone(), String::new()));

    let responder = register_user(
      web::Data::new(app_state(repository.clone(), &nanoid!())),
      web::Json(dto),
    )
    .await;

    assert_eq!(repository.users.read().unwrap().len(), 1);
    let error: HttpError =
      parse_http_response(responder, &http_request(), StatusCode::BAD_REQUEST)
        .await;
    assert_eq!(error.error, "User already exists");
  }

  #[actix_web::test]
  async fn test_register_user_missing_fields() {
    let repository = InMemoryUserRepository::new();
    let dto = CreateUserDto {
      name: String::new(),
      password: String::new(),
      ..create_dto()
    };

    let responder = register_user(
      web::Data::new(app_state(repository.clone(), &nanoid!())),
      web::Json(dto),
    )
    .await;

    let error: HttpError =
      parse_http_response(responder, &http_request(), StatusCode::BAD_REQUEST)
        .await;
    assert_eq!(error.error, "Name is required, Password is required");
    assert!(repository.users.read().unwrap().is_empty());
  }

  #[actix_web::test]
  async fn test_register_user_hash_failure() {
    let mut hasher = MockHasher::new();
    hasher
      .expect_hash_password()
      .returning(|_| Err(HashWorkerError::Receive));
    let repository = InMemoryUserRepository::new();
    let mut state = app_state(repository.clone(), &nanoid!());
    state.hasher = Arc::new(hasher);

    let responder =
      register_user(web::Data::new(state), web::Json(create_dto())).await;

    let error: HttpError = parse_http_response(
      responder,
      &http_request(),
      StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert_eq!(error.error, "Registration failed");
    assert!(repository.users.read().unwrap().is_empty());
  }

  #[actix_web::test]
  async fn test_update_user_keeps_omitted_fields() {
    let repository = InMemoryUserRepository::new();
    let stored = User::from(create_dto(), "hash".to_string());
    repository.users.write().unwrap().push(stored.clone());

    let responder = update_user(
      web::Data::new(app_state(repository.clone(), &nanoid!())),
      web::Path::from(stored.id.clone()),
      web::Json(UpdateUserDto {
        status: Some(Status::Suspended),
        ..UpdateUserDto::default()
      }),
    )
    .await;
    let rto: UserRto =
      parse_http_response(responder, &http_request(), StatusCode::OK).await;

    assert_eq!(rto.status, Status::Suspended);
    assert_eq!(rto.name, stored.name);
    assert_eq!(rto.email, stored.email);
    assert_eq!(rto.dob, stored.dob);
    let users = repository.users.read().unwrap().clone();
    assert_eq!(users[0].status, Status::Suspended);
    assert_eq!(users[0].password_hash, "hash");
  }

  #[actix_web::test]
  async fn test_update_user_rehashes_password() {
    let repository = InMemoryUserRepository::new();
    let stored = User::from(create_dto(), "hash".to_string());
    repository.users.write().unwrap().push(stored.clone());

    let responder = update_user(
      web::Data::new(app_state(repository.clone(), &nanoid!())),
      web::Path::from(stored.id.clone()),
      web::Json(UpdateUserDto {
        password: Some("new-password".to_string()),
        ..UpdateUserDto::default()
      }),
    )
    .await;
    let _: UserRto =
      parse_http_response(responder, &http_request(), StatusCode::OK).await;

    let users = repository.users.read().unwrap().clone();
    assert_ne!(users[0].password_hash, "hash");
    assert!(bcrypt::verify("new-password", &users[0].password_hash).unwrap());
  }

  #[actix_web::test]
  async fn test_update_user_whitespace_overwrites() {
    let repository = InMemoryUserRepository::new();
    let stored = User::from(create_dto(), "hash".to_string());
    repository.users.write().unwrap().push(stored.clone());
    let dto: UpdateUserDto =
      serde_json::from_value(serde_json::json!({ "name": "  ", "password": " " }))
        .unwrap();

    let responder = update_user(
      web::Data::new(app_state(repository.clone(), &nanoid!())),
      web::Path::from(stored.id.clone()),
      web::Json(dto),
    )
    .await;
    let rto: UserRto =
      parse_http_response(responder, &http_request(), StatusCode::OK).await;

    assert_eq!(rto.name, "  ");
    let users = repository.users.read().unwrap().clone();
    assert_eq!(users[0].name, "  ");
    assert!(bcrypt::verify(" ", &users[0].password_hash).unwrap());
  }

  #[actix_web::test]
  async fn test_update_user_email_taken() {
    let repository = InMemoryUserRepository::new();
    let first = User::from(create_dto(), String::new());
    let second = User::from(create_dto(), String::new());
    repository
      .users
      .write()
      .unwrap()
      .extend([first.clone(), second.clone()]);

    let responder = update_user(
      web::Data::new(app_state(repository.clone(), &nanoid!())),
      web::Path::from(second.id.clone()),
      web::Json(UpdateUserDto {
        email: Some(first.email.clone()),
        ..UpdateUserDto::default()
      }),
    )
    .await;

    let error: HttpError =
      parse_http_response(responder, &http_request(), StatusCode::BAD_REQUEST)
        .await;
    assert_eq!(error.error, "User already exists");
    assert_eq!(repository.users.read().unwrap()[1].email, second.email);
  }

  #[actix_web::test]
  async fn test_update_user_not_found() {
    let responder = update_user(
      web::Data::new(app_state(InMemoryUserRepository::new(), &nanoid!())),
      web::Path::from(nanoid!()),
      web::Json(UpdateUserDto::default()),
    )
    .await;

    let error: HttpError =
      parse_http_response(responder, &http_request(), StatusCode::NOT_FOUND)
        .await;
    assert_eq!(error.error, "User not found");
  }

  #[actix_web::test]
  async fn test_get_user() {
    let repository = InMemoryUserRepository::new();
    let stored = User::from(create_dto(), String::new());
    repository.users.write().unwrap().push(stored.clone());
    let data = web::Data::new(app_state(repository, &nanoid!()));

    let responder =
      get_user(data.clone(), web::Path::from(stored.id.clone())).await;
    let rto: UserRto =
      parse_http_response(responder, &http_request(), StatusCode::OK).await;
    assert_eq!(rto, UserRto::from(stored));

    let responder = get_user(data, web::Path::from(nanoid!())).await;
    let _: HttpError =
      parse_http_response(responder, &http_request(), StatusCode::NOT_FOUND)
        .await;
  }

  #[actix_web::test]
  async fn test_list_users() {
    let repository = InMemoryUserRepository::new();
    repository.users.write().unwrap().extend([
      User::from(create_dto(), String::new()),
      User::from(create_dto(), String::new()),
    ]);

    let responder =
      list_users(web::Data::new(app_state(repository, &nanoid!()))).await;
    let rtos: Vec<UserRto> =
      parse_http_response(responder, &http_request(), StatusCode::OK).await;

    assert_eq!(rtos.len(), 2);
  }

  #[actix_web::test]
  async fn test_delete_user_twice() {
    let repository = InMemoryUserRepository::new();
    let stored = User::from(create_dto(), String::new());
    repository.users.write().unwrap().push(stored.clone());
    let data = web::Data::new(app_state(repository.clone(), &nanoid!()));

    let responder =
      delete_user(data.clone(), web::Path::from(stored.id.clone())).await;
    let rto: MessageRto =
      parse_http_response(responder, &http_request(), StatusCode::OK).await;
    assert_eq!(rto.message, "User deleted successfully");
    assert!(repository.users.read().unwrap().is_empty());

    let responder = delete_user(data, web::Path::from(stored.id)).await;
    let error: HttpError =
      parse_http_response(responder, &http_request(), StatusCode::NOT_FOUND)
        .await;
    assert_eq!(error.error, "User not found");
  }
}
