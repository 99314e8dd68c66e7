use actix_web::{web, HttpResponse};
use dto::login_dto::LoginDto;
use rto::auth_rto::AuthRto;
use token::issue_token;
use validator::Validate;

use crate::shared::api_error::ApiError;
use crate::shared::http_error::HttpError;
use crate::users::repository::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};
use crate::users::rto::user_rto::UserRto;
use crate::AppState;

pub mod dto;
pub mod rto;
pub mod token;

const LOGIN_FAILED: &str = "Login failed";

#[utoipa::path(
  post,
  path = "/api/login",
  request_body = LoginDto,
  responses(
    (status = 200, description = "Credentials accepted", body = AuthRto),
    (status = 400, description = "Invalid credentials", body = HttpError),
    (status = 500, description = "Login failed", body = HttpError)
  )
)]
pub async fn auth_login<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  dto: web::Json<LoginDto>,
) -> Result<HttpResponse, ApiError> {
  dto.validate()?;

  // An unknown email and a wrong password are indistinguishable to the caller.
  let user = match data
    .user_repository
    .find_one(FindOneProperty::Email(&dto.email))
    .await
  {
    Ok(user) => user,
    Err(UserRepositoryError::NotFound) => {
      return Err(ApiError::InvalidCredentials)
    }
    Err(error) => return Err(ApiError::internal(LOGIN_FAILED, error)),
  };

  let valid = data
    .hasher
    .verify_password(&dto.password, &user.password_hash)
    .await
    .map_err(|error| ApiError::internal(LOGIN_FAILED, error))?;
  if !valid {
    return Err(ApiError::InvalidCredentials);
  }

  let token = issue_token(&data.config.jwt_secret, &user.id)
    .map_err(|error| ApiError::internal(LOGIN_FAILED, error))?;

  Ok(
    HttpResponse::Ok()
      .content_type("application/json")
      .json(AuthRto {
        token,
        user: UserRto::from(user),
      }),
  )
}
