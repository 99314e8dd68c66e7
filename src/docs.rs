use utoipa::OpenApi;

use crate::auth::{dto::login_dto::LoginDto, rto::auth_rto::AuthRto};
use crate::shared::{
  handlers::HealthCheckStats, http_error::HttpError,
  rto::message_rto::MessageRto,
};
use crate::users::{
  dto::{create_user_dto::CreateUserDto, update_user_dto::UpdateUserDto},
  model::user::Status,
  rto::user_rto::UserRto,
};

#[derive(OpenApi)]
#[openapi(
  paths(
    crate::users::register_user,
    crate::auth::auth_login,
    crate::users::list_users,
    crate::users::get_user,
    crate::users::update_user,
    crate::users::delete_user,
    crate::shared::handlers::check_health,
  ),
  components(schemas(
    AuthRto,
    CreateUserDto,
    HealthCheckStats,
    HttpError,
    LoginDto,
    MessageRto,
    Status,
    UpdateUserDto,
    UserRto,
  )),
  info(title = "user-admin", description = "User management API")
)]
pub struct ApiDoc;
