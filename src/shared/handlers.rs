use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::repository::user_repository::UserRepository;
use crate::AppState;

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckStats {
  pub database_status: String,
  pub database_name: String,
}

#[utoipa::path(
  get,
  path = "/api/health",
  responses(
    (status = 200, description = "Check the service health", body = HealthCheckStats)
  )
)]
pub async fn check_health<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
) -> impl Responder {
  let database_status = match data.user_repository.ping().await {
    Ok(()) => "connected",
    Err(error) => {
      log::warn!("Health check could not reach the store: {}", error);
      "disconnected"
    }
  };
  HttpResponse::Ok().json(HealthCheckStats {
    database_status: database_status.to_string(),
    database_name: data.user_repository.store_name().to_string(),
  })
}
