mod auth;
mod docs;
mod shared;
mod users;

use std::{io, sync::Arc};

use actix_web::{middleware::Logger, web, App, HttpServer};
use auth::auth_login;
use docs::ApiDoc;
use rayon::ThreadPoolBuilder;
use shared::{
  api_error::ApiError,
  config::Config,
  handlers::check_health,
  hash_worker::{HashWorker, Hasher},
};
use users::{
  delete_user, get_user, list_users, register_user, update_user,
  repository::user_repository::UserRepository,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// This struct represents state
pub struct AppState<UR: UserRepository> {
  pub user_repository: UR,
  pub config: Config,
  pub hasher: Arc<dyn Hasher + Send + Sync>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();

  let config = Config::from_env().map_err(io::Error::other)?;

  let thread_pool = ThreadPoolBuilder::new()
    .num_threads(config.hash_workers as usize)
    .thread_name(|index| format!("hash-worker-{}", index))
    .build()
    .map_err(io::Error::other)?;
  let hasher = Arc::new(HashWorker::new(
    thread_pool,
    config.hash_workers,
    config.bcrypt_cost,
  ));

  #[cfg(feature = "mongodb")]
  let user_repository = {
    use shared::database::MongoDatabase;
    use users::repository::mongo_user_repository::MongoUserRepository;

    let database = MongoDatabase::connect(&config)
      .await
      .map_err(io::Error::other)?;
    log::info!("Connected to MongoDB database {}", database.database_name);
    MongoUserRepository::init(database)
      .await
      .map_err(io::Error::other)?
  };
  #[cfg(not(feature = "mongodb"))]
  let user_repository = {
    log::warn!("Built without MongoDB support, users are kept in memory");
    users::repository::in_memory_user_repository::InMemoryUserRepository::new()
  };

  serve(AppState {
    user_repository,
    config,
    hasher,
  })
  .await
}

async fn serve<UR: UserRepository + Send + Sync + 'static>(
  state: AppState<UR>,
) -> io::Result<()> {
  let (host, port) = state.config.bind_address();
  log::info!("Listening on http://{}:{}", host, port);

  let data = web::Data::new(state);
  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .app_data(data.clone())
      .configure(routes::<UR>)
  })
  .bind((host, port))?
  .run()
  .await
}

// Function to initialize the App
fn routes<UR: UserRepository + 'static>(config: &mut web::ServiceConfig) {
  config
    .service(
      web::scope("/api")
        .app_data(json_config())
        .route("/register", web::post().to(register_user::<UR>))
        .route("/login", web::post().to(auth_login::<UR>))
        .route("/users", web::get().to(list_users::<UR>))
        .route("/users/{id}", web::get().to(get_user::<UR>))
        .route("/users/{id}", web::put().to(update_user::<UR>))
        .route("/users/{id}", web::delete().to(delete_user::<UR>))
        .route("/health", web::get().to(check_health::<UR>)),
    )
    .service(
      SwaggerUi::new("/docs/{_:.*}")
        .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}

/// Body decoding failures answer with the same `{error}` shape as handlers.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|error, _request| {
    ApiError::Validation(error.to_string()).into()
  })
}
