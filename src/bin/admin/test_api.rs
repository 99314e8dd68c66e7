//! Canned user-admin API for exercising the client over real HTTP.

use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};

pub const TAKEN_EMAIL: &str = "taken@x.com";
pub const KNOWN_ID: &str = "abc";

fn user(email: &str, status: &str) -> Value {
  json!({
    "_id": KNOWN_ID,
    "name": "A",
    "dob": "2000-01-01",
    "email": email,
    "role": "user",
    "status": status,
    "createdAt": "2024-01-01T00:00:00Z",
    "updatedAt": "2024-01-01T00:00:00Z"
  })
}

async fn register(body: web::Json<Value>) -> HttpResponse {
  let email = body["email"].as_str().unwrap_or_default();
  if email == TAKEN_EMAIL {
    return HttpResponse::BadRequest()
      .json(json!({ "error": "User already exists" }));
  }
  HttpResponse::Created().json(json!({
    "token": "token",
    "user": user(email, "Active")
  }))
}

async fn list() -> HttpResponse {
  HttpResponse::Ok().json(json!([user("a@x.com", "Active")]))
}

/// Accepts only a body carrying exactly `status`.
async fn update(id: web::Path<String>, body: web::Json<Value>) -> HttpResponse {
  if id.as_str() != KNOWN_ID {
    return HttpResponse::NotFound().json(json!({ "error": "User not found" }));
  }
  let fields = body.as_object().map(|fields| fields.len()).unwrap_or(0);
  match body["status"].as_str() {
    Some(status) if fields == 1 => {
      HttpResponse::Ok().json(user("a@x.com", status))
    }
    _ => HttpResponse::BadRequest().json(json!({ "error": "unexpected body" })),
  }
}

async fn delete(id: web::Path<String>) -> HttpResponse {
  if id.as_str() != KNOWN_ID {
    return HttpResponse::NotFound().json(json!({ "error": "User not found" }));
  }
  HttpResponse::Ok().json(json!({ "message": "User deleted successfully" }))
}

async fn bad_gateway() -> HttpResponse {
  HttpResponse::BadGateway()
    .content_type("text/html")
    .body("<html>bad gateway</html>")
}

/// Starts the canned API on a free local port and returns its base URL,
/// including the `/api` prefix.
pub fn start() -> String {
  let server = HttpServer::new(|| {
    App::new().service(
      web::scope("/api")
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(bad_gateway))
        .route("/users", web::get().to(list))
        .route("/users/{id}", web::put().to(update))
        .route("/users/{id}", web::delete().to(delete)),
    )
  })
  .workers(1)
  .bind(("127.0.0.1", 0))
  .expect("Failed to bind the test API");
  let address = server.addrs()[0];
  actix_web::rt::spawn(server.run());
  format!("http://{}/api", address)
}
