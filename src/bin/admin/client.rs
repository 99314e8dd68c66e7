use chrono::NaiveDate;
use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// Message returned by the server, or a generic one when it sent none.
  #[error("{0}")]
  Api(String),
  #[error("Request failed: {0}")]
  Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserView {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub dob: Option<NaiveDate>,
  pub email: String,
  #[serde(default)]
  pub role: String,
  pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
  pub token: String,
  pub user: UserView,
}

/// Fields sent on register and update. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserForm {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dob: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Deserialize)]
struct Message {
  message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Self {
    Self {
      http: reqwest::Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  pub async fn register(
    &self,
    form: &UserForm,
  ) -> Result<AuthResponse, ClientError> {
    self
      .send(
        self.http.post(self.url("/register")).json(form),
        "Error creating user",
      )
      .await
  }

  pub async fn login(
    &self,
    email: &str,
    password: &str,
  ) -> Result<AuthResponse, ClientError> {
    self
      .send(
        self
          .http
          .post(self.url("/login"))
          .json(&Credentials { email, password }),
        "Login failed",
      )
      .await
  }

  pub async fn list(&self) -> Result<Vec<UserView>, ClientError> {
    self
      .send(self.http.get(self.url("/users")), "Error fetching users")
      .await
  }

  pub async fn update(
    &self,
    id: &str,
    form: &UserForm,
  ) -> Result<UserView, ClientError> {
    self
      .send(
        self.http.put(self.url(&format!("/users/{}", id))).json(form),
        "Error updating user",
      )
      .await
  }

  pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
    let message: Message = self
      .send(
        self.http.delete(self.url(&format!("/users/{}", id))),
        "Error deleting user",
      )
      .await?;
    Ok(message.message)
  }

  async fn send<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
    fallback: &str,
  ) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response.json().await?);
    }
    let body = response.text().await.unwrap_or_default();
    log::debug!("{} answered {}: {}", fallback, status, body);
    Err(ClientError::Api(error_message(status, &body, fallback)))
  }
}

/// The server's `{error}` text when present, otherwise `fallback`.
pub fn error_message(status: StatusCode, body: &str, fallback: &str) -> String {
  match serde_json::from_str::<ErrorBody>(body) {
    Ok(body) if !body.error.is_empty() => body.error,
    _ => format!("{} ({})", fallback, status),
  }
}
