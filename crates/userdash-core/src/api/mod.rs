//! Thin HTTP client for the demo REST API.
//!
//! Two calls drive the app (`POST /auth/login`, `GET /users`); a third
//! (`GET /auth/me`) validates a persisted token on boot. Every call hits the
//! network: no retry, no caching, transport-default timeouts.

mod error;
mod types;

use std::future::Future;

use anyhow::{Context, Result};
pub use error::{ApiError, ApiErrorKind, ApiResult};
use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
pub use types::{Credentials, Profile, Session, UserRecord, UsersPage};

use crate::config::Config;
use error::classify_reqwest_error;

/// Production base URL of the demo API.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Environment override for the API base URL.
pub const BASE_URL_ENV: &str = "USERDASH_BASE_URL";

/// Default page window for `list_users`.
pub const DEFAULT_LIMIT: usize = 30;

/// Standard User-Agent header for userdash requests.
pub const USER_AGENT: &str = concat!("userdash/", env!("CARGO_PKG_VERSION"));

/// Remote operations the flows depend on.
///
/// Implemented by [`ApiClient`]; tests substitute scripted backends.
pub trait Backend: Send + Sync + 'static {
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = ApiResult<Session>> + Send;

    fn list_users(
        &self,
        limit: usize,
        skip: usize,
    ) -> impl Future<Output = ApiResult<UsersPage>> + Send;

    fn current_user(&self, token: &str) -> impl Future<Output = ApiResult<Session>> + Send;
}

/// Demo API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production API.
    /// - At runtime, panics if `USERDASH_BLOCK_REAL_API=1` and `base_url` is the production API.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        #[cfg(test)]
        if base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the production demo API!\n\
                 Point the client at a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        #[cfg(not(test))]
        if std::env::var("USERDASH_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == DEFAULT_BASE_URL
        {
            panic!(
                "USERDASH_BLOCK_REAL_API=1 but trying to use the production demo API!\n\
                 Set {BASE_URL_ENV} to a mock server.\n\
                 Found base_url: {base_url}"
            );
        }

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client using the resolved base URL (env > config > default).
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = resolve_base_url(config.base_url.as_deref())?;
        Ok(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login`.
    pub async fn authenticate(&self, credentials: &Credentials) -> ApiResult<Session> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(username = %credentials.username, "POST /auth/login");

        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .json(credentials)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        read_json(response, ApiErrorKind::Auth).await
    }

    /// `GET /users?limit=<limit>&skip=<skip>`.
    pub async fn list_users(&self, limit: usize, skip: usize) -> ApiResult<UsersPage> {
        let url = format!("{}/users", self.base_url);
        debug!(limit, skip, "GET /users");

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[("limit", limit), ("skip", skip)])
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        read_json(response, ApiErrorKind::HttpStatus).await
    }

    /// `GET /auth/me` with a bearer token.
    pub async fn current_user(&self, token: &str) -> ApiResult<Session> {
        let url = format!("{}/auth/me", self.base_url);
        debug!("GET /auth/me");

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let profile: Profile = read_json(response, ApiErrorKind::Auth).await?;
        Ok(Session::from_profile(profile, token))
    }
}

impl Backend for ApiClient {
    async fn authenticate(&self, credentials: &Credentials) -> ApiResult<Session> {
        ApiClient::authenticate(self, credentials).await
    }

    async fn list_users(&self, limit: usize, skip: usize) -> ApiResult<UsersPage> {
        ApiClient::list_users(self, limit, skip).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<Session> {
        ApiClient::current_user(self, token).await
    }
}

/// Decodes a JSON body, mapping non-success statuses to `status_kind`.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    status_kind: ApiErrorKind,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), kind = %status_kind, "request rejected");
        return Err(ApiError::from_status(status_kind, status.as_u16(), &body));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_reqwest_error(&e))?;
    serde_json::from_slice(&body).map_err(|e| ApiError::decode(format!("Invalid response: {e}")))
}

/// Resolves the API base URL with precedence: env > config > default.
pub fn resolve_base_url(config_base_url: Option<&str>) -> Result<String> {
    if let Ok(env_url) = std::env::var(BASE_URL_ENV) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(DEFAULT_BASE_URL.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn emily_login_body() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128",
            "token": "token-abc",
            "refreshToken": "refresh-def"
        })
    }

    #[tokio::test]
    async fn test_authenticate_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "username": "emilys",
                "password": "emilyspass"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(emily_login_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let session = client
            .authenticate(&Credentials::new("emilys", "emilyspass"))
            .await
            .unwrap();

        assert_eq!(session.username, "emilys");
        assert_eq!(session.token, "token-abc");
        assert_eq!(session.refresh_token, "refresh-def");
    }

    #[tokio::test]
    async fn test_authenticate_rejected_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client
            .authenticate(&Credentials::new("emilys", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Auth);
        assert_eq!(err.to_string(), "HTTP 400: Invalid credentials");
    }

    #[tokio::test]
    async fn test_list_users_sends_limit_and_skip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("limit", "2"))
            .and(query_param("skip", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [
                    {"id": 5, "firstName": "Emma", "lastName": "Miller", "age": 30},
                    {"id": 6, "firstName": "Olivia", "lastName": "Wilson", "age": 22}
                ],
                "total": 208,
                "skip": 4,
                "limit": 2
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let page = client.list_users(2, 4).await.unwrap();

        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[0].first_name, "Emma");
        assert_eq!(page.total, 208);
        assert_eq!(page.skip, 4);
    }

    #[tokio::test]
    async fn test_list_users_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.list_users(30, 0).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_list_users_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.list_users(30, 0).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Bind then drop a listener so the port refuses connections.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(format!("http://127.0.0.1:{port}"));
        let err = client.list_users(30, 0).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer stored-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "username": "emilys",
                "firstName": "Emily",
                "lastName": "Johnson"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let session = client.current_user("stored-token").await.unwrap();
        assert_eq!(session.username, "emilys");
        assert_eq!(session.token, "stored-token");
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:9/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }
}
