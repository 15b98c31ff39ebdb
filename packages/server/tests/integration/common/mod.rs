use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tempfile::TempDir;

use adease_server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageBackend,
    StorageConfig,
};
use adease_server::state::AppState;

pub const OPERATOR_EMAIL: &str = "operator@example.com";
pub const OPERATOR_PASSWORD: &str = "correct-horse-battery";
pub const JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const MAX_UPLOAD_SIZE: u64 = 1024 * 1024;

pub mod routes {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const SESSION: &str = "/api/v1/auth/session";
    pub const SCREENS: &str = "/api/v1/screens";
    pub const ADS: &str = "/api/v1/ads";
    pub const OVERVIEW: &str = "/api/v1/overview";
    pub const UPLOADS: &str = "/api/v1/uploads";

    pub fn screen(id: &str) -> String {
        format!("/api/v1/screens/{id}")
    }

    pub fn screen_active(id: &str) -> String {
        format!("/api/v1/screens/{id}/active")
    }

    pub fn ad(id: &str) -> String {
        format!("/api/v1/ads/{id}")
    }

    pub fn ad_preview(id: &str) -> String {
        format!("/api/v1/ads/{id}/preview")
    }

    pub fn playback(id: &str) -> String {
        format!("/ad/{id}")
    }

    pub fn media(path: &str) -> String {
        format!("/media/{path}")
    }
}

/// A running test server backed by a throwaway SQLite database and object directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub public_url: String,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
    pub headers: reqwest::header::HeaderMap,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            text,
            body,
            headers,
        }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

        let db = adease_server::database::init_db(&db_url)
            .await
            .expect("Failed to initialize test database");
        adease_server::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");
        adease_server::seed::ensure_operator(&db, OPERATOR_EMAIL, OPERATOR_PASSWORD)
            .await
            .expect("Failed to seed operator");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();
        let public_url = format!("http://{addr}");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: addr.port(),
                public_url: public_url.clone(),
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: db_url },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
                session_ttl_hours: 1,
                operator_email: None,
                operator_password: None,
            },
            storage: StorageConfig {
                backend: StorageBackend::Filesystem,
                data_dir: dir.path().join("objects"),
                max_upload_size: MAX_UPLOAD_SIZE,
                s3: None,
            },
        };

        let store = adease_server::build_object_store(&app_config.storage)
            .await
            .expect("Failed to open object store");

        let state = AppState {
            db: db.clone(),
            config: app_config,
            store,
        };

        let app = adease_server::build_router(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            public_url,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_with_token(
        &self,
        file_name: &str,
        file_bytes: Vec<u8>,
        token: &str,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .expect("Failed to set MIME type");
        let form = reqwest::multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(self.url(routes::UPLOADS))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    /// Sign in as the seeded operator, returning the session token.
    pub async fn login(&self) -> String {
        let res = self
            .post_without_token(
                routes::LOGIN,
                &json!({"email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD}),
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["token"]
            .as_str()
            .expect("Login response missing token")
            .to_string()
    }

    /// Register a screen and return its id.
    pub async fn create_screen(&self, token: &str, title: &str) -> String {
        let res = self
            .post_with_token(
                routes::SCREENS,
                &json!({"title": title, "location": "1F", "type": "Landscape"}),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "Screen creation failed: {}", res.text);
        res.body["id"].as_str().unwrap().to_string()
    }

    pub async fn set_active(&self, token: &str, screen_id: &str, active: bool) {
        let res = self
            .put_with_token(
                &routes::screen_active(screen_id),
                &json!({"active": active}),
                token,
            )
            .await;
        assert_eq!(res.status, 204, "Set active failed: {}", res.text);
    }

    /// Create an advertisement and return its id.
    pub async fn create_ad(&self, token: &str, title: &str, screen_ref: &str, image_url: &str) -> String {
        let res = self
            .post_with_token(
                routes::ADS,
                &json!({"title": title, "screen_id": screen_ref, "image_url": image_url}),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "Ad creation failed: {}", res.text);
        res.body["id"].as_str().unwrap().to_string()
    }

    /// Fetch one screen from the listing.
    pub async fn find_screen(&self, token: &str, id: &str) -> Option<Value> {
        let res = self.get_with_token(routes::SCREENS, token).await;
        assert_eq!(res.status, 200, "Screen list failed: {}", res.text);
        res.body
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == id)
            .cloned()
    }
}
