//! Client for the AdEase HTTP API.

use std::path::Path;
use std::time::Duration;

use common::advertisement::{CreateAdvertisementRequest, UploadResponse};
use common::auth::{LoginRequest, LoginResponse};
use common::screen::{CreateScreenRequest, SetActiveRequest, UpdateScreenRequest};
use common::{Advertisement, Screen};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error body; `message` is shown verbatim.
    #[error("{message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Operations the console performs against the server.
pub trait SignageApi {
    fn list_screens(&self) -> Result<Vec<Screen>, ApiError>;
    fn create_screen(&self, request: &CreateScreenRequest) -> Result<Screen, ApiError>;
    fn update_screen(&self, id: &str, request: &UpdateScreenRequest) -> Result<(), ApiError>;
    fn set_screen_active(&self, id: &str, active: bool) -> Result<(), ApiError>;
    fn delete_screen(&self, id: &str) -> Result<(), ApiError>;

    fn list_ads(&self) -> Result<Vec<Advertisement>, ApiError>;
    fn create_ad(&self, request: &CreateAdvertisementRequest) -> Result<Advertisement, ApiError>;
    fn delete_ad(&self, id: &str) -> Result<(), ApiError>;

    /// Upload an image file and return where it was stored.
    fn upload_image(&self, path: &Path) -> Result<UploadResponse, ApiError>;
}

/// Blocking HTTP implementation of [`SignageApi`].
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: String,
}

fn build_client() -> Result<Client, ApiError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent(concat!("adease-cli/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

fn api_url(base_url: &str, path: &str) -> String {
    format!("{}/api/v1{path}", base_url.trim_end_matches('/'))
}

/// Turn a non-success response into [`ApiError::Rejected`].
fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.code, body.message),
        Err(_) => (
            "HTTP_ERROR".to_string(),
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        ),
    };
    Err(ApiError::Rejected {
        status: status.as_u16(),
        code,
        message,
    })
}

fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    Ok(check(request.send()?)?.json()?)
}

fn empty(request: RequestBuilder) -> Result<(), ApiError> {
    check(request.send()?)?;
    Ok(())
}

impl HttpApi {
    pub fn new(session: &Session) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client()?,
            base_url: session.server.clone(),
            token: session.token.clone(),
        })
    }

    /// Exchange credentials for a session. One attempt, no retry.
    pub fn login(base_url: &str, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = build_client()?
            .post(api_url(base_url, "/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            });
        json(request)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(api_url(&self.base_url, path))
            .bearer_auth(&self.token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(api_url(&self.base_url, path))
            .bearer_auth(&self.token)
    }
}

impl SignageApi for HttpApi {
    fn list_screens(&self) -> Result<Vec<Screen>, ApiError> {
        json(self.get("/screens"))
    }

    fn create_screen(&self, request: &CreateScreenRequest) -> Result<Screen, ApiError> {
        json(self.post("/screens").json(request))
    }

    fn update_screen(&self, id: &str, request: &UpdateScreenRequest) -> Result<(), ApiError> {
        empty(
            self.client
                .patch(api_url(&self.base_url, &format!("/screens/{id}")))
                .bearer_auth(&self.token)
                .json(request),
        )
    }

    fn set_screen_active(&self, id: &str, active: bool) -> Result<(), ApiError> {
        empty(
            self.client
                .put(api_url(&self.base_url, &format!("/screens/{id}/active")))
                .bearer_auth(&self.token)
                .json(&SetActiveRequest { active }),
        )
    }

    fn delete_screen(&self, id: &str) -> Result<(), ApiError> {
        empty(
            self.client
                .delete(api_url(&self.base_url, &format!("/screens/{id}")))
                .bearer_auth(&self.token),
        )
    }

    fn list_ads(&self) -> Result<Vec<Advertisement>, ApiError> {
        json(self.get("/ads"))
    }

    fn create_ad(&self, request: &CreateAdvertisementRequest) -> Result<Advertisement, ApiError> {
        json(self.post("/ads").json(request))
    }

    fn delete_ad(&self, id: &str) -> Result<(), ApiError> {
        empty(
            self.client
                .delete(api_url(&self.base_url, &format!("/ads/{id}")))
                .bearer_auth(&self.token),
        )
    }

    fn upload_image(&self, path: &Path) -> Result<UploadResponse, ApiError> {
        let form = reqwest::blocking::multipart::Form::new().file("file", path)?;
        json(self.post("/uploads").multipart(form))
    }
}
