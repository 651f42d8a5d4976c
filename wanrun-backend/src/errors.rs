//! Service-wide error type
//!
//! Every failure carries two dimensions: the feature area that raised it
//! (`ErrorDomain`) and whether the caller or the service is at fault
//! (`ErrorKind`). The HTTP layer maps client-kind errors to 4xx and
//! server-kind errors to 5xx, and only ever returns the safe message.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Feature area that raised the error
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorDomain {
    Other = 0,
    Auth = 1,
    Dog = 2,
    DogOwner = 3,
    Dogrun = 4,
    Cms = 5,
    Interaction = 6,
}

/// Who caused the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Client = 1,
    Server = 2,
}

#[derive(Debug, thiserror::Error)]
#[error("[{}] {message}", self.code())]
pub struct WrError {
    domain: ErrorDomain,
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl WrError {
    pub fn new(domain: ErrorDomain, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            domain,
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Other, ErrorKind::Server, message)
    }

    pub fn auth_client(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Auth, ErrorKind::Client, message)
    }

    pub fn auth_server(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Auth, ErrorKind::Server, message)
    }

    pub fn dog_client(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Dog, ErrorKind::Client, message)
    }

    pub fn dog_server(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Dog, ErrorKind::Server, message)
    }

    pub fn dogrun_client(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Dogrun, ErrorKind::Client, message)
    }

    pub fn dogrun_server(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Dogrun, ErrorKind::Server, message)
    }

    pub fn interaction_client(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Interaction, ErrorKind::Client, message)
    }

    pub fn interaction_server(message: impl Into<String>) -> Self {
        Self::new(ErrorDomain::Interaction, ErrorKind::Server, message)
    }

    pub fn domain(&self) -> ErrorDomain {
        self.domain
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_client(&self) -> bool {
        self.kind == ErrorKind::Client
    }

    /// Stable code in the form "<domain>-<kind>", e.g. "6-1"
    pub fn code(&self) -> String {
        format!("{}-{}", self.domain as u8, self.kind as u8)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    code: String,
    error: &'a str,
}

impl ResponseError for WrError {
    fn status_code(&self) -> StatusCode {
        match (self.kind, self.domain) {
            (ErrorKind::Client, ErrorDomain::Auth) => StatusCode::UNAUTHORIZED,
            (ErrorKind::Client, _) => StatusCode::BAD_REQUEST,
            (ErrorKind::Server, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match (self.kind, &self.source) {
            (ErrorKind::Client, _) => log::warn!("{} {} error: {}", self.domain, self.kind, self),
            (ErrorKind::Server, Some(source)) => {
                log::error!("{} {} error: {}: {}", self.domain, self.kind, self, source)
            }
            (ErrorKind::Server, None) => log::error!("{} {} error: {}", self.domain, self.kind, self),
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            code: self.code(),
            error: &self.message,
        })
    }
}
