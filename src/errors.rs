use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone)]
pub enum ShortlnkError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    AlreadyExists(String),
    NotFound(String),
}

impl ShortlnkError {
    pub fn code(&self) -> &'static str {
        match self {
            ShortlnkError::DatabaseConfig(_) => "E001",
            ShortlnkError::DatabaseConnection(_) => "E002",
            ShortlnkError::DatabaseOperation(_) => "E003",
            ShortlnkError::Validation(_) => "E004",
            ShortlnkError::AlreadyExists(_) => "E005",
            ShortlnkError::NotFound(_) => "E006",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlnkError::DatabaseConfig(_) => "Database Configuration Error",
            ShortlnkError::DatabaseConnection(_) => "Database Connection Error",
            ShortlnkError::DatabaseOperation(_) => "Database Operation Error",
            ShortlnkError::Validation(_) => "Validation Error",
            ShortlnkError::AlreadyExists(_) => "Resource Already Exists",
            ShortlnkError::NotFound(_) => "Resource Not Found",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ShortlnkError::DatabaseConfig(msg) => msg,
            ShortlnkError::DatabaseConnection(msg) => msg,
            ShortlnkError::DatabaseOperation(msg) => msg,
            ShortlnkError::Validation(msg) => msg,
            ShortlnkError::AlreadyExists(msg) => msg,
            ShortlnkError::NotFound(msg) => msg,
        }
    }
}

impl fmt::Display for ShortlnkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for ShortlnkError {}

impl ShortlnkError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShortlnkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortlnkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortlnkError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlnkError::Validation(msg.into())
    }

    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        ShortlnkError::AlreadyExists(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlnkError::NotFound(msg.into())
    }
}

/// Errors returned from handlers become plain-text responses. Client-caused
/// errors carry their message; database failures answer with a generic body
/// since their messages describe internals.
impl ResponseError for ShortlnkError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShortlnkError::Validation(_) | ShortlnkError::AlreadyExists(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortlnkError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortlnkError::DatabaseConfig(_)
            | ShortlnkError::DatabaseConnection(_)
            | ShortlnkError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.status_code().is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status_code())
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(body)
    }
}

pub type Result<T> = std::result::Result<T, ShortlnkError>;
