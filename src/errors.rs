use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum QuillpostError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    AuthRequired(String),
    Forbidden(String),
    Template(String),
    Locale(String),
    Serialization(String),
    Password(String),
    FileOperation(String),
}

impl QuillpostError {
    pub fn code(&self) -> &'static str {
        match self {
            QuillpostError::DatabaseConfig(_) => "E001",
            QuillpostError::DatabaseConnection(_) => "E002",
            QuillpostError::DatabaseOperation(_) => "E003",
            QuillpostError::Validation(_) => "E004",
            QuillpostError::NotFound(_) => "E005",
            QuillpostError::AuthRequired(_) => "E006",
            QuillpostError::Forbidden(_) => "E007",
            QuillpostError::Template(_) => "E008",
            QuillpostError::Locale(_) => "E009",
            QuillpostError::Serialization(_) => "E010",
            QuillpostError::Password(_) => "E011",
            QuillpostError::FileOperation(_) => "E012",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            QuillpostError::DatabaseConfig(_) => "Database Configuration Error",
            QuillpostError::DatabaseConnection(_) => "Database Connection Error",
            QuillpostError::DatabaseOperation(_) => "Database Operation Error",
            QuillpostError::Validation(_) => "Validation Error",
            QuillpostError::NotFound(_) => "Resource Not Found",
            QuillpostError::AuthRequired(_) => "Authentication Required",
            QuillpostError::Forbidden(_) => "Forbidden",
            QuillpostError::Template(_) => "Template Error",
            QuillpostError::Locale(_) => "Locale Error",
            QuillpostError::Serialization(_) => "Serialization Error",
            QuillpostError::Password(_) => "Password Error",
            QuillpostError::FileOperation(_) => "File Operation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            QuillpostError::DatabaseConfig(msg)
            | QuillpostError::DatabaseConnection(msg)
            | QuillpostError::DatabaseOperation(msg)
            | QuillpostError::Validation(msg)
            | QuillpostError::NotFound(msg)
            | QuillpostError::AuthRequired(msg)
            | QuillpostError::Forbidden(msg)
            | QuillpostError::Template(msg)
            | QuillpostError::Locale(msg)
            | QuillpostError::Serialization(msg)
            | QuillpostError::Password(msg)
            | QuillpostError::FileOperation(msg) => msg,
        }
    }

    /// HTTP status the error maps to when it reaches a handler boundary.
    pub fn http_status(&self) -> StatusCode {
        match self {
            QuillpostError::Validation(_) => StatusCode::BAD_REQUEST,
            QuillpostError::NotFound(_) => StatusCode::NOT_FOUND,
            QuillpostError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            QuillpostError::Forbidden(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for QuillpostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for QuillpostError {}

impl QuillpostError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        QuillpostError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        QuillpostError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        QuillpostError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        QuillpostError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QuillpostError::NotFound(msg.into())
    }

    pub fn auth_required<T: Into<String>>(msg: T) -> Self {
        QuillpostError::AuthRequired(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        QuillpostError::Forbidden(msg.into())
    }

    pub fn template<T: Into<String>>(msg: T) -> Self {
        QuillpostError::Template(msg.into())
    }

    pub fn locale<T: Into<String>>(msg: T) -> Self {
        QuillpostError::Locale(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        QuillpostError::Serialization(msg.into())
    }

    pub fn password<T: Into<String>>(msg: T) -> Self {
        QuillpostError::Password(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        QuillpostError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for QuillpostError {
    fn from(err: sea_orm::DbErr) -> Self {
        QuillpostError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for QuillpostError {
    fn from(err: std::io::Error) -> Self {
        QuillpostError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for QuillpostError {
    fn from(err: serde_json::Error) -> Self {
        QuillpostError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuillpostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_type_are_stable() {
        let err = QuillpostError::not_found("entry 42");
        assert_eq!(err.code(), "E005");
        assert_eq!(err.error_type(), "Resource Not Found");
        assert_eq!(err.message(), "entry 42");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            QuillpostError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuillpostError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            QuillpostError::auth_required("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            QuillpostError::forbidden("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            QuillpostError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_db_err() {
        let err: QuillpostError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, QuillpostError::DatabaseOperation(_)));
    }
}
