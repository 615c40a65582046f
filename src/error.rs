use crate::db::dao::DaoLayerError;

/// Failures a handler can surface. Every variant renders as
/// `{"error": "<message>"}` with the status from [`AppError::status`].
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input, detected before the store is touched.
    BadRequest(String),
    /// A store constraint rejected the write; the transaction was rolled back.
    Integrity(String),
    NotFound(String),
    MethodNotAllowed(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::Integrity(message)
            | Self::NotFound(message)
            | Self::MethodNotAllowed(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { entity, .. } => {
                AppError::not_found(format!("{entity} not found"))
            }
            DaoLayerError::UniqueViolation(_) | DaoLayerError::ForeignKeyViolation(_) => {
                AppError::integrity(err.to_string())
            }
            DaoLayerError::Db(db_err) => {
                tracing::error!(error = %db_err, "unexpected store failure");
                AppError::internal("Internal server error")
            }
        }
    }
}
