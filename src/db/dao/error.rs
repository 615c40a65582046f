use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

// SQLite reports RESTRICT failures with extended code 1811, which
// `DbErr::sql_err` does not classify; the message is the same for every
// foreign key failure.
const SQLITE_FK_MESSAGE: &str = "FOREIGN KEY constraint failed";

#[derive(Debug, Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i32 },
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl From<DbErr> for DaoLayerError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                DaoLayerError::UniqueViolation(detail)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                DaoLayerError::ForeignKeyViolation(detail)
            }
            _ if err.to_string().contains(SQLITE_FK_MESSAGE) => {
                DaoLayerError::ForeignKeyViolation(SQLITE_FK_MESSAGE.to_string())
            }
            _ => DaoLayerError::Db(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::DaoLayerError;

    #[test]
    fn sqlite_restrict_failures_are_foreign_key_violations() {
        let err = DaoLayerError::from(DbErr::Custom(
            "error returned from database: (code: 1811) FOREIGN KEY constraint failed".to_string(),
        ));
        assert!(matches!(err, DaoLayerError::ForeignKeyViolation(_)));
    }

    #[test]
    fn unclassified_errors_stay_database_errors() {
        let err = DaoLayerError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DaoLayerError::Db(_)));
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = DaoLayerError::NotFound {
            entity: "Category",
            id: 7,
        };
        assert_eq!(err.to_string(), "Category not found (id=7)");
    }
}
