use sea_orm::error::{DbErr, SqlErr};
use sea_orm::TransactionError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input rejected before anything was written.
    #[error("Validation error on [{}]: {message}", .fields.join(", "))]
    ValidationError {
        fields: Vec<String>,
        message: String,
    },

    /// Unique or foreign-key constraint rejected by the store.
    #[error("Integrity error: {0}")]
    IntegrityError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = err.errors().keys().map(|f| f.to_string()).collect();
        fields.sort();
        ServiceError::ValidationError {
            fields,
            message: err.to_string(),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ServiceError::IntegrityError(format!("unique constraint violated: {}", detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ServiceError::IntegrityError(format!("foreign key constraint violated: {}", detail))
            }
            _ => ServiceError::DatabaseError(err),
        }
    }
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(e) => e.into(),
            TransactionError::Transaction(e) => e,
        }
    }
}

impl ServiceError {
    /// Single-field validation failure raised outside of `validator`.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ServiceError::ValidationError {
            fields: vec![field.to_string()],
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: Uuid) -> Self {
        ServiceError::NotFound(format!("{} with ID {} not found", entity, id))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::ValidationError { .. })
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, ServiceError::IntegrityError(_))
    }

    /// Offending field names for validation errors, empty otherwise.
    pub fn invalid_fields(&self) -> &[String] {
        match self {
            ServiceError::ValidationError { fields, .. } => fields,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationErrors};

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        name: String,
        #[validate(range(min = 1))]
        days: i32,
    }

    #[test]
    fn validation_errors_list_every_offending_field() {
        let sample = Sample {
            name: String::new(),
            days: 0,
        };
        let err: ServiceError = sample.validate().unwrap_err().into();
        assert!(err.is_validation());
        assert_eq!(err.invalid_fields(), ["days", "name"]);
    }

    #[test]
    fn empty_validation_errors_still_map_to_validation() {
        let err: ServiceError = ValidationErrors::new().into();
        assert!(err.is_validation());
        assert!(err.invalid_fields().is_empty());
    }

    #[test]
    fn unclassified_db_errors_stay_database_errors() {
        let err: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ServiceError::DatabaseError(_)));
        assert!(!err.is_integrity());
    }

    #[test]
    fn invalid_field_helper_names_the_field() {
        let err = ServiceError::invalid_field("labor_id", "labor is required");
        assert_eq!(err.invalid_fields(), ["labor_id"]);
        assert_eq!(
            err.to_string(),
            "Validation error on [labor_id]: labor is required"
        );
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let id = Uuid::nil();
        let err = ServiceError::not_found("Producer", id);
        assert_eq!(
            err.to_string(),
            format!("Not found: Producer with ID {} not found", id)
        );
    }
}
