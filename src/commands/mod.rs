use crate::{db::DbPool, errors::ServiceError};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use validator::Validate;

/// Command trait for implementing the Command Pattern
///
/// Every write in the registry goes through a command: the command checks
/// its own fields first and only then touches the database, so a rejected
/// command never leaves a partial write behind.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully
    type Result;

    /// Execute the command against the given pool
    ///
    /// # Returns
    /// * `Result<Self::Result, ServiceError>` - The result of command execution or an error
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError>;
}

pub mod control_products;
pub mod farms;
pub mod labor_products;
pub mod labors;
pub mod nurseries;
pub mod producers;

/// Validates several independently derived parts of one input and reports
/// the union of their offending fields.
pub(crate) fn validate_parts(parts: &[&dyn Validate]) -> Result<(), ServiceError> {
    let mut fields = Vec::new();
    let mut messages = Vec::new();

    for part in parts {
        if let Err(errors) = part.validate() {
            fields.extend(errors.errors().keys().map(|f| f.to_string()));
            messages.push(errors.to_string());
        }
    }

    if fields.is_empty() {
        return Ok(());
    }

    fields.sort();
    fields.dedup();
    Err(ServiceError::ValidationError {
        fields,
        message: messages.join("; "),
    })
}

/// Takes a field the validator already checked for presence.
pub(crate) fn required<T: Clone>(value: &Option<T>, field: &str) -> Result<T, ServiceError> {
    value
        .clone()
        .ok_or_else(|| ServiceError::invalid_field(field, format!("{} is required", field)))
}

/// Trims optional free text, treating blank input as absent.
pub(crate) fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether `value` fits a fixed-point column with `max_digits` total digits
/// and `decimal_places` digits after the point.
pub(crate) fn decimal_fits(value: &Decimal, max_digits: u32, decimal_places: u32) -> bool {
    let normalized = value.normalize();
    if normalized.scale() > decimal_places {
        return false;
    }
    let integer_limit = Decimal::from(10u64.pow(max_digits - decimal_places));
    normalized.abs().trunc() < integer_limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_fits_checks_scale_and_integer_digits() {
        assert!(decimal_fits(&dec!(9999999999.99), 12, 2));
        assert!(decimal_fits(&dec!(1.50), 10, 2));
        assert!(decimal_fits(&dec!(1.500), 10, 2));
        assert!(!decimal_fits(&dec!(1.505), 10, 2));
        assert!(!decimal_fits(&dec!(100000000), 10, 2));
        assert!(decimal_fits(&dec!(99999999.99), 10, 2));
    }

    #[test]
    fn blank_text_is_treated_as_absent() {
        assert_eq!(blank_to_none(&Some("   ".into())), None);
        assert_eq!(blank_to_none(&Some(" note ".into())), Some("note".into()));
        assert_eq!(blank_to_none(&None), None);
    }

    #[test]
    fn required_reports_the_missing_field() {
        let err = required::<u32>(&None, "labor_id").unwrap_err();
        assert_eq!(err.invalid_fields(), ["labor_id"]);
        assert_eq!(required(&Some(3), "labor_id").unwrap(), 3);
    }
}
