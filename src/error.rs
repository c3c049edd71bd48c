// ⚠️ Validation Errors - rejected at construction time
// Once a Patron or Exhibit exists, nothing downstream can fail.

use thiserror::Error;

use crate::entities::Money;

/// Errors raised when building museum records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MuseumError {
    #[error("Invalid {field}: {value} (must not be negative)")]
    InvalidArgument { field: &'static str, value: Money },

    #[error("{entity} name must not be empty")]
    EmptyName { entity: &'static str },

    #[error("Patron not admitted: {0}")]
    UnknownPatron(String),
}

pub type MuseumResult<T> = Result<T, MuseumError>;

/// Reject negative amounts, returning the value untouched otherwise
pub(crate) fn non_negative(field: &'static str, value: Money) -> MuseumResult<Money> {
    if value < 0 {
        return Err(MuseumError::InvalidArgument { field, value });
    }
    Ok(value)
}

pub(crate) fn non_empty(entity: &'static str, name: String) -> MuseumResult<String> {
    if name.trim().is_empty() {
        return Err(MuseumError::EmptyName { entity });
    }
    Ok(name)
}
