//! Payment records and the enrollment outcome they produce.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::SeatCounts;
use crate::config::MINOR_UNITS_PER_MAJOR;
use crate::errors::{AppError, AppResult};

/// Immutable record of a completed payment
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub amount: f64,
    pub course_id: Uuid,
    pub cart_item_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payment submitted by a client after the charge completed
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub email: String,
    pub amount: f64,
    pub course_id: Uuid,
    pub cart_item_id: Uuid,
    pub transaction_id: Option<String>,
}

/// Client-usable handle on a charge authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Composite result of recording a payment.
///
/// The payment insert, seat claim and cart cleanup commit together; the
/// outcome of each step is reported here.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub payment: Payment,
    pub seats: SeatCounts,
    pub cart_item_removed: bool,
}

/// Convert a major-unit amount (e.g. dollars) into provider minor units.
pub fn to_minor_units(amount: f64) -> AppResult<i64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("Amount must be a positive number"));
    }

    let minor = (amount * MINOR_UNITS_PER_MAJOR).round();
    if minor < 1.0 || minor > i64::MAX as f64 {
        return Err(AppError::validation("Amount is out of range"));
    }

    Ok(minor as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_rounds_cents() {
        assert_eq!(to_minor_units(49.99).unwrap(), 4999);
        assert_eq!(to_minor_units(0.1 + 0.2).unwrap(), 30);
        assert_eq!(to_minor_units(120.0).unwrap(), 12000);
    }

    #[test]
    fn test_minor_units_rejects_non_positive() {
        assert!(to_minor_units(0.0).is_err());
        assert!(to_minor_units(-5.0).is_err());
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(0.001).is_err());
    }
}
