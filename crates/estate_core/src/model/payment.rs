//! Payment domain model. Payments are append-only.

use super::client::ClientId;
use super::{require_non_negative, ValidationError};
use chrono::NaiveDate;
use serde::Serialize;

pub type PaymentId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: f64,
    pub date: NaiveDate,
    pub client_id: ClientId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub amount: f64,
    pub date: NaiveDate,
    pub client_id: ClientId,
}

impl NewPayment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("amount", self.amount)
    }
}
