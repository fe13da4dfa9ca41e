//! Payment use-cases. Payments are append-only.

use super::error::ServiceResult;
use super::input::parse_amount;
use super::{in_session, log_outcome, read_back_missing};
use crate::date::parse_date;
use crate::db::SessionFactory;
use crate::model::client::ClientId;
use crate::model::payment::{NewPayment, Payment, PaymentId};
use crate::repo::payment_repo::{PaymentRepository, SqlitePaymentRepository};

/// Use-case service for client payments.
pub struct PaymentService<'s> {
    sessions: &'s SessionFactory,
}

impl<'s> PaymentService<'s> {
    pub fn new(sessions: &'s SessionFactory) -> Self {
        Self { sessions }
    }

    /// Records a payment from text input.
    ///
    /// `date_text` accepts `YYYY-MM-DD` or `DD/MM/YYYY`. Amount and date are
    /// checked before any session opens, so a bad value writes nothing.
    pub fn add_payment(
        &self,
        amount_text: &str,
        date_text: &str,
        client_id: ClientId,
    ) -> ServiceResult<Payment> {
        let result = self.add_payment_inner(amount_text, date_text, client_id);
        log_outcome("payment_add", &result, |payment| {
            format!(
                "payment_id={} client_id={}",
                payment.id, payment.client_id
            )
        });
        result
    }

    fn add_payment_inner(
        &self,
        amount_text: &str,
        date_text: &str,
        client_id: ClientId,
    ) -> ServiceResult<Payment> {
        let draft = NewPayment {
            amount: parse_amount(amount_text, "amount")?,
            date: parse_date(date_text)?,
            client_id,
        };
        draft.validate()?;

        in_session(self.sessions, "payment_add", |tx| {
            let repo = SqlitePaymentRepository::try_new(tx)?;
            let id = repo.create_payment(&draft)?;
            repo.get_payment(id)?
                .ok_or_else(|| read_back_missing("created payment"))
        })
    }

    pub fn get_payment(&self, id: PaymentId) -> ServiceResult<Option<Payment>> {
        in_session(self.sessions, "payment_get", |tx| {
            Ok(SqlitePaymentRepository::try_new(tx)?.get_payment(id)?)
        })
    }

    pub fn list_payments(&self) -> ServiceResult<Vec<Payment>> {
        in_session(self.sessions, "payment_list", |tx| {
            Ok(SqlitePaymentRepository::try_new(tx)?.list_payments()?)
        })
    }

    pub fn list_payments_for_client(&self, client_id: ClientId) -> ServiceResult<Vec<Payment>> {
        in_session(self.sessions, "payment_list_for_client", |tx| {
            Ok(SqlitePaymentRepository::try_new(tx)?.list_payments_for_client(client_id)?)
        })
    }
}
