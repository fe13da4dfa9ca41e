//! Payment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `date` is stored as ISO `YYYY-MM-DD` text.
//! - Read paths reject rows whose stored date does not parse instead of
//!   masking them.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::date::{format_date, parse_stored_date};
use crate::model::client::ClientId;
use crate::model::payment::{NewPayment, Payment, PaymentId};
use rusqlite::{params, Connection, Row};

const PAYMENT_SELECT_SQL: &str = "SELECT id, amount, date, client_id FROM payments";

/// Repository interface for payment persistence.
pub trait PaymentRepository {
    fn create_payment(&self, payment: &NewPayment) -> RepoResult<PaymentId>;
    fn get_payment(&self, id: PaymentId) -> RepoResult<Option<Payment>>;
    fn list_payments(&self) -> RepoResult<Vec<Payment>>;
    fn list_payments_for_client(&self, client_id: ClientId) -> RepoResult<Vec<Payment>>;
}

/// SQLite-backed payment repository.
pub struct SqlitePaymentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePaymentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "payments")?;
        Ok(Self { conn })
    }

    fn query_payments(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Payment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut payments = Vec::new();
        while let Some(row) = rows.next()? {
            payments.push(parse_payment_row(row)?);
        }
        Ok(payments)
    }
}

impl PaymentRepository for SqlitePaymentRepository<'_> {
    fn create_payment(&self, payment: &NewPayment) -> RepoResult<PaymentId> {
        payment.validate()?;

        self.conn.execute(
            "INSERT INTO payments (amount, date, client_id) VALUES (?1, ?2, ?3);",
            params![payment.amount, format_date(payment.date), payment.client_id],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_payment(&self, id: PaymentId) -> RepoResult<Option<Payment>> {
        Ok(self
            .query_payments(&format!("{PAYMENT_SELECT_SQL} WHERE id = ?1;"), [id])?
            .into_iter()
            .next())
    }

    fn list_payments(&self) -> RepoResult<Vec<Payment>> {
        self.query_payments(&format!("{PAYMENT_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn list_payments_for_client(&self, client_id: ClientId) -> RepoResult<Vec<Payment>> {
        self.query_payments(
            &format!("{PAYMENT_SELECT_SQL} WHERE client_id = ?1 ORDER BY id ASC;"),
            [client_id],
        )
    }
}

fn parse_payment_row(row: &Row<'_>) -> RepoResult<Payment> {
    let date_text: String = row.get("date")?;
    let date = parse_stored_date(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in payments.date"))
    })?;

    Ok(Payment {
        id: row.get("id")?,
        amount: row.get("amount")?,
        date,
        client_id: row.get("client_id")?,
    })
}
