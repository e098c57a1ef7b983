//! Credit / outstanding-payment flow
//!
//! A payment of type OUTSTANDING defers the balance to a receivable:
//! a creditor record is created alongside the payment, and subsequent
//! repayments wear it down until it flips to PAID.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    CreditStatus, Creditor, CreditorPayment, CreditorRepay, Payment, PaymentCreate, PaymentType,
};
use crate::db::repository::{CreditorRepository, PaymentRepository, TableSessionRepository};
use crate::sessions::billing;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

pub struct CreditService {
    creditors: CreditorRepository,
    payments: PaymentRepository,
    sessions: TableSessionRepository,
}

impl CreditService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            creditors: CreditorRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            sessions: TableSessionRepository::new(db),
        }
    }

    /// Record a payment against a session
    ///
    /// OUTSTANDING payments additionally open a creditor record with
    /// `remaining = amount` and status PENDING.
    pub async fn record_payment(&self, req: PaymentCreate) -> AppResult<Payment> {
        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(AppError::validation(format!(
                "amount must be a positive number, got {}",
                req.amount
            )));
        }
        let session_key: RecordId = req.session_id.parse().map_err(|_| {
            AppError::validation(format!("Invalid session ID: {}", req.session_id))
        })?;

        if req.payment_type == PaymentType::Outstanding {
            self.sessions
                .find_by_id(&req.session_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Session {} not found", req.session_id))
                })?;

            let now = now_millis();
            self.creditors
                .create(Creditor {
                    id: None,
                    session: session_key.clone(),
                    customer_name: req.note.clone(),
                    customer_phone: None,
                    amount: req.amount,
                    paid_amount: 0.0,
                    remaining: req.amount,
                    status: CreditStatus::Pending,
                    note: req.note.clone(),
                    due_date: None,
                    created_at: now,
                    updated_at: now,
                })
                .await?;
        }

        let payment = self
            .payments
            .create(Payment {
                id: None,
                session: session_key,
                payment_type: req.payment_type,
                amount: req.amount,
                note: req.note,
                created_at: now_millis(),
            })
            .await?;
        Ok(payment)
    }

    /// Apply a repayment to a creditor
    ///
    /// The repayment may not exceed the current remaining balance;
    /// remaining reaching 0 flips the creditor to PAID.
    pub async fn repay(&self, creditor_id: &str, req: CreditorRepay) -> AppResult<Creditor> {
        let mut creditor = self
            .creditors
            .find_by_id(creditor_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Creditor {} not found", creditor_id)))?;
        let id = creditor
            .id
            .clone()
            .ok_or_else(|| AppError::internal("creditor record missing id"))?;

        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(AppError::validation(format!(
                "amount must be a positive number, got {}",
                req.amount
            )));
        }
        if req.amount > creditor.remaining {
            return Err(AppError::validation(format!(
                "amount {} exceeds remaining balance {}",
                req.amount, creditor.remaining
            )));
        }

        self.creditors
            .create_payment(CreditorPayment {
                id: None,
                creditor: id.clone(),
                amount: req.amount,
                payment_type: req.payment_type,
                note: req.note,
                created_at: now_millis(),
            })
            .await?;

        creditor.paid_amount = billing::round2(creditor.paid_amount + req.amount);
        creditor.remaining = billing::round2(creditor.amount - creditor.paid_amount);
        if creditor.remaining <= 0.0 {
            creditor.remaining = 0.0;
            creditor.status = CreditStatus::Paid;
        }
        self.creditors
            .update_balance(&id, creditor.paid_amount, creditor.remaining, creditor.status)
            .await?;

        Ok(creditor)
    }

    /// List repayments for a creditor
    pub async fn list_repayments(&self, creditor_id: &str) -> AppResult<Vec<CreditorPayment>> {
        let creditor = self
            .creditors
            .find_by_id(creditor_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Creditor {} not found", creditor_id)))?;
        let id = creditor
            .id
            .clone()
            .ok_or_else(|| AppError::internal("creditor record missing id"))?;
        Ok(self.creditors.list_payments(&id).await?)
    }
}
