use std::collections::HashSet;

use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction, MAX_AMOUNT};

/// Add, edit and delete transactions with validation.
///
/// Pure business logic with no I/O. Like `SavingsService`, every call
/// returns a new list and leaves its input untouched.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Append a new transaction with a fresh id.
    pub fn add(
        &self,
        transactions: &[Transaction],
        new_transaction: NewTransaction,
    ) -> Result<(Vec<Transaction>, Transaction), CoreError> {
        let transaction = new_transaction.into_transaction(Uuid::new_v4().to_string());
        Self::validate(&transaction)?;

        let mut updated = transactions.to_vec();
        updated.push(transaction.clone());
        Ok((updated, transaction))
    }

    /// Replace the whole record with id `id`, keeping its id and position.
    pub fn edit(
        &self,
        transactions: &[Transaction],
        id: &str,
        replacement: NewTransaction,
    ) -> Result<Vec<Transaction>, CoreError> {
        let idx = Self::position(transactions, id)?;
        let transaction = replacement.into_transaction(id.to_string());
        Self::validate(&transaction)?;

        let mut updated = transactions.to_vec();
        updated[idx] = transaction;
        Ok(updated)
    }

    pub fn delete(&self, transactions: &[Transaction], id: &str) -> Result<Vec<Transaction>, CoreError> {
        let idx = Self::position(transactions, id)?;
        let mut updated = transactions.to_vec();
        updated.remove(idx);
        Ok(updated)
    }

    /// Append already-parsed candidates. All candidates are validated
    /// first; if any fails, none are added (all-or-nothing).
    pub fn import(
        &self,
        transactions: &[Transaction],
        candidates: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, CoreError> {
        let mut seen: HashSet<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
        for candidate in &candidates {
            Self::validate(candidate)?;
            if candidate.id.trim().is_empty() {
                return Err(CoreError::Validation("Transaction id must not be empty".into()));
            }
            if !seen.insert(candidate.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate transaction id '{}'",
                    candidate.id
                )));
            }
        }

        debug!("Importing {} transactions", candidates.len());
        let mut updated = transactions.to_vec();
        updated.extend(candidates);
        Ok(updated)
    }

    /// Remove every transaction in `category`. Returns the new list and
    /// the number removed.
    pub fn delete_category(&self, transactions: &[Transaction], category: &str) -> (Vec<Transaction>, usize) {
        let updated: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.category != category)
            .cloned()
            .collect();
        let removed = transactions.len() - updated.len();
        debug!("Deleted {removed} transactions in category '{category}'");
        (updated, removed)
    }

    /// Rules:
    /// - Description must not be blank
    /// - Amount must be positive and at most `MAX_AMOUNT`
    /// - Category must not be blank
    fn validate(transaction: &Transaction) -> Result<(), CoreError> {
        if transaction.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "Transaction description must not be empty".into(),
            ));
        }
        if transaction.amount <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Transaction amount must be positive, got {}",
                transaction.amount
            )));
        }
        if transaction.amount > MAX_AMOUNT {
            return Err(CoreError::Validation(format!(
                "Transaction amount must not exceed {MAX_AMOUNT}, got {}",
                transaction.amount
            )));
        }
        if transaction.category.trim().is_empty() {
            return Err(CoreError::Validation(
                "Transaction category must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn position(transactions: &[Transaction], id: &str) -> Result<usize, CoreError> {
        transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::transaction_not_found(id))
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
