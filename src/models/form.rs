use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::category::is_other;
use super::transaction::{Transaction, TransactionId, TransactionType};

/// Date format of the form's date field and of stored records
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted amount (one quadrillion); keeps any plausible total
/// far below `Decimal::MAX`
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Amount within the accepted range `(0, MAX_AMOUNT]`
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}

/// Reasons a submission is rejected
///
/// The `Display` text is what the user is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a description")]
    MissingDescription,

    #[error("Please enter an amount")]
    MissingAmount,

    #[error("Amount '{0}' is not a number")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,

    #[error("Please choose a date")]
    MissingDate,

    #[error("Date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("Type '{0}' must be income or expense")]
    UnknownType(String),
}

/// Raw field values gathered from the entry form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub tx_type: String,
    pub category: String,
    /// Extra input revealed when the `other` category is selected
    pub category_detail: String,
    pub date: String,
}

/// A validated submission that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub tx_type: TransactionType,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionForm {
    /// Check the required fields and convert them to typed values
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;

        let tx_type = self
            .tx_type
            .parse::<TransactionType>()
            .map_err(|_| ValidationError::UnknownType(self.tx_type.trim().to_string()))?;

        Ok(NewTransaction {
            description: description.to_string(),
            amount,
            tx_type,
            category: self.resolved_category(),
            date,
        })
    }

    /// Category label to store; `other` with a detail stores the detail text
    fn resolved_category(&self) -> String {
        let category = self.category.trim();
        let detail = self.category_detail.trim();
        if is_other(category) && !detail.is_empty() {
            detail.to_string()
        } else {
            category.to_string()
        }
    }
}

impl NewTransaction {
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            tx_type: self.tx_type,
            category: self.category,
            date: self.date,
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    let amount = raw
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}
