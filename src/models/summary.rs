use rust_decimal::Decimal;
use serde::Serialize;

use super::transaction::{Transaction, TransactionType};

/// Aggregate totals over every stored transaction
///
/// Totals saturate at `Decimal::MAX` instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expenses) = transactions.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), tx| match tx.tx_type {
                TransactionType::Income => (income.saturating_add(tx.amount), expenses),
                TransactionType::Expense => (income, expenses.saturating_add(tx.amount)),
            },
        );

        Self {
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        }
    }
}
