use std::fmt;
use std::str::FromStr;

use super::transaction::{Transaction, TransactionType};

/// Criterion applied to the displayed transaction list
///
/// Exactly one filter is active at a time. The summary is never filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Income,
    Expense,
}

impl Filter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Filter::All => true,
            Filter::Income => tx.tx_type == TransactionType::Income,
            Filter::Expense => tx.tx_type == TransactionType::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Income => "income",
            Filter::Expense => "expense",
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "income" => Ok(Filter::Income),
            "expense" => Ok(Filter::Expense),
            other => Err(format!("Invalid filter: {}", other)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
