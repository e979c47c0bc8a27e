//! Presentation boundary
//!
//! View models are derived from store state by pure functions on
//! [`ViewSettings`]; a [`Renderer`] only displays what it is handed.

use std::fmt::Write as _;
use std::io::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use log::{error, warn};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Filter, Summary, Transaction, TransactionId, TransactionType};

/// Fallback date format when the configured one is unusable
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formatted summary displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub balance: String,
    pub income: String,
    pub expenses: String,
}

/// One rendered list entry; `id` is what its delete action is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub description: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub tx_type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    /// Nothing matches the active filter
    Empty(String),
    Rows(Vec<TransactionRow>),
}

/// The filtered transaction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub filter: Filter,
    pub content: ListContent,
}

impl ListView {
    pub fn rows(&self) -> &[TransactionRow] {
        match &self.content {
            ListContent::Rows(rows) => rows,
            ListContent::Empty(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, ListContent::Empty(_))
    }
}

/// Presentation adapter driven by the controller
pub trait Renderer {
    fn render_summary(&mut self, summary: &SummaryView);

    fn render_list(&mut self, list: &ListView);

    /// Blocking notification (validation failures, save errors)
    fn notify(&mut self, message: &str);

    /// Clear the entry form and preset its date field
    fn reset_form(&mut self, date: NaiveDate);

    /// Show or hide the extra input of the `other` category
    fn set_category_detail_visible(&mut self, visible: bool);

    /// Mark the filter control that is active
    fn set_active_filter(&mut self, filter: Filter);
}

/// Display conventions: currency symbol and locale date format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    currency_symbol: String,
    date_format: String,
}

impl ViewSettings {
    /// An unusable `date_format` falls back to ISO dates
    pub fn new(currency_symbol: impl Into<String>, date_format: impl Into<String>) -> Self {
        let mut date_format = date_format.into();
        if !is_valid_date_format(&date_format) {
            warn!(
                "Date format '{}' cannot format dates, using {}",
                date_format, ISO_DATE_FORMAT
            );
            date_format = ISO_DATE_FORMAT.to_string();
        }
        Self {
            currency_symbol: currency_symbol.into(),
            date_format,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Two-decimal amount with the currency symbol, e.g. `$12.50` or `-$3.00`
    pub fn format_money(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{:.2}", sign, self.currency_symbol, rounded.abs())
    }

    /// List amount with the sign of its type, e.g. `+$1000.00` or `-$400.00`
    pub fn format_signed(&self, tx: &Transaction) -> String {
        format!("{}{}", tx.tx_type.sign(), self.format_money(tx.amount))
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => date.format(ISO_DATE_FORMAT).to_string(),
        }
    }

    pub fn summary_view(&self, summary: &Summary) -> SummaryView {
        SummaryView {
            balance: self.format_money(summary.balance),
            income: self.format_money(summary.income),
            expenses: self.format_money(summary.expenses),
        }
    }

    pub fn row(&self, tx: &Transaction) -> TransactionRow {
        TransactionRow {
            id: tx.id,
            description: tx.description.clone(),
            date: self.format_date(tx.date),
            category: tx.category.clone(),
            amount: self.format_signed(tx),
            tx_type: tx.tx_type,
        }
    }

    /// List view for already-filtered transactions
    pub fn list_view(&self, filter: Filter, transactions: &[&Transaction]) -> ListView {
        let content = if transactions.is_empty() {
            ListContent::Empty(empty_state_message(filter))
        } else {
            ListContent::Rows(transactions.iter().map(|tx| self.row(tx)).collect())
        };
        ListView { filter, content }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::new("$", "%m/%d/%Y")
    }
}

/// Message shown when the filtered list is empty
pub fn empty_state_message(filter: Filter) -> String {
    match filter {
        Filter::All => "No transactions found.".to_string(),
        other => format!("No {} transactions found.", other),
    }
}

/// True if chrono can parse the strftime string and it only uses date fields
pub fn is_valid_date_format(format: &str) -> bool {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let probe = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN);
    let mut out = String::new();
    write!(out, "{}", probe.format(format)).is_ok()
}

/// Plain-text renderer for terminals
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            error!("Failed to write output: {}", e);
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_summary(&mut self, summary: &SummaryView) {
        let text = format!(
            "Balance: {}  Income: {}  Expenses: {}",
            summary.balance, summary.income, summary.expenses
        );
        self.line(&text);
    }

    fn render_list(&mut self, list: &ListView) {
        self.line(&format!("Transactions [{}]", list.filter));
        match &list.content {
            ListContent::Empty(message) => self.line(&format!("  {}", message)),
            ListContent::Rows(rows) => {
                for row in rows {
                    let text = format!(
                        "  #{} {} {} ({}) {}",
                        row.id, row.date, row.description, row.category, row.amount
                    );
                    self.line(&text);
                }
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }

    fn reset_form(&mut self, _date: NaiveDate) {}

    fn set_category_detail_visible(&mut self, visible: bool) {
        if visible {
            self.line("Enter the custom category as other:<name>");
        }
    }

    fn set_active_filter(&mut self, _filter: Filter) {}
}
