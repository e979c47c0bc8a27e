#![allow(dead_code)]

use chrono::NaiveDate;
use expense_tracker::clock::FixedClock;
use expense_tracker::models::{Filter, Transaction, TransactionForm, TransactionType};
use expense_tracker::view::{ListView, Renderer, SummaryView};
use rust_decimal::Decimal;

/// 2024-01-01T00:00:00Z in milliseconds
pub const NOW_MILLIS: i64 = 1_704_067_200_000;

pub const KEY: &str = "expenseTrackerTransactions";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Clock frozen at 2024-01-01
pub fn fixed_clock() -> FixedClock {
    FixedClock::new(NOW_MILLIS, date(2024, 1, 1))
}

/// Helper to create a stored transaction with all fields
pub fn make_transaction(
    id: u64,
    tx_type: TransactionType,
    amount: Decimal,
    description: &str,
    date: NaiveDate,
) -> Transaction {
    Transaction {
        id,
        description: description.to_string(),
        amount,
        tx_type,
        category: "general".to_string(),
        date,
    }
}

/// Helper to fill the entry form
pub fn make_form(tx_type: &str, amount: &str, date: &str, description: &str) -> TransactionForm {
    TransactionForm {
        description: description.to_string(),
        amount: amount.to_string(),
        tx_type: tx_type.to_string(),
        category: "general".to_string(),
        category_detail: String::new(),
        date: date.to_string(),
    }
}

/// Everything the controller asked the presentation layer to do
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Summary(SummaryView),
    List(ListView),
    Notify(String),
    ResetForm(NaiveDate),
    CategoryDetail(bool),
    ActiveFilter(Filter),
}

/// Renderer that records calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn last_summary(&self) -> Option<&SummaryView> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::Summary(s) => Some(s),
            _ => None,
        })
    }

    pub fn last_list(&self) -> Option<&ListView> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::List(l) => Some(l),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Notify(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&RenderEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn render_summary(&mut self, summary: &SummaryView) {
        self.events.push(RenderEvent::Summary(summary.clone()));
    }

    fn render_list(&mut self, list: &ListView) {
        self.events.push(RenderEvent::List(list.clone()));
    }

    fn notify(&mut self, message: &str) {
        self.events.push(RenderEvent::Notify(message.to_string()));
    }

    fn reset_form(&mut self, date: NaiveDate) {
        self.events.push(RenderEvent::ResetForm(date));
    }

    fn set_category_detail_visible(&mut self, visible: bool) {
        self.events.push(RenderEvent::CategoryDetail(visible));
    }

    fn set_active_filter(&mut self, filter: Filter) {
        self.events.push(RenderEvent::ActiveFilter(filter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_make_transaction() {
        let tx = make_transaction(7, TransactionType::Income, dec!(50.25), "Gift", date(2024, 2, 3));
        assert_eq!(tx.id, 7);
        assert_eq!(tx.amount, dec!(50.25));
        assert!(tx.is_income());
    }

    #[test]
    fn test_recording_renderer_tracks_notifications() {
        let mut renderer = RecordingRenderer::new();
        renderer.notify("hello");
        renderer.set_active_filter(Filter::Income);
        assert_eq!(renderer.notifications(), vec!["hello"]);
        assert_eq!(renderer.events.len(), 2);
    }
}
