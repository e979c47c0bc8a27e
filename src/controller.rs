use chrono::NaiveDate;
use log::debug;

use crate::clock::Clock;
use crate::error::StoreError;
use crate::models::{is_other, Filter, TransactionForm, TransactionId};
use crate::storage::KeyValueStorage;
use crate::store::{StoreChange, TransactionStore};
use crate::view::{Renderer, ViewSettings};

/// Input controller: turns user intents into store operations and re-renders
///
/// All work for one intent (validation, mutation, snapshot write, rendering)
/// completes before the call returns.
pub struct Tracker<S: KeyValueStorage, C: Clock, R: Renderer> {
    store: TransactionStore<S, C>,
    renderer: R,
    settings: ViewSettings,
    /// Active list filter, starts at `All`
    filter: Filter,
    /// Value preset in the form's date field
    form_date: NaiveDate,
}

impl<S: KeyValueStorage, C: Clock, R: Renderer> Tracker<S, C, R> {
    /// Wire the store to a renderer and draw the initial state
    pub fn new(store: TransactionStore<S, C>, renderer: R, settings: ViewSettings) -> Self {
        let form_date = store.clock().today();
        let mut tracker = Self {
            store,
            renderer,
            settings,
            filter: Filter::All,
            form_date,
        };
        tracker.renderer.reset_form(form_date);
        tracker.renderer.set_active_filter(Filter::All);
        tracker.refresh();
        tracker
    }

    /// Submit intent
    ///
    /// Returns true if a record was added. On success the form is cleared and
    /// its date reset to today; on rejection the user is notified and the form
    /// keeps its values.
    pub fn submit(&mut self, form: &TransactionForm) -> bool {
        match self.store.add(form) {
            Ok(change) => {
                let added = matches!(change, StoreChange::Added(_));
                if added {
                    self.reset_form();
                }
                self.on_change(&change);
                added
            }
            Err(StoreError::Invalid(e)) => {
                self.renderer.notify(&e.to_string());
                false
            }
            Err(StoreError::Persist { change, source }) => {
                self.reset_form();
                self.on_change(&change);
                self.renderer
                    .notify(&format!("Could not save transactions: {}", source));
                matches!(change, StoreChange::Added(_))
            }
        }
    }

    /// Delete intent bound to a rendered row
    pub fn delete(&mut self, id: TransactionId) {
        match self.store.remove(id) {
            Ok(change) => self.on_change(&change),
            Err(StoreError::Persist { change, source }) => {
                self.on_change(&change);
                self.renderer
                    .notify(&format!("Could not save transactions: {}", source));
            }
            Err(StoreError::Invalid(e)) => self.renderer.notify(&e.to_string()),
        }
    }

    /// Filter-change intent; only the list is redrawn
    pub fn change_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.renderer.set_active_filter(filter);
        self.render_list();
    }

    /// Category selection; `other` reveals the extra detail input
    pub fn select_category(&mut self, category: &str) {
        self.renderer.set_category_detail_visible(is_other(category));
    }

    /// Redraw summary and list from the current store state
    pub fn refresh(&mut self) {
        self.render_summary();
        self.render_list();
    }

    fn on_change(&mut self, change: &StoreChange) {
        debug!("Store changed: {:?}", change);
        self.refresh();
    }

    fn reset_form(&mut self) {
        self.form_date = self.store.clock().today();
        self.renderer.reset_form(self.form_date);
        self.renderer.set_category_detail_visible(false);
    }

    fn render_summary(&mut self) {
        let view = self.settings.summary_view(&self.store.summarize());
        self.renderer.render_summary(&view);
    }

    fn render_list(&mut self) {
        let transactions = self.store.filter(self.filter);
        let view = self.settings.list_view(self.filter, &transactions);
        self.renderer.render_list(&view);
    }

    pub fn active_filter(&self) -> Filter {
        self.filter
    }

    pub fn form_date(&self) -> NaiveDate {
        self.form_date
    }

    pub fn store(&self) -> &TransactionStore<S, C> {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (TransactionStore<S, C>, R) {
        (self.store, self.renderer)
    }
}
