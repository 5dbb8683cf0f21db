//! Ratings filter state and store synchronisation
//!
//! `RatingsFilter` owns the local selection and keeps it in step with the
//! store. The host drives it through an explicit lifecycle:
//!
//! ```text
//! new ──▶ (update | refresh | handle_click)* ──▶ flush ──▶ ... ──▶ teardown
//! ```
//!
//! Value changes requested during a cycle are queued and applied by `flush`,
//! which the host calls once the cycle is over. While a change is queued the
//! filter is locked; with a `before_value_change` gate configured, further
//! requests are dropped until the lock is released.

use super::props::{RatingsFilterProps, ValueMode};
use super::query::{self, ResolvedQuery};
use super::types::{RatingTier, Selection};
use crate::store::{ComponentType, PublishedProps, QueryUpdate, ReactSpec, SearchStore};
use std::collections::VecDeque;

/// A star-rating range filter bound to a search store
#[derive(Debug)]
pub struct RatingsFilter {
    props: RatingsFilterProps,
    /// Local selection
    current_value: Option<Selection>,
    /// Store-selected value seen during the previous cycle
    selected_value: Option<Selection>,
    locked: bool,
    pending: VecDeque<Option<Selection>>,
    cursor: usize,
}

impl RatingsFilter {
    /// Create the filter and register it with the store
    ///
    /// The initial selection is the store's selected value, falling back to
    /// the configured default and then to the controlled value. If there is
    /// one, its query is committed right away.
    pub fn new<S: SearchStore + ?Sized>(props: RatingsFilterProps, store: &mut S) -> Self {
        let id = props.config.component_id.clone();
        let selected_value = store.selected_value(&id);
        let initial = selected_value
            .or(props.config.default_value)
            .or_else(|| props.mode.controlled_value().flatten());

        store.register(&id);
        store.publish(&id, &PublishedProps::ratings_filter(&props.config));
        store.set_query_listener(&id, props.on_query_change.clone(), None);
        tracing::debug!("registered ratings filter '{id}'");

        let mut filter = Self {
            props,
            current_value: initial,
            selected_value,
            locked: false,
            pending: VecDeque::new(),
            cursor: 0,
        };
        filter.sync_cursor();
        filter.subscribe(store);

        if initial.is_some() {
            filter.apply_initial(initial, store);
        }

        filter
    }

    /// Apply new props, comparing them against the previous ones
    ///
    /// Value changes this triggers are queued; call `flush` afterwards.
    pub fn update<S: SearchStore + ?Sized>(&mut self, store: &mut S, next: RatingsFilterProps) {
        let prev = std::mem::replace(&mut self.props, next);
        let id = self.props.config.component_id.clone();

        if prev.config.component_id != id {
            tracing::debug!(
                "ratings filter renamed from '{}' to '{id}'",
                prev.config.component_id
            );
            store.unregister(&prev.config.component_id);
            store.register(&id);
            store.publish(&id, &PublishedProps::ratings_filter(&self.props.config));
            store.set_query_listener(&id, self.props.on_query_change.clone(), None);
            self.subscribe(store);
            self.selected_value = store.selected_value(&id);
        } else if prev.config != self.props.config {
            store.republish(&id, &PublishedProps::ratings_filter(&self.props.config));
        }

        if prev.config.data != self.props.config.data {
            self.cursor = self.cursor.min(self.tiers().len().saturating_sub(1));
            self.sync_cursor();
        }

        if prev.config.react != self.props.config.react {
            self.subscribe(store);
        }

        if prev.config.data_field != self.props.config.data_field
            || prev.config.nested_field != self.props.config.nested_field
        {
            self.commit(self.current_value, store);
        }

        let prev_controlled = prev.mode.controlled_value();
        let next_controlled = self.props.mode.controlled_value();
        if prev_controlled == next_controlled {
            self.sync_selected(store);
        } else {
            self.selected_value = store.selected_value(&id);
            self.set_value(next_controlled.flatten());
        }
    }

    /// React to an external change in the store with unchanged props
    ///
    /// Value changes this triggers are queued; call `flush` afterwards.
    pub fn refresh<S: SearchStore + ?Sized>(&mut self, store: &S) {
        self.sync_selected(store);
    }

    /// Unregister from the store, consuming the filter
    pub fn teardown<S: SearchStore + ?Sized>(self, store: &mut S) {
        let id = &self.props.config.component_id;
        store.unregister(id);
        tracing::debug!("unregistered ratings filter '{id}'");
    }

    /// Handle a click on a tier with the given bounds
    ///
    /// Uncontrolled filters queue the change; controlled filters hand it to
    /// `on_change` and leave local state alone.
    pub fn handle_click(&mut self, selection: Selection) {
        match self.props.mode.clone() {
            ValueMode::Uncontrolled => {
                self.set_value(Some(selection));
            }
            ValueMode::Controlled {
                on_change: Some(on_change),
                ..
            } => on_change(Some(&selection)),
            ValueMode::Controlled { on_change: None, .. } => {
                tracing::trace!("click ignored, controlled filter has no change callback");
            }
        }
    }

    /// Click the tier at `index`, moving the cursor there
    ///
    /// Returns the tier's bounds, or `None` if there is no such tier.
    pub fn select_tier(&mut self, index: usize) -> Option<Selection> {
        let selection = self.props.config.data.get(index)?.selection();
        self.cursor = index;
        self.handle_click(selection);
        Some(selection)
    }

    /// Click the tier under the cursor
    pub fn activate(&mut self) -> Option<Selection> {
        self.select_tier(self.cursor)
    }

    /// Request a value change
    ///
    /// Returns `false` if the request was dropped because a gated change is
    /// still in flight.
    pub fn set_value(&mut self, value: Option<Selection>) -> bool {
        if self.props.before_value_change.is_some() && self.locked {
            tracing::debug!(
                "dropping value change for '{}' while locked",
                self.props.config.component_id
            );
            return false;
        }

        self.locked = true;
        self.pending.push_back(value);
        true
    }

    /// Apply queued value changes at the end of the host's update cycle
    ///
    /// Returns the number of changes applied.
    pub fn flush<S: SearchStore + ?Sized>(&mut self, store: &mut S) -> usize {
        let mut applied = 0;

        while let Some(value) = self.pending.pop_front() {
            if !self.passes_gate(value.as_ref()) {
                self.locked = false;
                continue;
            }

            self.current_value = value;
            self.sync_cursor();
            self.commit(value, store);
            self.locked = false;
            if let Some(on_value_change) = &self.props.on_value_change {
                on_value_change(value.as_ref());
            }
            applied += 1;
        }

        applied
    }

    /// Query for the current selection
    #[must_use]
    pub fn query(&self) -> ResolvedQuery {
        query::resolve(
            self.current_value.as_ref(),
            &self.props.config,
            self.props.custom_query.as_ref(),
        )
    }

    /// Current local selection
    #[must_use]
    pub const fn current_value(&self) -> Option<Selection> {
        self.current_value
    }

    /// Whether a value change is in flight
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether changes are waiting for `flush`
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Current props
    #[must_use]
    pub const fn props(&self) -> &RatingsFilterProps {
        &self.props
    }

    /// Identifier the filter is registered under
    #[must_use]
    pub fn component_id(&self) -> &str {
        &self.props.config.component_id
    }

    /// Listed tiers
    #[must_use]
    pub fn tiers(&self) -> &[RatingTier] {
        &self.props.config.data
    }

    /// Index of the tier under the cursor
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor up one tier
    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one tier
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.tiers().len() {
            self.cursor += 1;
        }
    }

    /// Jump to the first tier
    pub const fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the last tier
    pub fn cursor_last(&mut self) {
        self.cursor = self.tiers().len().saturating_sub(1);
    }

    /// Commit the initial selection during construction
    ///
    /// Local state already holds the value, so only the query is pushed.
    fn apply_initial<S: SearchStore + ?Sized>(&mut self, value: Option<Selection>, store: &mut S) {
        self.locked = true;
        if !self.passes_gate(value.as_ref()) {
            self.locked = false;
            return;
        }

        self.commit(value, store);
        self.locked = false;
        if let Some(on_value_change) = &self.props.on_value_change {
            on_value_change(value.as_ref());
        }
    }

    fn passes_gate(&self, value: Option<&Selection>) -> bool {
        let Some(gate) = &self.props.before_value_change else {
            return true;
        };

        match gate(value) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(
                    "value change for '{}' rejected: {reason}",
                    self.props.config.component_id
                );
                false
            }
        }
    }

    fn commit<S: SearchStore + ?Sized>(&self, value: Option<Selection>, store: &mut S) {
        let config = &self.props.config;
        let ResolvedQuery { query, options } = query::resolve(
            value.as_ref(),
            config,
            self.props.custom_query.as_ref(),
        );

        store.set_query_options(&config.component_id, options);
        store.commit_query(QueryUpdate {
            component_id: config.component_id.clone(),
            query,
            value,
            label: config.filter_label.clone(),
            show_filter: config.show_filter,
            url_params: config.url_params,
            component_type: ComponentType::RatingsFilter,
        });
    }

    fn subscribe<S: SearchStore + ?Sized>(&self, store: &mut S) {
        let id = &self.props.config.component_id;
        match &self.props.config.react {
            Some(react) => store.subscribe(id, react),
            None => store.subscribe(id, &ReactSpec::default()),
        }
    }

    fn sync_selected<S: SearchStore + ?Sized>(&mut self, store: &S) {
        let selected = store.selected_value(&self.props.config.component_id);
        let prev_selected = std::mem::replace(&mut self.selected_value, selected);

        if self.current_value == selected || selected == prev_selected {
            return;
        }

        match self.props.mode.clone() {
            ValueMode::Uncontrolled => {
                self.set_value(selected);
            }
            ValueMode::Controlled {
                on_change: Some(on_change),
                ..
            } => on_change(selected.as_ref()),
            ValueMode::Controlled { on_change: None, .. } => {
                self.set_value(self.current_value);
            }
        }
    }

    fn sync_cursor(&mut self) {
        if let Some(index) = self
            .tiers()
            .iter()
            .position(|tier| tier.is_active(self.current_value.as_ref()))
        {
            self.cursor = index;
        }
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod widget_tests;
