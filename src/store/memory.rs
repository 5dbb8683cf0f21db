//! In-memory search store
//!
//! Records everything components push into it and replays selected values
//! back out. Nothing here executes a query; `MemoryStore` only keeps the
//! bookkeeping a real search backend would be fed from.

use super::{
    BeforeQueryChange, PublishedProps, QueryListener, QueryOptions, QueryUpdate, ReactSpec,
    SearchStore,
};
use crate::filter::Selection;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[derive(Clone, Default)]
struct Listeners {
    on_change: Option<QueryListener>,
    before_change: Option<BeforeQueryChange>,
}

/// Store that keeps all component state in process
#[derive(Default)]
pub struct MemoryStore {
    components: BTreeSet<String>,
    props: HashMap<String, PublishedProps>,
    dependencies: HashMap<String, ReactSpec>,
    listeners: HashMap<String, Listeners>,
    options: HashMap<String, QueryOptions>,
    queries: HashMap<String, Value>,
    selected: HashMap<String, Selection>,
    commits: Vec<QueryUpdate>,
    removals: HashMap<String, usize>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a selected value, as if restored from URL parameters
    #[must_use]
    pub fn with_selected_value(mut self, component_id: impl Into<String>, value: Selection) -> Self {
        self.selected.insert(component_id.into(), value);
        self
    }

    /// Change a component's selected value from outside the component
    ///
    /// Passing `None` clears it, which is what a "clear all filters" action
    /// does.
    pub fn set_selected_value(&mut self, component_id: &str, value: Option<Selection>) {
        match value {
            Some(value) => {
                self.selected.insert(component_id.to_string(), value);
            }
            None => {
                self.selected.remove(component_id);
            }
        }
    }

    /// Whether the component is currently registered
    #[must_use]
    pub fn is_registered(&self, component_id: &str) -> bool {
        self.components.contains(component_id)
    }

    /// Registered component ids, sorted
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    /// Last published settings for a component
    #[must_use]
    pub fn props(&self, component_id: &str) -> Option<&PublishedProps> {
        self.props.get(component_id)
    }

    /// Dependency spec a component subscribed with
    #[must_use]
    pub fn dependencies(&self, component_id: &str) -> Option<&ReactSpec> {
        self.dependencies.get(component_id)
    }

    /// Components whose dependency spec references `component_id`
    #[must_use]
    pub fn watchers_of(&self, component_id: &str) -> Vec<&str> {
        let mut watchers: Vec<&str> = self
            .dependencies
            .iter()
            .filter(|(_, spec)| spec.depends_on(component_id))
            .map(|(id, _)| id.as_str())
            .collect();
        watchers.sort_unstable();
        watchers
    }

    /// Currently committed query for a component
    #[must_use]
    pub fn query(&self, component_id: &str) -> Option<&Value> {
        self.queries.get(component_id)
    }

    /// Query options attached to a component
    #[must_use]
    pub fn options(&self, component_id: &str) -> Option<&QueryOptions> {
        self.options.get(component_id)
    }

    /// Every commit received, oldest first
    #[must_use]
    pub fn commits(&self) -> &[QueryUpdate] {
        &self.commits
    }

    /// Most recent commit for a component
    #[must_use]
    pub fn last_commit(&self, component_id: &str) -> Option<&QueryUpdate> {
        self.commits
            .iter()
            .rev()
            .find(|update| update.component_id == component_id)
    }

    /// How many times a registered entry was actually removed
    #[must_use]
    pub fn removal_count(&self, component_id: &str) -> usize {
        self.removals.get(component_id).copied().unwrap_or(0)
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("components", &self.components)
            .field("queries", &self.queries)
            .field("selected", &self.selected)
            .field("commits", &self.commits.len())
            .finish_non_exhaustive()
    }
}

impl SearchStore for MemoryStore {
    fn register(&mut self, component_id: &str) {
        if !self.components.insert(component_id.to_string()) {
            tracing::debug!("component '{component_id}' registered twice");
        }
    }

    fn unregister(&mut self, component_id: &str) {
        if !self.components.remove(component_id) {
            tracing::warn!("unregister for unknown component '{component_id}'");
            return;
        }

        self.props.remove(component_id);
        self.dependencies.remove(component_id);
        self.listeners.remove(component_id);
        self.options.remove(component_id);
        self.queries.remove(component_id);
        self.selected.remove(component_id);
        *self.removals.entry(component_id.to_string()).or_insert(0) += 1;
    }

    fn publish(&mut self, component_id: &str, props: &PublishedProps) {
        self.props.insert(component_id.to_string(), props.clone());
    }

    fn republish(&mut self, component_id: &str, props: &PublishedProps) {
        if self
            .props
            .insert(component_id.to_string(), props.clone())
            .is_none()
        {
            tracing::debug!("republish for '{component_id}' without prior publish");
        }
    }

    fn subscribe(&mut self, component_id: &str, react: &ReactSpec) {
        if react.is_empty() {
            self.dependencies.remove(component_id);
        } else {
            self.dependencies
                .insert(component_id.to_string(), react.clone());
        }
    }

    fn set_query_listener(
        &mut self,
        component_id: &str,
        on_change: Option<QueryListener>,
        before_change: Option<BeforeQueryChange>,
    ) {
        self.listeners.insert(
            component_id.to_string(),
            Listeners {
                on_change,
                before_change,
            },
        );
    }

    fn set_query_options(&mut self, component_id: &str, options: Option<QueryOptions>) {
        match options {
            Some(options) => {
                self.options.insert(component_id.to_string(), options);
            }
            None => {
                self.options.remove(component_id);
            }
        }
    }

    fn commit_query(&mut self, update: QueryUpdate) {
        let id = update.component_id.clone();
        let listeners = self.listeners.get(&id).cloned().unwrap_or_default();

        if let Some(before) = &listeners.before_change
            && let Err(reason) = before(update.query.as_ref())
        {
            tracing::debug!("query for '{id}' vetoed: {reason}");
            return;
        }

        let previous = match &update.query {
            Some(query) => self.queries.insert(id.clone(), query.clone()),
            None => self.queries.remove(&id),
        };
        self.set_selected_value(&id, update.value);

        if previous.as_ref() != update.query.as_ref()
            && let Some(on_change) = &listeners.on_change
        {
            on_change(previous.as_ref(), update.query.as_ref());
        }

        tracing::trace!("committed query for '{id}'");
        self.commits.push(update);
    }

    fn selected_value(&self, component_id: &str) -> Option<Selection> {
        self.selected.get(component_id).copied()
    }
}
