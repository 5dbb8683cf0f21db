//! Search store contract
//!
//! The ratings filter never owns search state. It talks to an externally
//! owned store through the `SearchStore` trait, which covers the whole
//! lifecycle surface: registration, publishing its settings, watching other
//! components, installing a query listener, and committing queries.
//!
//! ```text
//! ┌──────────────────┐   register / publish / subscribe   ┌──────────────┐
//! │  RatingsFilter   │ ─────────────────────────────────▶ │  SearchStore │
//! │  (local state)   │ ◀───────────────────────────────── │  (external)  │
//! └──────────────────┘        selected_value(id)          └──────────────┘
//! ```
//!
//! `MemoryStore` is the in-process implementation used by the binary and
//! the tests.

pub mod memory;
pub mod react;

pub use memory::MemoryStore;
pub use react::{ReactClause, ReactSpec};

use crate::config::FilterConfig;
use crate::filter::Selection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::rc::Rc;

/// Extra request options split off a custom query (everything but `query`)
pub type QueryOptions = Map<String, Value>;

/// Called with `(previous, next)` whenever a component's committed query
/// changes
pub type QueryListener = Rc<dyn Fn(Option<&Value>, Option<&Value>)>;

/// Consulted before a committed query is applied; an `Err` vetoes it
pub type BeforeQueryChange = Rc<dyn Fn(Option<&Value>) -> Result<(), String>>;

/// Kind of component registered in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentType {
    /// Star-rating range filter
    RatingsFilter,
}

/// Settings a component publishes about itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedProps {
    /// Kind of component
    #[serde(rename = "componentType")]
    pub component_type: ComponentType,
    /// Declarative settings
    #[serde(flatten)]
    pub config: FilterConfig,
}

impl PublishedProps {
    /// Props for a ratings filter
    #[must_use]
    pub fn ratings_filter(config: &FilterConfig) -> Self {
        Self {
            component_type: ComponentType::RatingsFilter,
            config: config.clone(),
        }
    }
}

/// A query commit pushed into the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryUpdate {
    /// Component the query belongs to
    pub component_id: String,
    /// Query fragment, `None` meaning "no filter"
    pub query: Option<Value>,
    /// Selection the query was derived from
    pub value: Option<Selection>,
    /// Label shown next to the active filter
    pub label: Option<String>,
    /// Whether the active filter is listed among selected filters
    pub show_filter: bool,
    /// Whether the value is mirrored into URL parameters
    #[serde(rename = "URLParams")]
    pub url_params: bool,
    /// Kind of component
    pub component_type: ComponentType,
}

/// Store-handle interface used by the ratings filter
///
/// None of these operations fail from the component's point of view; a store
/// that cannot honour a call is expected to log and carry on.
pub trait SearchStore {
    /// Add a component entry
    fn register(&mut self, component_id: &str);

    /// Remove a component entry and everything recorded for it
    fn unregister(&mut self, component_id: &str);

    /// Record a component's settings for the first time
    fn publish(&mut self, component_id: &str, props: &PublishedProps);

    /// Replace a component's previously published settings
    fn republish(&mut self, component_id: &str, props: &PublishedProps);

    /// Watch other components according to `react`
    fn subscribe(&mut self, component_id: &str, react: &ReactSpec);

    /// Install listeners around the component's committed query
    fn set_query_listener(
        &mut self,
        component_id: &str,
        on_change: Option<QueryListener>,
        before_change: Option<BeforeQueryChange>,
    );

    /// Attach (or clear) extra request options for the component
    fn set_query_options(&mut self, component_id: &str, options: Option<QueryOptions>);

    /// Commit a derived query
    fn commit_query(&mut self, update: QueryUpdate);

    /// Value currently selected for the component, as seen by the store
    fn selected_value(&self, component_id: &str) -> Option<Selection>;
}
