//! Ratings filter props
//!
//! `RatingsFilterProps` bundles the declarative `FilterConfig` with the
//! callbacks a host wires in. Whether the selection is owned by the host or
//! by the filter is decided once, through `ValueMode`.

use super::query::CustomQuery;
use super::types::Selection;
use crate::config::FilterConfig;
use crate::store::QueryListener;
use std::fmt;
use std::rc::Rc;

/// Receives a selection (`None` meaning "cleared")
pub type ChangeCallback = Rc<dyn Fn(Option<&Selection>)>;

/// Consulted before a value change is applied; an `Err` rejects it
pub type ValueGate = Rc<dyn Fn(Option<&Selection>) -> Result<(), String>>;

/// Who owns the selection
#[derive(Clone, Default)]
pub enum ValueMode {
    /// The filter keeps its own selection
    #[default]
    Uncontrolled,
    /// The host owns the selection and is told about requested changes
    Controlled {
        /// Selection imposed by the host
        value: Option<Selection>,
        /// Receives requested changes
        on_change: Option<ChangeCallback>,
    },
}

impl ValueMode {
    /// Host-controlled mode with a change callback
    #[must_use]
    pub fn controlled(
        value: Option<Selection>,
        on_change: impl Fn(Option<&Selection>) + 'static,
    ) -> Self {
        Self::Controlled {
            value,
            on_change: Some(Rc::new(on_change)),
        }
    }

    /// Whether the host owns the selection
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// The host-imposed value, or `None` when uncontrolled
    #[must_use]
    pub const fn controlled_value(&self) -> Option<Option<Selection>> {
        match self {
            Self::Uncontrolled => None,
            Self::Controlled { value, .. } => Some(*value),
        }
    }
}

impl fmt::Debug for ValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncontrolled => f.write_str("Uncontrolled"),
            Self::Controlled { value, on_change } => f
                .debug_struct("Controlled")
                .field("value", value)
                .field("on_change", &on_change.is_some())
                .finish(),
        }
    }
}

/// Everything a ratings filter is configured with
#[derive(Clone, Default)]
pub struct RatingsFilterProps {
    /// Declarative settings
    pub config: FilterConfig,
    /// Selection ownership
    pub mode: ValueMode,
    /// Replacement for the default range query
    pub custom_query: Option<CustomQuery>,
    /// Gate consulted before each value change
    pub before_value_change: Option<ValueGate>,
    /// Called after a value change was applied
    pub on_value_change: Option<ChangeCallback>,
    /// Called by the store when the committed query changes
    pub on_query_change: Option<QueryListener>,
}

impl RatingsFilterProps {
    /// Uncontrolled props with no callbacks
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set selection ownership
    #[must_use]
    pub fn mode(mut self, mode: ValueMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the default query
    #[must_use]
    pub fn custom_query(
        mut self,
        custom: impl Fn(Option<&Selection>, &FilterConfig) -> Option<serde_json::Value> + 'static,
    ) -> Self {
        self.custom_query = Some(Rc::new(custom));
        self
    }

    /// Gate value changes
    #[must_use]
    pub fn before_value_change(
        mut self,
        gate: impl Fn(Option<&Selection>) -> Result<(), String> + 'static,
    ) -> Self {
        self.before_value_change = Some(Rc::new(gate));
        self
    }

    /// Observe applied value changes
    #[must_use]
    pub fn on_value_change(mut self, callback: impl Fn(Option<&Selection>) + 'static) -> Self {
        self.on_value_change = Some(Rc::new(callback));
        self
    }

    /// Observe committed query changes
    #[must_use]
    pub fn on_query_change(
        mut self,
        listener: impl Fn(Option<&serde_json::Value>, Option<&serde_json::Value>) + 'static,
    ) -> Self {
        self.on_query_change = Some(Rc::new(listener));
        self
    }
}

impl fmt::Debug for RatingsFilterProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingsFilterProps")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("custom_query", &self.custom_query.is_some())
            .field("before_value_change", &self.before_value_change.is_some())
            .field("on_value_change", &self.on_value_change.is_some())
            .field("on_query_change", &self.on_query_change.is_some())
            .finish()
    }
}
