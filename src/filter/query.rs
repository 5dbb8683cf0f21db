//! Query derivation
//!
//! Turns a selection into the query fragment committed to the store:
//!
//! ```json
//! { "range": { "rating": { "gte": 4.0, "lte": 5.0, "boost": 2.0 } } }
//! ```
//!
//! With a nested field the range is wrapped as
//! `{ "query": { "nested": { "path": .., "query": <range> } } }`.

use super::types::Selection;
use crate::config::FilterConfig;
use crate::store::QueryOptions;
use serde_json::{Value, json};
use std::rc::Rc;

/// Boost applied to the range condition
pub const RANGE_BOOST: f64 = 2.0;

/// Caller-supplied replacement for `default_query`
///
/// The returned object's `query` key is the query; any other top-level keys
/// are passed on as query options.
pub type CustomQuery = Rc<dyn Fn(Option<&Selection>, &FilterConfig) -> Option<Value>>;

/// Query and options produced for one commit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedQuery {
    /// Query fragment, `None` meaning "no filter"
    pub query: Option<Value>,
    /// Options split off a custom query
    pub options: Option<QueryOptions>,
}

/// Build the range query for a selection
///
/// Returns `None` when there is no selection or no field to query.
#[must_use]
pub fn default_query(
    value: Option<&Selection>,
    data_field: &str,
    nested_field: Option<&str>,
) -> Option<Value> {
    let value = value?;
    if data_field.is_empty() {
        tracing::debug!("no data field configured, skipping range query");
        return None;
    }

    let mut fields = serde_json::Map::new();
    fields.insert(
        data_field.to_string(),
        json!({
            "gte": value.start,
            "lte": value.end,
            "boost": RANGE_BOOST,
        }),
    );
    let range = json!({ "range": fields });

    match nested_field.filter(|path| !path.is_empty()) {
        Some(path) => Some(json!({
            "query": {
                "nested": {
                    "path": path,
                    "query": range,
                }
            }
        })),
        None => Some(range),
    }
}

/// Everything in a custom query result except its `query` key
///
/// Returns `None` if nothing is left over or the result is not an object.
#[must_use]
pub fn options_from_query(custom: Option<&Value>) -> Option<QueryOptions> {
    let object = custom?.as_object()?;
    let options: QueryOptions = object
        .iter()
        .filter(|(key, _)| key.as_str() != "query")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    (!options.is_empty()).then_some(options)
}

/// Resolve the query to commit for `value`
///
/// A custom query is called exactly once; its result supplies both the query
/// and the options. Without one the default range query is used and options
/// are cleared.
#[must_use]
pub fn resolve(
    value: Option<&Selection>,
    config: &FilterConfig,
    custom: Option<&CustomQuery>,
) -> ResolvedQuery {
    match custom {
        Some(custom) => {
            let result = custom(value, config);
            ResolvedQuery {
                query: result.as_ref().and_then(|r| r.get("query")).cloned(),
                options: options_from_query(result.as_ref()),
            }
        }
        None => ResolvedQuery {
            query: default_query(value, &config.data_field, config.nested_path()),
            options: None,
        },
    }
}
