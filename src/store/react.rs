//! Dependency specs ("react")
//!
//! A `ReactSpec` names the other components whose queries should feed into
//! this component's query. Each of `and`, `or` and `not` holds a clause that
//! is a single component id, a list of clauses, or another nested spec:
//!
//! ```toml
//! react = { and = ["search", "category"], not = "out-of-stock" }
//! ```

use serde::{Deserialize, Serialize};

/// Which components' changes should trigger a re-query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactSpec {
    /// All of these must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<ReactClause>,
    /// Any of these may match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<ReactClause>,
    /// None of these may match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<ReactClause>,
}

/// One side of a `ReactSpec`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactClause {
    /// A single component id
    Component(String),
    /// Several clauses
    List(Vec<ReactClause>),
    /// A nested spec
    Nested(Box<ReactSpec>),
}

impl ReactSpec {
    /// Spec requiring all of the given components
    #[must_use]
    pub fn and<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            and: Some(ReactClause::list(ids)),
            ..Self::default()
        }
    }

    /// Spec requiring any of the given components
    #[must_use]
    pub fn or<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            or: Some(ReactClause::list(ids)),
            ..Self::default()
        }
    }

    /// Exclude the given components
    #[must_use]
    pub fn with_not<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not = Some(ReactClause::list(ids));
        self
    }

    /// True when no clause is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.and.is_none() && self.or.is_none() && self.not.is_none()
    }

    /// Every component id referenced anywhere in the spec, in order of
    /// first appearance
    #[must_use]
    pub fn component_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    /// Whether the spec references the given component
    #[must_use]
    pub fn depends_on(&self, component_id: &str) -> bool {
        self.component_ids().iter().any(|id| id == component_id)
    }

    fn collect_ids(&self, ids: &mut Vec<String>) {
        for clause in [&self.and, &self.or, &self.not].into_iter().flatten() {
            clause.collect_ids(ids);
        }
    }
}

impl ReactClause {
    fn list<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            ids.into_iter()
                .map(|id| Self::Component(id.into()))
                .collect(),
        )
    }

    fn collect_ids(&self, ids: &mut Vec<String>) {
        match self {
            Self::Component(id) => {
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
            Self::List(clauses) => {
                for clause in clauses {
                    clause.collect_ids(ids);
                }
            }
            Self::Nested(spec) => spec.collect_ids(ids),
        }
    }
}
