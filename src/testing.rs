//! Testing utilities for starfilter
//!
//! Shared fixtures for unit tests: a sample configuration and a recorder for
//! selection callbacks.
//!
//! Only available when compiled with `cfg(test)`.

use crate::config::FilterConfig;
use crate::filter::{RatingTier, Selection};
use std::cell::RefCell;
use std::rc::Rc;

/// Component id used by the fixtures
pub const COMPONENT_ID: &str = "ratings";

/// Configuration with four labelled tiers on the `rating` field
#[must_use]
pub fn sample_config() -> FilterConfig {
    FilterConfig::new(COMPONENT_ID, "rating").with_tiers(vec![
        RatingTier::new(4.0, 5.0).with_label("4 & up"),
        RatingTier::new(3.0, 5.0).with_label("3 & up"),
        RatingTier::new(2.0, 5.0).with_label("2 & up"),
        RatingTier::new(1.0, 5.0).with_label("1 & up"),
    ])
}

/// Collects every selection a callback was invoked with
///
/// # Examples
/// ```ignore
/// let recorder = SelectionRecorder::default();
/// let callback = recorder.callback();
/// callback(Some(&Selection::new(4.0, 5.0)));
/// assert_eq!(recorder.calls(), vec![Some(Selection::new(4.0, 5.0))]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionRecorder {
    calls: Rc<RefCell<Vec<Option<Selection>>>>,
}

impl SelectionRecorder {
    /// Callback that appends to this recorder
    pub fn callback(&self) -> impl Fn(Option<&Selection>) + 'static {
        let calls = Rc::clone(&self.calls);
        move |value: Option<&Selection>| calls.borrow_mut().push(value.copied())
    }

    /// Recorded selections, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<Option<Selection>> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }
}
