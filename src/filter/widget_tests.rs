use super::*;
use crate::config::FilterConfig;
use crate::filter::ValueMode;
use crate::store::MemoryStore;
use crate::testing::{COMPONENT_ID, SelectionRecorder, sample_config};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn range(field: &str, start: f64, end: f64) -> Value {
    let mut fields = serde_json::Map::new();
    fields.insert(
        field.to_string(),
        json!({ "gte": start, "lte": end, "boost": 2.0 }),
    );
    json!({ "range": fields })
}

fn uncontrolled(store: &mut MemoryStore) -> RatingsFilter {
    RatingsFilter::new(RatingsFilterProps::new(sample_config()), store)
}

#[test]
fn test_new_registers_and_publishes() {
    let mut store = MemoryStore::new();
    let filter = uncontrolled(&mut store);

    assert!(store.is_registered(COMPONENT_ID));
    let published = store.props(COMPONENT_ID).unwrap();
    assert_eq!(published.component_type, ComponentType::RatingsFilter);
    assert_eq!(published.config, sample_config());
    assert_eq!(filter.current_value(), None);
    assert!(store.commits().is_empty());
}

#[test]
fn test_new_with_default_commits_immediately() {
    let mut store = MemoryStore::new();
    let config = sample_config().with_default_value(Selection::new(3.0, 5.0));
    let filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    assert_eq!(filter.current_value(), Some(Selection::new(3.0, 5.0)));
    assert_eq!(filter.cursor(), 1);
    assert!(!filter.is_locked());

    let commit = store.last_commit(COMPONENT_ID).unwrap();
    assert_eq!(commit.query, Some(range("rating", 3.0, 5.0)));
    assert_eq!(commit.value, Some(Selection::new(3.0, 5.0)));
    assert!(commit.show_filter);
}

#[test]
fn test_new_prefers_store_selection() {
    let mut store = MemoryStore::new().with_selected_value(COMPONENT_ID, Selection::new(2.0, 5.0));
    let config = sample_config().with_default_value(Selection::new(4.0, 5.0));
    let filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    assert_eq!(filter.current_value(), Some(Selection::new(2.0, 5.0)));
    assert_eq!(store.query(COMPONENT_ID), Some(&range("rating", 2.0, 5.0)));
}

#[test]
fn test_new_falls_back_to_controlled_value() {
    let mut store = MemoryStore::new();
    let props = RatingsFilterProps::new(sample_config())
        .mode(ValueMode::controlled(Some(Selection::new(1.0, 5.0)), |_| {}));
    let filter = RatingsFilter::new(props, &mut store);

    assert_eq!(filter.current_value(), Some(Selection::new(1.0, 5.0)));
    assert_eq!(store.commits().len(), 1);
}

#[test]
fn test_new_subscribes_to_react() {
    let mut store = MemoryStore::new();
    let config = sample_config().with_react(ReactSpec::and(["search"]));
    let _filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    assert_eq!(store.dependencies(COMPONENT_ID), Some(&ReactSpec::and(["search"])));
    assert_eq!(store.watchers_of("search"), vec![COMPONENT_ID]);
}

#[test]
fn test_click_uncontrolled_updates_selection() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);

    filter.handle_click(Selection::new(2.0, 5.0));
    assert!(filter.is_locked());
    assert_eq!(filter.current_value(), None);

    assert_eq!(filter.flush(&mut store), 1);
    assert_eq!(filter.current_value(), Some(Selection::new(2.0, 5.0)));
    assert!(!filter.is_locked());
    assert_eq!(store.query(COMPONENT_ID), Some(&range("rating", 2.0, 5.0)));
    assert_eq!(store.selected_value(COMPONENT_ID), Some(Selection::new(2.0, 5.0)));
}

#[test]
fn test_select_tier_moves_cursor() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);

    assert_eq!(filter.select_tier(3), Some(Selection::new(1.0, 5.0)));
    assert_eq!(filter.cursor(), 3);
    assert_eq!(filter.select_tier(9), None);

    filter.flush(&mut store);
    assert_eq!(filter.current_value(), Some(Selection::new(1.0, 5.0)));
}

#[test]
fn test_click_controlled_delegates() {
    let mut store = MemoryStore::new();
    let recorder = SelectionRecorder::default();
    let props = RatingsFilterProps::new(sample_config())
        .mode(ValueMode::controlled(None, recorder.callback()));
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(0);

    assert_eq!(recorder.calls(), vec![Some(Selection::new(4.0, 5.0))]);
    assert!(!filter.has_pending());
    assert_eq!(filter.flush(&mut store), 0);
    assert_eq!(filter.current_value(), None);
    assert!(store.commits().is_empty());
}

#[test]
fn test_click_controlled_without_callback_is_ignored() {
    let mut store = MemoryStore::new();
    let props = RatingsFilterProps::new(sample_config()).mode(ValueMode::Controlled {
        value: None,
        on_change: None,
    });
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(0);

    assert!(!filter.has_pending());
    assert_eq!(filter.current_value(), None);
}

#[test]
fn test_lock_drops_second_request() {
    let mut store = MemoryStore::new();
    let props = RatingsFilterProps::new(sample_config()).before_value_change(|_| Ok(()));
    let mut filter = RatingsFilter::new(props, &mut store);

    assert!(filter.set_value(Some(Selection::new(4.0, 5.0))));
    assert!(!filter.set_value(Some(Selection::new(1.0, 5.0))));

    assert_eq!(filter.flush(&mut store), 1);
    assert_eq!(filter.current_value(), Some(Selection::new(4.0, 5.0)));
    assert_eq!(store.commits().len(), 1);

    // Released after the flush
    assert!(filter.set_value(Some(Selection::new(1.0, 5.0))));
}

#[test]
fn test_without_gate_requests_apply_in_order() {
    let mut store = MemoryStore::new();
    let recorder = SelectionRecorder::default();
    let props = RatingsFilterProps::new(sample_config()).on_value_change(recorder.callback());
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(0);
    filter.select_tier(2);

    assert_eq!(filter.flush(&mut store), 2);
    assert_eq!(filter.current_value(), Some(Selection::new(2.0, 5.0)));
    assert_eq!(
        recorder.calls(),
        vec![Some(Selection::new(4.0, 5.0)), Some(Selection::new(2.0, 5.0))]
    );
    assert_eq!(store.commits().len(), 2);
}

#[test]
fn test_rejecting_gate_keeps_value_and_unlocks() {
    let mut store = MemoryStore::new();
    let recorder = SelectionRecorder::default();
    let props = RatingsFilterProps::new(sample_config())
        .before_value_change(|value| match value {
            Some(sel) if sel.start < 3.0 => Err("too low".to_string()),
            _ => Ok(()),
        })
        .on_value_change(recorder.callback());
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(3);
    assert_eq!(filter.flush(&mut store), 0);
    assert_eq!(filter.current_value(), None);
    assert!(!filter.is_locked());
    assert!(store.commits().is_empty());
    assert_eq!(recorder.len(), 0);

    filter.select_tier(0);
    assert_eq!(filter.flush(&mut store), 1);
    assert_eq!(filter.current_value(), Some(Selection::new(4.0, 5.0)));
}

#[test]
fn test_rejected_initial_value_is_not_committed() {
    let mut store = MemoryStore::new();
    let config = sample_config().with_default_value(Selection::new(4.0, 5.0));
    let props =
        RatingsFilterProps::new(config).before_value_change(|_| Err("not yet".to_string()));
    let filter = RatingsFilter::new(props, &mut store);

    assert!(store.commits().is_empty());
    assert!(!filter.is_locked());
}

#[test]
fn test_on_value_change_called_after_commit() {
    let mut store = MemoryStore::new();
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let props = RatingsFilterProps::new(sample_config()).on_value_change(move |value| {
        *sink.borrow_mut() = Some(value.copied());
    });
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(1);
    assert_eq!(*seen.borrow(), None);
    filter.flush(&mut store);
    assert_eq!(*seen.borrow(), Some(Some(Selection::new(3.0, 5.0))));
}

#[test]
fn test_query_listener_installed() {
    let mut store = MemoryStore::new();
    let changes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&changes);
    let props = RatingsFilterProps::new(sample_config())
        .on_query_change(move |_, _| counter.set(counter.get() + 1));
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(0);
    filter.flush(&mut store);
    filter.select_tier(0);
    filter.flush(&mut store);

    // Same query twice only counts once
    assert_eq!(changes.get(), 1);
}

#[test]
fn test_nested_field_query() {
    let mut store = MemoryStore::new();
    let config = FilterConfig::new(COMPONENT_ID, "reviews.rating").with_nested_field("reviews");
    let mut filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    filter.handle_click(Selection::new(4.0, 5.0));
    filter.flush(&mut store);

    assert_eq!(
        store.query(COMPONENT_ID),
        Some(&json!({
            "query": {
                "nested": {
                    "path": "reviews",
                    "query": range("reviews.rating", 4.0, 5.0),
                }
            }
        }))
    );
}

#[test]
fn test_custom_query_options_are_committed() {
    let mut store = MemoryStore::new();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let props = RatingsFilterProps::new(sample_config()).custom_query(move |value, _| {
        counter.set(counter.get() + 1);
        value.map(|sel| json!({ "query": { "term": { "stars": sel.start } }, "size": 3 }))
    });
    let mut filter = RatingsFilter::new(props, &mut store);

    filter.select_tier(0);
    filter.flush(&mut store);

    assert_eq!(calls.get(), 1);
    assert_eq!(store.query(COMPONENT_ID), Some(&json!({ "term": { "stars": 4.0 } })));
    assert_eq!(
        store.options(COMPONENT_ID).and_then(|o| o.get("size")),
        Some(&json!(3))
    );
}

#[test]
fn test_commit_carries_label_and_flags() {
    let mut store = MemoryStore::new();
    let mut config = sample_config().with_filter_label("Stars");
    config.show_filter = false;
    config.url_params = true;
    let mut filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    filter.select_tier(0);
    filter.flush(&mut store);

    let commit = store.last_commit(COMPONENT_ID).unwrap();
    assert_eq!(commit.label.as_deref(), Some("Stars"));
    assert!(!commit.show_filter);
    assert!(commit.url_params);
    assert_eq!(commit.component_type, ComponentType::RatingsFilter);
}

#[test]
fn test_update_republishes_changed_settings() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);

    let next = RatingsFilterProps::new(sample_config().with_title("Rating"));
    filter.update(&mut store, next);

    assert_eq!(
        store.props(COMPONENT_ID).unwrap().config.title.as_deref(),
        Some("Rating")
    );
    assert!(store.commits().is_empty());
}

#[test]
fn test_update_resubscribes_on_react_change() {
    let mut store = MemoryStore::new();
    let config = sample_config().with_react(ReactSpec::and(["search"]));
    let mut filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    let next = sample_config().with_react(ReactSpec::and(["category"]));
    filter.update(&mut store, RatingsFilterProps::new(next));

    assert_eq!(
        store.dependencies(COMPONENT_ID),
        Some(&ReactSpec::and(["category"]))
    );
    assert!(store.watchers_of("search").is_empty());
}

#[test]
fn test_update_recommits_on_field_change() {
    let mut store = MemoryStore::new();
    let config = sample_config().with_default_value(Selection::new(4.0, 5.0));
    let mut filter = RatingsFilter::new(RatingsFilterProps::new(config.clone()), &mut store);

    let mut next = config;
    next.data_field = "score".to_string();
    filter.update(&mut store, RatingsFilterProps::new(next));

    assert_eq!(store.commits().len(), 2);
    assert_eq!(store.query(COMPONENT_ID), Some(&range("score", 4.0, 5.0)));
}

#[test]
fn test_update_adopts_controlled_value() {
    let mut store = MemoryStore::new();
    let props = RatingsFilterProps::new(sample_config()).mode(ValueMode::controlled(None, |_| {}));
    let mut filter = RatingsFilter::new(props, &mut store);

    let next = RatingsFilterProps::new(sample_config())
        .mode(ValueMode::controlled(Some(Selection::new(2.0, 5.0)), |_| {}));
    filter.update(&mut store, next);
    filter.flush(&mut store);

    assert_eq!(filter.current_value(), Some(Selection::new(2.0, 5.0)));
    assert_eq!(store.query(COMPONENT_ID), Some(&range("rating", 2.0, 5.0)));
}

#[test]
fn test_refresh_adopts_external_selection_when_uncontrolled() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);

    store.set_selected_value(COMPONENT_ID, Some(Selection::new(3.0, 5.0)));
    filter.refresh(&store);
    filter.flush(&mut store);

    assert_eq!(filter.current_value(), Some(Selection::new(3.0, 5.0)));
    assert_eq!(filter.cursor(), 1);
}

#[test]
fn test_refresh_adopts_external_clear() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);
    filter.select_tier(0);
    filter.flush(&mut store);
    filter.refresh(&store);

    store.set_selected_value(COMPONENT_ID, None);
    filter.refresh(&store);
    filter.flush(&mut store);

    assert_eq!(filter.current_value(), None);
    assert_eq!(store.query(COMPONENT_ID), None);
}

#[test]
fn test_refresh_delegates_when_controlled() {
    let mut store = MemoryStore::new();
    let recorder = SelectionRecorder::default();
    let props = RatingsFilterProps::new(sample_config())
        .mode(ValueMode::controlled(None, recorder.callback()));
    let mut filter = RatingsFilter::new(props, &mut store);

    store.set_selected_value(COMPONENT_ID, Some(Selection::new(4.0, 5.0)));
    filter.refresh(&store);

    assert_eq!(recorder.calls(), vec![Some(Selection::new(4.0, 5.0))]);
    assert!(!filter.has_pending());
    assert_eq!(filter.current_value(), None);
}

#[test]
fn test_refresh_ignores_unchanged_selection() {
    let mut store = MemoryStore::new();
    let recorder = SelectionRecorder::default();
    let props = RatingsFilterProps::new(sample_config())
        .mode(ValueMode::controlled(None, recorder.callback()));
    let mut filter = RatingsFilter::new(props, &mut store);

    store.set_selected_value(COMPONENT_ID, Some(Selection::new(4.0, 5.0)));
    filter.refresh(&store);
    filter.refresh(&store);

    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_rejected_controlled_change_keeps_store_selection_seen() {
    let mut store = MemoryStore::new();
    let recorder = SelectionRecorder::default();
    let props = |value: Option<Selection>| {
        RatingsFilterProps::new(sample_config())
            .mode(ValueMode::controlled(value, recorder.callback()))
            .before_value_change(|value: Option<&Selection>| -> Result<(), String> {
                if value == Some(&Selection::new(2.0, 5.0)) {
                    Err("blocked".to_string())
                } else {
                    Ok(())
                }
            })
    };
    let mut filter = RatingsFilter::new(props(None), &mut store);

    store.set_selected_value(COMPONENT_ID, Some(Selection::new(4.0, 5.0)));
    filter.update(&mut store, props(Some(Selection::new(2.0, 5.0))));
    assert_eq!(filter.flush(&mut store), 0);

    // Nothing changed in the store since the last cycle
    filter.refresh(&store);

    assert!(recorder.calls().is_empty());
    assert!(!filter.has_pending());
}

#[test]
fn test_renamed_filter_does_not_readopt_store_selection() {
    let mut store = MemoryStore::new().with_selected_value("renamed", Selection::new(3.0, 5.0));
    let mut filter = uncontrolled(&mut store);

    let mut config = sample_config();
    config.component_id = "renamed".to_string();
    filter.update(&mut store, RatingsFilterProps::new(config));
    filter.flush(&mut store);
    filter.refresh(&store);

    assert!(!filter.has_pending());
    assert_eq!(filter.current_value(), None);
}

#[test]
fn test_refresh_recommits_when_controlled_without_callback() {
    let mut store = MemoryStore::new();
    let props = RatingsFilterProps::new(sample_config()).mode(ValueMode::Controlled {
        value: Some(Selection::new(4.0, 5.0)),
        on_change: None,
    });
    let mut filter = RatingsFilter::new(props, &mut store);
    assert_eq!(store.commits().len(), 1);

    store.set_selected_value(COMPONENT_ID, Some(Selection::new(1.0, 5.0)));
    filter.refresh(&store);
    filter.flush(&mut store);

    assert_eq!(filter.current_value(), Some(Selection::new(4.0, 5.0)));
    assert_eq!(store.commits().len(), 2);
    assert_eq!(store.selected_value(COMPONENT_ID), Some(Selection::new(4.0, 5.0)));
}

#[test]
fn test_teardown_unregisters_once() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);
    filter.select_tier(0);
    filter.flush(&mut store);

    filter.teardown(&mut store);

    assert!(!store.is_registered(COMPONENT_ID));
    assert_eq!(store.removal_count(COMPONENT_ID), 1);
    assert!(store.query(COMPONENT_ID).is_none());
    assert!(store.props(COMPONENT_ID).is_none());
}

#[test]
fn test_update_renamed_component_moves_entry() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);

    let mut next = sample_config();
    next.component_id = "stars".to_string();
    filter.update(&mut store, RatingsFilterProps::new(next));

    assert!(!store.is_registered(COMPONENT_ID));
    assert!(store.is_registered("stars"));
    assert_eq!(filter.component_id(), "stars");
}

#[test]
fn test_cursor_movement() {
    let mut store = MemoryStore::new();
    let mut filter = uncontrolled(&mut store);

    filter.cursor_up();
    assert_eq!(filter.cursor(), 0);
    filter.cursor_down();
    filter.cursor_down();
    assert_eq!(filter.cursor(), 2);
    filter.cursor_last();
    filter.cursor_down();
    assert_eq!(filter.cursor(), 3);
    filter.cursor_first();
    assert_eq!(filter.cursor(), 0);

    assert_eq!(filter.activate(), Some(Selection::new(4.0, 5.0)));
}

#[test]
fn test_empty_data_field_commits_null_query() {
    let mut store = MemoryStore::new();
    let config = FilterConfig::new(COMPONENT_ID, "");
    let mut filter = RatingsFilter::new(RatingsFilterProps::new(config), &mut store);

    filter.handle_click(Selection::new(4.0, 5.0));
    filter.flush(&mut store);

    let commit = store.last_commit(COMPONENT_ID).unwrap();
    assert_eq!(commit.query, None);
    assert_eq!(commit.value, Some(Selection::new(4.0, 5.0)));
}
