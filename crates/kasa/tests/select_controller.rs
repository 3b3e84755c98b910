//! Select controller behaviour against a scripted option source.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{ScriptedOptions, offline, settle};
use kasa::{SelectConfig, SelectController, SelectStatus, SelectionChange};
use kasa_core::{OptionValue, SelectOption};

type Changes = Arc<Mutex<Vec<SelectionChange>>>;

fn controller(source: &ScriptedOptions) -> (SelectController<ScriptedOptions>, Changes) {
    let changes: Changes = Arc::default();
    let sink = Arc::clone(&changes);
    let select = SelectController::with_on_change(
        source.clone(),
        SelectConfig::default(),
        move |change| sink.lock().unwrap().push(change),
    );
    (select, changes)
}

fn offices() -> Vec<SelectOption> {
    vec![
        SelectOption::new(7_i64, "Kadıköy").with_subtitle("İstanbul"),
        SelectOption::new(8_i64, "Çankaya").with_subtitle("Ankara"),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_open_fetches_unfiltered_once() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.open().unwrap();
    settle().await;
    assert_eq!(select.state().status, SelectStatus::Loading);
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    let state = select.state();
    assert!(state.open);
    assert!(state.loaded);
    assert_eq!(state.status, SelectStatus::Ready);
    assert_eq!(state.options, offices());
    assert_eq!(source.requests(), vec![String::new()]);

    select.close();
    assert!(select.open().is_none());
    assert_eq!(source.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_fast_typing_searches_final_text_once() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.open().unwrap();
    settle().await;
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    select.on_query_change("AB");
    tokio::time::sleep(Duration::from_millis(150)).await;
    select.on_query_change("ABC");
    tokio::time::sleep(Duration::from_millis(299)).await;
    assert_eq!(source.call_count(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    settle().await;

    assert_eq!(source.requests(), vec!["", "ABC"]);
    source.respond(1, Ok(vec![SelectOption::new(9_i64, "ABC Vergi Dairesi")]));
    settle().await;

    let state = select.state();
    assert_eq!(state.options.len(), 1);
    assert!(state.loaded);
}

#[tokio::test(start_paused = true)]
async fn test_query_is_not_searched_once_closed() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    select.on_query_change("acme");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(source.call_count(), 0);

    // Reopening picks up the query typed while closed.
    let _ = select.open().unwrap();
    settle().await;
    assert_eq!(source.requests(), vec!["acme"]);
}

#[tokio::test(start_paused = true)]
async fn test_no_matches_is_empty_state() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.search_now("zzz");
    settle().await;
    source.respond(0, Ok(Vec::new()));
    handle.await.unwrap();

    assert_eq!(select.state().status, SelectStatus::Empty);
}

#[tokio::test(start_paused = true)]
async fn test_stale_search_results_are_dropped() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let first = select.search_now("a");
    let second = select.search_now("ab");
    settle().await;

    source.respond(1, Ok(vec![SelectOption::new(2_i64, "ab")]));
    second.await.unwrap();
    source.respond(0, Ok(vec![SelectOption::new(1_i64, "a")]));
    first.await.unwrap();

    let state = select.state();
    assert_eq!(state.options, vec![SelectOption::new(2_i64, "ab")]);
    assert_eq!(state.query, "ab");
}

#[tokio::test(start_paused = true)]
async fn test_select_notifies_value_and_option() {
    let source = ScriptedOptions::new();
    let (select, changes) = controller(&source);

    let _ = select.open();
    let option = offices().remove(1);
    select.select(option.clone());

    let state = select.state();
    assert!(!state.open);
    assert_eq!(state.selected.as_ref(), Some(&option));
    assert_eq!(
        changes.lock().unwrap().as_slice(),
        &[SelectionChange::Selected {
            value: OptionValue::Int(8),
            option,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_resets_and_notifies() {
    let source = ScriptedOptions::new();
    let (select, changes) = controller(&source);

    select.on_query_change("kad");
    select.select(offices().remove(0));
    select.clear();

    let state = select.state();
    assert!(state.selected.is_none());
    assert!(state.query.is_empty());
    assert_eq!(
        changes.lock().unwrap().last(),
        Some(&SelectionChange::Cleared)
    );

    // The pending query search was cancelled.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_stays_inside_the_select() {
    let source = ScriptedOptions::new();
    let (select, changes) = controller(&source);

    let handle = select.search_now("acme");
    settle().await;
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    let handle = select.search_now("acme ltd");
    settle().await;
    source.respond(1, Err(offline()));
    handle.await.unwrap();

    let state = select.state();
    assert_eq!(state.status, SelectStatus::Failed);
    assert!(state.options.is_empty());
    assert!(!state.loaded);
    assert!(changes.lock().unwrap().is_empty());
}

// ============================================================================
// Prefill
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_prefill_resolves_label_with_one_fetch() {
    let source = ScriptedOptions::new();
    let (select, changes) = controller(&source);

    let handle = select.set_value(Some(OptionValue::Int(7))).unwrap();
    assert_eq!(select.state().selected.unwrap().label, "7");

    settle().await;
    assert_eq!(source.requests(), vec![""]);
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    let selected = select.state().selected.unwrap();
    assert_eq!(selected.label, "Kadıköy");
    assert_eq!(selected.subtitle.as_deref(), Some("İstanbul"));
    assert!(changes.lock().unwrap().is_empty());

    // Options are loaded now, so opening does not fetch again.
    assert!(select.open().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_prefill_not_found_shows_raw_value() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.set_value(Some(OptionValue::from("TR-99"))).unwrap();
    settle().await;
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    let selected = select.state().selected.unwrap();
    assert_eq!(selected, SelectOption::unresolved(OptionValue::from("TR-99")));
    assert!(selected.subtitle.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_prefill_failure_keeps_raw_value() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.set_value(Some(OptionValue::Int(7))).unwrap();
    settle().await;
    source.respond(0, Err(offline()));
    handle.await.unwrap();

    let state = select.state();
    assert_eq!(state.selected.unwrap().label, "7");
    assert_eq!(state.status, SelectStatus::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_prefill_uses_loaded_options_without_fetching() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.open().unwrap();
    settle().await;
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    assert!(select.set_value(Some(OptionValue::Int(8))).is_none());
    assert_eq!(select.state().selected.unwrap().label, "Çankaya");
    assert!(select.set_value(Some(OptionValue::Int(99))).is_none());
    assert_eq!(select.state().selected.unwrap().label, "99");
    assert_eq!(source.call_count(), 1);

    assert!(select.set_value(None).is_none());
    assert!(select.state().selected.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_prefill_does_not_swallow_typed_search() {
    let source = ScriptedOptions::new();
    let (select, _) = controller(&source);

    let handle = select.open().unwrap();
    settle().await;
    source.respond(0, Ok(offices()));
    handle.await.unwrap();

    select.on_query_change("Kad");
    let lookup = select.set_value(Some(OptionValue::Int(7))).unwrap();
    assert_eq!(select.state().selected.unwrap().label, "Kadıköy");

    tokio::time::sleep(Duration::from_millis(400)).await;
    settle().await;
    assert_eq!(source.requests(), vec!["", "", "Kad"]);

    let kad = vec![SelectOption::new(7_i64, "Kadıköy").with_subtitle("İstanbul")];
    source.respond(2, Ok(kad.clone()));
    settle().await;

    // The late unfiltered lookup does not replace the search results.
    source.respond(1, Ok(offices()));
    lookup.await.unwrap();

    let state = select.state();
    assert_eq!(state.query, "Kad");
    assert_eq!(state.options, kad);
    assert_eq!(state.status, SelectStatus::Ready);
    assert!(state.loaded);
}
