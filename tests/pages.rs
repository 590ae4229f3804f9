//! Page-level lifecycle: loading, failure capture, retry.

mod support;

use mockdeck::{OperationState, Reload};
use support::{backend, CalendarPage, FlakyPage, FlakySource, KanbanPage};

#[tokio::test]
async fn calendar_page_loads_and_deletes() {
    let mut page = CalendarPage::new(backend().calendar);
    page.initialize().await;

    assert!(!page.lifecycle.is_loading());
    assert!(!page.lifecycle.has_error());
    assert_eq!(page.events.len(), 50);
    assert!(page
        .events
        .windows(2)
        .all(|pair| pair[0].start_time <= pair[1].start_time));

    assert!(page.delete(1).await);
    assert_eq!(page.events.len(), 49);
    assert!(page.events.iter().all(|event| event.id != 1));

    // Deleting again reports false without raising an error.
    assert!(!page.delete(1).await);
    assert!(!page.lifecycle.has_error());
    assert_eq!(page.events.len(), 49);
}

#[tokio::test]
async fn failure_then_retry_clears_the_error() {
    let source = FlakySource::failing(1);
    let mut page = FlakyPage::new(source.clone());

    page.initialize().await;
    let failed = page.lifecycle.snapshot();
    assert!(failed.has_error);
    assert!(!failed.loading);
    assert_eq!(failed.error_message, "Could not load items");
    assert!(failed.error_detail.contains("backend unavailable"));
    assert!(page.items.is_empty());

    page.retry().await;
    assert_eq!(source.calls(), 2);
    assert_eq!(page.lifecycle.state(), OperationState::Succeeded);
    assert!(!page.lifecycle.has_error());
    assert_eq!(page.lifecycle.error_message(), "");
    assert_eq!(page.items, vec!["first", "second"]);
}

#[tokio::test]
async fn every_run_ends_in_a_terminal_state() {
    let mut page = FlakyPage::new(FlakySource::failing(2));
    let mut transitions = page.lifecycle.transitions();

    for _ in 0..3 {
        page.retry().await;
        assert!(page.lifecycle.state().is_terminal());
    }

    let mut seen = Vec::new();
    while let Ok(state) = transitions.try_recv() {
        seen.push(state.name());
    }
    assert_eq!(
        seen,
        vec!["loading", "failed", "loading", "failed", "loading", "succeeded"]
    );
}

#[tokio::test]
async fn kanban_page_adds_a_card() {
    let mut page = KanbanPage::new(backend().kanban);
    page.initialize().await;
    assert_eq!(page.cards.len(), 11);

    let created = page
        .add(mockdeck::apps::KanbanCard::new("Write release notes", "For 2.1"))
        .await
        .unwrap();
    assert_eq!(created.id, 12);
    assert_eq!(page.cards.len(), 12);
    assert_eq!(page.cards.last().map(|card| card.id), Some(12));
}
