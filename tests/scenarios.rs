//! End-to-end behaviour of the seeded backend.

mod support;

use mockdeck::apps::{calendar, mail, CalendarEvent, KanbanCard, MailFolder, Post};
use mockdeck::{
    now, InMemoryRepository, LatencyProfile, MockBackend, Repository, ShellConfig,
    SyntheticDataGenerator,
};
use support::{backend, baseline};

#[tokio::test]
async fn fifty_calendar_events_from_seed_42() {
    let backend = backend();
    let events = backend.calendar.events(None, None).await.unwrap();

    assert_eq!(events.len(), 50);
    assert!(events
        .windows(2)
        .all(|pair| (pair[0].start_time, pair[0].id) <= (pair[1].start_time, pair[1].id)));

    let mut ids: Vec<_> = events.iter().map(|event| event.id).collect();
    ids.sort();
    assert_eq!(ids, (1..=50).collect::<Vec<_>>());

    assert!(backend.calendar.delete_event(1).await.unwrap());
    let remaining = backend.calendar.events(None, None).await.unwrap();
    assert_eq!(remaining.len(), 49);
    assert!(remaining.iter().all(|event| event.id != 1));
}

#[test]
fn same_seed_same_baseline_same_data() {
    let mut a = SyntheticDataGenerator::for_date(42, baseline());
    let mut b = SyntheticDataGenerator::for_date(42, baseline());

    let events_a: Vec<CalendarEvent> = calendar::seed_events(&mut a, 50);
    let events_b: Vec<CalendarEvent> = calendar::seed_events(&mut b, 50);
    assert_eq!(events_a, events_b);

    let emails_a = mail::seed_emails(&mut a, 25);
    let emails_b = mail::seed_emails(&mut b, 25);
    assert_eq!(emails_a, emails_b);
}

#[test]
fn different_seed_different_data() {
    let mut a = SyntheticDataGenerator::for_date(42, baseline());
    let mut b = SyntheticDataGenerator::for_date(43, baseline());
    assert_ne!(
        calendar::seed_events(&mut a, 50),
        calendar::seed_events(&mut b, 50)
    );
}

#[tokio::test]
async fn whole_backends_agree() {
    let config = ShellConfig::instant(baseline());
    let first = MockBackend::new(&config);
    let second = MockBackend::new(&config);

    assert_eq!(
        first.calendar.events(None, None).await.unwrap(),
        second.calendar.events(None, None).await.unwrap()
    );
    assert_eq!(
        first.mail.folder(MailFolder::Inbox).await.unwrap(),
        second.mail.folder(MailFolder::Inbox).await.unwrap()
    );
    assert_eq!(
        first.kanban.cards().await.unwrap(),
        second.kanban.cards().await.unwrap()
    );
}

#[tokio::test]
async fn kanban_create_after_eleven() {
    let board = backend().kanban;
    let cards = board.cards().await.unwrap();
    assert_eq!(cards.iter().map(|card| card.id).max(), Some(11));

    let before = now();
    let created = board
        .create_card(KanbanCard::new("Triage inbox", "Sort new bug reports"))
        .await
        .unwrap();
    let after = now();

    assert_eq!(created.id, 12);
    assert!(created.created_at >= before && created.created_at <= after);

    let cards = board.cards().await.unwrap();
    assert_eq!(cards.len(), 12);
    assert_eq!(cards.last().map(|card| card.id), Some(12));
}

fn post(title: &str) -> Post {
    Post {
        id: 0,
        user_id: 1,
        title: title.to_string(),
        body: String::new(),
    }
}

#[tokio::test]
async fn sequential_ids_from_empty() {
    let posts = InMemoryRepository::new();
    for (expected, title) in (1..).zip(["a", "b", "c"]) {
        let created = posts.create(post(title)).await.unwrap();
        assert_eq!(created.id, expected);
    }

    let all = posts.list_all().await.unwrap();
    let ids: Vec<_> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn update_of_missing_id_is_a_noop() {
    let posts = InMemoryRepository::with_records(vec![], LatencyProfile::none());
    posts.create(post("kept")).await.unwrap();
    let before = posts.list_all().await.unwrap();

    let mut ghost = post("ghost");
    ghost.id = 99;
    assert!(!posts.update(ghost).await.unwrap());
    assert_eq!(posts.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let posts = InMemoryRepository::new();
    posts.create(post("a")).await.unwrap();
    posts.create(post("b")).await.unwrap();

    assert!(posts.delete(1).await.unwrap());
    assert!(!posts.delete(1).await.unwrap());

    let remaining = posts.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
}
