//! Page controllers shared by the integration tests.
//!
//! Each page owns an `OperationExecutor`, routes its data calls through it and
//! implements `Reload`, the way a UI shell's pages would.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockdeck::apps::{CalendarEvent, CalendarService, KanbanBoard, KanbanCard};
use mockdeck::{MockBackend, OperationExecutor, Reload, ShellConfig};

pub fn baseline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
}

/// Seed 42, fixed baseline, no simulated latency.
pub fn backend() -> MockBackend {
    MockBackend::new(&ShellConfig::instant(baseline()))
}

pub struct CalendarPage {
    pub lifecycle: OperationExecutor,
    pub events: Vec<CalendarEvent>,
    calendar: CalendarService,
}

impl CalendarPage {
    pub fn new(calendar: CalendarService) -> Self {
        Self {
            lifecycle: OperationExecutor::new(),
            events: Vec::new(),
            calendar,
        }
    }

    pub async fn delete(&mut self, id: u32) -> bool {
        let calendar = self.calendar.clone();
        let deleted = self
            .lifecycle
            .execute_with_message(
                || async move { calendar.delete_event(id).await },
                "Could not delete event",
            )
            .await
            .unwrap_or(false);
        if deleted {
            self.initialize().await;
        }
        deleted
    }
}

#[async_trait]
impl Reload for CalendarPage {
    async fn initialize(&mut self) {
        let calendar = self.calendar.clone();
        if let Some(events) = self
            .lifecycle
            .execute_with_message(
                || async move { calendar.events(None, None).await },
                "Could not load events",
            )
            .await
        {
            self.events = events;
        }
    }
}

pub struct KanbanPage {
    pub lifecycle: OperationExecutor,
    pub cards: Vec<KanbanCard>,
    board: KanbanBoard,
}

impl KanbanPage {
    pub fn new(board: KanbanBoard) -> Self {
        Self {
            lifecycle: OperationExecutor::new(),
            cards: Vec::new(),
            board,
        }
    }

    pub async fn add(&mut self, card: KanbanCard) -> Option<KanbanCard> {
        let board = self.board.clone();
        let created = self
            .lifecycle
            .execute_with_message(
                || async move { board.create_card(card).await },
                "Could not create card",
            )
            .await?;
        self.initialize().await;
        Some(created)
    }
}

#[async_trait]
impl Reload for KanbanPage {
    async fn initialize(&mut self) {
        let board = self.board.clone();
        if let Some(cards) = self
            .lifecycle
            .execute_with_message(
                || async move { board.cards().await },
                "Could not load board",
            )
            .await
        {
            self.cards = cards;
        }
    }
}

/// A data source that fails its first `failures` calls.
#[derive(Clone)]
pub struct FlakySource {
    calls: Arc<AtomicU32>,
    failures: u32,
}

impl FlakySource {
    pub fn failing(failures: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            failures,
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn fetch(&self) -> anyhow::Result<Vec<String>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            anyhow::bail!("backend unavailable (attempt {})", call + 1);
        }
        Ok(vec!["first".to_string(), "second".to_string()])
    }
}

/// A page over a `FlakySource`, with retry.
pub struct FlakyPage {
    pub lifecycle: OperationExecutor,
    pub items: Vec<String>,
    source: FlakySource,
}

impl FlakyPage {
    pub fn new(source: FlakySource) -> Self {
        Self {
            lifecycle: OperationExecutor::new(),
            items: Vec::new(),
            source,
        }
    }
}

#[async_trait]
impl Reload for FlakyPage {
    async fn initialize(&mut self) {
        let source = self.source.clone();
        if let Some(items) = self
            .lifecycle
            .execute_with_message(
                || async move { source.fetch().await },
                "Could not load items",
            )
            .await
        {
            self.items = items;
        }
    }
}
