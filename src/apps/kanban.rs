//! Kanban board - cards moving through four status columns.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RepositoryError;
use crate::generator::SyntheticDataGenerator;
use crate::repository::{Filter, InMemoryRepository, Latency, LatencyProfile, Repository};
use crate::{Record, RecordId, Timestamp};

/// Board columns, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CardStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
}

impl CardStatus {
    pub const ALL: [CardStatus; 4] = [
        CardStatus::Todo,
        CardStatus::InProgress,
        CardStatus::Review,
        CardStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Todo => "todo",
            CardStatus::InProgress => "in-progress",
            CardStatus::Review => "review",
            CardStatus::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "kanban_cards", order_by = "created_at")]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: CardStatus,
    #[serde(default)]
    pub priority: Priority,
    pub assigned_to: String,
    #[record(created_at)]
    pub created_at: Timestamp,
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl KanbanCard {
    /// A new `todo` card. `id` and `created_at` are assigned on create.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            status: CardStatus::Todo,
            priority: Priority::Medium,
            assigned_to: String::new(),
            created_at: crate::record::now(),
            due_date: None,
            tags: Vec::new(),
        }
    }
}

const ASSIGNEES: &[&str] = &[
    "Alice Johnson",
    "Bob Smith",
    "Carol Williams",
    "David Brown",
    "Emma Davis",
];

struct Task {
    title: &'static str,
    description: &'static str,
    status: CardStatus,
    priority: Priority,
    tags: &'static [&'static str],
}

const TASKS: &[Task] = &[
    Task {
        title: "Implement user authentication",
        description: "Add OAuth2 authentication for users",
        status: CardStatus::Todo,
        priority: Priority::High,
        tags: &["Feature", "Backend"],
    },
    Task {
        title: "Fix navigation menu bug",
        description: "Menu items not highlighting correctly on mobile",
        status: CardStatus::Todo,
        priority: Priority::Medium,
        tags: &["Bug", "UI/UX"],
    },
    Task {
        title: "Update documentation",
        description: "Add API documentation for new endpoints",
        status: CardStatus::Todo,
        priority: Priority::Low,
        tags: &["Documentation"],
    },
    Task {
        title: "Design dashboard mockups",
        description: "Create wireframes for new analytics dashboard",
        status: CardStatus::InProgress,
        priority: Priority::High,
        tags: &["UI/UX", "Feature"],
    },
    Task {
        title: "Code review for PR #123",
        description: "Review and test pull request changes",
        status: CardStatus::InProgress,
        priority: Priority::Medium,
        tags: &["Testing"],
    },
    Task {
        title: "Optimize database queries",
        description: "Improve query performance on user table",
        status: CardStatus::InProgress,
        priority: Priority::High,
        tags: &["Backend", "Enhancement"],
    },
    Task {
        title: "Add unit tests",
        description: "Write tests for authentication service",
        status: CardStatus::Review,
        priority: Priority::Medium,
        tags: &["Testing", "Backend"],
    },
    Task {
        title: "Refactor API endpoints",
        description: "Clean up REST API structure",
        status: CardStatus::Review,
        priority: Priority::Low,
        tags: &["Backend", "Enhancement"],
    },
    Task {
        title: "User profile page",
        description: "Completed user profile with avatar upload",
        status: CardStatus::Done,
        priority: Priority::High,
        tags: &["Feature", "Frontend"],
    },
    Task {
        title: "Fix CSS layout issues",
        description: "Resolved flexbox issues on product page",
        status: CardStatus::Done,
        priority: Priority::Medium,
        tags: &["Bug", "UI/UX"],
    },
    Task {
        title: "Setup CI/CD pipeline",
        description: "Configured GitHub Actions for deployments",
        status: CardStatus::Done,
        priority: Priority::High,
        tags: &["Enhancement"],
    },
];

/// The eleven starter cards, ids 1 through 11. Finished cards carry no due date.
pub fn seed_cards(generator: &mut SyntheticDataGenerator) -> Vec<KanbanCard> {
    let cards = TASKS
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let due = generator.days_from_baseline(-10..20);
            let assignee = generator.pick(ASSIGNEES);
            let created_days_ago = generator.between(1..30);

            KanbanCard {
                id: i as RecordId + 1,
                title: task.title.to_string(),
                description: task.description.to_string(),
                status: task.status,
                priority: task.priority,
                assigned_to: assignee.to_string(),
                created_at: generator.at(-created_days_ago, 0, 0),
                due_date: (task.status != CardStatus::Done).then_some(due),
                tags: task.tags.iter().map(|tag| tag.to_string()).collect(),
            }
        })
        .collect();

    SyntheticDataGenerator::sorted(cards)
}

#[derive(Clone)]
pub struct KanbanBoard {
    cards: InMemoryRepository<KanbanCard>,
}

impl KanbanBoard {
    pub fn default_latency() -> LatencyProfile {
        LatencyProfile {
            list: Latency::fixed(50),
            get: Latency::fixed(30),
            ..LatencyProfile::uniform(Latency::fixed(100))
        }
    }

    pub fn new(cards: InMemoryRepository<KanbanCard>) -> Self {
        Self { cards }
    }

    pub fn seeded(generator: &mut SyntheticDataGenerator, latency: LatencyProfile) -> Self {
        let cards = seed_cards(generator);
        info!(
            count = cards.len(),
            seed = generator.seed(),
            "kanban board seeded"
        );
        Self::new(InMemoryRepository::with_records(cards, latency))
    }

    pub fn repository(&self) -> &InMemoryRepository<KanbanCard> {
        &self.cards
    }

    /// Every card, oldest first.
    pub async fn cards(&self) -> Result<Vec<KanbanCard>, RepositoryError> {
        self.cards.list_all().await
    }

    pub async fn card(&self, id: RecordId) -> Result<Option<KanbanCard>, RepositoryError> {
        self.cards.get_by_id(id).await
    }

    pub async fn create_card(&self, card: KanbanCard) -> Result<KanbanCard, RepositoryError> {
        self.cards.create(card).await
    }

    pub async fn update_card(&self, card: KanbanCard) -> Result<bool, RepositoryError> {
        self.cards.update(card).await
    }

    pub async fn delete_card(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.cards.delete(id).await
    }

    /// Move a card to another column.
    pub async fn set_status(
        &self,
        id: RecordId,
        status: CardStatus,
    ) -> Result<bool, RepositoryError> {
        self.cards.modify(id, |card| card.status = status).await
    }

    /// Cards in one column, oldest first.
    pub async fn column(&self, status: CardStatus) -> Result<Vec<KanbanCard>, RepositoryError> {
        let in_column: &Filter<'_, KanbanCard> = &move |card: &KanbanCard| card.status == status;
        self.cards.list(Some(in_column)).await
    }
}
