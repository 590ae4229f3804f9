//! Calendar - events with attendees, seeded across a five-week window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RepositoryError;
use crate::generator::SyntheticDataGenerator;
use crate::repository::{Filter, InMemoryRepository, Latency, LatencyProfile, Repository};
use crate::{Record, RecordId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventCategory {
    Meeting,
    Appointment,
    Event,
    Reminder,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "calendar_events", order_by = "start_time")]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[record(id)]
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: String,
    pub organizer: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub category: EventCategory,
    pub color: String,
    pub is_all_day: bool,
    pub is_online: bool,
    #[serde(default)]
    pub meeting_link: String,
}

impl CalendarEvent {
    /// A blank event at `start_time`, ready to be created.
    pub fn new(title: impl Into<String>, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: String::new(),
            start_time,
            end_time,
            location: String::new(),
            organizer: String::new(),
            attendees: Vec::new(),
            category: EventCategory::Other,
            color: "#3b82f6".to_string(),
            is_all_day: false,
            is_online: false,
            meeting_link: String::new(),
        }
    }
}

struct EventTemplate {
    title: &'static str,
    category: EventCategory,
    color: &'static str,
    always_online: bool,
}

const fn template(
    title: &'static str,
    category: EventCategory,
    color: &'static str,
    always_online: bool,
) -> EventTemplate {
    EventTemplate {
        title,
        category,
        color,
        always_online,
    }
}

const fn meeting(title: &'static str, color: &'static str, online: bool) -> EventTemplate {
    template(title, EventCategory::Meeting, color, online)
}

const fn appointment(title: &'static str, color: &'static str, online: bool) -> EventTemplate {
    template(title, EventCategory::Appointment, color, online)
}

const fn event(title: &'static str, color: &'static str, online: bool) -> EventTemplate {
    template(title, EventCategory::Event, color, online)
}

const TEMPLATES: &[EventTemplate] = &[
    meeting("Team Standup", "#3b82f6", false),
    meeting("Project Review", "#8b5cf6", false),
    meeting("Client Presentation", "#ec4899", false),
    appointment("Lunch Break", "#10b981", false),
    meeting("Design Workshop", "#f59e0b", false),
    meeting("Sprint Planning", "#3b82f6", false),
    meeting("One-on-One with Manager", "#6366f1", false),
    appointment("Doctor Appointment", "#ef4444", false),
    appointment("Coffee Chat", "#10b981", false),
    event("Training Session", "#8b5cf6", false),
    event("Team Building Event", "#ec4899", true),
    meeting("Product Demo", "#3b82f6", true),
    meeting("Marketing Strategy Meeting", "#f59e0b", false),
    meeting("Code Review Session", "#6366f1", false),
    meeting("Customer Call", "#ec4899", true),
    meeting("All Hands Meeting", "#3b82f6", true),
    appointment("Focus Time", "#64748b", false),
    meeting("Quarterly Business Review", "#8b5cf6", false),
    event("Networking Event", "#10b981", true),
    event("Workshop: Advanced Analytics", "#f59e0b", false),
];

const LOCATIONS: &[&str] = &[
    "Conference Room A",
    "Conference Room B",
    "Main Office",
    "Microsoft Teams",
    "Zoom Meeting",
    "Cafeteria",
    "Building 2, Room 301",
    "Online",
    "Client Office",
    "Downtown Office",
];

const ORGANIZERS: &[&str] = &[
    "Sarah Johnson",
    "Michael Chen",
    "Emily Rodriguez",
    "James Wilson",
    "Alexandra Brown",
    "David Martinez",
    "Jennifer Taylor",
    "You",
];

const ATTENDEES: &[&str] = &[
    "Sarah Johnson",
    "Michael Chen",
    "Emily Rodriguez",
    "James Wilson",
    "Alexandra Brown",
    "David Martinez",
    "Jennifer Taylor",
    "Robert Anderson",
    "Lisa Thompson",
    "William Garcia",
];

const LINK_PREFIXES: &[&str] = &[
    "https://teams.microsoft.com/l/meetup-join/19%3ameeting_",
    "https://zoom.us/j/",
];

fn description(title: &str, variant: usize) -> String {
    let t = title.to_lowercase();
    match variant {
        0 => format!("Join us for {t}. We'll discuss progress, blockers, and next steps."),
        1 => format!("Important {t} to align on goals and deliverables."),
        2 => format!("Please come prepared with updates for this {t}."),
        3 => format!("Agenda will be shared before the {t}."),
        4 => format!("This {t} is crucial for project success."),
        5 => format!("Looking forward to productive discussion during this {t}."),
        6 => format!("Please review the materials before attending this {t}."),
        _ => format!("Recurring {t} - please mark your calendar."),
    }
}

const DESCRIPTION_VARIANTS: usize = 8;

/// Fabricate `count` events between one week before and four weeks after the
/// generator's baseline, sorted by start time.
pub fn seed_events(generator: &mut SyntheticDataGenerator, count: usize) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(count);

    for i in 0..count {
        let info = SyntheticDataGenerator::cycle(TEMPLATES, i);
        let days_offset = generator.between(-7..28);
        let start_hour = generator.between(8..18);
        let duration = generator.between(1..4) * 30;
        let start_minute = generator.between(0..2) * 30;

        let mut start_time = generator.at(days_offset, start_hour, start_minute);
        let mut end_time = start_time + Duration::minutes(duration);

        let is_all_day = generator.chance(10);
        if is_all_day {
            start_time = start_time.date().and_time(chrono::NaiveTime::default());
            end_time = start_time + Duration::days(1) - Duration::seconds(1);
        }

        let is_online = info.always_online || generator.chance(40);
        let location = if is_online {
            if generator.index(2) == 0 {
                "Microsoft Teams"
            } else {
                "Zoom Meeting"
            }
        } else {
            *generator.pick(LOCATIONS)
        };

        let attendee_draws = generator.between(2..6) as usize;
        let attendees = generator
            .distinct(ATTENDEES, attendee_draws)
            .into_iter()
            .map(str::to_string)
            .collect();

        let description = description(info.title, generator.index(DESCRIPTION_VARIANTS));
        let organizer = generator.pick(ORGANIZERS).to_string();
        let meeting_link = if is_online {
            let prefix = generator.pick(LINK_PREFIXES);
            format!("{prefix}{}", generator.between(100_000_000..999_999_999))
        } else {
            String::new()
        };

        events.push(CalendarEvent {
            id: i as RecordId + 1,
            title: info.title.to_string(),
            description,
            start_time,
            end_time,
            location: location.to_string(),
            organizer,
            attendees,
            category: info.category,
            color: info.color.to_string(),
            is_all_day,
            is_online,
            meeting_link,
        });
    }

    SyntheticDataGenerator::sorted(events)
}

/// Calendar backend over an in-memory event repository.
#[derive(Clone)]
pub struct CalendarService {
    events: InMemoryRepository<CalendarEvent>,
}

impl CalendarService {
    pub const DEFAULT_EVENT_COUNT: usize = 50;

    pub fn default_latency() -> LatencyProfile {
        LatencyProfile {
            list: Latency::fixed(50),
            get: Latency::fixed(30),
            create: Latency::fixed(100),
            update: Latency::fixed(100),
            delete: Latency::fixed(50),
            mutate: Latency::fixed(50),
        }
    }

    pub fn new(events: InMemoryRepository<CalendarEvent>) -> Self {
        Self { events }
    }

    /// Seed `count` events from `generator`.
    pub fn seeded(
        generator: &mut SyntheticDataGenerator,
        count: usize,
        latency: LatencyProfile,
    ) -> Self {
        let events = seed_events(generator, count);
        info!(
            count = events.len(),
            seed = generator.seed(),
            "calendar seeded"
        );
        Self::new(InMemoryRepository::with_records(events, latency))
    }

    pub fn repository(&self) -> &InMemoryRepository<CalendarEvent> {
        &self.events
    }

    /// Events starting inside `[start, end]`; either bound may be open.
    pub async fn events(
        &self,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<CalendarEvent>, RepositoryError> {
        let window: &Filter<'_, CalendarEvent> = &move |event: &CalendarEvent| {
            start.map_or(true, |s| event.start_time >= s)
                && end.map_or(true, |e| event.start_time <= e)
        };
        self.events.list(Some(window)).await
    }

    /// Events starting on `date`.
    pub async fn events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, RepositoryError> {
        let start = date.and_time(chrono::NaiveTime::default());
        let end = start + Duration::days(1) - Duration::nanoseconds(1);
        self.events(Some(start), Some(end)).await
    }

    pub async fn event(&self, id: RecordId) -> Result<Option<CalendarEvent>, RepositoryError> {
        self.events.get_by_id(id).await
    }

    pub async fn create_event(
        &self,
        event: CalendarEvent,
    ) -> Result<CalendarEvent, RepositoryError> {
        self.events.create(event).await
    }

    pub async fn update_event(&self, event: CalendarEvent) -> Result<bool, RepositoryError> {
        self.events.update(event).await
    }

    pub async fn delete_event(&self, id: RecordId) -> Result<bool, RepositoryError> {
        self.events.delete(id).await
    }
}
