use tracing::info;

use crate::apps::{CalendarService, DocumentLibrary, KanbanBoard, MailService, PlaceholderService};
use crate::config::ShellConfig;

/// Every mock app, seeded from one configuration.
///
/// Services are cheap to clone and clones share storage, so pages can hold
/// their own handle.
#[derive(Clone)]
pub struct MockBackend {
    pub calendar: CalendarService,
    pub mail: MailService,
    pub kanban: KanbanBoard,
    pub documents: DocumentLibrary,
    pub placeholder: PlaceholderService,
}

impl MockBackend {
    /// Seed every app. Apps draw from one generator in a fixed order, so the
    /// whole backend is reproducible from the seed and baseline.
    pub fn new(config: &ShellConfig) -> Self {
        let mut generator = config.generator();
        info!(
            seed = config.seed,
            baseline = %generator.baseline(),
            latency = config.latency.enabled,
            "seeding mock backend"
        );

        let calendar = CalendarService::seeded(
            &mut generator,
            config.calendar_events,
            config.latency(CalendarService::default_latency()),
        );
        let mail = MailService::seeded(
            &mut generator,
            config.emails,
            config.latency(MailService::default_latency()),
        );
        let kanban = KanbanBoard::seeded(
            &mut generator,
            config.latency(KanbanBoard::default_latency()),
        );
        let documents = DocumentLibrary::seeded(
            &generator,
            config.latency(DocumentLibrary::default_latency()),
        );
        let placeholder =
            PlaceholderService::seeded(config.latency(PlaceholderService::default_latency()));

        Self {
            calendar,
            mail,
            kanban,
            documents,
            placeholder,
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(&ShellConfig::default())
    }
}
