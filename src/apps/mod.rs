//! The mock apps. Each owns one repository per entity kind, seeded on
//! construction, and exposes the operations its pages call.

pub mod calendar;
pub mod documents;
pub mod kanban;
pub mod mail;
pub mod placeholder;

pub use calendar::{CalendarEvent, CalendarService, EventCategory};
pub use documents::{
    Document, DocumentActivity, DocumentKind, DocumentLibrary, DocumentReviewer, DocumentStatus,
    DocumentVersion, ReviewStatus,
};
pub use kanban::{CardStatus, KanbanBoard, KanbanCard, Priority};
pub use mail::{Email, MailFolder, MailService};
pub use placeholder::{Album, Comment, Photo, PlaceholderService, Post, Todo, User};
