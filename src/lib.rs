//! In-memory mock backends for demo UI shells.
//!
//! - [`Repository`] is the uniform CRUD contract; [`InMemoryRepository`]
//!   implements it over a shared `Vec` with simulated latency.
//! - [`SyntheticDataGenerator`] fabricates reproducible seed data from a fixed
//!   seed and baseline.
//! - [`OperationExecutor`] wraps a unit of async work with loading and error
//!   state for the page that started it.
//! - [`apps`] holds the mock services themselves; [`MockBackend`] seeds them
//!   all from a [`ShellConfig`].

extern crate self as mockdeck;

pub mod apps;
mod backend;
pub mod config;
mod error;
mod generator;
#[cfg(feature = "http")]
pub mod http;
pub mod lifecycle;
pub mod logging;
mod record;
pub mod repository;

pub use backend::MockBackend;
pub use config::ShellConfig;
pub use error::{ConfigError, RepositoryError};
pub use generator::{SyntheticDataGenerator, DEFAULT_SEED};
#[cfg(feature = "http")]
pub use http::HttpRepository;
pub use lifecycle::{
    LifecycleSnapshot, OperationExecutor, OperationState, Reload, DEFAULT_FAILURE_MESSAGE,
};
pub use record::{next_id, now, sort_natural, Record, RecordId, Timestamp};
pub use repository::{Filter, InMemoryRepository, Latency, LatencyProfile, Operation, Repository};

// Derive macro for Record
pub use mockdeck_macros::Record;

#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
