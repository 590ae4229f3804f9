//! Repositories - the uniform CRUD contract and its in-memory implementation.
//!
//! Every mock app stores its records in an [`InMemoryRepository`], one per
//! entity kind. Callers that only need the contract program against
//! [`Repository`], so an HTTP-backed store can stand in.
//!
//! ## Example
//!
//! ```ignore
//! use mockdeck::{InMemoryRepository, LatencyProfile, Repository};
//!
//! let posts = InMemoryRepository::with_records(seed_posts(), LatencyProfile::none());
//! let created = posts.create(Post { id: 0, user_id: 1, title: "hi".into(), body: "...".into() }).await?;
//! assert!(posts.get_by_id(created.id).await?.is_some());
//! ```

mod in_memory;
mod latency;
mod repository;

pub use in_memory::InMemoryRepository;
pub use latency::{Latency, LatencyProfile, Operation};
pub use repository::{Filter, Repository};
