//! Lifecycle - loading/error state for page-level controllers.
//!
//! A controller owns an [`OperationExecutor`] and routes every data call
//! through it; the executor never lets a failure escape and always leaves a
//! terminal state behind. Controllers that support "try again" implement
//! [`Reload`].

mod executor;
mod reload;
mod state;

pub use executor::{OperationExecutor, DEFAULT_FAILURE_MESSAGE};
pub use reload::Reload;
pub use state::{LifecycleSnapshot, OperationState};
