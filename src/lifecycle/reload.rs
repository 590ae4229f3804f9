use async_trait::async_trait;

/// Implemented by owners of an [`OperationExecutor`](super::OperationExecutor)
/// that know how to (re)load their own data.
///
/// The executor only tracks lifecycle; what "retry" means is up to the owner.
#[async_trait]
pub trait Reload: Send {
    /// Load everything the owner displays, usually through `execute` calls.
    async fn initialize(&mut self);

    /// User-initiated retry after a failure. Re-runs `initialize` by default.
    async fn retry(&mut self) {
        self.initialize().await;
    }
}
