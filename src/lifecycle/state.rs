use serde::Serialize;

/// Lifecycle of the most recent operation run through an executor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed {
        /// Caller-supplied, user-facing message.
        message: String,
        /// Full description of the failure, for developers.
        detail: String,
    },
}

impl OperationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, OperationState::Loading)
    }

    pub fn has_error(&self) -> bool {
        matches!(self, OperationState::Failed { .. })
    }

    /// `Succeeded` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Succeeded | OperationState::Failed { .. })
    }

    pub fn error_message(&self) -> &str {
        match self {
            OperationState::Failed { message, .. } => message,
            _ => "",
        }
    }

    pub fn error_detail(&self) -> &str {
        match self {
            OperationState::Failed { detail, .. } => detail,
            _ => "",
        }
    }

    /// Event name used for listeners: "idle", "loading", "succeeded" or "failed".
    pub fn name(&self) -> &'static str {
        match self {
            OperationState::Idle => "idle",
            OperationState::Loading => "loading",
            OperationState::Succeeded => "succeeded",
            OperationState::Failed { .. } => "failed",
        }
    }

    pub fn snapshot(&self) -> LifecycleSnapshot {
        LifecycleSnapshot {
            loading: self.is_loading(),
            has_error: self.has_error(),
            error_message: self.error_message().to_string(),
            error_detail: self.error_detail().to_string(),
        }
    }
}

/// Flat view of the lifecycle for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LifecycleSnapshot {
    pub loading: bool,
    pub has_error: bool,
    pub error_message: String,
    pub error_detail: String,
}
