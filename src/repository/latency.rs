//! Simulated network latency for mock repositories.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Delay applied before a repository operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Latency {
    #[default]
    None,
    Fixed {
        millis: u64,
    },
    /// Uniformly drawn from `min_millis..=max_millis` on every call.
    Between {
        min_millis: u64,
        max_millis: u64,
    },
}

impl Latency {
    pub const fn fixed(millis: u64) -> Self {
        Latency::Fixed { millis }
    }

    pub const fn between(min_millis: u64, max_millis: u64) -> Self {
        Latency::Between {
            min_millis,
            max_millis,
        }
    }

    /// The delay for one call.
    pub fn duration(&self) -> Duration {
        match *self {
            Latency::None => Duration::ZERO,
            Latency::Fixed { millis } => Duration::from_millis(millis),
            Latency::Between {
                min_millis,
                max_millis,
            } => {
                let (lo, hi) = if min_millis <= max_millis {
                    (min_millis, max_millis)
                } else {
                    (max_millis, min_millis)
                };
                Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
            }
        }
    }

    /// Multiply the bounds by `factor`. Negative or NaN factors disable the delay.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |millis: u64| {
            if factor.is_nan() || factor <= 0.0 {
                0
            } else {
                (millis as f64 * factor).round() as u64
            }
        };
        match self {
            Latency::None => Latency::None,
            Latency::Fixed { millis } => Latency::fixed(scale(millis)),
            Latency::Between {
                min_millis,
                max_millis,
            } => Latency::between(scale(min_millis), scale(max_millis)),
        }
    }

    pub async fn wait(&self) {
        let delay = self.duration();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Repository operation kinds that carry their own latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    /// Status-only mutations (toggle star, set status, ...).
    Mutate,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Mutate => "mutate",
        }
    }
}

/// Per-operation latency settings for one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LatencyProfile {
    #[serde(default)]
    pub list: Latency,
    #[serde(default)]
    pub get: Latency,
    #[serde(default)]
    pub create: Latency,
    #[serde(default)]
    pub update: Latency,
    #[serde(default)]
    pub delete: Latency,
    #[serde(default)]
    pub mutate: Latency,
}

impl LatencyProfile {
    /// No simulated delay at all.
    pub const fn none() -> Self {
        Self::uniform(Latency::None)
    }

    /// The same latency for every operation.
    pub const fn uniform(latency: Latency) -> Self {
        Self {
            list: latency,
            get: latency,
            create: latency,
            update: latency,
            delete: latency,
            mutate: latency,
        }
    }

    pub fn for_operation(&self, operation: Operation) -> Latency {
        match operation {
            Operation::List => self.list,
            Operation::Get => self.get,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
            Operation::Mutate => self.mutate,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            list: self.list.scaled(factor),
            get: self.get.scaled(factor),
            create: self.create.scaled(factor),
            update: self.update.scaled(factor),
            delete: self.delete.scaled(factor),
            mutate: self.mutate.scaled(factor),
        }
    }

    pub async fn wait(&self, operation: Operation) {
        self.for_operation(operation).wait().await;
    }
}
