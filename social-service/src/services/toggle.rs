//! Like/unlike as a single atomic state transition per
//! `(actor, target, target_type)`.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::metrics::{TOGGLE_CONFLICTS_TOTAL, TOGGLE_TOTAL};
use super::store::{RelationStore, StoreError};
use crate::models::{LikeKey, TargetType, ToggleOutcome};

#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("toggle failed: {0}")]
    Transient(#[source] StoreError),

    #[error("toggle timed out")]
    TimedOut,

    /// The post or comment was deleted before the toggle could lock it.
    #[error("{0} to toggle no longer exists")]
    TargetMissing(TargetType),
}

#[derive(Clone)]
pub struct ToggleEngine {
    store: Arc<dyn RelationStore>,
    timeout: Duration,
}

impl ToggleEngine {
    pub fn new(store: Arc<dyn RelationStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Creates the relation if absent, removes it if present.
    ///
    /// A lost insert race is resolved as a removal of the winner's row; a
    /// lost delete race re-runs the whole toggle. Conflicts are retried until
    /// the deadline; when it passes the in-flight attempt is dropped, which
    /// rolls its transaction back.
    pub async fn toggle(
        &self,
        actor_id: i64,
        target_id: i64,
        target_type: TargetType,
    ) -> Result<ToggleOutcome, ToggleError> {
        let key = LikeKey::new(actor_id, target_id, target_type);

        let result = match tokio::time::timeout(self.timeout, self.run(key)).await {
            Ok(result) => result,
            Err(_) => Err(ToggleError::TimedOut),
        };

        match &result {
            Ok(outcome) => {
                TOGGLE_TOTAL
                    .with_label_values(&[target_type.as_str(), outcome.as_str()])
                    .inc();
                tracing::info!(
                    actor_id,
                    target_id,
                    target_type = %target_type,
                    outcome = outcome.as_str(),
                    "Like toggled"
                );
            }
            Err(e) => {
                TOGGLE_TOTAL
                    .with_label_values(&[target_type.as_str(), "error"])
                    .inc();
                tracing::error!(
                    actor_id,
                    target_id,
                    target_type = %target_type,
                    error = %e,
                    "Like toggle failed"
                );
            }
        }

        result
    }

    async fn run(&self, key: LikeKey) -> Result<ToggleOutcome, ToggleError> {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match self.store.toggle_once(key).await {
                Ok(outcome) => return Ok(outcome),
                Err(StoreError::Duplicate(_)) => {
                    self.record_conflict(key, attempt, "insert lost to concurrent insert");
                    match self.store.remove(key).await {
                        Ok(true) => return Ok(ToggleOutcome::Removed),
                        // Someone else already removed it; start over.
                        Ok(false) => {}
                        Err(e) => return Err(ToggleError::Transient(e)),
                    }
                }
                Err(StoreError::Vanished) => {
                    self.record_conflict(key, attempt, "delete lost to concurrent delete");
                }
                Err(StoreError::MissingReference(_)) => {
                    return Err(ToggleError::TargetMissing(key.target_type));
                }
                Err(e) => return Err(ToggleError::Transient(e)),
            }

            // Let the winner commit before looking again.
            tokio::task::yield_now().await;
        }
    }

    fn record_conflict(&self, key: LikeKey, attempt: u32, what: &str) {
        TOGGLE_CONFLICTS_TOTAL
            .with_label_values(&[key.target_type.as_str()])
            .inc();
        tracing::debug!(
            actor_id = key.actor_id,
            target_id = key.target_id,
            target_type = %key.target_type,
            attempt,
            "{}",
            what
        );
    }
}
