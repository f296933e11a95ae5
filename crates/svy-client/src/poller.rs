//! Bounded status polling.

use std::time::Duration;

use svy_config::PollConfig;
use svy_core::Study;
use tokio::time::{Instant, sleep_until};

use crate::SurveyClient;
use crate::error::ClientError;
use crate::transport::Transport;

/// Shortest pause between two status checks.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How often to poll and when to give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Raised to [`MIN_POLL_INTERVAL`] when shorter.
    pub interval: Duration,
    pub max_wait: Duration,
}

impl PollOptions {
    #[must_use]
    pub const fn new(interval: Duration, max_wait: Duration) -> Self {
        let interval = if interval.as_nanos() < MIN_POLL_INTERVAL.as_nanos() {
            MIN_POLL_INTERVAL
        } else {
            interval
        };
        Self { interval, max_wait }
    }
}

impl From<&PollConfig> for PollOptions {
    fn from(config: &PollConfig) -> Self {
        Self::new(
            Duration::from_secs(config.interval_secs),
            Duration::from_secs(config.max_wait_secs),
        )
    }
}

/// Poll `study` until its status is terminal (completed or stopped).
///
/// Checks immediately, then every `interval` (at least
/// [`MIN_POLL_INTERVAL`]). Sleeps never run past the
/// deadline, so the call returns within `max_wait` plus one request. A 429
/// stretches the next sleep to the advertised `Retry-After`; any other error
/// ends polling. `on_status` sees every successfully fetched state.
///
/// # Errors
///
/// Returns [`ClientError::Timeout`] once `max_wait` has elapsed without a
/// terminal status, or the first non-rate-limit error from the client.
pub async fn wait_until_complete<T, F>(
    client: &SurveyClient<T>,
    study: &Study,
    options: PollOptions,
    mut on_status: F,
) -> Result<Study, ClientError>
where
    T: Transport,
    F: FnMut(&Study),
{
    let interval = options.interval.max(MIN_POLL_INTERVAL);
    let started = Instant::now();
    let deadline = started + options.max_wait;
    let mut last_status = study.status;
    let mut checks: u32 = 0;

    loop {
        checks += 1;
        let pause = match client.refresh(study).await {
            Ok(current) => {
                on_status(&current);
                if current.status.is_terminal() {
                    tracing::info!(study = %current.id, status = %current.status, checks, "study finished");
                    return Ok(current);
                }
                tracing::debug!(
                    study = %current.id,
                    status = %current.status,
                    taken = current.places_taken,
                    places = current.total_available_places,
                    "study still running"
                );
                last_status = current.status;
                interval
            }
            Err(ClientError::RateLimited { retry_after_secs }) => {
                tracing::warn!(retry_after_secs, "status check rate limited");
                interval.max(Duration::from_secs(retry_after_secs))
            }
            Err(error) => return Err(error),
        };

        let now = Instant::now();
        if now >= deadline {
            return Err(ClientError::Timeout {
                study_id: study.id.clone(),
                waited_secs: now.duration_since(started).as_secs(),
                last_status,
            });
        }
        sleep_until((now + pause).min(deadline)).await;
    }
}
