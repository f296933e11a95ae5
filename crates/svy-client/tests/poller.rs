//! Poller behavior on a paused tokio clock.

mod common;

use std::time::Duration;

use common::{client, study, study_json};
use svy_client::mock::MockTransport;
use svy_client::{ClientError, MIN_POLL_INTERVAL, PollOptions, wait_until_complete};
use svy_core::StudyStatus;
use tokio::time::Instant;

const INTERVAL: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn returns_as_soon_as_study_completes() {
    let client = client(
        MockTransport::new()
            .with_json(200, &study_json("st-1", "ACTIVE"))
            .with_json(200, &study_json("st-1", "ACTIVE"))
            .with_json(200, &study_json("st-1", "COMPLETED")),
    );
    let mut seen = Vec::new();
    let started = Instant::now();

    let done = wait_until_complete(
        &client,
        &study(StudyStatus::Active),
        PollOptions::new(INTERVAL, Duration::from_secs(600)),
        |s| seen.push(s.status),
    )
    .await
    .expect("completes");

    assert_eq!(done.status, StudyStatus::Completed);
    assert_eq!(started.elapsed(), INTERVAL * 2);
    assert_eq!(
        seen,
        vec![StudyStatus::Active, StudyStatus::Active, StudyStatus::Completed]
    );
}

#[tokio::test(start_paused = true)]
async fn stopped_is_terminal_too() {
    let client = client(MockTransport::new().with_json(200, &study_json("st-1", "STOPPED")));

    let done = wait_until_complete(
        &client,
        &study(StudyStatus::Active),
        PollOptions::new(INTERVAL, INTERVAL),
        |_| {},
    )
    .await
    .expect("stops");

    assert_eq!(done.status, StudyStatus::Stopped);
}

#[tokio::test(start_paused = true)]
async fn times_out_within_max_wait_plus_one_interval() {
    let mut transport = MockTransport::new();
    for _ in 0..10 {
        transport = transport.with_json(200, &study_json("st-1", "ACTIVE"));
    }
    let client = client(transport);
    let max_wait = Duration::from_secs(25);
    let started = Instant::now();

    let err = wait_until_complete(
        &client,
        &study(StudyStatus::Active),
        PollOptions::new(INTERVAL, max_wait),
        |_| {},
    )
    .await
    .unwrap_err();

    let elapsed = started.elapsed();
    assert!(elapsed <= max_wait + INTERVAL, "took {elapsed:?}");
    assert!(elapsed >= max_wait);
    assert!(matches!(
        err,
        ClientError::Timeout {
            last_status: StudyStatus::Active,
            waited_secs: 25,
            ..
        }
    ));
    // checks at 0s, 10s, 20s and the deadline
    assert_eq!(client.transport().requests().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn rate_limit_stretches_the_next_sleep() {
    let client = client(
        MockTransport::new()
            .with_rate_limit(45)
            .with_json(200, &study_json("st-1", "COMPLETED")),
    );
    let started = Instant::now();

    let done = wait_until_complete(
        &client,
        &study(StudyStatus::Active),
        PollOptions::new(INTERVAL, Duration::from_secs(600)),
        |_| {},
    )
    .await
    .expect("completes after backoff");

    assert_eq!(done.status, StudyStatus::Completed);
    assert_eq!(started.elapsed(), Duration::from_secs(45));
}

#[tokio::test(start_paused = true)]
async fn other_errors_abort_immediately() {
    let client = client(
        MockTransport::new()
            .with_text(401, "expired")
            .with_json(200, &study_json("st-1", "COMPLETED")),
    );

    let err = wait_until_complete(
        &client,
        &study(StudyStatus::Active),
        PollOptions::new(INTERVAL, Duration::from_secs(600)),
        |_| {},
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(client.transport().remaining(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_still_waits_between_checks() {
    let client = client(
        MockTransport::new()
            .with_json(200, &study_json("st-1", "ACTIVE"))
            .with_json(200, &study_json("st-1", "ACTIVE"))
            .with_json(200, &study_json("st-1", "ACTIVE"))
            .with_json(200, &study_json("st-1", "ACTIVE")),
    );
    let options = PollOptions {
        interval: Duration::ZERO,
        max_wait: MIN_POLL_INTERVAL * 3,
    };

    let err = wait_until_complete(&client, &study(StudyStatus::Active), options, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { .. }));
    assert_eq!(client.transport().requests().len(), 4);
}
