//! Retry executor behavior against a live HTTP backend.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use transfer_scout::resilience::{CallOutcome, FailureKind, RetryPolicy, Subject};

mod common;

fn subject() -> Subject {
    Subject::new("UC Riverside", "www.ucr.edu")
}

#[tokio::test]
async fn test_all_attempts_fail_with_500() {
    let (addr, seen) = common::start_programmable_backend(|_| async {
        (500, r#"{"error":"internal"}"#.to_string())
    })
    .await;
    let client = common::test_client(addr, Some("key"), RetryPolicy::new(3, Duration::from_secs(1)));

    let outcome = client.fetch(&subject()).await;

    match &outcome {
        CallOutcome::Failed { reason, metadata } => {
            assert!(reason.starts_with("HTTP 500"), "reason: {}", reason);
            assert_eq!(metadata.attempts, 3);
            assert_eq!(metadata.kind, FailureKind::Transport);
            assert_eq!(metadata.subject, subject());
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(seen.lock().unwrap().len(), 3);
    assert_eq!(
        client.executor().sleeper().sleeps(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
    let total: Duration = client.executor().sleeper().sleeps().iter().sum();
    assert_eq!(total, Duration::from_secs(3));
}

#[tokio::test]
async fn test_first_attempt_success_extracts_text() {
    let (addr, seen) =
        common::start_programmable_backend(|_| async { (200, common::candidate_body("X")) }).await;
    let client = common::test_client(addr, Some("key"), RetryPolicy::new(5, Duration::from_secs(1)));

    let outcome = client.fetch(&subject()).await;

    assert_eq!(
        outcome,
        CallOutcome::Extracted {
            text: "X".into(),
            attempts: 1,
            fallback: false
        }
    );
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert!(client.executor().sleeper().sleeps().is_empty());
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let (addr, seen) =
        common::start_programmable_backend(|_| async { (200, common::candidate_body("X")) }).await;
    let client = common::test_client(addr, None, RetryPolicy::new(5, Duration::from_secs(1)));

    let outcome = client.fetch(&subject()).await;

    match &outcome {
        CallOutcome::Failed { reason, metadata } => {
            assert!(reason.contains("x-goog-api-key"));
            assert_eq!(metadata.attempts, 0);
            assert_eq!(metadata.kind, FailureKind::Precondition);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(seen.lock().unwrap().is_empty());
    assert!(client.executor().sleeper().sleeps().is_empty());
}

#[tokio::test]
async fn test_success_after_transient_failures_stops_retrying() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let (addr, seen) = common::start_programmable_backend(move |_| {
        let cc = cc.clone();
        async move {
            if cc.fetch_add(1, Ordering::SeqCst) < 2 {
                (503, "unavailable".to_string())
            } else {
                (200, common::candidate_body("third time"))
            }
        }
    })
    .await;
    let client =
        common::test_client(addr, Some("key"), RetryPolicy::new(5, Duration::from_millis(200)));

    let outcome = client.fetch(&subject()).await;

    assert_eq!(outcome.attempts(), 3);
    assert!(matches!(outcome, CallOutcome::Extracted { ref text, .. } if text == "third time"));
    assert_eq!(seen.lock().unwrap().len(), 3);
    assert_eq!(
        client.executor().sleeper().sleeps(),
        vec![Duration::from_millis(200), Duration::from_millis(400)]
    );
}

#[tokio::test]
async fn test_attempt_count_matches_ceiling() {
    for max_retries in 1..=5u32 {
        let (addr, seen) =
            common::start_programmable_backend(|_| async { (429, "slow down".to_string()) }).await;
        let client = common::test_client(
            addr,
            Some("key"),
            RetryPolicy::new(max_retries, Duration::from_millis(50)),
        );

        let outcome = client.fetch(&subject()).await;

        assert_eq!(outcome.attempts(), max_retries);
        assert_eq!(seen.lock().unwrap().len() as u32, max_retries);
        let expected: Vec<_> = (0..max_retries - 1)
            .map(|i| Duration::from_millis(50 * 2u64.pow(i)))
            .collect();
        assert_eq!(client.executor().sleeper().sleeps(), expected);
    }
}

#[tokio::test]
async fn test_missing_text_field_uses_fallback() {
    let (addr, seen) = common::start_programmable_backend(|_| async {
        (200, r#"{"candidates":[{"finishReason":"SAFETY"}]}"#.to_string())
    })
    .await;
    let client = common::test_client(addr, Some("key"), RetryPolicy::default());

    let outcome = client.fetch(&subject()).await;

    assert_eq!(
        outcome,
        CallOutcome::Extracted {
            text: "Failed to generate report text.".into(),
            attempts: 1,
            fallback: true
        }
    );
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_json_success_body_is_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let (addr, _) = common::start_programmable_backend(move |_| {
        let cc = cc.clone();
        async move {
            if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                (200, "<html>gateway page</html>".to_string())
            } else {
                (200, common::candidate_body("json now"))
            }
        }
    })
    .await;
    let client = common::test_client(addr, Some("key"), RetryPolicy::new(3, Duration::from_secs(1)));

    let outcome = client.fetch(&subject()).await;

    assert!(matches!(outcome, CallOutcome::Extracted { ref text, attempts: 2, .. } if text == "json now"));
    assert_eq!(client.executor().sleeper().sleeps(), vec![Duration::from_secs(1)]);
}

#[tokio::test]
async fn test_request_carries_key_and_search_tool() {
    let (addr, seen) =
        common::start_programmable_backend(|_| async { (200, common::candidate_body("ok")) }).await;
    let client = common::test_client(addr, Some("test-key"), RetryPolicy::default());

    client.fetch(&subject()).await;

    let seen = seen.lock().unwrap();
    let request = &seen[0];
    assert!(request
        .head
        .starts_with("POST /v1beta/models/gemini-test:generateContent HTTP/1.1"));
    assert_eq!(request.header("x-goog-api-key").as_deref(), Some("test-key"));
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["tools"][0]["google_search"], serde_json::json!({}));
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("UC Riverside (www.ucr.edu)"));
}

#[tokio::test]
async fn test_identical_inputs_give_identical_outcomes() {
    let (addr, _) = common::start_programmable_backend(|_| async { (500, "down".to_string()) }).await;
    let client = common::test_client(addr, Some("key"), RetryPolicy::new(2, Duration::from_millis(10)));

    let first = client.fetch(&subject()).await;
    let second = client.fetch(&subject()).await;

    match (first, second) {
        (
            CallOutcome::Failed { reason: r1, metadata: m1 },
            CallOutcome::Failed { reason: r2, metadata: m2 },
        ) => {
            assert_eq!(r1, r2);
            assert_eq!(m1.attempts, m2.attempts);
            assert_eq!(m1.kind, m2.kind);
            assert_eq!(m1.subject, m2.subject);
        }
        other => panic!("expected two failures, got {:?}", other),
    }
}

#[tokio::test]
async fn test_identical_successes_give_equal_outcomes() {
    let (addr, _) = common::start_programmable_backend(|_| async {
        (200, common::candidate_body("GPA: 3.0"))
    })
    .await;
    let client = common::test_client(addr, Some("key"), RetryPolicy::new(3, Duration::from_millis(10)));

    let first = client.fetch(&subject()).await;
    let second = client.fetch(&subject()).await;

    assert_eq!(first, second);
    assert_eq!(
        first,
        CallOutcome::Extracted {
            text: "GPA: 3.0".to_string(),
            attempts: 1,
            fallback: false,
        }
    );
    assert!(client.executor().sleeper().sleeps().is_empty());
}

#[tokio::test]
async fn test_hung_backend_is_bounded_by_timeout() {
    let (addr, seen) = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        (200, common::candidate_body("too late"))
    })
    .await;
    let executor = transfer_scout::resilience::RetryingRequestExecutor::with_sleeper(
        common::direct_transport(),
        common::RecordingSleeper::default(),
        RetryPolicy::new(2, Duration::from_millis(10)),
    );
    let client = transfer_scout::gemini::ReportClient::new(
        common::api_for(addr),
        Duration::from_millis(200),
        Some(secrecy::SecretString::from("key".to_string())),
        executor,
    );

    let started = std::time::Instant::now();
    let outcome = client.fetch(&subject()).await;

    assert!(!outcome.is_extracted());
    assert_eq!(outcome.attempts(), 2);
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert!(started.elapsed() < Duration::from_secs(10));
}
