//! Unit tests for resend throttling inside the verification flow

use std::sync::Arc;

use crate::domain::entities::resend_throttle::ThrottleState;
use crate::errors::{ApiFailure, OtpError, ResendRefusal};
use crate::services::verification::TickTarget;

use super::mocks::{build_flow, elapse, sent, ApiCall, MockOtpApi, MockSessionStore};

#[tokio::test]
async fn test_cooldown_counts_down_to_zero() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));

    let flow = build_flow(api, store);
    flow.start().await.unwrap();

    for expected in (0..30).rev() {
        assert!(flow.tick());
        assert_eq!(flow.snapshot().cooldown, expected);
    }

    elapse(&flow, 5);
    let snapshot = flow.snapshot();
    assert_eq!(snapshot.cooldown, 0);
    assert_eq!(snapshot.throttle_state, ThrottleState::Idle);
    assert!(snapshot.resend_enabled());
}

#[tokio::test]
async fn test_resend_refused_during_cooldown_without_network_call() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));

    let flow = build_flow(api.clone(), store);
    flow.start().await.unwrap();
    elapse(&flow, 29);

    let error = flow.resend().await.unwrap_err();
    assert_eq!(
        error,
        OtpError::ResendRefused(ResendRefusal::CoolingDown { seconds_left: 1 })
    );
    assert_eq!(
        flow.snapshot().last_notice.as_deref(),
        Some("Tunggu 1 detik sebelum meminta kode baru")
    );
    assert_eq!(api.calls(), vec![ApiCall::Send]);
}

#[tokio::test]
async fn test_resend_after_cooldown_mirrors_server_budget() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));
    api.push_dispatch(Ok(sent("Kode OTP telah dikirim", Some(3))));
    api.push_dispatch(Ok(sent("Kode OTP baru telah dikirim", Some(2))));

    let flow = build_flow(api.clone(), store.clone());
    flow.start().await.unwrap();
    elapse(&flow, 30);

    let dispatch = flow.resend().await.unwrap();
    assert_eq!(dispatch.remaining_resend, Some(2));

    let snapshot = flow.snapshot();
    assert_eq!(snapshot.resend_budget, 2);
    assert_eq!(snapshot.cooldown, 30);
    assert_eq!(snapshot.throttle_state, ThrottleState::CoolingDown);
    assert_eq!(api.calls(), vec![ApiCall::Send, ApiCall::Resend]);
    // No marker was set, so nothing is written
    assert!(store.pending_writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_budget_is_never_decremented_locally() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));
    api.push_dispatch(Ok(sent("sent", Some(3))));
    api.push_dispatch(Ok(sent("sent again", None)));

    let flow = build_flow(api, store);
    flow.start().await.unwrap();
    elapse(&flow, 30);
    flow.resend().await.unwrap();

    assert_eq!(flow.snapshot().resend_budget, 3);
}

#[tokio::test]
async fn test_exhausted_budget_refuses_resend_regardless_of_order() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));
    api.push_dispatch(Ok(sent("sent", Some(1))));
    api.push_dispatch(Ok(sent("last one", Some(0))));

    let flow = build_flow(api.clone(), store);
    flow.start().await.unwrap();
    elapse(&flow, 30);
    flow.resend().await.unwrap();

    // Refused while cooling down and after the cooldown has ended
    assert_eq!(
        flow.resend().await,
        Err(OtpError::ResendRefused(ResendRefusal::Exhausted))
    );
    elapse(&flow, 45);
    assert_eq!(
        flow.resend().await,
        Err(OtpError::ResendRefused(ResendRefusal::Exhausted))
    );
    assert_eq!(flow.snapshot().throttle_state, ThrottleState::Exhausted);
    assert!(!flow.snapshot().resend_enabled());
    assert_eq!(api.count(&ApiCall::Resend), 1);
}

#[tokio::test]
async fn test_failed_resend_leaves_throttle_untouched() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));
    api.push_dispatch(Ok(sent("sent", Some(2))));
    api.push_dispatch(Err(ApiFailure::Rejected {
        status: 429,
        message: Some("Tunggu sebelum meminta kode baru".to_string()),
    }));

    let flow = build_flow(api.clone(), store);
    flow.start().await.unwrap();
    elapse(&flow, 30);

    let error = flow.resend().await.unwrap_err();
    assert_eq!(error.to_string(), "Tunggu sebelum meminta kode baru");

    let snapshot = flow.snapshot();
    assert_eq!(snapshot.cooldown, 0);
    assert_eq!(snapshot.resend_budget, 2);
    assert_eq!(snapshot.throttle_state, ThrottleState::Idle);
    assert!(!snapshot.dispatching);

    // The user may try again straight away; the failure was not retried automatically
    assert_eq!(api.count(&ApiCall::Resend), 1);
    flow.resend().await.unwrap();
    assert_eq!(api.count(&ApiCall::Resend), 2);
}

#[tokio::test]
async fn test_resend_clears_marker_left_by_failed_start() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(true));
    api.push_dispatch(Err(ApiFailure::Transport("offline".to_string())));
    api.push_dispatch(Ok(sent("Kode OTP baru telah dikirim", Some(1))));

    let flow = build_flow(api.clone(), store.clone());
    assert!(flow.start().await.is_err());
    assert!(store.is_pending());

    flow.resend().await.unwrap();
    assert!(!store.is_pending());
    assert_eq!(*store.pending_writes.lock().unwrap(), vec![false]);
    assert_eq!(api.calls(), vec![ApiCall::Resend, ApiCall::Resend]);
}

#[tokio::test]
async fn test_resend_before_start_is_refused() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));

    let flow = build_flow(api.clone(), store);
    assert_eq!(flow.resend().await, Err(OtpError::NotStarted));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_tick_target_stops_after_teardown() {
    let api = Arc::new(MockOtpApi::new());
    let store = Arc::new(MockSessionStore::new(false));

    let flow = Arc::new(build_flow(api, store));
    flow.start().await.unwrap();

    let target: Arc<dyn TickTarget> = flow.clone();
    assert!(target.tick());
    assert_eq!(flow.snapshot().cooldown, 29);

    flow.teardown();
    assert!(!target.tick());
    assert_eq!(flow.snapshot().cooldown, 29);
}
