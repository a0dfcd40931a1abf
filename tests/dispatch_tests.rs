//! Timer engine integration tests
//!
//! Drives the command dispatcher end to end against a scripted gateway and
//! checks what actually reaches the notification subsystem.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use focus_capsule::application::ports::{GatewayCapabilities, GatewayError, NotificationGateway};
use focus_capsule::application::{
    CommandDispatcher, DispatchOutcome, NotificationPresenter, CMD_CANCEL, CMD_UPDATE,
};
use focus_capsule::domain::notification::{
    ChannelSpec, ChronometerMode, NotificationContent, LEGACY_TIMER_CHANNEL_ID, TIMER_CHANNEL_ID,
    TIMER_NOTIFICATION_ID,
};
use focus_capsule::domain::timer::now_epoch_ms;

/// Everything the engine asked of the notification subsystem, in order.
#[derive(Debug, Clone, PartialEq)]
enum GatewayCall {
    CreateChannel(ChannelSpec),
    DeleteChannel(String),
    Post(u32, NotificationContent),
    Cancel(u32),
}

#[derive(Default)]
struct ScriptedGateway {
    calls: Mutex<Vec<GatewayCall>>,
    progress_capable: bool,
    fail_posts: AtomicBool,
}

impl ScriptedGateway {
    fn with_progress() -> Self {
        Self {
            progress_capable: true,
            ..Default::default()
        }
    }

    fn failing_posts() -> Self {
        let gateway = Self::default();
        gateway.fail_posts.store(true, Ordering::SeqCst);
        gateway
    }

    fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn posts(&self) -> Vec<(u32, NotificationContent)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Post(id, content) => Some((id, content)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NotificationGateway for &ScriptedGateway {
    async fn create_channel(&self, spec: &ChannelSpec) -> Result<(), GatewayError> {
        self.record(GatewayCall::CreateChannel(spec.clone()));
        Ok(())
    }

    async fn delete_channel(&self, channel_id: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::DeleteChannel(channel_id.to_string()));
        Ok(())
    }

    async fn post(&self, id: u32, content: &NotificationContent) -> Result<(), GatewayError> {
        self.record(GatewayCall::Post(id, content.clone()));
        if self.fail_posts.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend("scripted failure".to_string()));
        }
        Ok(())
    }

    async fn cancel(&self, id: u32) -> Result<(), GatewayError> {
        self.record(GatewayCall::Cancel(id));
        Ok(())
    }

    fn capabilities(&self) -> GatewayCapabilities {
        GatewayCapabilities {
            determinate_progress: self.progress_capable,
        }
    }
}

fn dispatcher(gateway: &ScriptedGateway) -> CommandDispatcher<&ScriptedGateway> {
    CommandDispatcher::new(NotificationPresenter::new(gateway))
}

fn args_from(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got: {}", other),
    }
}

#[tokio::test]
async fn update_posts_the_singleton_notification() {
    let gateway = ScriptedGateway::default();
    let args = args_from(json!({
        "title": "Focus",
        "text": "Deep work",
        "subText": "Sprint 3",
    }));

    let outcome = dispatcher(&gateway).handle(CMD_UPDATE, &args).await;

    assert_eq!(outcome, DispatchOutcome::Success);
    let posts = gateway.posts();
    assert_eq!(posts.len(), 1);
    let (id, content) = &posts[0];
    assert_eq!(*id, TIMER_NOTIFICATION_ID);
    assert_eq!(content.title, "Focus");
    assert_eq!(content.text, "Deep work");
    assert_eq!(content.sub_text, "Sprint 3");
}

#[tokio::test]
async fn repeated_updates_reuse_one_notification_id() {
    let gateway = ScriptedGateway::default();
    let engine = dispatcher(&gateway);

    engine
        .handle(CMD_UPDATE, &args_from(json!({"title": "First"})))
        .await;
    engine
        .handle(CMD_UPDATE, &args_from(json!({"title": "Second"})))
        .await;

    let posts = gateway.posts();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|(id, _)| *id == TIMER_NOTIFICATION_ID));
    // The second post fully describes the notification; nothing is inherited.
    assert_eq!(posts[1].1.title, "Second");
    assert_eq!(posts[1].1.text, "");
}

#[tokio::test]
async fn channel_setup_creates_current_and_deletes_legacy() {
    let gateway = ScriptedGateway::default();
    let engine = dispatcher(&gateway);

    engine.presenter().ensure_channel().await;

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        GatewayCall::CreateChannel(spec) => {
            assert_eq!(spec.id, TIMER_CHANNEL_ID);
            assert!(spec.silent);
        }
        other => panic!("expected channel creation first, got {:?}", other),
    }
    assert_eq!(
        calls[1],
        GatewayCall::DeleteChannel(LEGACY_TIMER_CHANNEL_ID.to_string())
    );
}

#[tokio::test]
async fn channel_setup_can_run_repeatedly() {
    let gateway = ScriptedGateway::default();
    let engine = dispatcher(&gateway);

    engine.presenter().ensure_channel().await;
    engine.presenter().ensure_channel().await;

    // Create-or-replace on the gateway side: both rounds ask for the same
    // channel, so nothing accumulates.
    let created: Vec<_> = gateway
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            GatewayCall::CreateChannel(spec) => Some(spec.id),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec![TIMER_CHANNEL_ID, TIMER_CHANNEL_ID]);
}

#[tokio::test]
async fn omitted_sub_text_falls_back_to_the_app_label() {
    let gateway = ScriptedGateway::default();

    dispatcher(&gateway)
        .handle(CMD_UPDATE, &args_from(json!({"title": "Focus"})))
        .await;

    assert_eq!(gateway.posts()[0].1.sub_text, "FocusCapsule");
}

#[tokio::test]
async fn every_update_pins_the_presentation_flags() {
    let gateway = ScriptedGateway::default();
    let engine = dispatcher(&gateway);
    let now = now_epoch_ms();

    engine
        .handle(
            CMD_UPDATE,
            &args_from(json!({"title": "Running", "endTimeMs": now + 60_000})),
        )
        .await;
    engine
        .handle(
            CMD_UPDATE,
            &args_from(json!({"title": "Paused", "isPaused": true})),
        )
        .await;

    for (_, content) in gateway.posts() {
        assert!(content.ongoing);
        assert!(content.only_alert_once);
        assert!(content.show_when);
        assert!(content.public_on_lock_screen);
        assert!(content.resume_app_on_tap);
    }
}

#[tokio::test]
async fn countdown_updates_anchor_the_end_time() {
    let gateway = ScriptedGateway::default();
    let end = now_epoch_ms() + 1_500_000;

    dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({"endTimeMs": end, "isCountdown": true})),
        )
        .await;

    let (_, content) = &gateway.posts()[0];
    assert_eq!(content.chronometer, Some(ChronometerMode::CountDown));
    assert_eq!(content.when_ms, Some(end));
}

#[tokio::test]
async fn count_up_updates_anchor_the_start_time() {
    let gateway = ScriptedGateway::default();
    let start = now_epoch_ms() - 300_000;

    dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({"startTimeMs": start, "isCountdown": false})),
        )
        .await;

    let (_, content) = &gateway.posts()[0];
    assert_eq!(content.chronometer, Some(ChronometerMode::CountUp));
    assert_eq!(content.when_ms, Some(start));
}

#[tokio::test]
async fn paused_updates_freeze_the_timer_line() {
    let gateway = ScriptedGateway::with_progress();
    let now = now_epoch_ms();

    dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({
                "text": "Paused at 12:30",
                "isPaused": true,
                "startTimeMs": now - 750_000,
                "endTimeMs": now + 750_000,
            })),
        )
        .await;

    let (_, content) = &gateway.posts()[0];
    assert_eq!(content.chronometer, None);
    assert_eq!(content.when_ms, None);
    // Pause also suppresses progress, even with both timestamps present.
    assert_eq!(content.progress_percent, None);
    assert_eq!(content.text, "Paused at 12:30");
}

#[tokio::test]
async fn missing_basis_leaves_the_anchor_out() {
    let gateway = ScriptedGateway::default();

    dispatcher(&gateway)
        .handle(CMD_UPDATE, &args_from(json!({"title": "No deadline"})))
        .await;

    let (_, content) = &gateway.posts()[0];
    assert_eq!(content.chronometer, Some(ChronometerMode::CountDown));
    assert_eq!(content.when_ms, None);
}

#[tokio::test]
async fn progress_requires_a_capable_backend() {
    let now = now_epoch_ms();
    let args = args_from(json!({
        "startTimeMs": now - 250_000,
        "endTimeMs": now + 750_000,
    }));

    let plain = ScriptedGateway::default();
    dispatcher(&plain).handle(CMD_UPDATE, &args).await;
    assert_eq!(plain.posts()[0].1.progress_percent, None);

    let capable = ScriptedGateway::with_progress();
    dispatcher(&capable).handle(CMD_UPDATE, &args).await;
    assert!(capable.posts()[0].1.progress_percent.is_some());
}

#[tokio::test]
async fn progress_reflects_the_elapsed_fraction() {
    let gateway = ScriptedGateway::with_progress();
    let now = now_epoch_ms();

    dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({
                "startTimeMs": now - 250_000,
                "endTimeMs": now + 750_000,
            })),
        )
        .await;

    // A quarter of the window has elapsed; allow a little clock drift
    // between building the arguments and the engine reading its own clock.
    let percent = gateway.posts()[0].1.progress_percent.unwrap();
    assert!((24..=26).contains(&percent), "got {}%", percent);
}

#[tokio::test]
async fn overdue_countdown_clamps_progress_to_full() {
    let gateway = ScriptedGateway::with_progress();
    let now = now_epoch_ms();

    dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({
                "startTimeMs": now - 2_000_000,
                "endTimeMs": now - 500_000,
            })),
        )
        .await;

    assert_eq!(gateway.posts()[0].1.progress_percent, Some(100));
}

#[tokio::test]
async fn degenerate_window_skips_progress_not_the_update() {
    let gateway = ScriptedGateway::with_progress();
    let instant = now_epoch_ms();

    let outcome = dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({
                "title": "Zero-length timer",
                "startTimeMs": instant,
                "endTimeMs": instant,
            })),
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Success);
    let posts = gateway.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].1.progress_percent, None);
    assert_eq!(posts[0].1.title, "Zero-length timer");
}

#[tokio::test]
async fn count_up_never_carries_progress() {
    let gateway = ScriptedGateway::with_progress();
    let now = now_epoch_ms();

    dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({
                "isCountdown": false,
                "startTimeMs": now - 250_000,
                "endTimeMs": now + 750_000,
            })),
        )
        .await;

    assert_eq!(gateway.posts()[0].1.progress_percent, None);
}

#[tokio::test]
async fn gateway_failures_never_surface() {
    let gateway = ScriptedGateway::failing_posts();

    let outcome = dispatcher(&gateway)
        .handle(CMD_UPDATE, &args_from(json!({"title": "Doomed"})))
        .await;

    // The post was attempted and failed; the command still completes.
    assert_eq!(outcome, DispatchOutcome::Success);
    assert_eq!(gateway.posts().len(), 1);
}

#[tokio::test]
async fn cancel_removes_by_fixed_id() {
    let gateway = ScriptedGateway::default();

    let outcome = dispatcher(&gateway)
        .handle(CMD_CANCEL, &Map::new())
        .await;

    assert_eq!(outcome, DispatchOutcome::Success);
    assert_eq!(gateway.calls(), vec![GatewayCall::Cancel(TIMER_NOTIFICATION_ID)]);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let gateway = ScriptedGateway::default();
    let engine = dispatcher(&gateway);

    let first = engine.handle(CMD_CANCEL, &Map::new()).await;
    let second = engine.handle(CMD_CANCEL, &Map::new()).await;

    assert_eq!(first, DispatchOutcome::Success);
    assert_eq!(second, DispatchOutcome::Success);
}

#[tokio::test]
async fn unknown_commands_yield_not_implemented() {
    let gateway = ScriptedGateway::default();

    let outcome = dispatcher(&gateway)
        .handle("start-pomodoro", &Map::new())
        .await;

    assert_eq!(outcome, DispatchOutcome::NotImplemented);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn command_names_match_exactly() {
    let gateway = ScriptedGateway::default();
    let engine = dispatcher(&gateway);

    for name in [
        "Update-Timer-Notification",
        "update_timer_notification",
        "UPDATE-TIMER-NOTIFICATION",
        "cancel-timer-notification ",
    ] {
        let outcome = engine.handle(name, &Map::new()).await;
        assert_eq!(outcome, DispatchOutcome::NotImplemented, "name: {:?}", name);
    }
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn argument_decoding_is_total() {
    let gateway = ScriptedGateway::default();

    // Wrong-typed entries fall back to defaults instead of failing the update.
    let outcome = dispatcher(&gateway)
        .handle(
            CMD_UPDATE,
            &args_from(json!({
                "title": 42,
                "endTimeMs": "soon",
                "isPaused": "yes",
            })),
        )
        .await;

    assert_eq!(outcome, DispatchOutcome::Success);
    let (_, content) = &gateway.posts()[0];
    assert_eq!(content.title, "");
    assert_eq!(content.when_ms, None);
    assert_eq!(content.chronometer, Some(ChronometerMode::CountDown));
}
