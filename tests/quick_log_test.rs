//! Terminal quick log against a live hub

mod common;

use builder_hub::client::{run_interactive, LogClient};
use builder_hub::forms::{QuickLogForm, DEFAULT_SCORE};
use builder_hub::models::{DeviceType, Stage};

#[tokio::test]
async fn test_interactive_session() {
    let hub = common::start(true, DeviceType::Desktop).await;
    let client = LogClient::new(&hub.base).unwrap();
    let mut form = QuickLogForm::new("Acme", Stage::Deploy, 4, DEFAULT_SCORE);

    let input: &[u8] = b"shipped v1\n\n   \nfixed rollout\n/quit\nignored\n";
    let mut out = Vec::new();
    run_interactive(&client, &mut form, input, &mut out).await.unwrap();

    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches("ok: Log saved.").count(), 2);

    let logs = hub.db().recent_build_logs(10).unwrap();
    let summaries: Vec<_> = logs.iter().map(|l| l.summary.as_str()).collect();
    assert_eq!(summaries, vec!["fixed rollout", "shipped v1"]);
    assert!(logs.iter().all(|l| l.stage == Stage::Deploy && l.energy_level == Some(4)));
    assert_eq!(logs[0].leverage_score, Some(3));
    assert_eq!(form.summary, "");
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let hub = common::start(false, DeviceType::Desktop).await;
    let client = LogClient::new(&hub.base).unwrap();
    let mut form = QuickLogForm::new("Acme", Stage::Dev, DEFAULT_SCORE, DEFAULT_SCORE);

    let mut out = Vec::new();
    run_interactive(&client, &mut form, &b"did X\n"[..], &mut out).await.unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("error: storage is not configured"));
    assert_eq!(form.summary, "did X");
}

#[tokio::test]
async fn test_unreachable_server() {
    // Port 9 (discard) on loopback is almost never listening
    let client = LogClient::new("http://127.0.0.1:9").unwrap();
    let mut form = QuickLogForm::new("Acme", Stage::Dev, DEFAULT_SCORE, DEFAULT_SCORE);

    let mut out = Vec::new();
    run_interactive(&client, &mut form, &b"did X\n"[..], &mut out).await.unwrap();
    assert!(String::from_utf8(out).unwrap().contains("error: Request failed."));
}
