use std::time::Duration;

use serde_json::Value;
use supplink_domain::ApprovalPolicy;

use super::{Shell, Step};
use crate::command::ShellCommand;
use crate::config::ShellConfig;
use crate::seed::SeedDocument;

const DEMO_SEED: &str = include_str!("../../fixtures/seed.json");

async fn shell() -> Shell {
    let config = ShellConfig {
        seed_path: None,
        approval_policy: ApprovalPolicy::Legacy,
        fetch_timeout: Duration::from_secs(1),
    };
    let seed = SeedDocument::parse(DEMO_SEED).unwrap_or_default();
    match Shell::bootstrap(&config, seed).await {
        Ok(shell) => shell,
        Err(error) => panic!("bootstrap failed: {error}"),
    }
}

async fn run(shell: &mut Shell, line: &str) -> (bool, Value) {
    let command = match ShellCommand::parse(line) {
        Ok(Some(command)) => command,
        other => panic!("unparseable line '{line}': {other:?}"),
    };
    match shell.execute(command).await {
        Step::Reply(envelope) => {
            let success = envelope.success;
            let body = envelope
                .data
                .or_else(|| envelope.error.map(Value::String))
                .unwrap_or(Value::Null);
            (success, body)
        }
        Step::Quit => panic!("unexpected quit for '{line}'"),
    }
}

#[tokio::test]
async fn manager_review_round_trip() {
    let mut shell = shell().await;

    let (ok, body) = run(&mut shell, "sign-in manager@supplink.example manager-pass").await;
    assert!(ok);
    assert_eq!(body["screen"], "ManagerDashboard");

    let (ok, body) = run(&mut shell, "go review req-1").await;
    assert!(ok);
    assert_eq!(body["navigation"]["current"], "RequestReview");
    assert_eq!(body["navigation"]["previous"], "ManagerDashboard");

    let (ok, body) = run(&mut shell, "view").await;
    assert!(ok);
    assert_eq!(body["kind"], "request");
    assert_eq!(body["request"]["id"], "req-1");

    let (ok, body) = run(&mut shell, "back").await;
    assert!(ok);
    assert_eq!(body["navigation"]["current"], "ManagerDashboard");
    assert_eq!(body["navigation"]["previous"], Value::Null);
}

#[tokio::test]
async fn unapproved_sign_in_reports_the_notice() {
    let mut shell = shell().await;

    let (ok, body) = run(&mut shell, "sign-in pending@supplink.example pending-pass").await;
    assert!(!ok);
    assert!(body.as_str().is_some_and(|message| !message.is_empty()));

    let (_, state) = run(&mut shell, "state").await;
    assert_eq!(state["session"]["status"], "signed_out");
    assert_eq!(state["navigation"]["current"], "SignIn");
}

#[tokio::test]
async fn supplier_list_is_ignored_for_requesters() {
    let mut shell = shell().await;
    let _ = run(&mut shell, "sign-in requester@supplink.example requester-pass").await;

    let (ok, body) = run(&mut shell, "go suppliers").await;
    assert!(ok);
    assert_eq!(body["transition"]["outcome"], "ignored");
    assert_eq!(body["navigation"]["current"], "RequestsList");
}

#[tokio::test]
async fn provider_notifications_after_sign_in_are_unchanged() {
    let mut shell = shell().await;
    let receiver = shell.subscribe_auth();
    let _ = run(&mut shell, "sign-in approver@supplink.example approver-pass").await;

    let latest = receiver.borrow().clone();
    assert!(latest.is_some());
    assert!(shell.apply_auth_change(latest).await.is_none());

    let cleared = shell.apply_auth_change(None).await;
    assert!(cleared.is_some_and(|envelope| envelope.success));
}

#[tokio::test]
async fn quit_stops_the_loop() {
    let mut shell = shell().await;
    assert!(matches!(shell.execute(ShellCommand::Quit).await, Step::Quit));
}
