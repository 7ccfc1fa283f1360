//! Tests for incremental invalidation and live-session notification

use std::sync::Arc;
use std::time::Duration;

use autocomp_core::config::DtsOption;
use autocomp_core::{ChannelSession, Context, Options, Throttle, UpdatePayload, WatchEvent};
use autocomp_test_utils::TestProject;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio::time::Instant;

fn project_with_card() -> TestProject {
    let project = TestProject::new();
    project.component("src/components/Card.svelte");
    project
}

#[tokio::test]
async fn test_consumers_are_notified_when_component_goes_away() {
    let project = project_with_card();
    let mut ctx = Context::new(Options::default(), project.root()).unwrap();
    let (session, mut updates) = ChannelSession::new();
    ctx.attach_session(Arc::new(session));

    let app = project.path("src/App.svelte").to_string();
    ctx.transform("<Card />", &app).await.unwrap();

    let card = project.path("src/components/Card.svelte");
    assert!(ctx.handle_event(WatchEvent::Unlink(card), Instant::now()).unwrap());

    let payload: UpdatePayload = updates.try_recv().unwrap();
    assert_eq!(payload.kind, "update");
    assert_eq!(payload.updates.len(), 1);
    let update = &payload.updates[0];
    assert_eq!(update.kind, "js-update");
    assert_eq!(update.path, "/src/App.svelte");
    assert_eq!(update.accepted_path, "/src/App.svelte");
    assert!(update.timestamp > 0);

    assert!(ctx.find_component("Card", &[]).is_none());
}

#[tokio::test]
async fn test_no_payload_without_consumers() {
    let project = project_with_card();
    let mut ctx = Context::new(Options::default(), project.root()).unwrap();
    let (session, mut updates) = ChannelSession::new();
    ctx.attach_session(Arc::new(session));
    ctx.search_glob().unwrap();

    let modal = project.component("src/components/Modal.svelte");
    assert!(ctx.handle_event(WatchEvent::Add(modal), Instant::now()).unwrap());

    assert!(updates.try_recv().is_err());
    assert!(ctx.find_component("Modal", &[]).is_some());
}

#[test]
fn test_repeated_add_changes_nothing() {
    let project = project_with_card();
    let mut ctx = Context::new(Options::default(), project.root()).unwrap();
    let card = project.path("src/components/Card.svelte");

    assert!(ctx.handle_event(WatchEvent::Add(card.clone()), Instant::now()).unwrap());
    assert!(!ctx.handle_event(WatchEvent::Add(card), Instant::now()).unwrap());
}

#[test]
fn test_events_outside_globs_are_ignored() {
    let project = TestProject::new();
    let mut ctx = Context::new(Options::default(), project.root()).unwrap();
    let stray = project.component("src/lib/Stray.svelte");

    assert!(!ctx.handle_event(WatchEvent::Add(stray.clone()), Instant::now()).unwrap());
    assert!(!ctx.registry().contains(&stray));
}

#[tokio::test]
async fn test_watch_loop_flushes_parked_regeneration_on_close() {
    let project = project_with_card();
    let options = Options {
        dts: Some(DtsOption::Enabled(true)),
        ..Default::default()
    };
    let mut ctx = Context::new(options, project.root())
        .unwrap()
        .with_throttle(Throttle::new(Duration::from_secs(60)));
    ctx.search_glob().unwrap();

    let (tx, rx) = mpsc::unbounded_channel();
    let modal = project.component("src/components/Modal.svelte");
    let dialog = project.component("src/components/Dialog.svelte");
    tx.send(WatchEvent::Add(modal)).unwrap();
    tx.send(WatchEvent::Add(dialog)).unwrap();
    drop(tx);

    ctx.watch(rx).await.unwrap();

    project.assert_file_contains("components.d.ts", "const Card:");
    project.assert_file_contains("components.d.ts", "const Modal:");
    project.assert_file_contains("components.d.ts", "const Dialog:");
}

#[tokio::test]
async fn test_watcher_reports_new_component() {
    let project = TestProject::new();
    project.component("src/components/Card.svelte");
    let ctx = Context::new(Options::default(), project.root()).unwrap();

    let (_watcher, mut rx) = autocomp_core::watch_components(ctx.options()).unwrap();
    let modal = project.component("src/components/Modal.svelte");

    let event = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match rx.recv().await {
                Some(WatchEvent::Add(path)) if path == modal => return Some(path),
                Some(_) => continue,
                None => return None,
            }
        }
    })
    .await;

    assert!(matches!(event, Ok(Some(_))), "no add event for {modal}");
}
