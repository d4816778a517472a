mod common;

use bevy::prelude::*;
use chip_tally::interaction::{PendingSetup, SessionControlsPlugin};
use chip_tally::session::SessionNotice;
use chip_tally::SessionSlot;

use common::tally_app;

fn tap(app: &mut App, key: KeyCode) {
    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.press(key);
    }
    app.update();
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.release(key);
    input.clear();
}

fn controls_app() -> App {
    let mut app = tally_app();
    app.insert_resource(ButtonInput::<KeyCode>::default())
        .add_plugins(SessionControlsPlugin);
    app.update();
    app
}

#[test]
fn startup_configures_from_pending_setup() {
    let app = controls_app();
    let slot = app.world().resource::<SessionSlot>();
    let settings = slot.active().expect("auto-started").settings();
    assert_eq!(settings.player_count, 4);
    assert_eq!(settings.total_points, 100);
}

#[test]
fn editing_pending_settings_tears_down_then_enter_rebuilds() {
    let mut app = controls_app();
    tap(&mut app, KeyCode::Equal);
    assert_eq!(app.world().resource::<PendingSetup>().player_count, 5);
    assert!(app.world().resource::<SessionSlot>().active().is_none());

    tap(&mut app, KeyCode::ArrowUp);
    tap(&mut app, KeyCode::Enter);
    let slot = app.world().resource::<SessionSlot>();
    let session = slot.active().expect("rebuilt");
    assert_eq!(session.settings().player_count, 5);
    assert_eq!(session.settings().total_points, 200);
    assert_eq!(session.generation(), 2);
}

#[test]
fn reset_rebuilds_with_the_active_settings() {
    let mut app = controls_app();
    tap(&mut app, KeyCode::KeyR);
    let slot = app.world().resource::<SessionSlot>();
    let session = slot.active().unwrap();
    assert_eq!(session.generation(), 2);
    assert_eq!(session.settings().player_count, 4);
    assert_eq!(session.tally().total_points(), 600);
}

#[test]
fn player_limit_produces_a_notice() {
    let mut app = tally_app();
    app.insert_resource(ButtonInput::<KeyCode>::default())
        .insert_resource(PendingSetup {
            player_count: 16,
            total_points: 100,
        })
        .add_plugins(SessionControlsPlugin);
    app.update();

    tap(&mut app, KeyCode::Equal);
    assert_eq!(app.world().resource::<PendingSetup>().player_count, 16);
    // Refused edits leave the session alone.
    assert!(app.world().resource::<SessionSlot>().active().is_some());
    let notices = app.world().resource::<Events<SessionNotice>>();
    let mut reader = notices.get_cursor();
    assert!(reader
        .read(notices)
        .any(|n| n.0.to_string().contains("exceeds the maximum of 16")));
}
