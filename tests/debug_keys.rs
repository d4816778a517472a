#![cfg(feature = "debug")]
use bevy::prelude::*;
use chip_tally::core::config::TallyConfig;
use chip_tally::debug::keys::debug_key_input_system;
use chip_tally::debug::DebugState;

#[test]
fn function_keys_toggle_debug_views() {
    let mut app = App::new();
    // Insert only the resources we need.
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.init_resource::<DebugState>();
    app.insert_resource(TallyConfig::default());
    app.add_systems(Update, debug_key_input_system);

    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.press(KeyCode::F2);
    }
    app.update();
    assert!(app.world().resource::<DebugState>().outlines);
    assert!(!app.world().resource::<TallyConfig>().rapier_debug);

    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.clear();
        input.press(KeyCode::F1);
    }
    app.update();
    assert!(app.world().resource::<TallyConfig>().rapier_debug);
    assert!(app.world().resource::<DebugState>().outlines);
}
