// This file is part of Chip Tally.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::config::{log_config_warnings, ConfigWarnings};
use crate::core::system::system_order::{configure_tally_sets, PrePhysicsSet, TallySet};
use crate::debug::DebugPlugin;
use crate::gameplay::spawn::spawn::ChipSpawnPlugin;
use crate::interaction::input::input_interaction::InputInteractionPlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::session::controls::SessionControlsPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::physics::sensors::SensorForwardPlugin;
use crate::rendering::RenderingPlugin;
use crate::session::plugin::SessionPlugin;

/// Session lifecycle, entity spawning and sensor forwarding. Runs without a
/// window or renderer; `CollisionEvent` must be registered by Rapier or by
/// the caller.
pub struct TallyCorePlugin;

impl Plugin for TallyCorePlugin {
    fn build(&self, app: &mut App) {
        configure_tally_sets(app);
        app.init_resource::<ConfigWarnings>()
            .add_systems(Startup, log_config_warnings)
            .add_plugins((SessionPlugin, ChipSpawnPlugin, SensorForwardPlugin));
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, PrePhysicsSet.after(TallySet::Lifecycle))
            .add_plugins((
                TallyCorePlugin,
                PhysicsSetupPlugin,
                SessionControlsPlugin,
                InputInteractionPlugin,
                RenderingPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
            ));
    }
}
