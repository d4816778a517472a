#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use crate::core::config::TallyConfig;
#[cfg(feature = "debug")]
use bevy::prelude::*;

/// F1 toggles the Rapier wireframe, F2 the zone outlines.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugState>,
    mut cfg: ResMut<TallyConfig>,
) {
    if keys.just_pressed(KeyCode::F1) {
        // Bypass so the camera and materials do not treat this as a config reload.
        let cfg = cfg.bypass_change_detection();
        cfg.rapier_debug = !cfg.rapier_debug;
        info!("rapier wireframe {}", if cfg.rapier_debug { "on" } else { "off" });
    }
    if keys.just_pressed(KeyCode::F2) {
        state.outlines = !state.outlines;
        info!("zone outlines {}", if state.outlines { "on" } else { "off" });
    }
}
