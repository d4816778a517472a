//! Debug module: feature gated tally logging and physics visualization.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
pub mod logging;
#[cfg(feature = "debug")]
mod modes;

#[cfg(feature = "debug")]
pub use modes::*;

#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use crate::core::components::{Chip, ZoneSensor};
#[cfg(feature = "debug")]
use crate::core::config::TallyConfig;
#[cfg(feature = "debug")]
use crate::core::system::system_order::TallySet;

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use keys::debug_key_input_system;
        use logging::debug_logging_system;

        fn sync_log_interval(cfg: Res<TallyConfig>, mut state: ResMut<DebugState>) {
            if cfg.is_changed() {
                state.log_interval = cfg.log_interval.max(0.1);
            }
        }

        fn debug_outline_gizmos(
            state: Res<DebugState>,
            zones: Query<(&Transform, &ZoneSensor)>,
            chips: Query<&Transform, With<Chip>>,
            mut gizmos: Gizmos,
        ) {
            if !state.outlines {
                return;
            }
            for (tf, sensor) in &zones {
                gizmos.rect_2d(
                    Isometry2d::from_translation(tf.translation.truncate()),
                    sensor.size,
                    Color::srgb(1.0, 1.0, 0.2),
                );
            }
            for tf in &chips {
                gizmos.circle_2d(
                    Isometry2d::from_translation(tf.translation.truncate()),
                    2.0,
                    Color::srgb(1.0, 0.5, 0.0),
                );
            }
        }

        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                sync_log_interval,
                debug_key_input_system,
                debug_logging_system,
                debug_outline_gizmos,
            )
                .after(TallySet::Apply),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
