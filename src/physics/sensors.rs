//! Turns Rapier sensor contacts into `OverlapTransition`s for the tally.

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::core::components::{Chip, ZoneSensor};
use crate::core::system::system_order::TallySet;
use crate::session::events::OverlapTransition;

pub struct SensorForwardPlugin;

impl Plugin for SensorForwardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, forward_sensor_events.in_set(TallySet::Forward));
    }
}

/// Pairs are matched in either order. Events naming despawned entities, or a
/// chip and a sensor from different sessions, are dropped.
pub fn forward_sensor_events(
    mut collisions: EventReader<CollisionEvent>,
    chips: Query<&Chip>,
    sensors: Query<&ZoneSensor>,
    mut out: EventWriter<OverlapTransition>,
) {
    for ev in collisions.read() {
        let (e1, e2, entering) = match ev {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };
        let pair = match (sensors.get(e1), chips.get(e2)) {
            (Ok(s), Ok(c)) => Some((s, c)),
            _ => match (sensors.get(e2), chips.get(e1)) {
                (Ok(s), Ok(c)) => Some((s, c)),
                _ => None,
            },
        };
        let Some((sensor, chip)) = pair else {
            continue;
        };
        if sensor.generation != chip.generation {
            trace!(target: "tally", "dropping cross-session contact {} / {}", sensor.id, chip.id);
            continue;
        }
        out.write(OverlapTransition {
            generation: chip.generation,
            zone: sensor.id,
            chip: chip.id,
            entering,
        });
    }
}
