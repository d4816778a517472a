use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Chip, ChipRadius, SessionMember, ZoneSensor};
use crate::core::config::{ChipConfig, TallyConfig};
use crate::core::system::system_order::TallySet;
use crate::layout::board::BoardSpace;
use crate::layout::zones::Zone;
use crate::session::events::SessionStarted;
use crate::session::session::{ChipSpawn, SessionSlot};

pub struct ChipSpawnPlugin;

impl Plugin for ChipSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            spawn_session_entities
                .in_set(TallySet::Lifecycle)
                .after(crate::session::plugin::handle_session_requests),
        );
    }
}

/// Chips sit above zone sensors; zones share one layer.
const ZONE_Z: f32 = 0.0;
const CHIP_Z: f32 = 10.0;

pub fn spawn_zone_sensor(
    commands: &mut Commands,
    zone: &Zone,
    generation: u64,
    space: &BoardSpace,
) -> Entity {
    let half = zone.half_size();
    commands
        .spawn((
            Name::new(format!("Zone {}", zone.id)),
            ZoneSensor {
                id: zone.id,
                generation,
                size: zone.size,
            },
            SessionMember(generation),
            Collider::cuboid(half.x, half.y),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_translation(space.to_world(zone.center).extend(ZONE_Z)),
        ))
        .id()
}

pub fn spawn_chip_entity(
    commands: &mut Commands,
    chip: &ChipSpawn,
    generation: u64,
    chips: &ChipConfig,
    space: &BoardSpace,
) -> Entity {
    // Later chips stack slightly above earlier ones so overlapping discs draw stably.
    let z = CHIP_Z + chip.id.0 as f32 * 0.001;
    commands
        .spawn((
            Name::new(format!("Chip {} ({})", chip.id, chip.value)),
            Chip {
                id: chip.id,
                value: chip.value,
                generation,
            },
            ChipRadius(chips.radius),
            SessionMember(generation),
            RigidBody::Dynamic,
            Collider::ball(chips.radius),
            ColliderMassProperties::Density(chips.density),
            Velocity::zero(),
            Restitution::coefficient(chips.restitution),
            Friction::coefficient(chips.friction),
            Damping {
                linear_damping: chips.linear_damping,
                angular_damping: chips.angular_damping,
            },
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_translation(space.to_world(chip.position).extend(z)),
        ))
        .id()
}

pub fn spawn_session_entities(
    mut commands: Commands,
    mut started: EventReader<SessionStarted>,
    slot: Res<SessionSlot>,
    cfg: Res<TallyConfig>,
) {
    // Only the most recent start matters; older sessions are already gone.
    let Some(ev) = started.read().last().copied() else {
        return;
    };
    let Some(session) = slot.active().filter(|s| s.generation() == ev.generation) else {
        return;
    };
    let space = BoardSpace::from_config(&cfg.board);
    for zone in session.zones() {
        spawn_zone_sensor(&mut commands, zone, ev.generation, &space);
    }
    for chip in session.chips() {
        spawn_chip_entity(&mut commands, chip, ev.generation, &cfg.chips, &space);
    }
    info!(
        target: "session",
        "spawned {} zones and {} chips for session {}",
        session.zones().len(),
        session.chips().len(),
        ev.generation
    );
}
