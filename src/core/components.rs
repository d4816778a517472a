use bevy::prelude::*;

use crate::layout::zones::ZoneId;
use crate::tally::membership::ChipId;

/// Physics body of one chip. `generation` ties it to the session that spawned it.
#[derive(Component, Debug, Copy, Clone)]
pub struct Chip {
    pub id: ChipId,
    pub value: u32,
    pub generation: u64,
}

/// Logical radius used both for the collider and rendering scale.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct ChipRadius(pub f32);

/// Sensor rectangle covering one zone.
#[derive(Component, Debug, Copy, Clone)]
pub struct ZoneSensor {
    pub id: ZoneId,
    pub generation: u64,
    /// Full size in board pixels.
    pub size: Vec2,
}

/// Tag for everything spawned on behalf of a session; despawned on teardown.
#[derive(Component, Debug, Copy, Clone)]
pub struct SessionMember(pub u64);

/// Tag for the disc mesh child of a chip.
#[derive(Component)]
pub struct ChipDiscVisual;
