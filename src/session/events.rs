use bevy::prelude::*;

use crate::core::error::ConfigurationNotice;
use crate::layout::zones::ZoneId;
use crate::tally::membership::ChipId;

/// Start a new session, replacing any active one. Values are untrusted and
/// get sanitized; `total_points: None` stands for input that was not a number.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureSession {
    pub player_count: i64,
    pub total_points: Option<i64>,
}

/// Drop the active session and despawn everything it owns.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TeardownSession;

/// Rebuild all memberships from current chip positions.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RecomputeTally;

/// A chip started or stopped overlapping a zone sensor.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapTransition {
    pub generation: u64,
    pub zone: ZoneId,
    pub chip: ChipId,
    pub entering: bool,
}

/// Fired after a session was built; spawners react to it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStarted {
    pub generation: u64,
}

/// Settings that were adjusted while configuring the latest session.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SessionNotice(pub ConfigurationNotice);
