//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. Input (session controls, drag grab/release)
//! 2. PrePhysics (drag pull applied to chip velocities before Rapier)
//! 3. Rapier (handled by plugin)
//! 4. Tally (session requests, sensor transitions, recompute)
//! 5. Labels (text refresh from the tally)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // forces applied before physics simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TallySet {
    /// Configure / teardown requests; despawns and respawns session entities.
    Lifecycle,
    /// Rapier collision events converted to overlap transitions.
    Forward,
    /// Transitions and recompute requests applied to the session.
    Apply,
    /// Text and legend refresh.
    Present,
}

pub fn configure_tally_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TallySet::Lifecycle,
            TallySet::Forward,
            TallySet::Apply,
            TallySet::Present,
        )
            .chain(),
    );
}
