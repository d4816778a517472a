use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use super::events::{
    ConfigureSession, OverlapTransition, RecomputeTally, SessionNotice, SessionStarted,
    TeardownSession,
};
use super::session::{SessionRequest, SessionSlot};
use crate::core::components::{Chip, SessionMember};
use crate::core::config::TallyConfig;
use crate::core::system::system_order::TallySet;
use crate::layout::board::BoardSpace;

/// Randomness for chip jitter. Seeded from the CLI when reproducible layouts
/// are wanted.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct SessionRng(pub StdRng);

impl Default for SessionRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SessionRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionSlot>()
            .init_resource::<SessionRng>()
            .add_event::<ConfigureSession>()
            .add_event::<TeardownSession>()
            .add_event::<RecomputeTally>()
            .add_event::<OverlapTransition>()
            .add_event::<SessionStarted>()
            .add_event::<SessionNotice>()
            .add_systems(
                Update,
                (
                    handle_session_requests.in_set(TallySet::Lifecycle),
                    (apply_overlap_transitions, recompute_from_transforms)
                        .chain()
                        .in_set(TallySet::Apply),
                ),
            );
    }
}

/// Configure wins over teardown when both arrive in the same frame; only the
/// last configure request is honoured.
pub fn handle_session_requests(
    mut commands: Commands,
    mut configure: EventReader<ConfigureSession>,
    mut teardown: EventReader<TeardownSession>,
    mut slot: ResMut<SessionSlot>,
    mut rng: ResMut<SessionRng>,
    cfg: Res<TallyConfig>,
    members: Query<Entity, With<SessionMember>>,
    mut started: EventWriter<SessionStarted>,
    mut notices: EventWriter<SessionNotice>,
) {
    let request = configure.read().last().copied();
    let torn_down = teardown.read().count() > 0;
    if request.is_none() && !torn_down {
        return;
    }
    for e in &members {
        commands.entity(e).despawn();
    }
    slot.teardown();
    let Some(req) = request else {
        return;
    };
    let found = slot.configure(
        SessionRequest {
            player_count: req.player_count,
            total_points: req.total_points,
        },
        &cfg,
        &mut rng.0,
    );
    for notice in found {
        notices.write(SessionNotice(notice));
    }
    if let Some(session) = slot.active() {
        started.write(SessionStarted {
            generation: session.generation(),
        });
    }
}

/// Applies forwarded sensor transitions. The slot is only flagged as changed
/// when some aggregate actually moved.
pub fn apply_overlap_transitions(
    mut events: EventReader<OverlapTransition>,
    mut slot: ResMut<SessionSlot>,
) {
    let mut changed = false;
    for ev in events.read() {
        changed |= slot
            .bypass_change_detection()
            .apply_transition(ev.generation, ev.zone, ev.chip, ev.entering);
    }
    if changed {
        slot.set_changed();
    }
}

pub fn recompute_from_transforms(
    mut events: EventReader<RecomputeTally>,
    mut slot: ResMut<SessionSlot>,
    cfg: Res<TallyConfig>,
    chips: Query<(&Chip, &Transform)>,
) {
    if events.read().count() == 0 {
        return;
    }
    let Some(session) = slot.active_mut() else {
        return;
    };
    let generation = session.generation();
    let space = BoardSpace::from_config(&cfg.board);
    session.recompute_all(
        chips
            .iter()
            .filter(|(chip, _)| chip.generation == generation)
            .map(|(chip, tf)| (chip.id, space.to_board(tf.translation.truncate()))),
    );
    debug!(
        target: "tally",
        "recomputed session {generation}: {} points on the board",
        session.tally().total_points()
    );
}
