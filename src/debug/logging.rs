#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use crate::session::session::{GameSession, SessionSlot};

/// One line per session: every counted zone, the board total and whether the
/// running aggregates still match the memberships.
#[cfg(feature = "debug")]
pub fn tally_log_line(session: &GameSession) -> String {
    let zones: Vec<String> = session
        .tally()
        .aggregates()
        .map(|(id, a)| format!("{id}={}/{}", a.point_total, a.chip_count))
        .collect();
    format!(
        "TALLY gen={} total={} audit={} {}",
        session.generation(),
        session.tally().total_points(),
        if session.tally().audit() { "ok" } else { "MISMATCH" },
        zones.join(" ")
    )
}

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, slot: Res<SessionSlot>) {
    state.frame_counter += 1;
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let Some(session) = slot.active() else {
        return;
    };
    let audit_ok = session.tally().audit();
    if !audit_ok && state.last_audit_ok {
        warn!(target: "tally", "aggregates drifted from memberships (frame {})", state.frame_counter);
    }
    state.last_audit_ok = audit_ok;
    info!(target: "tally", "{}", tally_log_line(session));
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;
    use crate::core::config::TallyConfig;
    use crate::session::session::SessionSettings;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn log_line_lists_counted_zones() {
        let session = GameSession::build(
            3,
            SessionSettings { player_count: 2, total_points: 100 },
            &TallyConfig::default(),
            &mut StdRng::seed_from_u64(1),
        );
        let line = tally_log_line(&session);
        assert_eq!(
            line,
            "TALLY gen=3 total=400 audit=ok player-0=100/21 player-1=100/21 bank=200/39"
        );
    }
}
