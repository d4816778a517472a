//! Keyboard stand-ins for the setup panel: player count, stack total, setup,
//! reset and a forced recount.

use bevy::prelude::*;

use crate::core::config::{PlayerLimits, StackConfig, TallyConfig};
use crate::core::error::ConfigurationNotice;
use crate::core::system::system_order::TallySet;
use crate::session::events::{ConfigureSession, RecomputeTally, SessionNotice, TeardownSession};
use crate::session::session::{SessionSettings, SessionSlot};

/// Settings that the next setup will use.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSetup {
    pub player_count: u32,
    pub total_points: u32,
}

impl PendingSetup {
    pub fn from_config(cfg: &TallyConfig) -> Self {
        Self {
            player_count: cfg.players.default.clamp(cfg.players.min, cfg.players.max.max(cfg.players.min)),
            total_points: cfg.stacks.default_total,
        }
    }

    /// Moves the player count by `delta`. Refuses to leave the limits and
    /// reports why.
    pub fn step_players(
        &mut self,
        delta: i64,
        limits: &PlayerLimits,
    ) -> Result<(), ConfigurationNotice> {
        let requested = i64::from(self.player_count) + delta;
        if requested > i64::from(limits.max) {
            return Err(ConfigurationNotice::TooManyPlayers {
                requested,
                max: limits.max,
            });
        }
        if requested < i64::from(limits.min.max(1)) {
            return Err(ConfigurationNotice::TooFewPlayers {
                requested,
                min: limits.min.max(1),
            });
        }
        self.player_count = requested as u32;
        Ok(())
    }

    /// Moves the total by whole rounding steps within the allowed range.
    /// Returns whether the value changed.
    pub fn step_total(&mut self, steps: i64, stacks: &StackConfig) -> bool {
        let step = i64::from(stacks.rounding_step.max(1));
        let next = (i64::from(self.total_points) + steps * step)
            .clamp(i64::from(stacks.min_total), i64::from(stacks.max_total.max(stacks.min_total)));
        let changed = next != i64::from(self.total_points);
        self.total_points = next as u32;
        changed
    }

    pub fn request(&self) -> ConfigureSession {
        ConfigureSession {
            player_count: i64::from(self.player_count),
            total_points: Some(i64::from(self.total_points)),
        }
    }
}

impl From<SessionSettings> for PendingSetup {
    fn from(s: SessionSettings) -> Self {
        Self {
            player_count: s.player_count,
            total_points: s.total_points,
        }
    }
}

impl FromWorld for PendingSetup {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<TallyConfig>() {
            Some(cfg) => Self::from_config(cfg),
            None => Self::from_config(&TallyConfig::default()),
        }
    }
}

/// Whether a session is configured from `PendingSetup` on startup.
#[derive(Resource, Debug, Clone, Copy)]
pub struct AutoStart(pub bool);

impl Default for AutoStart {
    fn default() -> Self {
        Self(true)
    }
}

pub struct SessionControlsPlugin;

impl Plugin for SessionControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingSetup>()
            .init_resource::<AutoStart>()
            .add_systems(Startup, start_initial_session)
            .add_systems(Update, session_key_input.before(TallySet::Lifecycle));
    }
}

fn start_initial_session(
    auto: Res<AutoStart>,
    pending: Res<PendingSetup>,
    mut configure: EventWriter<ConfigureSession>,
) {
    if auto.0 {
        configure.write(pending.request());
    }
}

pub fn session_key_input(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<TallyConfig>,
    slot: Res<SessionSlot>,
    mut pending: ResMut<PendingSetup>,
    mut configure: EventWriter<ConfigureSession>,
    mut teardown: EventWriter<TeardownSession>,
    mut recompute: EventWriter<RecomputeTally>,
    mut notices: EventWriter<SessionNotice>,
) {
    let mut dirty = false;
    let mut step = 0;
    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        step += 1;
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        step -= 1;
    }
    if step != 0 {
        match pending.step_players(step, &cfg.players) {
            Ok(()) => dirty = true,
            Err(notice) => {
                warn!(target: "session", "{notice}");
                notices.write(SessionNotice(notice));
            }
        }
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        dirty |= pending.step_total(1, &cfg.stacks);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        dirty |= pending.step_total(-1, &cfg.stacks);
    }
    if dirty {
        info!(
            target: "session",
            "pending setup: {} players, {} points",
            pending.player_count, pending.total_points
        );
        // Edited settings invalidate the board on screen.
        if slot.active().is_some() {
            teardown.write(TeardownSession);
        }
    }

    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        configure.write(pending.request());
    } else if keys.just_pressed(KeyCode::KeyR) {
        if let Some(session) = slot.active() {
            let settings = PendingSetup::from(session.settings());
            configure.write(settings.request());
        }
    }
    if keys.just_pressed(KeyCode::KeyT) {
        recompute.write(RecomputeTally);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_steps_stop_at_the_limits() {
        let limits = PlayerLimits::default();
        let mut p = PendingSetup { player_count: 16, total_points: 100 };
        assert_eq!(
            p.step_players(1, &limits),
            Err(ConfigurationNotice::TooManyPlayers { requested: 17, max: 16 })
        );
        assert_eq!(p.player_count, 16);
        p.player_count = 1;
        assert!(p.step_players(-1, &limits).is_err());
        assert_eq!(p.step_players(1, &limits), Ok(()));
        assert_eq!(p.player_count, 2);
    }

    #[test]
    fn total_steps_by_rounding_step_and_clamps() {
        let stacks = StackConfig::default();
        let mut p = PendingSetup { player_count: 4, total_points: 100 };
        assert!(!p.step_total(-1, &stacks));
        assert!(p.step_total(1, &stacks));
        assert_eq!(p.total_points, 200);
        p.total_points = 10_000;
        assert!(!p.step_total(1, &stacks));
    }
}
