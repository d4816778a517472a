use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;
use chip_tally::core::config::TallyConfig;
use chip_tally::layout::zones::ZoneId;
use chip_tally::session::{ConfigureSession, SessionRng};
use chip_tally::{Chip, SessionSlot, TallyCorePlugin, ZoneSensor};

/// Headless app with the session core; collisions are injected by hand.
pub fn tally_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TallyConfig::default())
        .insert_resource(SessionRng::seeded(7))
        .add_event::<CollisionEvent>()
        .add_plugins(TallyCorePlugin);
    app
}

pub fn configure(app: &mut App, players: i64, points: i64) {
    app.world_mut().send_event(ConfigureSession {
        player_count: players,
        total_points: Some(points),
    });
    app.update();
}

pub fn sensor_entity(app: &mut App, zone: ZoneId) -> Entity {
    let mut q = app.world_mut().query::<(Entity, &ZoneSensor)>();
    q.iter(app.world())
        .find(|(_, s)| s.id == zone)
        .map(|(e, _)| e)
        .expect("zone sensor spawned")
}

pub fn chips(app: &mut App) -> Vec<(Entity, Chip)> {
    let mut q = app.world_mut().query::<(Entity, &Chip)>();
    let mut out: Vec<(Entity, Chip)> = q.iter(app.world()).map(|(e, c)| (e, *c)).collect();
    out.sort_by_key(|(_, c)| c.id);
    out
}

pub fn points(app: &App, zone: ZoneId) -> Option<u32> {
    app.world()
        .resource::<SessionSlot>()
        .active()
        .and_then(|s| s.tally().aggregate(zone))
        .map(|a| a.point_total)
}
