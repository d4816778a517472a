use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Chip, ChipRadius};
use crate::core::config::{DragConfig, TallyConfig};
use crate::core::system::system_order::PrePhysicsSet;

pub struct InputInteractionPlugin;

impl Plugin for InputInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveDrag::default()).add_systems(
            Update,
            (begin_or_end_drag, apply_drag_force.in_set(PrePhysicsSet)).chain(),
        );
    }
}

#[derive(Resource, Default, Debug)]
pub struct ActiveDrag {
    pub entity: Option<Entity>,
}

fn cursor_world_pos(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter().next() {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}

/// Nearest chip whose grab circle contains `pointer`.
pub fn pick_chip(
    pointer: Vec2,
    drag_cfg: &DragConfig,
    chips: impl IntoIterator<Item = (Entity, Vec2, f32)>,
) -> Option<Entity> {
    let mut nearest: Option<(Entity, f32)> = None;
    for (e, pos, radius) in chips {
        let d2 = pos.distance_squared(pointer);
        let grab_r = drag_cfg.grab_radius.max(radius);
        if d2 > grab_r * grab_r {
            continue;
        }
        if nearest.map_or(true, |(_, best)| d2 < best) {
            nearest = Some((e, d2));
        }
    }
    nearest.map(|(e, _)| e)
}

fn begin_or_end_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut active: ResMut<ActiveDrag>,
    mut q: Query<(Entity, &Transform, &ChipRadius, &mut Velocity), With<Chip>>,
    cfg: Res<TallyConfig>,
) {
    let drag_cfg = &cfg.drag;
    if !drag_cfg.enabled {
        return;
    }
    let released =
        buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some();
    if released {
        // Dropped chips stay where they were let go.
        if let Some(e) = active.entity.take() {
            if let Ok((_, _, _, mut vel)) = q.get_mut(e) {
                vel.linvel = Vec2::ZERO;
                vel.angvel = 0.0;
            }
        }
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    if active.entity.is_none()
        && (buttons.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some())
    {
        active.entity = pick_chip(
            world_pos,
            drag_cfg,
            q.iter().map(|(e, tf, r, _)| (e, tf.translation.truncate(), r.0)),
        );
    }
}

/// Velocity that pulls a chip toward `target`, capped at `max_speed`.
pub fn drag_velocity(pos: Vec2, target: Vec2, drag_cfg: &DragConfig) -> Vec2 {
    let v = (target - pos) * drag_cfg.pull_strength;
    if drag_cfg.max_speed > 0.0 {
        v.clamp_length_max(drag_cfg.max_speed)
    } else {
        v
    }
}

fn apply_drag_force(
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut active: ResMut<ActiveDrag>,
    mut q: Query<(&Transform, &mut Velocity), With<Chip>>,
    cfg: Res<TallyConfig>,
) {
    let drag_cfg = &cfg.drag;
    if !drag_cfg.enabled {
        return;
    }
    let Some(active_entity) = active.entity else {
        return;
    };
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    if let Ok((tf, mut vel)) = q.get_mut(active_entity) {
        vel.linvel = drag_velocity(tf.translation.truncate(), world_pos, drag_cfg);
        vel.angvel = 0.0;
    } else {
        // Chip went away with its session.
        active.entity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_nearest_chip_within_grab_radius() {
        let cfg = DragConfig::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let chips = [(a, Vec2::new(0.0, 0.0), 16.0), (b, Vec2::new(20.0, 0.0), 16.0)];
        assert_eq!(pick_chip(Vec2::new(12.0, 0.0), &cfg, chips), Some(b));
        assert_eq!(pick_chip(Vec2::new(-3.0, 1.0), &cfg, chips), Some(a));
        assert_eq!(pick_chip(Vec2::new(200.0, 0.0), &cfg, chips), None);
    }

    #[test]
    fn release_drops_the_chip_where_it_is() {
        use crate::tally::membership::ChipId;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TallyConfig::default())
            .insert_resource(Touches::default())
            .init_resource::<ActiveDrag>()
            .add_systems(Update, begin_or_end_drag);
        let chip = app
            .world_mut()
            .spawn((
                Chip { id: ChipId(0), value: 5, generation: 1 },
                ChipRadius(16.0),
                Transform::default(),
                Velocity::linear(Vec2::new(300.0, -40.0)),
            ))
            .id();
        app.world_mut().resource_mut::<ActiveDrag>().entity = Some(chip);
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);
        app.insert_resource(buttons);

        app.update();

        assert_eq!(app.world().resource::<ActiveDrag>().entity, None);
        let vel = app.world().get::<Velocity>(chip).unwrap();
        assert_eq!(vel.linvel, Vec2::ZERO);
        assert_eq!(vel.angvel, 0.0);
    }

    #[test]
    fn drag_velocity_is_capped() {
        let cfg = DragConfig::default();
        let v = drag_velocity(Vec2::ZERO, Vec2::new(10.0, 0.0), &cfg);
        assert_eq!(v, Vec2::new(10.0 * cfg.pull_strength, 0.0));
        let far = drag_velocity(Vec2::ZERO, Vec2::new(1.0e6, 0.0), &cfg);
        assert!((far.length() - cfg.max_speed).abs() < 1e-2);
    }
}
