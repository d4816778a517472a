use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::render::DebugRenderContext;

use crate::core::config::TallyConfig;
use crate::layout::board::BoardSpace;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier & the board walls

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(50.0))
            .add_plugins(RapierDebugRenderPlugin {
                enabled: false,
                ..default()
            })
            .add_systems(Startup, spawn_board_walls)
            .add_systems(Update, (configure_gravity, sync_debug_render));
    }
}

#[derive(Component, Debug)]
pub struct BoardWall;

// The Rapier context entity shows up after the plugin's own startup, so keep
// re-asserting zero gravity until it exists.
fn configure_gravity(mut rapier_cfg: Query<&mut RapierConfiguration>) {
    for mut c in &mut rapier_cfg {
        if c.gravity != Vect::ZERO {
            c.gravity = Vect::ZERO;
        }
    }
}

fn sync_debug_render(cfg: Res<TallyConfig>, ctx: Option<ResMut<DebugRenderContext>>) {
    if let Some(mut c) = ctx {
        if c.enabled != cfg.rapier_debug {
            c.enabled = cfg.rapier_debug;
        }
    }
}

const WALL_NAME: [&str; 4] = ["WallTop", "WallBottom", "WallLeft", "WallRight"];

/// Four fixed cuboids hugging the board from the outside.
pub fn board_wall_layout(space: &BoardSpace, thickness: f32) -> [(Vec2, Vec2); 4] {
    let half = space.size * 0.5;
    let t = thickness.max(1.0);
    let horizontal = Vec2::new(half.x + 2.0 * t, t * 0.5);
    let vertical = Vec2::new(t * 0.5, half.y + 2.0 * t);
    [
        (Vec2::new(0.0, half.y + t * 0.5), horizontal),
        (Vec2::new(0.0, -half.y - t * 0.5), horizontal),
        (Vec2::new(-half.x - t * 0.5, 0.0), vertical),
        (Vec2::new(half.x + t * 0.5, 0.0), vertical),
    ]
}

pub fn spawn_board_walls(mut commands: Commands, cfg: Res<TallyConfig>) {
    let space = BoardSpace::from_config(&cfg.board);
    for (index, (center, half_extents)) in board_wall_layout(&space, cfg.board.wall_thickness)
        .into_iter()
        .enumerate()
    {
        commands.spawn((
            Name::new(WALL_NAME[index]),
            BoardWall,
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
            Friction::coefficient(cfg.chips.friction),
            Transform::from_translation(center.extend(0.0)),
            GlobalTransform::default(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_sit_just_outside_the_board() {
        let space = BoardSpace::new(960.0, 1400.0);
        let walls = board_wall_layout(&space, 40.0);
        let (top, top_half) = walls[0];
        assert_eq!(top.y - top_half.y, 700.0);
        let (right, right_half) = walls[3];
        assert_eq!(right.x - right_half.x, 480.0);
        // Horizontal walls overlap the corners so nothing leaks diagonally.
        assert!(top_half.x > 480.0 + 40.0);
    }
}
