use bevy::prelude::*;
use bevy::render::camera::{OrthographicProjection, Projection, ScalingMode};

use crate::core::config::TallyConfig;
use crate::rendering::palette::palette::hex_color;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_board_config);
    }
}

#[derive(Component)]
pub struct BoardCamera;

fn board_projection(cfg: &TallyConfig) -> Projection {
    // Frame the board plus its walls whatever the window aspect.
    let margin = cfg.board.wall_thickness * 2.0;
    Projection::from(OrthographicProjection {
        scaling_mode: ScalingMode::AutoMin {
            min_width: cfg.board.width + margin,
            min_height: cfg.board.height + margin,
        },
        ..OrthographicProjection::default_2d()
    })
}

fn setup_camera(mut commands: Commands, cfg: Res<TallyConfig>) {
    commands.insert_resource(ClearColor(hex_color(&cfg.board.background)));
    commands.spawn((Camera2d, board_projection(&cfg), BoardCamera));
}

fn follow_board_config(
    cfg: Res<TallyConfig>,
    mut clear: ResMut<ClearColor>,
    mut q: Query<&mut Projection, With<BoardCamera>>,
) {
    if !cfg.is_changed() {
        return;
    }
    clear.0 = hex_color(&cfg.board.background);
    for mut projection in &mut q {
        *projection = board_projection(&cfg);
    }
}
