pub mod board;
pub mod camera;
pub mod hud;
pub mod labels;
pub mod palette;

use bevy::prelude::*;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            camera::camera::CameraPlugin,
            board::board_visuals::BoardVisualsPlugin,
            hud::legend::LegendPlugin,
        ));
    }
}
