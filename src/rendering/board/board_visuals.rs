use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::components::{Chip, ChipDiscVisual, ChipRadius, ZoneSensor};
use crate::core::config::TallyConfig;
use crate::core::system::system_order::TallySet;
use crate::layout::zones::{ZoneId, ZoneKind};
use crate::rendering::labels::zone_count_text;
use crate::rendering::palette::palette::{hex_color, readable_text_color, with_alpha};
use crate::session::session::SessionSlot;

pub struct BoardVisualsPlugin;

impl Plugin for BoardVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChipMaterials>()
            .add_systems(Startup, setup_chip_mesh)
            .add_systems(
                Update,
                (
                    (attach_zone_visuals, attach_chip_visuals),
                    refresh_zone_labels,
                )
                    .chain()
                    .in_set(TallySet::Present),
            );
    }
}

#[derive(Resource)]
pub struct ChipMesh(pub Handle<Mesh>);

/// One material per chip color, created on first use.
#[derive(Resource, Default)]
pub struct ChipMaterials(HashMap<u32, Handle<ColorMaterial>>);

#[derive(Component, Debug, Copy, Clone)]
pub struct ZoneCountLabel(pub ZoneId);

const LABEL_FONT: f32 = 18.0;
const CHIP_FONT: f32 = 13.0;

fn setup_chip_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let circle = Mesh::from(Circle { radius: 0.5 });
    commands.insert_resource(ChipMesh(meshes.add(circle)));
}

fn zone_alpha(kind: ZoneKind, cfg: &TallyConfig) -> f32 {
    match kind {
        ZoneKind::Player => cfg.zones.player_alpha,
        ZoneKind::Bank => cfg.zones.bank_alpha,
        ZoneKind::Pot => cfg.zones.pot_alpha,
    }
}

fn attach_zone_visuals(
    mut commands: Commands,
    cfg: Res<TallyConfig>,
    slot: Res<SessionSlot>,
    zones: Query<(Entity, &ZoneSensor), Added<ZoneSensor>>,
) {
    let Some(session) = slot.active() else {
        return;
    };
    for (entity, sensor) in &zones {
        let Some(zone) = session.zone(sensor.id) else {
            continue;
        };
        let fill = with_alpha(&zone.color, zone_alpha(zone.kind(), &cfg));
        let label_y = zone.size.y * 0.5 - LABEL_FONT;
        let count = zone_count_text(session.tally().aggregate(zone.id));
        commands
            .entity(entity)
            .insert((Sprite::from_color(fill, zone.size), Visibility::default()))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(zone.display_name.clone()),
                    TextFont {
                        font_size: LABEL_FONT,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, label_y, 1.0),
                ));
                parent.spawn((
                    Text2d::new(count),
                    TextFont {
                        font_size: LABEL_FONT * 0.8,
                        ..default()
                    },
                    TextColor(hex_color(&zone.color).mix(&Color::WHITE, 0.6)),
                    Transform::from_xyz(0.0, label_y - LABEL_FONT * 1.1, 1.0),
                    ZoneCountLabel(zone.id),
                ));
            });
    }
}

fn attach_chip_visuals(
    mut commands: Commands,
    cfg: Res<TallyConfig>,
    mesh: Option<Res<ChipMesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut cache: ResMut<ChipMaterials>,
    chips: Query<(Entity, &Chip, &ChipRadius), Added<Chip>>,
) {
    let Some(mesh) = mesh else {
        return;
    };
    if cfg.is_changed() {
        cache.0.clear();
    }
    for (entity, chip, radius) in &chips {
        let color = cfg
            .stacks
            .denominations
            .iter()
            .find(|d| d.value == chip.value)
            .map(|d| d.color.as_str())
            .unwrap_or("#ffffff");
        let material = cache
            .0
            .entry(chip.value)
            .or_insert_with(|| materials.add(hex_color(color)))
            .clone();
        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_children(|parent| {
                parent.spawn((
                    Mesh2d(mesh.0.clone()),
                    MeshMaterial2d(material),
                    Transform::from_scale(Vec3::splat(radius.0 * 2.0)),
                    ChipDiscVisual,
                ));
                parent.spawn((
                    Text2d::new(chip.value.to_string()),
                    TextFont {
                        font_size: CHIP_FONT,
                        ..default()
                    },
                    TextColor(readable_text_color(color)),
                    Transform::from_xyz(0.0, 0.0, 0.5),
                ));
            });
    }
}

/// Rewrites count labels whenever the session slot reports a change.
pub fn refresh_zone_labels(
    slot: Res<SessionSlot>,
    mut labels: Query<(&ZoneCountLabel, &mut Text2d)>,
) {
    if !slot.is_changed() {
        return;
    }
    let Some(session) = slot.active() else {
        return;
    };
    for (label, mut text) in &mut labels {
        let next = zone_count_text(session.tally().aggregate(label.0));
        if text.0 != next {
            text.0 = next;
        }
    }
}
