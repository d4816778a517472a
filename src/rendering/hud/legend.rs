use bevy::prelude::*;

use crate::core::config::TallyConfig;
use crate::interaction::session::controls::PendingSetup;
use crate::rendering::labels::{controls_hint, stack_breakdown};
use crate::session::events::SessionNotice;
use crate::session::session::SessionSlot;
use crate::tally::denomination::{scaled_counts, StackCounts};

pub struct LegendPlugin;

impl Plugin for LegendPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LastNotice>()
            .add_systems(Startup, spawn_legend)
            .add_systems(Update, (record_notices, update_legend).chain());
    }
}

#[derive(Component)]
struct LegendText;

/// Most recent adjustment message, shown until the next one.
#[derive(Resource, Default, Debug)]
pub struct LastNotice(pub Option<String>);

fn spawn_legend(mut commands: Commands) {
    commands.spawn((
        Text::new(String::new()),
        TextFont {
            font_size: 14.0,
            ..Default::default()
        },
        TextColor(Color::srgb(0.9, 0.95, 0.9)),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            top: Val::Px(6.0),
            left: Val::Px(8.0),
            ..Default::default()
        },
        LegendText,
    ));
}

fn record_notices(mut events: EventReader<SessionNotice>, mut last: ResMut<LastNotice>) {
    if let Some(SessionNotice(n)) = events.read().last() {
        last.0 = Some(n.to_string());
    }
}

fn update_legend(
    cfg: Res<TallyConfig>,
    pending: Res<PendingSetup>,
    slot: Res<SessionSlot>,
    last: Res<LastNotice>,
    mut q: Query<&mut Text, With<LegendText>>,
) {
    if !(cfg.is_changed() || pending.is_changed() || slot.is_changed() || last.is_changed()) {
        return;
    }
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    let stacks = &cfg.stacks;
    let player = scaled_counts(&stacks.denominations, &stacks.player_template, pending.total_points);
    let bank = StackCounts::from_template(&stacks.denominations, &stacks.bank_template);

    let mut lines = vec![format!(
        "Next setup: {} players x {} pts",
        pending.player_count, pending.total_points
    )];
    lines.extend(stack_breakdown(&stacks.denominations, &player, &bank));
    match slot.active() {
        Some(s) => lines.push(format!(
            "Session {}: {} pts on the board",
            s.generation(),
            s.tally().total_points()
        )),
        None => lines.push("No session (Enter to set up)".to_string()),
    }
    if let Some(n) = &last.0 {
        lines.push(n.clone());
    }
    lines.push(controls_hint().to_string());
    text.0 = lines.join("\n");
}
