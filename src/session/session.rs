// This file is part of Chip Tally.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! One configured board: its zones, its chips and their running tally.
//!
//! A session is built from scratch and never edited in place. Reconfiguring
//! means dropping the old session and building a new one under a fresh
//! generation number, so anything still carrying the old generation is stale.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::Rng;
use serde::Serialize;
use std::iter;

use crate::core::config::{PlayerLimits, StackConfig, TallyConfig};
use crate::core::error::ConfigurationNotice;
use crate::layout::packer::{interior_capacity, pack, PackingParams};
use crate::layout::zones::{build_zones, Zone, ZoneId, ZoneKind};
use crate::tally::denomination::{descending, scaled_counts, StackCounts};
use crate::tally::membership::{ChipId, MembershipEngine, ZoneAggregate};

/// Raw settings as typed by a user. `total_points: None` means the input was
/// not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRequest {
    pub player_count: i64,
    pub total_points: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSettings {
    pub player_count: u32,
    pub total_points: u32,
}

impl From<SessionSettings> for SessionRequest {
    fn from(s: SessionSettings) -> Self {
        Self {
            player_count: i64::from(s.player_count),
            total_points: Some(i64::from(s.total_points)),
        }
    }
}

pub fn sanitize_player_count(
    requested: i64,
    limits: &PlayerLimits,
) -> (u32, Option<ConfigurationNotice>) {
    let min = limits.min.max(1);
    let max = limits.max.max(min);
    if requested > i64::from(max) {
        (max, Some(ConfigurationNotice::TooManyPlayers { requested, max }))
    } else if requested < i64::from(min) {
        (min, Some(ConfigurationNotice::TooFewPlayers { requested, min }))
    } else {
        (requested as u32, None)
    }
}

/// Clamps to `min_total..=max_total` and rounds half-up to the nearest
/// `rounding_step`.
pub fn sanitize_total_points(
    requested: Option<i64>,
    stacks: &StackConfig,
) -> (u32, Option<ConfigurationNotice>) {
    let step = u64::from(stacks.rounding_step.max(1));
    let min = u64::from(stacks.min_total);
    let max = u64::from(stacks.max_total).max(min);
    let numeric = requested.unwrap_or(i64::from(stacks.default_total));
    let clamped = numeric.clamp(min as i64, max as i64) as u64;
    let mut applied = (clamped + step / 2) / step * step;
    if applied < min {
        applied += step;
    }
    if applied > max && applied >= step {
        applied -= step;
    }
    let applied = applied as u32;
    let notice = match requested {
        None => Some(ConfigurationNotice::TotalMalformed { applied }),
        Some(r) if r != i64::from(applied) => Some(ConfigurationNotice::TotalAdjusted {
            requested: r,
            applied,
        }),
        Some(_) => None,
    };
    (applied, notice)
}

pub fn sanitize(
    request: SessionRequest,
    cfg: &TallyConfig,
) -> (SessionSettings, Vec<ConfigurationNotice>) {
    let (player_count, players_notice) = sanitize_player_count(request.player_count, &cfg.players);
    let (total_points, total_notice) = sanitize_total_points(request.total_points, &cfg.stacks);
    let notices = players_notice.into_iter().chain(total_notice).collect();
    (
        SessionSettings {
            player_count,
            total_points,
        },
        notices,
    )
}

/// Where one chip starts, in board coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipSpawn {
    pub id: ChipId,
    pub value: u32,
    pub zone: ZoneId,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub id: ZoneId,
    pub name: String,
    pub kind: ZoneKind,
    /// `None` for zones that are not counted (the pot).
    pub aggregate: Option<ZoneAggregate>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    generation: u64,
    settings: SessionSettings,
    player_counts: StackCounts,
    bank_counts: StackCounts,
    zones: Vec<Zone>,
    chips: Vec<ChipSpawn>,
    tally: MembershipEngine,
    layout_notices: Vec<ConfigurationNotice>,
}

impl GameSession {
    /// Lays out zones and chips for `settings` (already sanitized) and runs the
    /// initial full recount against the spawn positions.
    pub fn build<R: Rng + ?Sized>(
        generation: u64,
        settings: SessionSettings,
        cfg: &TallyConfig,
        rng: &mut R,
    ) -> Self {
        let stacks = &cfg.stacks;
        let zones = build_zones(settings.player_count, &cfg.zones, cfg.board.width);
        let player_counts = scaled_counts(
            &stacks.denominations,
            &stacks.player_template,
            settings.total_points,
        );
        if player_counts.total != settings.total_points {
            warn!(
                target: "session",
                "player stack rounds to {} points instead of {}",
                player_counts.total, settings.total_points
            );
        }
        let bank_counts = StackCounts::from_template(&stacks.denominations, &stacks.bank_template);

        let params = PackingParams::from_config(&cfg.chips);
        let order = descending(&stacks.denominations);
        let mut chips: Vec<ChipSpawn> = Vec::new();
        let mut layout_notices = Vec::new();
        for zone in &zones {
            let (counts, area) = match zone.kind() {
                ZoneKind::Player => (&player_counts, "each player area"),
                ZoneKind::Bank => (&bank_counts, "the bank"),
                ZoneKind::Pot => continue,
            };
            let total = counts.chip_count() as usize;
            let capacity = interior_capacity(zone.size, &params);
            // Player areas share one size, so the first crowded one speaks for all.
            if total > capacity && zone.index().map_or(true, |i| i == 0) {
                layout_notices.push(ConfigurationNotice::CrowdedZone {
                    area: area.to_string(),
                    chips: total as u32,
                    capacity: capacity as u32,
                });
            }
            let offsets = pack(zone.size, total, &params, rng);
            let values = order
                .iter()
                .flat_map(|d| iter::repeat(d.value).take(counts.get(d.value) as usize));
            for (value, offset) in values.zip(offsets) {
                chips.push(ChipSpawn {
                    id: ChipId(chips.len() as u32),
                    value,
                    zone: zone.id,
                    position: zone.center + offset,
                });
            }
        }

        let mut tally = MembershipEngine::new(&zones, chips.iter().map(|c| (c.id, c.value)));
        tally.recompute_all(chips.iter().map(|c| (c.id, c.position)));
        debug!(
            target: "session",
            "session {generation}: {} zones, {} chips, {} points on the board",
            zones.len(),
            chips.len(),
            tally.total_points()
        );

        Self {
            generation,
            settings,
            player_counts,
            bank_counts,
            zones,
            chips,
            tally,
            layout_notices,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Zones too small for their starting stack.
    pub fn layout_notices(&self) -> &[ConfigurationNotice] {
        &self.layout_notices
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn chips(&self) -> &[ChipSpawn] {
        &self.chips
    }

    pub fn player_counts(&self) -> &StackCounts {
        &self.player_counts
    }

    pub fn bank_counts(&self) -> &StackCounts {
        &self.bank_counts
    }

    pub fn tally(&self) -> &MembershipEngine {
        &self.tally
    }

    pub fn on_overlap_transition(&mut self, zone: ZoneId, chip: ChipId, entering: bool) -> bool {
        self.tally.on_overlap_transition(zone, chip, entering)
    }

    pub fn recompute_all(&mut self, positions: impl IntoIterator<Item = (ChipId, Vec2)>) {
        self.tally.recompute_all(positions);
    }

    /// Every zone with its display name and, when counted, its aggregate.
    pub fn zone_reports(&self) -> Vec<ZoneReport> {
        self.zones
            .iter()
            .map(|z| ZoneReport {
                id: z.id,
                name: z.display_name.clone(),
                kind: z.kind(),
                aggregate: self.tally.aggregate(z.id),
            })
            .collect()
    }
}

/// Holds the single active session, if any.
#[derive(Resource, Debug, Default)]
pub struct SessionSlot {
    active: Option<GameSession>,
    generation: u64,
}

impl SessionSlot {
    /// Tears down the current session and builds a new one from `request`.
    /// Returns the notices for any setting that had to be adjusted.
    pub fn configure<R: Rng + ?Sized>(
        &mut self,
        request: SessionRequest,
        cfg: &TallyConfig,
        rng: &mut R,
    ) -> Vec<ConfigurationNotice> {
        self.teardown();
        let (settings, mut notices) = sanitize(request, cfg);
        self.generation += 1;
        let session = GameSession::build(self.generation, settings, cfg, rng);
        notices.extend_from_slice(session.layout_notices());
        for notice in &notices {
            warn!(target: "session", "{notice}");
        }
        info!(
            target: "session",
            "session {} ready: {} players, {} points each",
            session.generation(),
            settings.player_count,
            settings.total_points
        );
        self.active = Some(session);
        notices
    }

    pub fn teardown(&mut self) -> Option<GameSession> {
        let old = self.active.take();
        if let Some(s) = &old {
            info!(target: "session", "session {} torn down", s.generation());
        }
        old
    }

    pub fn active(&self) -> Option<&GameSession> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut GameSession> {
        self.active.as_mut()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| s.generation() == generation)
    }

    /// Forwards a transition to the active session if it belongs to it.
    pub fn apply_transition(
        &mut self,
        generation: u64,
        zone: ZoneId,
        chip: ChipId,
        entering: bool,
    ) -> bool {
        match self.active.as_mut() {
            Some(s) if s.generation() == generation => s.on_overlap_transition(zone, chip, entering),
            _ => false,
        }
    }
}
