//! Zone registry: where the player ring, the pot and the bank sit on the board.
//!
//! All geometry is in board pixels, y pointing down, origin at the top-left.

use bevy::math::Vec2;
use serde::{Serialize, Serializer};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;

use crate::core::config::ZoneLayoutConfig;

/// Stable identifier of a zone within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZoneId {
    Player(u32),
    Bank,
    Pot,
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Player(i) => write!(f, "player-{i}"),
            ZoneId::Bank => f.write_str("bank"),
            ZoneId::Pot => f.write_str("pot"),
        }
    }
}

impl Serialize for ZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Player,
    Pot,
    Bank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub center: Vec2,
    pub size: Vec2,
    pub display_name: String,
    pub color: String,
}

impl Zone {
    pub fn kind(&self) -> ZoneKind {
        match self.id {
            ZoneId::Player(_) => ZoneKind::Player,
            ZoneId::Bank => ZoneKind::Bank,
            ZoneId::Pot => ZoneKind::Pot,
        }
    }

    pub fn index(&self) -> Option<u32> {
        match self.id {
            ZoneId::Player(i) => Some(i),
            _ => None,
        }
    }

    /// Pot zones are display-only and never aggregated.
    pub fn is_countable(&self) -> bool {
        !matches!(self.kind(), ZoneKind::Pot)
    }

    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Closed rectangle test on a point (a chip center).
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        let half = self.half_size();
        d.x <= half.x && d.y <= half.y
    }
}

/// Seat centers on the ring, clockwise from the top.
fn seat_centers(player_count: u32, layout: &ZoneLayoutConfig, ring_center: Vec2) -> Vec<Vec2> {
    let n = player_count.max(1);
    (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32 - FRAC_PI_2;
            ring_center + layout.ring_radius * Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Footprint of one player area for `player_count` seats.
///
/// The inverse-count heuristic is clamped to `scale_min..=scale_max`. With
/// `prevent_overlap`, the footprint is then shrunk to the largest size at which
/// every pair of seats stays `zone_gap` apart along at least one axis. Two
/// axis-aligned rectangles of equal size are disjoint exactly when that holds.
pub fn player_area_size(player_count: u32, layout: &ZoneLayoutConfig) -> Vec2 {
    let n = player_count.max(1);
    let scale = (layout.scale_divisor / n as f32)
        .min(layout.scale_max)
        .max(layout.scale_min);
    let size = Vec2::new(layout.area_width, layout.area_height) * scale;
    if !layout.prevent_overlap || n < 2 || size.min_element() <= 0.0 {
        return size;
    }
    let seats = seat_centers(n, layout, Vec2::ZERO);
    let mut fit = 1.0_f32;
    for (i, a) in seats.iter().enumerate() {
        for b in &seats[i + 1..] {
            let d = (*a - *b).abs() - Vec2::splat(layout.zone_gap);
            fit = fit.min((d / size).max_element());
        }
    }
    size * fit.max(0.0)
}

/// Builds every zone for a session: the players clockwise from the top, then
/// the pot, then the bank.
pub fn build_zones(player_count: u32, layout: &ZoneLayoutConfig, board_width: f32) -> Vec<Zone> {
    let n = player_count.max(1);
    let ring_center = Vec2::new(board_width * 0.5, layout.ring_center_y);
    let player_size = player_area_size(n, layout);
    let mut zones = Vec::with_capacity(n as usize + 2);

    for (i, center) in (0..n).zip(seat_centers(n, layout, ring_center)) {
        let color = if layout.player_colors.is_empty() {
            "#ffffff".to_string()
        } else {
            layout.player_colors[i as usize % layout.player_colors.len()].clone()
        };
        zones.push(Zone {
            id: ZoneId::Player(i),
            center,
            size: player_size,
            display_name: format!("Player {}", i + 1),
            color,
        });
    }

    zones.push(Zone {
        id: ZoneId::Pot,
        center: ring_center,
        size: Vec2::splat(layout.pot_size),
        display_name: "Center Pot".into(),
        color: layout.pot_color.clone(),
    });

    zones.push(Zone {
        id: ZoneId::Bank,
        center: Vec2::new(board_width * 0.5, layout.bank_center_y),
        size: Vec2::new(
            layout.area_width * layout.bank_width_factor,
            layout.area_height * layout.bank_height_factor,
        ),
        display_name: "Bank".into(),
        color: layout.bank_color.clone(),
    });

    zones
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    fn rects_intersect(a: &Zone, b: &Zone) -> bool {
        let d = (a.center - b.center).abs();
        let reach = a.half_size() + b.half_size();
        d.x < reach.x && d.y < reach.y
    }

    #[test]
    fn four_players_sit_on_the_compass_points() {
        let layout = ZoneLayoutConfig::default();
        let zones = build_zones(4, &layout, 960.0);
        assert_eq!(zones.len(), 6);
        assert!(approx(zones[0].center, Vec2::new(480.0, 180.0)));
        assert!(approx(zones[1].center, Vec2::new(840.0, 540.0)));
        assert!(approx(zones[2].center, Vec2::new(480.0, 900.0)));
        assert!(approx(zones[3].center, Vec2::new(120.0, 540.0)));
        assert!(approx(zones[0].size, Vec2::new(312.0, 240.0)));
        assert_eq!(zones[4].id, ZoneId::Pot);
        assert_eq!(zones[5].id, ZoneId::Bank);
        assert!(approx(zones[5].size, Vec2::new(416.0, 220.0)));
        assert!(approx(zones[5].center, Vec2::new(480.0, 1200.0)));
    }

    #[test]
    fn player_zones_never_overlap_across_supported_counts() {
        let layout = ZoneLayoutConfig::default();
        for n in 1..=16 {
            let zones = build_zones(n, &layout, 960.0);
            let players: Vec<&Zone> = zones.iter().filter(|z| z.kind() == ZoneKind::Player).collect();
            assert_eq!(players.len(), n as usize);
            for (i, a) in players.iter().enumerate() {
                for b in &players[i + 1..] {
                    assert!(!rects_intersect(a, b), "{n} players: {} overlaps {}", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn sixteen_seats_keep_room_for_a_default_stack() {
        let layout = ZoneLayoutConfig::default();
        let size = player_area_size(16, &layout);
        // Neighbouring top seats are ~137.8 px apart horizontally.
        assert!((size.x - 112.8).abs() < 0.5, "{size:?}");
        assert!((size.y - 86.8).abs() < 0.5, "{size:?}");
        assert!((size.x / size.y - layout.area_width / layout.area_height).abs() < 1e-4);
    }

    #[test]
    fn heuristic_alone_overlaps_at_sixteen() {
        let layout = ZoneLayoutConfig {
            prevent_overlap: false,
            ..Default::default()
        };
        let zones = build_zones(16, &layout, 960.0);
        assert!(rects_intersect(&zones[0], &zones[1]));
    }

    #[test]
    fn more_players_means_smaller_areas() {
        let layout = ZoneLayoutConfig::default();
        let mut last = f32::INFINITY;
        for n in [1, 4, 6, 8, 12, 16] {
            let w = player_area_size(n, &layout).x;
            assert!(w <= last, "{n}: {w} > {last}");
            last = w;
        }
    }

    #[test]
    fn only_pot_is_uncounted() {
        let zones = build_zones(3, &ZoneLayoutConfig::default(), 960.0);
        let uncounted: Vec<ZoneId> = zones.iter().filter(|z| !z.is_countable()).map(|z| z.id).collect();
        assert_eq!(uncounted, vec![ZoneId::Pot]);
        assert_eq!(zones[2].display_name, "Player 3");
        assert_eq!(zones[2].index(), Some(2));
        assert_eq!(ZoneId::Player(2).to_string(), "player-2");
    }

    #[test]
    fn containment_is_closed_on_the_edge() {
        let zones = build_zones(4, &ZoneLayoutConfig::default(), 960.0);
        let bank = &zones[5];
        assert!(bank.contains(bank.center + bank.half_size()));
        assert!(!bank.contains(bank.center + bank.half_size() + Vec2::new(0.01, 0.0)));
    }
}
