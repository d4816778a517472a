//! Zone membership accounting.
//!
//! Each chip keeps the set of countable zones its center currently sits in,
//! and each countable zone keeps a running chip count and point total. Sensor
//! overlap events update both incrementally; `recompute_all` rebuilds them from
//! positions when the event stream cannot be trusted (spawn, resync).

use bevy::log::trace;
use bevy::math::Vec2;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::layout::zones::{Zone, ZoneId};

/// Session-unique chip identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChipId(pub u32);

impl fmt::Display for ChipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chip-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneAggregate {
    pub chip_count: u32,
    pub point_total: u32,
}

impl ZoneAggregate {
    fn add(&mut self, value: u32) {
        self.chip_count += 1;
        self.point_total += value;
    }

    fn remove(&mut self, value: u32) {
        self.chip_count = self.chip_count.saturating_sub(1);
        self.point_total = self.point_total.saturating_sub(value);
    }
}

#[derive(Debug, Clone)]
struct ChipMembership {
    value: u32,
    zones: SmallVec<[ZoneId; 2]>,
}

#[derive(Debug, Clone, Default)]
pub struct MembershipEngine {
    zones: Vec<Zone>,
    chips: HashMap<ChipId, ChipMembership>,
    aggregates: BTreeMap<ZoneId, ZoneAggregate>,
}

impl MembershipEngine {
    /// Tracks the countable subset of `zones` and every chip in `chips`
    /// (id, denomination value). All memberships start empty.
    pub fn new(zones: &[Zone], chips: impl IntoIterator<Item = (ChipId, u32)>) -> Self {
        let zones: Vec<Zone> = zones.iter().filter(|z| z.is_countable()).cloned().collect();
        let aggregates = zones.iter().map(|z| (z.id, ZoneAggregate::default())).collect();
        let chips = chips
            .into_iter()
            .map(|(id, value)| {
                (
                    id,
                    ChipMembership {
                        value,
                        zones: SmallVec::new(),
                    },
                )
            })
            .collect();
        Self {
            zones,
            chips,
            aggregates,
        }
    }

    /// Clears every membership and aggregate, then rebuilds them from chip
    /// centers. Chips without a position end up in no zone; unknown ids are
    /// ignored.
    pub fn recompute_all(&mut self, positions: impl IntoIterator<Item = (ChipId, Vec2)>) {
        for chip in self.chips.values_mut() {
            chip.zones.clear();
        }
        for (id, position) in positions {
            let Some(chip) = self.chips.get_mut(&id) else {
                continue;
            };
            // Last position wins if a chip is listed twice.
            chip.zones.clear();
            chip.zones.extend(
                self.zones
                    .iter()
                    .filter(|z| z.contains(position))
                    .map(|z| z.id),
            );
        }
        self.aggregates = self.derived_aggregates();
    }

    /// Applies one sensor overlap transition. Returns whether anything changed.
    ///
    /// Entering a zone the chip is already in, or leaving one it is not in, is
    /// a no-op, as is any event naming an unknown or uncounted zone or chip.
    pub fn on_overlap_transition(&mut self, zone: ZoneId, chip: ChipId, entering: bool) -> bool {
        let Some(agg) = self.aggregates.get_mut(&zone) else {
            trace!(target: "tally", "ignoring transition for untracked zone {zone}");
            return false;
        };
        let Some(member) = self.chips.get_mut(&chip) else {
            trace!(target: "tally", "ignoring transition for unknown {chip}");
            return false;
        };
        let present = member.zones.iter().position(|z| *z == zone);
        match (entering, present) {
            (true, None) => {
                member.zones.push(zone);
                agg.add(member.value);
                true
            }
            (false, Some(idx)) => {
                member.zones.swap_remove(idx);
                agg.remove(member.value);
                true
            }
            _ => false,
        }
    }

    pub fn aggregate(&self, zone: ZoneId) -> Option<ZoneAggregate> {
        self.aggregates.get(&zone).copied()
    }

    /// Countable zones in id order (players, then bank).
    pub fn aggregates(&self) -> impl Iterator<Item = (ZoneId, ZoneAggregate)> + '_ {
        self.aggregates.iter().map(|(id, agg)| (*id, *agg))
    }

    pub fn total_points(&self) -> u32 {
        self.aggregates.values().map(|a| a.point_total).sum()
    }

    pub fn membership(&self, chip: ChipId) -> Option<&[ZoneId]> {
        self.chips.get(&chip).map(|c| c.zones.as_slice())
    }

    pub fn chip_count(&self) -> usize {
        self.chips.len()
    }

    /// Aggregates recomputed from the membership sets alone.
    pub fn derived_aggregates(&self) -> BTreeMap<ZoneId, ZoneAggregate> {
        let mut out: BTreeMap<ZoneId, ZoneAggregate> = self
            .zones
            .iter()
            .map(|z| (z.id, ZoneAggregate::default()))
            .collect();
        for chip in self.chips.values() {
            for zone in &chip.zones {
                if let Some(agg) = out.get_mut(zone) {
                    agg.add(chip.value);
                }
            }
        }
        out
    }

    /// True when the running aggregates agree with the membership sets.
    pub fn audit(&self) -> bool {
        self.derived_aggregates() == self.aggregates
    }
}
