//! Initial chip placement inside a zone.
//!
//! Chips are laid on a near-square grid centered on the zone. The grid is
//! clamped to what the zone's interior can hold at the minimum spacing; if the
//! chips still do not fit, extra rows spill past the last one and the physics
//! step pushes the overlapping bodies apart.

use bevy::math::Vec2;
use rand::Rng;

use crate::core::config::ChipConfig;

/// Absolute pixel distances used by the packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingParams {
    pub chip_radius: f32,
    /// Preferred center-to-center distance.
    pub stack_spacing: f32,
    /// Spacing never shrinks below this.
    pub min_spacing: f32,
    /// Full jitter span per axis; offsets move by at most half of it.
    pub jitter: f32,
}

impl PackingParams {
    pub fn from_config(chips: &ChipConfig) -> Self {
        Self {
            chip_radius: chips.radius,
            stack_spacing: chips.radius * chips.stack_spacing,
            min_spacing: chips.radius * chips.min_spacing,
            jitter: chips.radius * chips.jitter,
        }
    }

    pub fn without_jitter(self) -> Self {
        Self {
            jitter: 0.0,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    pub columns: usize,
    pub rows: usize,
    pub spacing: Vec2,
}

impl GridPlan {
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Distance between the first and last cell centers of the planned grid.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.spacing.x * (self.columns - 1) as f32,
            self.spacing.y * (self.rows - 1) as f32,
        )
    }
}

fn axis_spacing(cells: usize, usable: f32, params: &PackingParams) -> f32 {
    let spacing = if cells > 1 {
        params.stack_spacing.min(usable / (cells - 1) as f32)
    } else {
        params.stack_spacing
    };
    spacing.max(params.min_spacing)
}

/// Cells per axis that fit the zone interior at the minimum spacing.
fn interior_cells(zone_size: Vec2, params: &PackingParams) -> (usize, usize) {
    let r = params.chip_radius;
    let usable = Vec2::new(
        (zone_size.x - 2.0 * r).max(r),
        (zone_size.y - 2.0 * r).max(r),
    );
    let floor = params.min_spacing.max(f32::EPSILON);
    (
        ((usable.x / floor).floor() as usize + 1).max(1),
        ((usable.y / floor).floor() as usize + 1).max(1),
    )
}

/// How many whole chips fit inside the zone at the minimum spacing.
pub fn interior_capacity(zone_size: Vec2, params: &PackingParams) -> usize {
    let (columns, rows) = interior_cells(zone_size, params);
    columns * rows
}

/// Grid shape for `count` chips in a zone of `zone_size`, or `None` when there
/// is nothing to place.
pub fn plan_grid(zone_size: Vec2, count: usize, params: &PackingParams) -> Option<GridPlan> {
    if count == 0 {
        return None;
    }
    let r = params.chip_radius;
    let usable = Vec2::new(
        (zone_size.x - 2.0 * r).max(r),
        (zone_size.y - 2.0 * r).max(r),
    );
    let (max_columns, max_rows) = interior_cells(zone_size, params);

    let mut columns = ((count as f64).sqrt().ceil() as usize).max(1);
    let mut rows = count.div_ceil(columns).max(1);

    // Clamp columns, then rows, then columns again: a zone much wider than tall
    // (or the reverse) must not end up demanding an impossible single axis.
    if columns > max_columns {
        columns = max_columns;
        rows = count.div_ceil(columns).max(1);
    }
    if rows > max_rows {
        rows = max_rows;
        columns = count.div_ceil(rows).max(1);
    }
    if columns > max_columns {
        columns = max_columns;
        rows = count.div_ceil(columns).max(1);
    }

    Some(GridPlan {
        columns,
        rows,
        spacing: Vec2::new(
            axis_spacing(columns, usable.x, params),
            axis_spacing(rows, usable.y, params),
        ),
    })
}

/// Returns `count` chip-center offsets relative to the zone center, row-major
/// from the top-left cell.
pub fn pack<R: Rng + ?Sized>(
    zone_size: Vec2,
    count: usize,
    params: &PackingParams,
    rng: &mut R,
) -> Vec<Vec2> {
    let Some(plan) = plan_grid(zone_size, count, params) else {
        return Vec::new();
    };
    let start = -plan.extent() * 0.5;
    (0..count)
        .map(|k| {
            let cell = Vec2::new((k % plan.columns) as f32, (k / plan.columns) as f32);
            let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * params.jitter;
            start + cell * plan.spacing + jitter
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn params() -> PackingParams {
        PackingParams::from_config(&ChipConfig::default())
    }

    fn within(offsets: &[Vec2], zone: Vec2, tolerance: f32) -> bool {
        let half = zone * 0.5 + Vec2::splat(tolerance);
        offsets.iter().all(|o| o.x.abs() <= half.x && o.y.abs() <= half.y)
    }

    #[test]
    fn nothing_to_place() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pack(Vec2::new(300.0, 200.0), 0, &params(), &mut rng).is_empty());
        assert!(plan_grid(Vec2::new(300.0, 200.0), 0, &params()).is_none());
    }

    #[test]
    fn roomy_zone_uses_square_grid_at_stack_spacing() {
        let plan = plan_grid(Vec2::new(312.0, 240.0), 21, &params()).unwrap();
        assert_eq!((plan.columns, plan.rows), (5, 5));
        assert!((plan.spacing.x - 28.8).abs() < 1e-4);
        assert!((plan.spacing.y - 28.8).abs() < 1e-4);
    }

    #[test]
    fn returns_requested_count_inside_the_zone() {
        let mut rng = StdRng::seed_from_u64(7);
        for (zone, n) in [
            (Vec2::new(312.0, 240.0), 21),
            (Vec2::new(312.0, 240.0), 84),
            (Vec2::new(416.0, 220.0), 39),
            (Vec2::new(156.0, 120.0), 21),
        ] {
            let offsets = pack(zone, n, &params(), &mut rng);
            assert_eq!(offsets.len(), n);
            assert!(within(&offsets, zone, 0.0), "{zone:?} x{n}");
        }
    }

    #[test]
    fn crowded_zone_shrinks_spacing_to_the_floor() {
        let p = params();
        let zone = Vec2::new(120.0, 120.0);
        let plan = plan_grid(zone, 36, &p).unwrap();
        assert!(plan.spacing.x < p.stack_spacing);
        assert!(plan.spacing.x >= p.min_spacing);
        assert!(plan.extent().x <= zone.x - 2.0 * p.chip_radius + 1e-3);
    }

    #[test]
    fn flat_zone_reclamps_rows_then_columns() {
        let plan = plan_grid(Vec2::new(1000.0, 40.0), 20, &params()).unwrap();
        assert_eq!(plan.rows, 2);
        assert_eq!(plan.columns, 10);
    }

    #[test]
    fn overflow_keeps_filling_rows() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = params().without_jitter();
        let zone = Vec2::new(20.0, 20.0);
        let plan = plan_grid(zone, 5, &p).unwrap();
        assert_eq!((plan.columns, plan.rows), (2, 3));
        assert!(plan.capacity() >= 5);
        // Only two rows fit the interior; the third spills out.
        assert!(plan.extent().y > zone.y - p.chip_radius);
        let offsets = pack(zone, 5, &p, &mut rng);
        assert_eq!(offsets.len(), 5);
        assert!(offsets[4].y > offsets[3].y);
    }

    #[test]
    fn capacity_matches_where_spill_starts() {
        let p = params().without_jitter();
        let zone = Vec2::new(112.8, 86.8);
        let cap = interior_capacity(zone, &p);
        assert_eq!(cap, 24);
        // Whole discs stay inside up to capacity; one more chip adds a row
        // that crosses the interior edge.
        let interior = -p.chip_radius + 1e-3;
        let mut rng = StdRng::seed_from_u64(5);
        assert!(within(&pack(zone, cap, &p, &mut rng), zone, interior));
        let spilled = pack(zone, cap + 1, &p, &mut rng);
        assert!(!within(&spilled, zone, interior));
    }

    #[test]
    fn jitter_is_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let p = params();
        let exact = pack(Vec2::new(312.0, 240.0), 21, &p.without_jitter(), &mut rng);
        let jittered = pack(Vec2::new(312.0, 240.0), 21, &p, &mut rng);
        for (a, b) in exact.iter().zip(&jittered) {
            assert!((*a - *b).abs().max_element() <= p.jitter * 0.5 + 1e-4);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let zone = Vec2::new(416.0, 220.0);
        let a = pack(zone, 39, &params(), &mut StdRng::seed_from_u64(42));
        let b = pack(zone, 39, &params(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
