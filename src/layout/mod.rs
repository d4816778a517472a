//! Board geometry: zone placement and initial chip packing.

pub mod board;
pub mod packer;
pub mod zones;

pub use board::BoardSpace;
pub use packer::{pack, plan_grid, GridPlan, PackingParams};
pub use zones::{build_zones, Zone, ZoneId, ZoneKind};
