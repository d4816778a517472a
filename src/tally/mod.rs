//! Chip values and per-zone accounting.

pub mod denomination;
pub mod membership;

pub use denomination::{canonical_total, scaled_counts, Denomination, StackCounts, StackTemplate};
pub use membership::{ChipId, MembershipEngine, ZoneAggregate};
