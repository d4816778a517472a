//! Chip face values and the stack recipes built from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Denomination {
    pub value: u32,
    /// `#rrggbb` display color.
    pub color: String,
}

impl Denomination {
    pub fn new(value: u32, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

/// Denomination value -> chip count for one canonical set.
pub type StackTemplate = BTreeMap<u32, u32>;

/// Highest value first. Layout and legends iterate in this order so
/// same-valued chips land in contiguous grid cells.
pub fn descending(denominations: &[Denomination]) -> Vec<&Denomination> {
    let mut out: Vec<&Denomination> = denominations.iter().collect();
    out.sort_by(|a, b| b.value.cmp(&a.value));
    out
}

/// Sum of `value * count` over the denomination table. Template keys that are
/// not in the table are ignored.
pub fn canonical_total(denominations: &[Denomination], template: &StackTemplate) -> u32 {
    denominations.iter().fold(0u32, |sum, d| {
        let count = template.get(&d.value).copied().unwrap_or(0);
        sum.saturating_add(d.value.saturating_mul(count))
    })
}

/// Whole-chip counts for one stack, plus the point total they actually add up to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackCounts {
    pub counts: BTreeMap<u32, u32>,
    pub total: u32,
}

impl StackCounts {
    pub fn get(&self, value: u32) -> u32 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    pub fn chip_count(&self) -> u32 {
        self.counts.values().sum()
    }

    /// The template at its own canonical total (multiplier 1).
    pub fn from_template(denominations: &[Denomination], template: &StackTemplate) -> Self {
        let counts = denominations
            .iter()
            .map(|d| (d.value, template.get(&d.value).copied().unwrap_or(0)))
            .collect();
        Self {
            counts,
            total: canonical_total(denominations, template),
        }
    }
}

/// Scales `template` so the stack is worth `requested_total` points.
///
/// Each denomination's count is rounded to a whole chip and the achieved total
/// is recomputed, so callers can compare `total` against what they asked for.
/// With a quantization step that is a multiple of the canonical total the
/// multiplier is integral and the result is exact. A template with a zero
/// canonical total yields an empty stack.
pub fn scaled_counts(
    denominations: &[Denomination],
    template: &StackTemplate,
    requested_total: u32,
) -> StackCounts {
    let canonical = canonical_total(denominations, template);
    if canonical == 0 {
        return StackCounts {
            counts: denominations.iter().map(|d| (d.value, 0)).collect(),
            total: 0,
        };
    }
    let multiplier = f64::from(requested_total) / f64::from(canonical);
    let counts: BTreeMap<u32, u32> = denominations
        .iter()
        .map(|d| {
            let base = template.get(&d.value).copied().unwrap_or(0);
            (d.value, (f64::from(base) * multiplier).round() as u32)
        })
        .collect();
    let total = denominations.iter().fold(0u32, |sum, d| {
        sum.saturating_add(d.value.saturating_mul(counts.get(&d.value).copied().unwrap_or(0)))
    });
    StackCounts { counts, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StackConfig;

    #[test]
    fn default_templates_have_expected_totals() {
        let s = StackConfig::default();
        assert_eq!(canonical_total(&s.denominations, &s.player_template), 100);
        assert_eq!(canonical_total(&s.denominations, &s.bank_template), 200);
    }

    #[test]
    fn scaling_by_whole_sets_is_exact() {
        let s = StackConfig::default();
        for total in (100..=2000).step_by(100) {
            let counts = scaled_counts(&s.denominations, &s.player_template, total);
            assert_eq!(counts.total, total);
            let sets = total / 100;
            assert_eq!(counts.get(1), 10 * sets);
            assert_eq!(counts.get(5), 4 * sets);
            assert_eq!(counts.get(10), 7 * sets);
            assert_eq!(counts.get(50), 0);
        }
    }

    #[test]
    fn fractional_multiplier_rounds_and_reports_total() {
        let s = StackConfig::default();
        let counts = scaled_counts(&s.denominations, &s.player_template, 150);
        // 15 ones, 6 fives, 10.5 -> 11 tens
        assert_eq!(counts.get(1), 15);
        assert_eq!(counts.get(5), 6);
        assert_eq!(counts.get(10), 11);
        assert_eq!(counts.total, 15 + 30 + 110);
        assert_ne!(counts.total, 150);
    }

    #[test]
    fn empty_template_scales_to_nothing() {
        let s = StackConfig::default();
        let counts = scaled_counts(&s.denominations, &StackTemplate::new(), 500);
        assert_eq!(counts.chip_count(), 0);
        assert_eq!(counts.total, 0);
    }

    #[test]
    fn descending_orders_highest_first() {
        let s = StackConfig::default();
        let values: Vec<u32> = descending(&s.denominations).iter().map(|d| d.value).collect();
        assert_eq!(values, vec![50, 10, 5, 1]);
    }
}
