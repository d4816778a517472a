//! Text shown on the board and in the legend.

use crate::tally::denomination::{descending, Denomination, StackCounts};
use crate::tally::membership::ZoneAggregate;

/// `None` is an uncounted zone.
pub fn zone_count_text(aggregate: Option<ZoneAggregate>) -> String {
    match aggregate {
        Some(a) => format!("{} pts / {} chips", a.point_total, a.chip_count),
        None => "not counted".to_string(),
    }
}

/// One line per denomination, highest first, then the point totals.
pub fn stack_breakdown(
    denominations: &[Denomination],
    player: &StackCounts,
    bank: &StackCounts,
) -> Vec<String> {
    let mut lines: Vec<String> = descending(denominations)
        .into_iter()
        .map(|d| {
            format!(
                "{:>4}-pt chips: {} per player / {} in bank",
                d.value,
                player.get(d.value),
                bank.get(d.value)
            )
        })
        .collect();
    lines.push(format!(
        "Total: {} pts per player / {} pts in bank",
        player.total, bank.total
    ));
    lines
}

pub fn controls_hint() -> &'static str {
    "+/- players  Up/Down total  Enter setup  R reset  T recount"
}
