//! Leaderboard aggregation over the result ledger.
//!
//! The reference date is an explicit input so regeneration is deterministic
//! and testable; callers pass "today" when serving requests.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal player projection fed into the aggregation.
#[derive(Debug, Clone)]
pub struct PlayerRef {
    pub id: Uuid,
    pub full_name: String,
}

/// One ledger row, reduced to what the aggregation needs.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub player_id: Uuid,
    pub points: f64,
    pub tournament_date: NaiveDate,
}

/// One line of a persisted leaderboard snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub rank: u32,
    pub player_id: Uuid,
    pub full_name: String,
    pub points: f64,
}

/// Builds the ordered leaderboard for one gender group.
///
/// Every player in `players` appears in the output, scoring the sum of
/// their `max_counted` most recent ledger rows dated within the trailing
/// `window_days` ending at `reference`. Ties are broken by player id
/// ascending; ranks run 1..N in sorted order.
pub fn build_leaderboard(
    players: &[PlayerRef],
    ledger: &[LedgerRow],
    reference: NaiveDate,
    window_days: i64,
    max_counted: usize,
) -> Vec<RankEntry> {
    let cutoff = reference - Duration::days(window_days);

    let mut totals: Vec<(&PlayerRef, f64)> = players
        .iter()
        .map(|player| {
            let mut recent: Vec<&LedgerRow> = ledger
                .iter()
                .filter(|row| row.player_id == player.id && row.tournament_date >= cutoff)
                .collect();
            recent.sort_by(|a, b| b.tournament_date.cmp(&a.tournament_date));

            let total = recent
                .iter()
                .take(max_counted)
                .map(|row| row.points)
                .sum::<f64>();
            (player, total)
        })
        .collect();

    totals.sort_by(|(pa, ta), (pb, tb)| {
        tb.partial_cmp(ta)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| pa.id.cmp(&pb.id))
    });

    totals
        .into_iter()
        .enumerate()
        .map(|(idx, (player, total))| RankEntry {
            rank: idx as u32 + 1,
            player_id: player.id,
            full_name: player.full_name.clone(),
            points: total,
        })
        .collect()
}
