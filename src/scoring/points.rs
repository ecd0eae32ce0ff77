//! Position→points lookup and the even split across a team.

use crate::scoring::types::RankingTier;

/// Finish positions that award points. Anything else is rejected upstream
/// as a validation error rather than silently scoring zero.
pub const CHECKPOINT_POSITIONS: [u32; 8] = [1, 2, 3, 4, 5, 9, 13, 17];

/// Base (one-star) points per checkpoint position. Other tiers scale this
/// by [`RankingTier::multiplier`].
const BASE_POINTS: [(u32, f64); 8] = [
    (1, 200.0),
    (2, 180.0),
    (3, 160.0),
    (4, 140.0),
    (5, 120.0),
    (9, 100.0),
    (13, 80.0),
    (17, 60.0),
];

/// Total points a team earns for finishing at `position`, or `None` when
/// the position is not a checkpoint.
pub fn points_for_position(tier: RankingTier, position: u32) -> Option<f64> {
    BASE_POINTS
        .iter()
        .find(|(p, _)| *p == position)
        .map(|(_, base)| base * tier.multiplier())
}

/// Even share per player; fractional results are kept, not rounded.
/// `players` must be non-zero (teams always have members).
pub fn player_share(total: f64, players: usize) -> f64 {
    debug_assert!(players > 0);
    total / players as f64
}
