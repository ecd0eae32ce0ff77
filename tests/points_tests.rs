//! Unit tests for the position→points table and share splitting.

use matchpoint_server::scoring::points::{player_share, points_for_position, CHECKPOINT_POSITIONS};
use matchpoint_server::scoring::types::RankingTier;

const ALL_TIERS: [RankingTier; 4] = [
    RankingTier::NoneRank,
    RankingTier::OneStar,
    RankingTier::TwoStar,
    RankingTier::ThreeStar,
];

#[test]
fn one_star_first_place_splits_to_100_each() {
    let total = points_for_position(RankingTier::OneStar, 1).unwrap();
    assert_eq!(total, 200.0);
    assert_eq!(player_share(total, 2), 100.0);
}

#[test]
fn points_never_increase_with_worse_position() {
    for tier in ALL_TIERS {
        let mut prev = f64::INFINITY;
        for pos in CHECKPOINT_POSITIONS {
            let pts = points_for_position(tier, pos).unwrap();
            assert!(pts >= 0.0);
            assert!(pts <= prev, "{tier:?} position {pos} pays more than the one above");
            prev = pts;
        }
    }
}

#[test]
fn shares_sum_back_to_the_position_value() {
    for tier in ALL_TIERS {
        for pos in CHECKPOINT_POSITIONS {
            let total = points_for_position(tier, pos).unwrap();
            let share = player_share(total, 2);
            assert_eq!(share * 2.0, total);
        }
    }
}

#[test]
fn tiers_scale_the_base_table() {
    for pos in CHECKPOINT_POSITIONS {
        let base = points_for_position(RankingTier::OneStar, pos).unwrap();
        assert_eq!(points_for_position(RankingTier::NoneRank, pos), Some(0.0));
        assert_eq!(points_for_position(RankingTier::TwoStar, pos), Some(base * 1.5));
        assert_eq!(points_for_position(RankingTier::ThreeStar, pos), Some(base * 2.0));
    }
}

#[test]
fn positions_off_the_table_are_rejected() {
    for pos in [0, 6, 7, 8, 10, 16, 18, 100] {
        for tier in ALL_TIERS {
            assert!(points_for_position(tier, pos).is_none());
        }
    }
}

#[test]
fn fractional_shares_are_not_rounded() {
    // Two-star 9th place pays 150 total, i.e. 75 each; an odd split like
    // three-star 17th over 2 players must keep its exact value too.
    let total = points_for_position(RankingTier::TwoStar, 9).unwrap();
    assert_eq!(player_share(total, 2), 75.0);
    assert_eq!(player_share(75.0, 2), 37.5);
}
