//! Leaderboard aggregation tests: window, recency cap and tie handling.

use chrono::NaiveDate;
use matchpoint_server::scoring::standings::{build_leaderboard, LedgerRow, PlayerRef};
use uuid::Uuid;

const WINDOW: i64 = 365;
const COUNTED: usize = 6;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn player(n: u128, name: &str) -> PlayerRef {
    PlayerRef {
        id: Uuid::from_u128(n),
        full_name: name.to_string(),
    }
}

fn row(p: &PlayerRef, points: f64, date: NaiveDate) -> LedgerRow {
    LedgerRow {
        player_id: p.id,
        points,
        tournament_date: date,
    }
}

#[test]
fn empty_input_gives_empty_leaderboard() {
    let board = build_leaderboard(&[], &[], day(2024, 6, 1), WINDOW, COUNTED);
    assert!(board.is_empty());
}

#[test]
fn player_without_results_is_listed_with_zero() {
    let anna = player(1, "Anna Nowak");
    let board = build_leaderboard(&[anna], &[], day(2024, 6, 1), WINDOW, COUNTED);

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[0].points, 0.0);
    assert_eq!(board[0].full_name, "Anna Nowak");
}

#[test]
fn results_older_than_the_window_do_not_count() {
    let jan = player(1, "Jan Kowalski");
    let reference = day(2024, 6, 1);
    let ledger = vec![
        row(&jan, 100.0, day(2023, 6, 1)), // one day past the window
        row(&jan, 40.0, day(2023, 7, 1)),
    ];

    let board = build_leaderboard(&[jan.clone()], &ledger, reference, WINDOW, COUNTED);
    assert_eq!(board[0].points, 40.0);
}

#[test]
fn only_the_six_most_recent_results_count() {
    let jan = player(1, "Jan Kowalski");
    // Two early high-scoring tournaments, then six quiet months.
    let mut ledger = vec![
        row(&jan, 100.0, day(2024, 1, 1)),
        row(&jan, 100.0, day(2024, 1, 2)),
    ];
    for month in 2..8 {
        ledger.push(row(&jan, 10.0, day(2024, month, 1)));
    }

    let board = build_leaderboard(&[jan.clone()], &ledger, day(2024, 8, 1), WINDOW, COUNTED);
    assert_eq!(board[0].points, 60.0);
}

#[test]
fn scores_sort_descending_with_sequential_ranks() {
    let a = player(1, "A");
    let b = player(2, "B");
    let c = player(3, "C");
    let ledger = vec![
        row(&a, 100.0, day(2024, 5, 1)),
        row(&b, 150.0, day(2024, 5, 1)),
        row(&c, 150.0, day(2024, 5, 1)),
    ];

    let board = build_leaderboard(
        &[a.clone(), b.clone(), c.clone()],
        &ledger,
        day(2024, 6, 1),
        WINDOW,
        COUNTED,
    );

    assert_eq!(board.len(), 3);
    assert_eq!((board[0].rank, board[0].points), (1, 150.0));
    assert_eq!((board[1].rank, board[1].points), (2, 150.0));
    assert_eq!((board[2].rank, board[2].points), (3, 100.0));
}

#[test]
fn ties_break_by_player_id_ascending() {
    let low = player(1, "Low Id");
    let high = player(2, "High Id");
    let ledger = vec![
        row(&high, 80.0, day(2024, 5, 1)),
        row(&low, 80.0, day(2024, 5, 2)),
    ];

    // Input order must not matter for the tie.
    let board = build_leaderboard(
        &[high.clone(), low.clone()],
        &ledger,
        day(2024, 6, 1),
        WINDOW,
        COUNTED,
    );

    assert_eq!(board[0].player_id, low.id);
    assert_eq!(board[1].player_id, high.id);
}

#[test]
fn totals_keep_fractional_shares() {
    let jan = player(1, "Jan Kowalski");
    let ledger = vec![
        row(&jan, 37.5, day(2024, 5, 1)),
        row(&jan, 75.0, day(2024, 5, 2)),
    ];

    let board = build_leaderboard(&[jan.clone()], &ledger, day(2024, 6, 1), WINDOW, COUNTED);
    assert_eq!(board[0].points, 112.5);
}

#[test]
fn window_and_cap_are_parameters() {
    let jan = player(1, "Jan Kowalski");
    let ledger = vec![
        row(&jan, 10.0, day(2024, 5, 1)),
        row(&jan, 20.0, day(2024, 5, 10)),
        row(&jan, 30.0, day(2024, 5, 20)),
    ];

    // Cap of one: only the newest result counts.
    let board = build_leaderboard(&[jan.clone()], &ledger, day(2024, 6, 1), WINDOW, 1);
    assert_eq!(board[0].points, 30.0);

    // A 10-day window keeps only the 2024-05-20 result too.
    let board = build_leaderboard(&[jan.clone()], &ledger, day(2024, 5, 25), 10, COUNTED);
    assert_eq!(board[0].points, 30.0);
}
