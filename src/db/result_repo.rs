use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::ResultEntryRow;
use crate::scoring::standings::LedgerRow;

/// One pending ledger insert. The ledger is append-only: awarding twice
/// records twice; dedup is the caller's concern.
#[derive(Debug)]
pub struct NewResultEntry {
    pub player_id: Uuid,
    pub tournament_id: Uuid,
    pub team_id: Uuid,
    pub points_awarded: f64,
    pub placement: i32,
    pub tournament_date: NaiveDate,
}

/// All-or-nothing insert of one award batch.
pub async fn insert_batch(db: &PgPool, entries: &[NewResultEntry]) -> Result<()> {
    let mut tx = db.begin().await?;

    for e in entries {
        sqlx::query(
            r#"INSERT INTO result_entries
                   (player_id, tournament_id, team_id, points_awarded, placement, tournament_date)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(e.player_id)
        .bind(e.tournament_id)
        .bind(e.team_id)
        .bind(e.points_awarded)
        .bind(e.placement)
        .bind(e.tournament_date)
        .execute(&mut *tx)
        .await
        .context("inserting result entry")?;
    }

    tx.commit().await?;
    Ok(())
}

/// Ledger rows for ranked players of one gender, restricted to the
/// trailing window. The per-player recency cap is applied downstream.
pub async fn ledger_since(db: &PgPool, gender: &str, cutoff: NaiveDate) -> Result<Vec<LedgerRow>> {
    let rows = sqlx::query_as::<_, (Uuid, f64, NaiveDate)>(
        r#"SELECT r.player_id, r.points_awarded, r.tournament_date
             FROM result_entries r
             JOIN users u ON u.id = r.player_id
            WHERE u.role = 'PLAYER'
              AND u.gender = $1
              AND r.tournament_date >= $2"#,
    )
    .bind(gender)
    .bind(cutoff)
    .fetch_all(db)
    .await
    .context("loading result ledger")?;

    Ok(rows
        .into_iter()
        .map(|(player_id, points, tournament_date)| LedgerRow {
            player_id,
            points,
            tournament_date,
        })
        .collect())
}

pub async fn list_for_tournament(db: &PgPool, tournament: Uuid) -> Result<Vec<ResultEntryRow>> {
    sqlx::query_as::<_, ResultEntryRow>(
        r#"SELECT id, player_id, tournament_id, team_id, points_awarded, placement,
                  tournament_date, created_at
             FROM result_entries
            WHERE tournament_id = $1
            ORDER BY placement, created_at"#,
    )
    .bind(tournament)
    .fetch_all(db)
    .await
    .context("listing tournament results")
}
