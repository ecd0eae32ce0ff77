use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::models::RankingSnapshotRow;

const COLUMNS: &str = "id, snapshot_date, gender, standings, created_at";

/// Replace-or-insert the snapshot for (date, gender). Atomic per key, so
/// concurrent regenerations cannot leave a partial snapshot behind.
pub async fn upsert_snapshot(
    db: &PgPool,
    date: NaiveDate,
    gender: &str,
    standings: &serde_json::Value,
) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO ranking_snapshots (snapshot_date, gender, standings)
           VALUES ($1, $2, $3)
           ON CONFLICT (snapshot_date, gender)
           DO UPDATE SET standings = EXCLUDED.standings, created_at = NOW()"#,
    )
    .bind(date)
    .bind(gender)
    .bind(standings)
    .execute(db)
    .await
    .context("upserting ranking snapshot")?;
    Ok(())
}

pub async fn latest_for_gender(db: &PgPool, gender: &str) -> Result<Option<RankingSnapshotRow>> {
    sqlx::query_as::<_, RankingSnapshotRow>(&format!(
        "SELECT {COLUMNS}
           FROM ranking_snapshots
          WHERE gender = $1
          ORDER BY snapshot_date DESC
          LIMIT 1"
    ))
    .bind(gender)
    .fetch_optional(db)
    .await
    .context("fetching latest snapshot")
}

/// Historical listing, optionally filtered by exact date and/or gender.
pub async fn list(
    db: &PgPool,
    date: Option<NaiveDate>,
    gender: Option<&str>,
) -> Result<Vec<RankingSnapshotRow>> {
    sqlx::query_as::<_, RankingSnapshotRow>(&format!(
        "SELECT {COLUMNS}
           FROM ranking_snapshots
          WHERE ($1::date IS NULL OR snapshot_date = $1)
            AND ($2::text IS NULL OR gender = $2)
          ORDER BY snapshot_date DESC, gender"
    ))
    .bind(date)
    .bind(gender)
    .fetch_all(db)
    .await
    .context("listing snapshots")
}
